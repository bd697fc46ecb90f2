//! Parallel file conversion.
//!
//! Each document converts independently, so files are spread across a rayon
//! pool when the `parallel` feature is enabled.

use crate::asciidoc::AsciidocConverter;
use crate::file_processor::{ConversionJob, FileError, convert_file};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;

/// Configuration for parallel execution
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Enable/disable parallel execution
    pub enabled: bool,
    /// Number of threads to use (None = auto-detect)
    pub thread_count: Option<usize>,
    /// Minimum number of files to enable parallel execution
    pub min_file_count: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thread_count: None, // Auto-detect based on CPU cores
            min_file_count: 2,  // At least 2 files to benefit from parallelization
        }
    }
}

impl ParallelConfig {
    /// Configuration for a `--jobs` value: one job runs sequentially, more
    /// jobs size the pool, and `None` keeps the defaults.
    pub fn with_jobs(jobs: Option<usize>) -> Self {
        match jobs {
            Some(0) | None => Self::default(),
            Some(1) => Self {
                enabled: false,
                ..Self::default()
            },
            Some(count) => Self {
                thread_count: Some(count),
                ..Self::default()
            },
        }
    }
}

/// File-level parallel processing for multiple documents
pub struct FileParallelProcessor {
    config: ParallelConfig,
}

impl FileParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(ParallelConfig::default())
    }

    /// Convert every job, returning one result per job in input order.
    pub fn process_files(
        &self,
        converter: &AsciidocConverter,
        jobs: &[ConversionJob],
    ) -> Vec<Result<(), FileError>> {
        let run = |job: &ConversionJob| {
            let start = Instant::now();
            let result = convert_file(converter, job);
            let duration = start.elapsed();

            if duration.as_millis() > 1000 {
                log::debug!("Document {} took {:?}", job.ctx.document_name, duration);
            }
            result
        };

        if !self.should_use_parallel(jobs) {
            return jobs.iter().map(run).collect();
        }

        #[cfg(feature = "parallel")]
        {
            if let Some(thread_count) = self.config.thread_count {
                match rayon::ThreadPoolBuilder::new().num_threads(thread_count).build() {
                    Ok(pool) => return pool.install(|| jobs.par_iter().map(run).collect()),
                    Err(e) => log::warn!("Failed to build a pool of {thread_count} threads: {e}"),
                }
            }

            jobs.par_iter().map(run).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            jobs.iter().map(run).collect()
        }
    }

    /// Determine if parallel processing should be used
    pub fn should_use_parallel(&self, jobs: &[ConversionJob]) -> bool {
        self.config.enabled && cfg!(feature = "parallel") && jobs.len() >= self.config.min_file_count
    }
}
