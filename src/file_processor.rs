//! Converting AsciiDoc files on disk.
//!
//! Maps source files to [`DocumentContext`]s and output paths, and runs a single
//! file through the converter.

use crate::asciidoc::{AsciidocConverter, ConvertError, DocumentContext};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Extension given to rendered documents.
pub const OUTPUT_EXTENSION: &str = "html";

/// One source file and where its HTML goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub ctx: DocumentContext,
    pub output: PathBuf,
}

/// Error converting a single file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to convert {}: {source}", .path.display())]
    Convert { path: PathBuf, source: ConvertError },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Logical document name of `source` relative to `content_dir`, with `/` separators.
///
/// The name only ever holds plain path segments, so joining it to an output
/// directory stays inside that directory. Files outside `content_dir`, or
/// whose relative path climbs with `..`, are named by their file name alone.
pub fn document_name(source: &Path, content_dir: &Path) -> String {
    let source = without_cur_dir(source);
    let content_dir = without_cur_dir(content_dir);

    let segments = source.strip_prefix(&content_dir).ok().and_then(|relative| {
        relative
            .components()
            .map(|c| match c {
                Component::Normal(segment) => Some(segment.to_string_lossy()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
    });

    match segments {
        Some(segments) if !segments.is_empty() => segments.join("/"),
        _ => source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components().filter(|c| *c != Component::CurDir).collect()
}

/// Plan a conversion for each source file.
///
/// With an `output_dir`, HTML mirrors the document name beneath it; otherwise
/// it is written next to the source.
pub fn plan_jobs(sources: &[PathBuf], content_dir: &Path, output_dir: Option<&Path>) -> Vec<ConversionJob> {
    sources
        .iter()
        .map(|source| {
            let name = document_name(source, content_dir);
            let output = match output_dir {
                Some(dir) => dir.join(&name).with_extension(OUTPUT_EXTENSION),
                None => source.with_extension(OUTPUT_EXTENSION),
            };
            ConversionJob {
                ctx: DocumentContext::new(name, source.clone()),
                output,
            }
        })
        .collect()
}

/// Read, convert and write one file.
pub fn convert_file(converter: &AsciidocConverter, job: &ConversionJob) -> Result<(), FileError> {
    let source = &job.ctx.filename;
    let src = fs::read(source).map_err(|e| FileError::Read {
        path: source.clone(),
        source: e,
    })?;

    let html = converter.convert(&src, &job.ctx).map_err(|e| FileError::Convert {
        path: source.clone(),
        source: e,
    })?;

    if let Some(parent) = job.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| FileError::Write {
            path: job.output.clone(),
            source: e,
        })?;
    }
    fs::write(&job.output, html).map_err(|e| FileError::Write {
        path: job.output.clone(),
        source: e,
    })?;

    log::debug!("Wrote {}", job.output.display());
    Ok(())
}
