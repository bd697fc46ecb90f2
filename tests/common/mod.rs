//! Test doubles for the converter's collaborators.
#![allow(dead_code)]

use asciidocext_lib::asciidoc::{ExecutableLocator, ExecutorError, ProcessOutput, ProcessRunner, SettingsProvider};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

/// Locator that only knows the executables it was given.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLocator {
    found: HashMap<String, PathBuf>,
}

impl ScriptedLocator {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, path: &str) -> Self {
        self.found.insert(name.to_string(), PathBuf::from(path));
        self
    }
}

impl ExecutableLocator for ScriptedLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.found.get(name).cloned()
    }
}

/// One recorded process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub input: Vec<u8>,
}

/// What a [`RecordingRunner`] does when called.
#[derive(Debug, Clone)]
pub enum Response {
    /// Write the input back on stdout.
    Echo,
    /// Return a fixed output.
    Output(ProcessOutput),
    /// Fail to spawn.
    SpawnError,
}

/// Runner that records calls instead of spawning processes.
#[derive(Debug, Clone)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<Call>>>,
    response: Response,
}

impl RecordingRunner {
    pub fn new(response: Response) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub fn echo() -> Self {
        Self::new(Response::Echo)
    }

    pub fn output(stdout: &[u8], stderr: &[u8], exit_code: Option<i32>) -> Self {
        Self::new(Response::Output(ProcessOutput {
            stdout: stdout.to_vec(),
            stderr: stderr.to_vec(),
            exit_code,
        }))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, program: &Path, args: &[String], input: &[u8]) -> Result<ProcessOutput, ExecutorError> {
        self.calls.lock().unwrap().push(Call {
            program: program.to_path_buf(),
            args: args.to_vec(),
            input: input.to_vec(),
        });

        match &self.response {
            Response::Echo => Ok(ProcessOutput {
                stdout: input.to_vec(),
                stderr: Vec::new(),
                exit_code: Some(0),
            }),
            Response::Output(output) => Ok(output.clone()),
            Response::SpawnError => Err(ExecutorError::Spawn {
                program: program.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            }),
        }
    }
}

/// Settings that count how often they are consulted.
#[derive(Debug, Clone, Default)]
pub struct CountingSettings {
    values: HashMap<String, String>,
    lookups: Arc<AtomicUsize>,
}

impl CountingSettings {
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl SettingsProvider for CountingSettings {
    fn get_string(&self, key: &str) -> String {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.values.get(key).cloned().unwrap_or_default()
    }
}

/// Global logger that keeps every record for inspection.
pub struct CapturingLogger {
    records: Mutex<Vec<(log::Level, String)>>,
}

impl log::Log for CapturingLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

impl CapturingLogger {
    /// Install the logger (once per test binary) and clear previous records.
    pub fn install() -> &'static CapturingLogger {
        static LOGGER: OnceLock<CapturingLogger> = OnceLock::new();
        let logger = LOGGER.get_or_init(|| CapturingLogger {
            records: Mutex::new(Vec::new()),
        });
        if log::set_logger(logger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
        logger.records.lock().unwrap().clear();
        logger
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: log::Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(log::Level::Error)
    }
}
