//! Running the renderer as a child process.
//!
//! The document is written to the child's stdin while two reader threads drain
//! stdout and stderr, so a renderer that produces more output than a pipe buffer
//! holds cannot deadlock against us. There is no timeout.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Raw standard error.
    pub stderr: Vec<u8>,
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Non-empty, trimmed lines of standard error.
    pub fn stderr_lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.stderr)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Error while running an external process.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Failed to spawn '{}': {source}", .program.display())]
    Spawn { program: PathBuf, source: io::Error },

    #[error("Failed to write to stdin of '{}': {source}", .program.display())]
    Stdin { program: PathBuf, source: io::Error },

    #[error("Failed to read output of '{}': {source}", .program.display())]
    Output { program: PathBuf, source: io::Error },

    #[error("Failed to wait for '{}': {source}", .program.display())]
    Wait { program: PathBuf, source: io::Error },

    #[error("Output reader thread for '{}' panicked", .program.display())]
    ReaderPanicked { program: PathBuf },
}

/// Runs a program with arguments, feeding it `input` and capturing its output.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &Path, args: &[String], input: &[u8]) -> Result<ProcessOutput, ExecutorError>;
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl ProcessRunner for CommandRunner {
    fn run(&self, program: &Path, args: &[String], input: &[u8]) -> Result<ProcessOutput, ExecutorError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecutorError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let stdout_handle = child.stdout.take().map(|stdout| thread::spawn(move || read_pipe(stdout)));
        let stderr_handle = child.stderr.take().map(|stderr| thread::spawn(move || read_pipe(stderr)));

        // Dropping stdin at the end of this block closes the pipe.
        if let Some(mut stdin) = child.stdin.take()
            && let Err(source) = stdin.write_all(input)
            // A renderer may exit before reading all of its input.
            && source.kind() != io::ErrorKind::BrokenPipe
        {
            drop(stdin);
            reap(&mut child);
            let _ = join_reader(stdout_handle);
            let _ = join_reader(stderr_handle);
            return Err(ExecutorError::Stdin {
                program: program.to_path_buf(),
                source,
            });
        }

        let status = child.wait().map_err(|source| ExecutorError::Wait {
            program: program.to_path_buf(),
            source,
        });
        let stdout = join_reader(stdout_handle);
        let stderr = join_reader(stderr_handle);
        let status = status?;

        let to_error = |err: ReaderError| match err {
            ReaderError::Io(source) => ExecutorError::Output {
                program: program.to_path_buf(),
                source,
            },
            ReaderError::Panicked => ExecutorError::ReaderPanicked {
                program: program.to_path_buf(),
            },
        };

        Ok(ProcessOutput {
            stdout: stdout.map_err(to_error)?,
            stderr: stderr.map_err(to_error)?,
            exit_code: status.code(),
        })
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

enum ReaderError {
    Io(io::Error),
    Panicked,
}

fn read_pipe<R: Read>(mut pipe: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}

fn join_reader(handle: Option<thread::JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>, ReaderError> {
    match handle {
        Some(handle) => match handle.join() {
            Ok(res) => res.map_err(ReaderError::Io),
            Err(_) => Err(ReaderError::Panicked),
        },
        None => Ok(Vec::new()),
    }
}
