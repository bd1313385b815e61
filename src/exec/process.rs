// src/exec/process.rs

//! Spawning a single external process and reading its merged output.
//!
//! Unix only: the merged stream is one pipe shared by stdout and stderr.

use std::io;
use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::unix::pipe;
use tokio::process::{Child, Command};
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("empty command line")]
    EmptyArgv,

    /// The binary could not be started at all (missing, not executable, ...).
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Reading output from, or waiting on, a started process failed.
    #[error("I/O error while running `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Starts processes with stdout and stderr captured as one line stream.
///
/// Both streams of the child are attached to the write end of a single pipe,
/// so lines come out in the order the process wrote them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Spawn `argv[0]` with the remaining arguments.
    ///
    /// stdin is closed so a tool that prompts sees EOF instead of hanging.
    /// Must be called from within a Tokio runtime.
    pub fn spawn(argv: &[String]) -> Result<RunningProcess, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyArgv)?;
        let io_error = |source: io::Error| ProcessError::Io {
            program: program.clone(),
            source,
        };

        let (writer, reader) = pipe::pipe().map_err(io_error)?;
        let stdout_fd = writer.into_blocking_fd().map_err(io_error)?;
        let stderr_fd = stdout_fd.try_clone().map_err(io_error)?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_fd))
            .stderr(Stdio::from(stderr_fd))
            .kill_on_drop(true);

        let spawned = command.spawn();
        // The command still holds the parent's copies of the write end; the
        // reader only sees EOF once they are closed.
        drop(command);

        let child = spawned.map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

        debug!(program = %program, pid = ?child.id(), "process spawned");

        Ok(RunningProcess {
            program: program.clone(),
            child,
            output: Some(LineReader::new(reader)),
        })
    }
}

/// A started process.
///
/// Read lines with [`next_line`](Self::next_line) until it returns `None`,
/// then collect the exit code with [`wait`](Self::wait). Dropping it early
/// kills the child.
#[derive(Debug)]
pub struct RunningProcess {
    program: String,
    child: Child,
    /// `None` once the pipe reported EOF.
    output: Option<LineReader>,
}

impl RunningProcess {
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Next line of merged stdout/stderr, in write order.
    ///
    /// Returns `Ok(None)` once every writer of the pipe has closed it.
    pub async fn next_line(&mut self) -> Result<Option<String>, ProcessError> {
        let Some(output) = self.output.as_mut() else {
            return Ok(None);
        };

        let line = output.next_line().await.map_err(|source| ProcessError::Io {
            program: self.program.clone(),
            source,
        })?;

        if line.is_none() {
            debug!(program = %self.program, "output pipe closed");
            self.output = None;
        }
        Ok(line)
    }

    /// Wait for the process to exit and return its exit code.
    ///
    /// A process terminated by a signal reports `-1`.
    pub async fn wait(mut self) -> Result<i32, ProcessError> {
        let status = self.child.wait().await.map_err(|source| ProcessError::Io {
            program: self.program.clone(),
            source,
        })?;

        Ok(status.code().unwrap_or(-1))
    }
}

/// Line reader over the read end of the output pipe.
///
/// Keeps partial lines in a persistent buffer and decodes lossily, so
/// non-UTF-8 output is not an error.
struct LineReader {
    reader: BufReader<pipe::Receiver>,
    buf: Vec<u8>,
}

impl std::fmt::Debug for LineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("buffered", &self.buf.len())
            .finish_non_exhaustive()
    }
}

impl LineReader {
    fn new(receiver: pipe::Receiver) -> Self {
        Self {
            reader: BufReader::new(receiver),
            buf: Vec::new(),
        }
    }

    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.reader.read_until(b'\n', &mut self.buf).await?;

        if self.buf.is_empty() {
            return Ok(None);
        }

        let mut line = std::mem::take(&mut self.buf);
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}
