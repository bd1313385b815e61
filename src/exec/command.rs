// src/exec/command.rs

use std::fmt;

use crate::observer::OutputSink;

/// A request to run one external process.
///
/// Built once and handed to the executor by value; nothing about it can be
/// changed after submission.
///
/// A command may carry a follow-up (see [`and_then`](Command::and_then)). The
/// follow-up runs right after it, and only if it exited with code 0.
pub struct Command {
    argv: Vec<String>,
    label: String,
    sink: Option<Box<dyn OutputSink>>,
    follow_up: Option<Box<Command>>,
}

impl Command {
    /// `argv[0]` is the binary (or interpreter) to start; `label` is the
    /// status text shown while the command runs.
    pub fn new<I, S>(argv: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            label: label.into(),
            sink: None,
            follow_up: None,
        }
    }

    /// Route this command's output (and its finalize marker) to `sink` as
    /// well as to the executor's observer.
    pub fn with_sink(mut self, sink: impl OutputSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Chain `next` to run after this command (after the end of the chain if
    /// one is already attached). Each step runs only when every step before
    /// it succeeded.
    pub fn and_then(mut self, next: Command) -> Self {
        self.follow_up = Some(Box::new(match self.follow_up.take() {
            Some(existing) => existing.and_then(next),
            None => next,
        }));
        self
    }

    pub fn follow_up(&self) -> Option<&Command> {
        self.follow_up.as_deref()
    }

    /// Number of commands in this chain, this one included.
    pub fn chain_len(&self) -> usize {
        1 + self.follow_up.as_ref().map_or(0, |next| next.chain_len())
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// The argv as announced in the transcript: arguments joined by spaces.
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }

    pub(crate) fn take_follow_up(&mut self) -> Option<Command> {
        self.follow_up.take().map(|next| *next)
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, String, Option<Box<dyn OutputSink>>) {
        (self.argv, self.label, self.sink)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("argv", &self.argv)
            .field("label", &self.label)
            .field("has_sink", &self.sink.is_some())
            .field("follow_up", &self.follow_up)
            .finish()
    }
}

/// How a single command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The process ran and exited with this code (`-1` if it was killed by a
    /// signal and has no code).
    Exited(i32),
    /// The process could not be started, or reading its output failed.
    LaunchFailed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Exited(0))
    }
}

/// Tally of what the worker did over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Queued commands dropped because of [`shutdown`](super::CommandExecutor::shutdown).
    pub abandoned: usize,
    /// Follow-ups never started because an earlier step of their chain failed.
    pub skipped: usize,
}

impl ExecutionSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn executed(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.abandoned == 0 && self.skipped == 0
    }
}
