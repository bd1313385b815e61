// src/observer/mod.rs

//! Observer contracts for command execution.
//!
//! The executor never talks to a concrete front-end. It depends only on:
//! - [`Observer`]: the long-lived consumer bound to the executor (transcript
//!   lines, status text, progress indicator, error dialog).
//! - [`OutputSink`]: an optional per-command consumer that receives that one
//!   command's output lines and its finalize marker.
//!
//! Both are driven exclusively from the notification dispatcher task (see
//! [`crate::exec::dispatch`]), never from the worker that runs processes.
//!
//! - [`terminal`] holds the observer used by the `apkbench` binary.
//! - [`sinks`] holds reusable sink implementations.

pub mod sinks;
pub mod terminal;

pub use sinks::FileSink;
pub use terminal::TerminalObserver;

/// State of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Busy, with no known completion fraction.
    Indeterminate,
    /// Completion fraction in `0.0..=1.0`.
    Fraction(f64),
}

/// Capability set the executor needs from a front-end.
///
/// Methods take `&mut self`: the observer is moved into the dispatcher task,
/// which is its only caller.
pub trait Observer: Send {
    /// Append one line of transcript text (no trailing newline).
    fn append(&mut self, line: &str);

    /// Replace the status text.
    fn set_status(&mut self, text: &str);

    /// Show or hide the progress indicator.
    fn set_progress_visible(&mut self, visible: bool);

    /// Update the progress indicator.
    fn set_progress(&mut self, progress: Progress);

    /// Surface an error that needs the user's attention.
    ///
    /// Defaults to appending it to the transcript.
    fn show_error(&mut self, message: &str) {
        self.append(&format!("[ERROR] {message}"));
    }
}

/// Per-command output consumer.
pub trait OutputSink: Send {
    /// Receive one chunk of output (a single line, no trailing newline).
    fn accept(&mut self, chunk: &str);
}

impl<F> OutputSink for F
where
    F: FnMut(&str) + Send,
{
    fn accept(&mut self, chunk: &str) {
        self(chunk)
    }
}
