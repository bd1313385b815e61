// src/observer/terminal.rs

use std::io::{self, Write};

use tracing::{debug, info};

use super::{Observer, Progress};

/// Observer that renders notifications on the terminal.
///
/// - transcript lines go to stdout, untouched, so they can be piped
/// - status changes are logged at `info`
/// - progress changes are logged at `debug`
/// - errors go to stderr
#[derive(Debug, Default)]
pub struct TerminalObserver {
    last_status: Option<String>,
}

impl TerminalObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent status text, if any was set.
    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }
}

impl Observer for TerminalObserver {
    fn append(&mut self, line: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout (e.g. `| head`) must not take the dispatcher down.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }

    fn set_status(&mut self, text: &str) {
        info!(status = %text, "status");
        self.last_status = Some(text.to_string());
    }

    fn set_progress_visible(&mut self, visible: bool) {
        debug!(visible, "progress visibility");
    }

    fn set_progress(&mut self, progress: Progress) {
        match progress {
            Progress::Indeterminate => debug!("progress: working"),
            Progress::Fraction(f) => debug!("progress: {:.0}%", f * 100.0),
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}
