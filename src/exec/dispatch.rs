// src/exec/dispatch.rs

//! The single ordered notification channel.
//!
//! The worker never touches the observer. It pushes [`Notification`]s into an
//! unbounded channel; one dispatcher task drains it and performs every
//! observer and sink call. Because there is exactly one consumer reading a
//! FIFO channel, notifications are delivered in the order they were produced,
//! and everything belonging to command N is delivered before command N+1's
//! announce.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::exec::command::Outcome;
use crate::observer::{Observer, OutputSink, Progress};

pub const SUCCESS_STATUS: &str = "Command completed successfully";
pub const LAUNCH_ERROR_STATUS: &str = "Error executing command";
pub const SEPARATOR_WIDTH: usize = 80;

/// Events flowing from the worker to the dispatcher.
pub enum Notification {
    /// A command is about to be spawned. Its sink (if any) becomes the
    /// current sink until the matching `Finished`.
    Started {
        label: String,
        command_line: String,
        sink: Option<Box<dyn OutputSink>>,
    },
    /// One line of merged stdout/stderr from the running command.
    Output(String),
    /// The running command reached its terminal state.
    Finished(Outcome),
    /// An error raised outside of any command (e.g. form validation).
    ///
    /// If it arrives while a command is between `Started` and `Finished`, it
    /// is held back and shown right after that command's separator.
    Error(String),
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::Started {
                label,
                command_line,
                sink,
            } => f
                .debug_struct("Started")
                .field("label", label)
                .field("command_line", command_line)
                .field("has_sink", &sink.is_some())
                .finish(),
            Notification::Output(line) => f.debug_tuple("Output").field(line).finish(),
            Notification::Finished(outcome) => f.debug_tuple("Finished").field(outcome).finish(),
            Notification::Error(msg) => f.debug_tuple("Error").field(msg).finish(),
        }
    }
}

/// Transcript line announcing a command.
pub fn announce_line(command_line: &str) -> String {
    format!("> {command_line}")
}

pub fn success_marker(code: i32) -> String {
    format!("[SUCCESS] Command completed with exit code: {code}")
}

pub fn failure_status(code: i32) -> String {
    format!("Command failed with exit code: {code}")
}

pub fn failure_marker(code: i32) -> String {
    format!("[ERROR] Command failed with exit code: {code}")
}

pub fn exception_marker(message: &str) -> String {
    format!("[EXCEPTION] {message}")
}

pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Spawn the dispatcher task that owns `observer`.
///
/// The task ends once every sender of the returned channel is dropped and the
/// queue is empty.
pub fn spawn_dispatcher(
    observer: Option<Box<dyn Observer>>,
) -> (mpsc::UnboundedSender<Notification>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();

    let handle = tokio::spawn(async move {
        debug!(has_observer = observer.is_some(), "notification dispatcher started");

        let mut dispatcher = Dispatcher {
            observer,
            sink: None,
            in_command: false,
            deferred_errors: Vec::new(),
        };
        while let Some(notification) = rx.recv().await {
            dispatcher.deliver(notification);
        }
        dispatcher.show_deferred_errors();

        info!("notification dispatcher finished (channel closed)");
    });

    (tx, handle)
}

struct Dispatcher {
    observer: Option<Box<dyn Observer>>,
    /// Sink of the command currently between `Started` and `Finished`.
    sink: Option<Box<dyn OutputSink>>,
    in_command: bool,
    deferred_errors: Vec<String>,
}

impl Dispatcher {
    fn deliver(&mut self, notification: Notification) {
        match notification {
            Notification::Started {
                label,
                command_line,
                sink,
            } => {
                self.sink = sink;
                self.in_command = true;
                if let Some(obs) = self.observer.as_deref_mut() {
                    obs.set_progress_visible(true);
                    obs.set_progress(Progress::Indeterminate);
                    obs.set_status(&label);
                    obs.append(&announce_line(&command_line));
                }
            }
            Notification::Output(line) => {
                if let Some(sink) = self.sink.as_deref_mut() {
                    sink.accept(&line);
                }
                if let Some(obs) = self.observer.as_deref_mut() {
                    obs.append(&line);
                }
            }
            Notification::Finished(outcome) => {
                self.finish(&outcome);
                // The sink belongs to this one command only.
                self.sink = None;
                self.in_command = false;
                self.show_deferred_errors();
            }
            Notification::Error(message) if self.in_command => {
                debug!(%message, "deferring error until the running command finishes");
                self.deferred_errors.push(message);
            }
            Notification::Error(message) => self.show_error(&message),
        }
    }

    fn show_error(&mut self, message: &str) {
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.show_error(message);
        }
    }

    fn show_deferred_errors(&mut self) {
        for message in std::mem::take(&mut self.deferred_errors) {
            self.show_error(&message);
        }
    }

    fn finish(&mut self, outcome: &Outcome) {
        let (status, marker) = match outcome {
            Outcome::Exited(0) => (SUCCESS_STATUS.to_string(), success_marker(0)),
            Outcome::Exited(code) => (failure_status(*code), failure_marker(*code)),
            Outcome::LaunchFailed(message) => {
                (LAUNCH_ERROR_STATUS.to_string(), exception_marker(message))
            }
        };

        if let Some(obs) = self.observer.as_deref_mut() {
            obs.set_progress_visible(false);
            obs.set_status(&status);
            obs.append(&marker);
        }
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.accept(&marker);
        }
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.append(&separator());
        }
    }
}
