// src/exec/task_runner.rs

//! Runs one command to completion and reports it through the notification
//! channel.

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::exec::command::{Command, Outcome};
use crate::exec::dispatch::Notification;
use crate::exec::process::{ProcessError, ProcessRunner};

/// Announce, stream and finalize a single command.
///
/// Never fails: spawn and I/O errors become [`Outcome::LaunchFailed`] so the
/// worker can move on to the next queued command.
pub async fn run_command(
    command: Command,
    notify_tx: &mpsc::UnboundedSender<Notification>,
) -> Outcome {
    let command_line = command.command_line();
    let (argv, label, sink) = command.into_parts();

    info!(label = %label, cmd = %command_line, "starting command");

    notify(
        notify_tx,
        Notification::Started {
            label: label.clone(),
            command_line,
            sink,
        },
    );

    let outcome = match stream_process(&argv, notify_tx).await {
        Ok(code) => {
            info!(label = %label, exit_code = code, success = code == 0, "command exited");
            Outcome::Exited(code)
        }
        Err(err) => {
            error!(label = %label, error = %err, "command execution error");
            Outcome::LaunchFailed(err.to_string())
        }
    };

    notify(notify_tx, Notification::Finished(outcome.clone()));
    outcome
}

async fn stream_process(
    argv: &[String],
    notify_tx: &mpsc::UnboundedSender<Notification>,
) -> Result<i32, ProcessError> {
    let mut process = ProcessRunner::spawn(argv)?;

    while let Some(line) = process.next_line().await? {
        notify(notify_tx, Notification::Output(line));
    }

    process.wait().await
}

fn notify(notify_tx: &mpsc::UnboundedSender<Notification>, notification: Notification) {
    if let Err(e) = notify_tx.send(notification) {
        debug!(notification = ?e.0, "dispatcher gone; dropping notification");
    }
}
