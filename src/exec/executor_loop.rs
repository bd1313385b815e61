// src/exec/executor_loop.rs

//! Main worker loop that runs queued commands one at a time.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::exec::command::{Command, ExecutionSummary};
use crate::exec::dispatch::Notification;
use crate::exec::task_runner::run_command;

/// Spawn the background worker.
///
/// Commands are taken from `command_rx` in FIFO order and each one is run to
/// completion before the next is even looked at, so **there is never more
/// than one external process running per worker**.
///
/// The loop ends when:
/// - `command_rx` is closed and drained (graceful stop), or
/// - the shutdown flag flips to `true` (or its sender is dropped). The
///   command in flight is allowed to finish; whatever is still queued is
///   abandoned.
pub fn spawn_worker(
    mut command_rx: mpsc::UnboundedReceiver<Command>,
    mut shutdown_rx: watch::Receiver<bool>,
    notify_tx: mpsc::UnboundedSender<Notification>,
) -> JoinHandle<ExecutionSummary> {
    tokio::spawn(async move {
        info!("executor worker started");

        let mut summary = ExecutionSummary::default();

        loop {
            let command = tokio::select! {
                biased;

                _ = stop_requested(&mut shutdown_rx) => {
                    info!("shutdown requested; worker stopping");
                    break;
                }

                next = command_rx.recv() => match next {
                    Some(command) => command,
                    None => {
                        info!("submission channel closed and drained");
                        break;
                    }
                },
            };

            debug!(?command, "dequeued command");
            run_chain(command, &shutdown_rx, &notify_tx, &mut summary).await;
        }

        summary.abandoned = abandon_queued(&mut command_rx);

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            abandoned = summary.abandoned,
            skipped = summary.skipped,
            "executor worker finished"
        );
        summary
    })
}

/// Run `command` and then its follow-ups, stopping at the first failure.
///
/// Follow-ups of a failed step are skipped and reported as an error. A
/// shutdown requested mid-chain abandons the steps not yet started.
async fn run_chain(
    command: Command,
    shutdown_rx: &watch::Receiver<bool>,
    notify_tx: &mpsc::UnboundedSender<Notification>,
    summary: &mut ExecutionSummary,
) {
    let mut next = Some(command);

    while let Some(mut command) = next.take() {
        let follow_up = command.take_follow_up();
        let label = command.label().to_string();

        let outcome = run_command(command, notify_tx).await;
        summary.record(&outcome);

        let Some(follow_up) = follow_up else {
            break;
        };

        if !outcome.is_success() {
            let skipped = follow_up.chain_len();
            warn!(%label, skipped, next = %follow_up.label(), "step failed; skipping the rest of its chain");
            summary.skipped += skipped;
            let _ = notify_tx.send(Notification::Error(format!(
                "Skipped \"{}\" because \"{label}\" failed.",
                follow_up.label()
            )));
            break;
        }

        if *shutdown_rx.borrow() {
            warn!(label = %follow_up.label(), "abandoning chained command after shutdown");
            summary.abandoned += follow_up.chain_len();
            break;
        }

        next = Some(follow_up);
    }
}

/// Resolves once the shutdown flag is set or its sender is gone.
async fn stop_requested(shutdown_rx: &mut watch::Receiver<bool>) {
    let _ = shutdown_rx.wait_for(|stop| *stop).await;
}

/// Close the queue and drop everything still in it.
fn abandon_queued(command_rx: &mut mpsc::UnboundedReceiver<Command>) -> usize {
    command_rx.close();

    let mut abandoned = 0;
    while let Ok(command) = command_rx.try_recv() {
        warn!(label = %command.label(), "abandoning queued command after shutdown");
        abandoned += command.chain_len();
    }
    abandoned
}
