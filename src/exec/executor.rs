// src/exec/executor.rs

use std::sync::{Mutex, PoisonError};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::command::{Command, ExecutionSummary};
use crate::exec::dispatch::{Notification, spawn_dispatcher};
use crate::exec::executor_loop::spawn_worker;
use crate::observer::Observer;

/// Serialized command queue.
///
/// Any number of threads may [`submit`](Self::submit) concurrently; commands
/// run strictly one at a time, in submission order, on a background worker.
/// Observer notifications are delivered by a separate dispatcher task (see
/// [`crate::exec::dispatch`]).
///
/// Must be created from within a Tokio runtime.
pub struct CommandExecutor {
    /// `None` once shut down. The lock linearizes concurrent submissions with
    /// shutdown.
    submit_tx: Mutex<Option<mpsc::UnboundedSender<Command>>>,
    shutdown_tx: watch::Sender<bool>,
    notify_tx: mpsc::UnboundedSender<Notification>,
    worker: JoinHandle<ExecutionSummary>,
    dispatcher: JoinHandle<()>,
}

impl std::fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

impl CommandExecutor {
    /// Create an executor, optionally bound to an observer for its whole
    /// lifetime, and start its worker and dispatcher tasks.
    pub fn new(observer: Option<Box<dyn Observer>>) -> Self {
        let (notify_tx, dispatcher) = spawn_dispatcher(observer);
        let (submit_tx, submit_rx) = mpsc::unbounded_channel::<Command>();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker = spawn_worker(submit_rx, shutdown_rx, notify_tx.clone());

        Self {
            submit_tx: Mutex::new(Some(submit_tx)),
            shutdown_tx,
            notify_tx,
            worker,
            dispatcher,
        }
    }

    pub fn with_observer(observer: impl Observer + 'static) -> Self {
        Self::new(Some(Box::new(observer)))
    }

    /// Queue a command. Returns immediately.
    ///
    /// After [`shutdown`](Self::shutdown) the command is silently dropped.
    pub fn submit(&self, command: Command) {
        let guard = self.submit_tx.lock().unwrap_or_else(PoisonError::into_inner);

        match guard.as_ref() {
            Some(tx) => {
                debug!(label = %command.label(), "command submitted");
                if let Err(e) = tx.send(command) {
                    debug!(label = %e.0.label(), "worker gone; dropping command");
                }
            }
            None => {
                debug!(label = %command.label(), "executor shut down; dropping command");
            }
        }
    }

    /// Stop accepting submissions.
    ///
    /// A command already running finishes and its notifications are
    /// delivered; queued commands are abandoned. Calling this more than once
    /// is harmless.
    pub fn shutdown(&self) {
        let previous = self
            .submit_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if previous.is_some() {
            info!("executor shutdown requested");
            self.shutdown_tx.send_replace(true);
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.submit_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Show an error to the observer through the same ordered channel as
    /// command output, e.g. a form that failed validation.
    ///
    /// Never lands inside a running command's transcript block: if a command
    /// is running, the error is shown after its separator.
    pub fn report_error(&self, message: &str) {
        if self.notify_tx.send(Notification::Error(message.to_string())).is_err() {
            debug!(message, "dispatcher gone; dropping error report");
        }
    }

    /// Stop accepting submissions and wait until the worker has finished and
    /// every notification has been delivered.
    ///
    /// Without a prior [`shutdown`](Self::shutdown), everything already queued
    /// still runs.
    pub async fn join(self) -> Result<ExecutionSummary> {
        let CommandExecutor {
            submit_tx,
            shutdown_tx,
            notify_tx,
            worker,
            dispatcher,
        } = self;

        // Closing the queue lets the worker drain it and exit.
        drop(submit_tx);
        let summary = worker.await?;
        drop(shutdown_tx);

        drop(notify_tx);
        dispatcher.await?;

        Ok(summary)
    }
}
