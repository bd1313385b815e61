// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the external tools, using
//! `tokio::process::Command`, and reporting progress to the bound observer.
//!
//! - [`command`] defines the `Command` value and its `Outcome`.
//! - [`process`] spawns one process and exposes its merged output as lines.
//! - [`task_runner`] runs one command through announce, stream and finalize.
//! - [`executor_loop`] owns the worker loop that runs commands one at a time.
//! - [`dispatch`] is the single ordered channel that delivers notifications
//!   to the observer and per-command sinks.
//! - [`executor`] provides the `CommandExecutor` handle tying it together.
//! - [`backend`] provides the `ExecutorBackend` trait, so front-end code can
//!   be tested against a fake executor.

pub mod backend;
pub mod command;
pub mod dispatch;
pub mod executor;
pub mod executor_loop;
pub mod process;
pub mod task_runner;

pub use backend::ExecutorBackend;
pub use command::{Command, ExecutionSummary, Outcome};
pub use executor::CommandExecutor;
pub use process::{ProcessError, ProcessRunner, RunningProcess};
