// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The front-end hands commands to an `ExecutorBackend` instead of a concrete
//! [`CommandExecutor`]. This makes it easy to swap in a fake backend in tests
//! (one that records submissions instead of spawning processes) while the
//! binary uses the real executor.

use crate::exec::command::Command;
use crate::exec::executor::CommandExecutor;

/// Trait abstracting where built commands go.
pub trait ExecutorBackend: Send + Sync {
    /// Queue a command for execution. Must not block.
    fn submit(&self, command: Command);

    /// Surface an error that happened before any command could be built.
    fn report_error(&self, message: &str);
}

impl ExecutorBackend for CommandExecutor {
    fn submit(&self, command: Command) {
        CommandExecutor::submit(self, command);
    }

    fn report_error(&self, message: &str) {
        CommandExecutor::report_error(self, message);
    }
}
