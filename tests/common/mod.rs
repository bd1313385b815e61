#![allow(dead_code)]

pub use apkbench_test_utils::builders;
pub use apkbench_test_utils::recording::{Event, RecordingObserver, RecordingSink};
pub use apkbench_test_utils::{init_tracing, sh, with_timeout};

use apkbench::exec::CommandExecutor;

/// Executor bound to a fresh recording observer; returns both.
pub fn recording_executor() -> (CommandExecutor, RecordingObserver) {
    let observer = RecordingObserver::new();
    let executor = CommandExecutor::with_observer(observer.clone());
    (executor, observer)
}

/// Binary name that is certainly not on `PATH`.
pub const MISSING_BINARY: &str = "apkbench-definitely-not-a-real-binary";
