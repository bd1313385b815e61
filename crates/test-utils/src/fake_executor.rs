use std::sync::{Arc, Mutex};

use apkbench::exec::{Command, ExecutorBackend};

/// A fake executor that:
/// - records every submitted command instead of running it
/// - records errors reported before any command was built.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    submitted: Arc<Mutex<Vec<Command>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(label, argv, has_sink)` for each submitted command, chained
    /// follow-ups flattened in run order.
    pub fn submitted(&self) -> Vec<(String, Vec<String>, bool)> {
        let submitted = self.submitted.lock().unwrap();
        let mut out = Vec::new();
        for command in submitted.iter() {
            let mut next = Some(command);
            while let Some(c) = next {
                out.push((c.label().to_string(), c.argv().to_vec(), c.has_sink()));
                next = c.follow_up();
            }
        }
        out
    }

    /// Number of `submit` calls, counting a chain once.
    pub fn submission_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn submit(&self, command: Command) {
        self.submitted.lock().unwrap().push(command);
    }

    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
