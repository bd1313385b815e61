//! Observer and sink doubles that record everything they are told.

use std::sync::{Arc, Mutex};

use apkbench::exec::dispatch::{SUCCESS_STATUS, separator};
use apkbench::observer::{Observer, OutputSink, Progress};

/// One observer call, as recorded by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Append(String),
    Status(String),
    ProgressVisible(bool),
    Progress(Progress),
    Error(String),
}

/// Observer that records every call into a shared log.
///
/// Clones share the log, so a test keeps one clone and hands the other to
/// the executor.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Transcript lines, in order.
    pub fn appended(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Append(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Transcript split into one block per command: from an announce line
    /// (`> ...`) up to and including its separator.
    pub fn transcript_blocks(&self) -> Vec<Vec<String>> {
        let sep = separator();
        let mut blocks = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for line in self.appended() {
            let done = line == sep;
            current.push(line);
            if done {
                blocks.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            blocks.push(current);
        }
        blocks
    }

    pub fn success_count(&self) -> usize {
        self.statuses()
            .iter()
            .filter(|s| s.as_str() == SUCCESS_STATUS)
            .count()
    }

    /// Poll until `status` has been set at least once.
    pub async fn wait_for_status(&self, status: &str) {
        while !self.statuses().iter().any(|s| s == status) {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Observer for RecordingObserver {
    fn append(&mut self, line: &str) {
        self.push(Event::Append(line.to_string()));
    }

    fn set_status(&mut self, text: &str) {
        self.push(Event::Status(text.to_string()));
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.push(Event::ProgressVisible(visible));
    }

    fn set_progress(&mut self, progress: Progress) {
        self.push(Event::Progress(progress));
    }

    fn show_error(&mut self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }
}

/// Per-command sink that records the chunks it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl OutputSink for RecordingSink {
    fn accept(&mut self, chunk: &str) {
        self.lines.lock().unwrap().push(chunk.to_string());
    }
}
