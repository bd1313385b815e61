// src/observer/sinks.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::Result;

use super::OutputSink;

/// Sink that writes every chunk it receives as a line of a file.
///
/// The file is created (truncated) when the sink is built. Write failures are
/// logged and the sink stops writing; they never affect the command itself.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn accept(&mut self, chunk: &str) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        if let Err(e) = writeln!(writer, "{chunk}").and_then(|_| writer.flush()) {
            warn!(path = ?self.path, error = %e, "writing to output file failed; dropping further output");
            self.writer = None;
        }
    }
}
