//! Pretty-printed JSON record sink

use crate::output::RecordSink;
use crate::records::{ProfileOutcome, TrendingHashtag, VideoRecord};
use crate::SinkError;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Writes records as indented JSON to any writer
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_value<T: Serialize>(&mut self, value: &T) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonSink<File> {
    /// Creates (or truncates) a file sink at `path`
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_videos(&mut self, records: &[VideoRecord]) -> Result<(), SinkError> {
        self.write_value(&records)
    }

    fn write_profile(&mut self, outcome: &ProfileOutcome) -> Result<(), SinkError> {
        self.write_value(outcome)
    }

    fn write_hashtags(&mut self, records: &[TrendingHashtag]) -> Result<(), SinkError> {
        self.write_value(&records)
    }
}
