//! Sink trait for normalized records

use crate::records::{ProfileOutcome, TrendingHashtag, VideoRecord};
use crate::SinkError;

/// Accepts the orchestrator's output records
///
/// Implementations own persistence format and destination; the core hands
/// over plain immutable records and never sees them again.
pub trait RecordSink {
    fn write_videos(&mut self, records: &[VideoRecord]) -> Result<(), SinkError>;

    fn write_profile(&mut self, outcome: &ProfileOutcome) -> Result<(), SinkError>;

    fn write_hashtags(&mut self, records: &[TrendingHashtag]) -> Result<(), SinkError>;
}
