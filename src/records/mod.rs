//! Canonical record types produced by the fetch orchestrator
//!
//! Records are immutable value objects: they are assembled once by the
//! builder from raw page-extracted JSON and never mutated afterwards. The
//! caller owns them once returned; the core holds no state between
//! operations except the live browser session.

mod builder;

pub use builder::{hashtag_batch, user_record, video_batch, video_record};

use serde::{Deserialize, Serialize};

/// Engagement counts for a video, always non-negative, defaulting to 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub views: u64,
}

/// One scraped video
///
/// `id` is never empty: it derives from the tail of the video URL, or a
/// deterministic index-based token when the page exposes no unique token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub description: String,
    pub author: String,
    /// The platform does not always expose an author id; may be empty.
    pub author_id: String,
    /// Creation timestamp as epoch seconds, set at extraction time.
    pub create_time: i64,
    pub music_title: String,
    pub music_author: String,
    pub stats: EngagementStats,
    /// Ordered, duplicates allowed; from the structured list when the page
    /// supplies one, otherwise extracted from the description.
    pub hashtags: Vec<String>,
    pub video_url: String,
    pub cover_url: String,
    /// Duration in seconds, 0 when the page does not expose it.
    pub duration: u64,
    /// RFC 3339 timestamp of when the record was built.
    pub scraped_at: String,
}

/// One scraped author profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Identifier, equal to the username.
    pub id: String,
    pub username: String,
    pub nickname: String,
    pub signature: String,
    pub avatar_url: String,
    pub verified: bool,
    pub follower_count: u64,
    pub following_count: u64,
    pub video_count: u64,
    pub heart_count: u64,
    pub scraped_at: String,
}

/// One trending hashtag entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingHashtag {
    pub name: String,
    pub url: String,
    /// View count normalized from the rendered text ("1.2M" etc).
    pub views: u64,
    pub scraped_at: String,
}

/// Records built from one batch extraction, with observability for items
/// that were rejected as malformed
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub records: Vec<T>,
    /// Items dropped for missing required fields. Never escalated to an
    /// error: a partial result is still useful.
    pub dropped: usize,
}

impl<T> Batch<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of a profile lookup that completed successfully
///
/// `Absent` means navigation succeeded but the page showed no profile
/// markers — a valid result, distinct from a fetch failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "profile", rename_all = "lowercase")]
pub enum ProfileOutcome {
    Found(UserRecord),
    Absent,
}

impl ProfileOutcome {
    /// Returns the profile when one was found
    pub fn found(self) -> Option<UserRecord> {
        match self {
            ProfileOutcome::Found(user) => Some(user),
            ProfileOutcome::Absent => None,
        }
    }
}
