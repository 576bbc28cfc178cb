//! Record builder: raw page-extracted JSON to canonical records
//!
//! Page evaluation returns loosely-typed JSON; this module is the boundary
//! where that shape is validated and converted. Nothing downstream of the
//! builder trusts raw JSON. Items missing their required fields are dropped
//! and counted, never escalated to a fatal error.

use crate::parse::{extract_hashtags, normalize_count};
use crate::records::{Batch, EngagementStats, TrendingHashtag, UserRecord, VideoRecord};
use chrono::Utc;
use serde_json::Value;

/// Reads a string field, defaulting to empty
fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Reads a count field rendered as text ("1.2M"), normalizing to an integer
fn count_field(item: &Value, key: &str) -> u64 {
    item.get(key)
        .and_then(Value::as_str)
        .map(normalize_count)
        .unwrap_or(0)
}

/// Reads a structured hashtag list when the extraction supplies one
fn hashtag_list(item: &Value) -> Option<Vec<String>> {
    let tags = item.get("hashtags")?.as_array()?;
    Some(
        tags.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// Builds one video record from a raw extracted item
///
/// Returns `None` when the item is missing all of {link, description,
/// author}; such items carry nothing worth keeping. The `index` is used to
/// synthesize a deterministic id when the video URL has no usable tail, so
/// the id invariant (never empty) holds for every built record.
pub fn video_record(item: &Value, index: usize) -> Option<VideoRecord> {
    let video_url = str_field(item, "video_url");
    let description = str_field(item, "description");
    let author = str_field(item, "author");

    if video_url.is_empty() && description.is_empty() && author.is_empty() {
        return None;
    }

    let id = video_url
        .rsplit('/')
        .next()
        .filter(|tail| !tail.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("video_{index}"));

    let hashtags = hashtag_list(item).unwrap_or_else(|| extract_hashtags(&description));

    Some(VideoRecord {
        id,
        description,
        author,
        author_id: str_field(item, "author_id"),
        create_time: Utc::now().timestamp(),
        music_title: str_field(item, "music_title"),
        music_author: str_field(item, "music_author"),
        stats: EngagementStats {
            likes: count_field(item, "likes"),
            comments: count_field(item, "comments"),
            shares: count_field(item, "shares"),
            views: count_field(item, "views"),
        },
        hashtags,
        video_url,
        cover_url: str_field(item, "cover_url"),
        duration: item.get("duration").and_then(Value::as_u64).unwrap_or(0),
        scraped_at: Utc::now().to_rfc3339(),
    })
}

/// Builds a batch of video records from raw extracted items
///
/// At most `limit` records are built; malformed items are dropped and
/// counted. Item order is preserved.
pub fn video_batch(items: &[Value], limit: usize) -> Batch<VideoRecord> {
    let mut records = Vec::new();
    let mut dropped = 0;

    for (index, item) in items.iter().enumerate() {
        if records.len() >= limit {
            break;
        }
        match video_record(item, index) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    Batch { records, dropped }
}

/// Builds a user record from raw profile-page data
///
/// Returns `None` for an empty username — the one required field. The
/// nickname defaults to the username when the page shows none.
pub fn user_record(username: &str, raw: &Value) -> Option<UserRecord> {
    let username = username.trim();
    if username.is_empty() {
        return None;
    }

    let nickname = match str_field(raw, "nickname") {
        n if n.is_empty() => username.to_string(),
        n => n,
    };

    Some(UserRecord {
        id: username.to_string(),
        username: username.to_string(),
        nickname,
        signature: str_field(raw, "signature"),
        avatar_url: str_field(raw, "avatar_url"),
        verified: raw.get("verified").and_then(Value::as_bool).unwrap_or(false),
        follower_count: count_field(raw, "followers"),
        following_count: count_field(raw, "following"),
        video_count: count_field(raw, "videos"),
        heart_count: count_field(raw, "likes"),
        scraped_at: Utc::now().to_rfc3339(),
    })
}

/// Builds a batch of trending-hashtag records
///
/// Entries without a name are dropped and counted.
pub fn hashtag_batch(items: &[Value], limit: usize) -> Batch<TrendingHashtag> {
    let mut records = Vec::new();
    let mut dropped = 0;

    for item in items {
        if records.len() >= limit {
            break;
        }
        let name = str_field(item, "name").trim().to_string();
        if name.is_empty() {
            dropped += 1;
            continue;
        }
        records.push(TrendingHashtag {
            name,
            url: str_field(item, "url"),
            views: count_field(item, "views"),
            scraped_at: Utc::now().to_rfc3339(),
        });
    }

    Batch { records, dropped }
}
