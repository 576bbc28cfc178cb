//! Fetch orchestrator — composes session, retry, pagination, and building
//!
//! Each operation (search, profile, trending) is one retry-wrapped attempt
//! unit: navigate to the operation URL, settle, paginate where the
//! operation paginates, evaluate the extraction script, and convert the raw
//! JSON through the record builder. Failures inside an attempt are
//! classified by the retry controller; malformed items never fail a batch.

use crate::config::Config;
use crate::records::{self, Batch, ProfileOutcome, TrendingHashtag, VideoRecord};
use crate::engine::RenderEngine;
use crate::scrape::paginate::Paginator;
use crate::scrape::retry::{with_retry, RetryPolicy};
use crate::scrape::session::Session;
use crate::{ConfigError, ScrapeError};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Extraction scripts evaluated in the page. The DOM selectors are a
/// platform detail; the orchestrator only relies on the JSON shape each
/// script returns.
const SEARCH_EXTRACTION_SCRIPT: &str = r#"
(() => {
    const videos = [];
    const items = document.querySelectorAll('[data-e2e="search-video-item"]');
    items.forEach(item => {
        const link = item.querySelector('a');
        const desc = item.querySelector('[data-e2e="search-video-desc"]');
        const author = item.querySelector('[data-e2e="search-video-author"]');
        const stats = item.querySelectorAll('[data-e2e="search-video-stats"] strong');
        videos.push({
            video_url: link ? link.href : '',
            description: desc ? desc.textContent : '',
            author: author ? author.textContent : '',
            likes: stats[0] ? stats[0].textContent : '0',
            comments: stats[1] ? stats[1].textContent : '0',
            shares: stats[2] ? stats[2].textContent : '0'
        });
    });
    return videos;
})()
"#;

const PROFILE_EXTRACTION_SCRIPT: &str = r#"
(() => {
    const title = document.querySelector('[data-e2e="user-title"]');
    if (!title) { return null; }
    const text = (selector) => {
        const el = document.querySelector(selector);
        return el ? el.textContent.trim() : '';
    };
    return {
        nickname: title.textContent.trim(),
        signature: text('[data-e2e="user-bio"]'),
        followers: text('[data-e2e="followers-count"]') || '0',
        following: text('[data-e2e="following-count"]') || '0',
        likes: text('[data-e2e="likes-count"]') || '0',
        videos: text('[data-e2e="video-count"]') || '0'
    };
})()
"#;

const TRENDING_EXTRACTION_SCRIPT: &str = r#"
(() => {
    const hashtags = [];
    document.querySelectorAll('[data-e2e="discover-hashtag"]').forEach(item => {
        const tag = item.querySelector('a');
        const views = item.querySelector('[data-e2e="hashtag-views"]');
        if (tag) {
            hashtags.push({
                name: tag.textContent.trim(),
                url: tag.href,
                views: views ? views.textContent : '0'
            });
        }
    });
    return hashtags;
})()
"#;

/// Per-operation parameters handed to each retry attempt
struct AttemptCtx {
    url: Url,
    timeout: Duration,
    settle: Duration,
    paginator: Paginator,
    limit: usize,
    username: String,
}

/// Composes the session, retry controller, pagination driver, and record
/// builder into the three public operations
///
/// One orchestrator owns one session and runs operations strictly
/// sequentially; independent orchestrators (each with their own session)
/// may run concurrently, sharing nothing.
pub struct Orchestrator<E: RenderEngine> {
    session: Session<E>,
    policy: RetryPolicy,
    paginator: Paginator,
    base_url: String,
    navigation_timeout: Duration,
    settle: Duration,
}

impl<E: RenderEngine> Orchestrator<E> {
    /// Builds an orchestrator around a launched session
    pub fn new(session: Session<E>, config: &Config) -> Self {
        let fetch = &config.fetch;
        Self {
            session,
            policy: RetryPolicy::new(
                fetch.max_retries,
                Duration::from_millis(fetch.backoff_base_ms),
                Duration::from_millis(fetch.backoff_max_ms),
            ),
            paginator: Paginator::new(
                config.session.viewport_height,
                Duration::from_millis(fetch.scroll_settle_ms),
                fetch.per_scroll_yield,
            ),
            base_url: config.platform.base_url.clone(),
            navigation_timeout: Duration::from_millis(fetch.navigation_timeout_ms),
            settle: Duration::from_millis(fetch.settle_ms),
        }
    }

    /// Hands the session back for teardown
    pub fn into_session(self) -> Session<E> {
        self.session
    }

    /// Searches videos by keyword, up to `limit` records
    ///
    /// Returns whatever valid records were built even when some raw items
    /// were malformed; the batch carries the dropped-item count.
    pub async fn search_videos(
        &mut self,
        keyword: &str,
        limit: usize,
    ) -> crate::Result<Batch<VideoRecord>> {
        let mut url = self.operation_url("/search")?;
        url.query_pairs_mut().append_pair("q", keyword);

        tracing::info!(keyword, limit, "Searching videos");
        let ctx = self.attempt_ctx(url, limit);

        let batch = with_retry(&self.policy, &mut self.session, &ctx, |session, ctx| {
            Box::pin(search_attempt(session, ctx))
        })
        .await?;

        tracing::info!(
            built = batch.records.len(),
            dropped = batch.dropped,
            "Search complete"
        );
        Ok(batch)
    }

    /// Fetches one author profile
    ///
    /// A page that loads but shows no profile markers yields
    /// [`ProfileOutcome::Absent`] — "not found" is a result, not a failure.
    pub async fn user_profile(&mut self, username: &str) -> crate::Result<ProfileOutcome> {
        let url = self.operation_url(&format!("/@{username}"))?;

        tracing::info!(username, "Fetching profile");
        let mut ctx = self.attempt_ctx(url, 1);
        ctx.username = username.to_string();

        let outcome = with_retry(&self.policy, &mut self.session, &ctx, |session, ctx| {
            Box::pin(profile_attempt(session, ctx))
        })
        .await?;

        match &outcome {
            ProfileOutcome::Found(_) => tracing::info!(username, "Profile fetched"),
            ProfileOutcome::Absent => tracing::info!(username, "Profile absent"),
        }
        Ok(outcome)
    }

    /// Fetches trending hashtags, up to `limit` records
    pub async fn trending_hashtags(
        &mut self,
        limit: usize,
    ) -> crate::Result<Batch<TrendingHashtag>> {
        let url = self.operation_url("/discover")?;

        tracing::info!(limit, "Fetching trending hashtags");
        let ctx = self.attempt_ctx(url, limit);

        let batch = with_retry(&self.policy, &mut self.session, &ctx, |session, ctx| {
            Box::pin(trending_attempt(session, ctx))
        })
        .await?;

        tracing::info!(
            built = batch.records.len(),
            dropped = batch.dropped,
            "Trending fetch complete"
        );
        Ok(batch)
    }

    fn attempt_ctx(&self, url: Url, limit: usize) -> AttemptCtx {
        AttemptCtx {
            url,
            timeout: self.navigation_timeout,
            settle: self.settle,
            paginator: self.paginator,
            limit,
            username: String::new(),
        }
    }

    fn operation_url(&self, path: &str) -> crate::Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ScrapeError::Config(ConfigError::InvalidUrl(format!("{}: {e}", self.base_url)))
        })?;
        url.set_path(path);
        Ok(url)
    }
}

/// One search attempt: navigate, settle, paginate, extract, build
async fn search_attempt<E: RenderEngine>(
    session: &mut Session<E>,
    ctx: &AttemptCtx,
) -> crate::Result<Batch<VideoRecord>> {
    let engine = session.engine()?;

    engine.navigate(ctx.url.as_str(), ctx.timeout).await?;
    tokio::time::sleep(ctx.settle).await;

    ctx.paginator.load_to_target(engine, ctx.limit).await?;

    let raw = engine.evaluate(SEARCH_EXTRACTION_SCRIPT).await?;
    let items = extracted_items(&raw)?;
    Ok(records::video_batch(items, ctx.limit))
}

/// One profile attempt: navigate, settle, extract, build or report absent
async fn profile_attempt<E: RenderEngine>(
    session: &mut Session<E>,
    ctx: &AttemptCtx,
) -> crate::Result<ProfileOutcome> {
    let engine = session.engine()?;

    engine.navigate(ctx.url.as_str(), ctx.timeout).await?;
    tokio::time::sleep(ctx.settle).await;

    let raw = engine.evaluate(PROFILE_EXTRACTION_SCRIPT).await?;
    if raw.is_null() {
        return Ok(ProfileOutcome::Absent);
    }

    match records::user_record(&ctx.username, &raw) {
        Some(user) => Ok(ProfileOutcome::Found(user)),
        None => Ok(ProfileOutcome::Absent),
    }
}

/// One trending attempt: navigate, settle, extract, build
async fn trending_attempt<E: RenderEngine>(
    session: &mut Session<E>,
    ctx: &AttemptCtx,
) -> crate::Result<Batch<TrendingHashtag>> {
    let engine = session.engine()?;

    engine.navigate(ctx.url.as_str(), ctx.timeout).await?;
    tokio::time::sleep(ctx.settle).await;

    let raw = engine.evaluate(TRENDING_EXTRACTION_SCRIPT).await?;
    let items = extracted_items(&raw)?;
    Ok(records::hashtag_batch(items, ctx.limit))
}

/// The page boundary returns loose JSON; anything but an array of items is
/// a transient evaluation failure (likely a partially rendered page)
fn extracted_items(raw: &Value) -> crate::Result<&Vec<Value>> {
    raw.as_array().ok_or_else(|| ScrapeError::Evaluation {
        message: "extraction script did not return an item array".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracted_items_rejects_non_array() {
        let err = extracted_items(&json!({"not": "an array"})).unwrap_err();
        assert!(err.is_transient());

        let err = extracted_items(&Value::Null).unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_extracted_items_accepts_array() {
        let raw = json!([{"author": "a"}]);
        assert_eq!(extracted_items(&raw).unwrap().len(), 1);
    }
}
