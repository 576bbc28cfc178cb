//! Scrape module: session lifecycle, retry, pagination, and orchestration
//!
//! This module contains the core fetch logic:
//! - Browser session lifecycle with guaranteed teardown
//! - Bounded retries with exponential backoff
//! - Scroll-driven pagination
//! - The fetch orchestrator composing them per operation

mod orchestrator;
mod paginate;
mod retry;
mod session;

pub use orchestrator::Orchestrator;
pub use paginate::{Paginator, DEFAULT_PER_SCROLL_YIELD};
pub use retry::{with_retry, RetryPolicy};
pub use session::{with_session, Session, SessionState};

use crate::config::Config;
use crate::engine::ChromiumEngine;
use crate::records::{Batch, ProfileOutcome, TrendingHashtag, VideoRecord};

/// Runs one keyword search in a fresh browser session
///
/// Launches a chromium session, searches, and tears the session down on
/// every exit path. This is the main library entry point for one-shot use;
/// callers running several operations should hold an [`Orchestrator`] and
/// reuse its session instead.
pub async fn run_search(
    config: &Config,
    keyword: &str,
    limit: usize,
) -> crate::Result<Batch<VideoRecord>> {
    with_session(
        || ChromiumEngine::launch(&config.session),
        |session| async move {
            let mut orchestrator = Orchestrator::new(session, config);
            let result = orchestrator.search_videos(keyword, limit).await;
            (orchestrator.into_session(), result)
        },
    )
    .await
}

/// Fetches one author profile in a fresh browser session
pub async fn run_user_profile(config: &Config, username: &str) -> crate::Result<ProfileOutcome> {
    with_session(
        || ChromiumEngine::launch(&config.session),
        |session| async move {
            let mut orchestrator = Orchestrator::new(session, config);
            let result = orchestrator.user_profile(username).await;
            (orchestrator.into_session(), result)
        },
    )
    .await
}

/// Fetches trending hashtags in a fresh browser session
pub async fn run_trending(
    config: &Config,
    limit: usize,
) -> crate::Result<Batch<TrendingHashtag>> {
    with_session(
        || ChromiumEngine::launch(&config.session),
        |session| async move {
            let mut orchestrator = Orchestrator::new(session, config);
            let result = orchestrator.trending_hashtags(limit).await;
            (orchestrator.into_session(), result)
        },
    )
    .await
}
