//! End-to-end orchestrator tests against a scripted rendering engine
//!
//! A `FixtureEngine` stands in for the browser: navigations can be made to
//! fail a set number of times, evaluation results are queued up front, and
//! counters record how often each capability was exercised.

use async_trait::async_trait;
use clipstream::config::Config;
use clipstream::engine::{EngineError, EngineResult, RenderEngine};
use clipstream::records::ProfileOutcome;
use clipstream::scrape::with_session;
use clipstream::{Orchestrator, ScrapeError, Session};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct FixtureEngine {
    fail_navigations: usize,
    nav_count: Arc<AtomicUsize>,
    scroll_count: Arc<AtomicUsize>,
    eval_results: VecDeque<Value>,
    closed: Arc<AtomicBool>,
}

impl FixtureEngine {
    fn new() -> Self {
        Self {
            fail_navigations: 0,
            nav_count: Arc::new(AtomicUsize::new(0)),
            scroll_count: Arc::new(AtomicUsize::new(0)),
            eval_results: VecDeque::new(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn failing_navigations(mut self, count: usize) -> Self {
        self.fail_navigations = count;
        self
    }

    fn evaluating(mut self, result: Value) -> Self {
        self.eval_results.push_back(result);
        self
    }
}

#[async_trait]
impl RenderEngine for FixtureEngine {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> EngineResult<()> {
        self.nav_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_navigations > 0 {
            self.fail_navigations -= 1;
            return Err(EngineError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_RESET".to_string(),
            });
        }
        Ok(())
    }

    async fn evaluate(&mut self, _script: &str) -> EngineResult<Value> {
        Ok(self.eval_results.pop_front().unwrap_or(Value::Null))
    }

    async fn scroll_by(&mut self, _pixels: u32) -> EngineResult<()> {
        self.scroll_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn shutdown(&mut self) -> EngineResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Config with delays collapsed so retries and settling run instantly
fn test_config() -> Config {
    let mut config = Config::default();
    config.fetch.backoff_base_ms = 1;
    config.fetch.backoff_max_ms = 2;
    config.fetch.settle_ms = 0;
    config.fetch.scroll_settle_ms = 0;
    config.fetch.navigation_timeout_ms = 1_000;
    config
}

async fn ready_session(engine: FixtureEngine) -> Session<FixtureEngine> {
    let mut session = Session::new();
    session
        .launch(|| async move { Ok::<_, EngineError>(engine) })
        .await
        .unwrap();
    session
}

fn search_item(author: &str, index: usize) -> Value {
    json!({
        "video_url": format!("https://example.com/@{author}/video/{index}"),
        "description": format!("clip {index} #fyp"),
        "author": author,
        "likes": "1.2K",
        "comments": "45",
        "shares": "3"
    })
}

fn malformed_item() -> Value {
    json!({
        "video_url": "",
        "description": "",
        "author": "",
        "likes": "0",
        "comments": "0",
        "shares": "0"
    })
}

#[tokio::test]
async fn test_search_builds_valid_records_and_counts_drops() {
    let mut items: Vec<Value> = (0..25).map(|i| search_item("cat", i)).collect();
    items.insert(5, malformed_item());
    items.insert(12, malformed_item());

    let engine = FixtureEngine::new().evaluating(Value::Array(items));
    let scroll_count = Arc::clone(&engine.scroll_count);

    let session = ready_session(engine).await;
    let mut orchestrator = Orchestrator::new(session, &test_config());

    let batch = orchestrator.search_videos("cats", 30).await.unwrap();

    assert_eq!(batch.len(), 25);
    assert_eq!(batch.dropped, 2);
    // 30 requested at 10 items per scroll
    assert_eq!(scroll_count.load(Ordering::SeqCst), 3);

    // Count normalization flows through to the records
    assert_eq!(batch.records[0].stats.likes, 1_200);
    assert_eq!(batch.records[0].stats.comments, 45);
    assert!(batch.records[0].hashtags.contains(&"fyp".to_string()));

    orchestrator.into_session().close().await.unwrap();
}

#[tokio::test]
async fn test_search_truncates_to_limit() {
    let items: Vec<Value> = (0..25).map(|i| search_item("cat", i)).collect();
    let engine = FixtureEngine::new().evaluating(Value::Array(items));

    let session = ready_session(engine).await;
    let mut orchestrator = Orchestrator::new(session, &test_config());

    let batch = orchestrator.search_videos("cats", 10).await.unwrap();
    assert_eq!(batch.len(), 10);

    orchestrator.into_session().close().await.unwrap();
}

#[tokio::test]
async fn test_navigation_retries_then_succeeds() {
    let engine = FixtureEngine::new()
        .failing_navigations(2)
        .evaluating(json!([search_item("cat", 0)]));
    let nav_count = Arc::clone(&engine.nav_count);

    let session = ready_session(engine).await;
    let mut orchestrator = Orchestrator::new(session, &test_config());

    let batch = orchestrator.search_videos("cats", 1).await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(nav_count.load(Ordering::SeqCst), 3);

    orchestrator.into_session().close().await.unwrap();
}

#[tokio::test]
async fn test_retries_exhaust_after_attempt_ceiling() {
    let engine = FixtureEngine::new().failing_navigations(usize::MAX);
    let nav_count = Arc::clone(&engine.nav_count);

    let session = ready_session(engine).await;
    let mut orchestrator = Orchestrator::new(session, &test_config());

    let err = orchestrator.search_videos("cats", 1).await.unwrap_err();
    match err {
        ScrapeError::ExhaustedRetries { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, ScrapeError::Navigation { .. }));
        }
        other => panic!("expected ExhaustedRetries, got {other:?}"),
    }
    assert_eq!(nav_count.load(Ordering::SeqCst), 3);

    orchestrator.into_session().close().await.unwrap();
}

#[tokio::test]
async fn test_profile_found_normalizes_counts() {
    let engine = FixtureEngine::new().evaluating(json!({
        "nickname": "The Ghost",
        "signature": "boo",
        "followers": "1.5M",
        "following": "312",
        "likes": "20.1M",
        "videos": "1,042"
    }));

    let session = ready_session(engine).await;
    let mut orchestrator = Orchestrator::new(session, &test_config());

    let outcome = orchestrator.user_profile("ghost").await.unwrap();
    let user = outcome.found().expect("profile should be found");

    assert_eq!(user.username, "ghost");
    assert_eq!(user.nickname, "The Ghost");
    assert_eq!(user.follower_count, 1_500_000);
    assert_eq!(user.following_count, 312);
    assert_eq!(user.heart_count, 20_100_000);
    assert_eq!(user.video_count, 1_042);

    orchestrator.into_session().close().await.unwrap();
}

#[tokio::test]
async fn test_profile_missing_markers_reports_absent() {
    let engine = FixtureEngine::new().evaluating(Value::Null);

    let session = ready_session(engine).await;
    let mut orchestrator = Orchestrator::new(session, &test_config());

    let outcome = orchestrator.user_profile("nobody").await.unwrap();
    assert!(matches!(outcome, ProfileOutcome::Absent));

    orchestrator.into_session().close().await.unwrap();
}

#[tokio::test]
async fn test_trending_truncates_and_normalizes_views() {
    let items: Vec<Value> = (0..5)
        .map(|i| {
            json!({
                "name": format!("#tag{i}"),
                "url": format!("https://example.com/tag/tag{i}"),
                "views": "1.2M"
            })
        })
        .collect();
    let engine = FixtureEngine::new().evaluating(Value::Array(items));

    let session = ready_session(engine).await;
    let mut orchestrator = Orchestrator::new(session, &test_config());

    let batch = orchestrator.trending_hashtags(3).await.unwrap();
    assert_eq!(batch.len(), 3);
    assert_eq!(batch.records[0].views, 1_200_000);

    orchestrator.into_session().close().await.unwrap();
}

#[tokio::test]
async fn test_malformed_extraction_result_is_not_fatal_to_session() {
    // A non-array result is a transient failure; with all attempts returning
    // garbage the operation fails, but the session still tears down cleanly.
    let engine = FixtureEngine::new()
        .evaluating(json!({"unexpected": "shape"}))
        .evaluating(json!({"unexpected": "shape"}))
        .evaluating(json!({"unexpected": "shape"}));
    let closed = Arc::clone(&engine.closed);

    let result = with_session(
        || async move { Ok::<_, EngineError>(engine) },
        |session| async move {
            let mut orchestrator = Orchestrator::new(session, &test_config());
            let result = orchestrator.trending_hashtags(5).await;
            (orchestrator.into_session(), result)
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(ScrapeError::ExhaustedRetries { attempts: 3, .. })
    ));
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_with_session_tears_down_on_success() {
    let engine = FixtureEngine::new().evaluating(json!([search_item("cat", 0)]));
    let closed = Arc::clone(&engine.closed);

    let batch = with_session(
        || async move { Ok::<_, EngineError>(engine) },
        |session| async move {
            let mut orchestrator = Orchestrator::new(session, &test_config());
            let result = orchestrator.search_videos("cats", 1).await;
            (orchestrator.into_session(), result)
        },
    )
    .await
    .unwrap();

    assert_eq!(batch.len(), 1);
    assert!(closed.load(Ordering::SeqCst));
}
