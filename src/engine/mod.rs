//! Rendering-engine boundary
//!
//! The orchestrator only needs three capabilities from the browser:
//! navigate, evaluate a script for structured JSON, and scroll. Everything
//! engine-specific (CDP plumbing, DOM selectors baked into extraction
//! scripts) stays behind this trait, which also lets tests inject a fixture
//! engine with no browser at all.

mod chromium;

pub use chromium::ChromiumEngine;

use crate::{ScrapeError, SessionError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from the rendering engine
///
/// Launch and shutdown failures are session-fatal; navigation and
/// evaluation failures are transient and eligible for retry.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    #[error("Browser shutdown failed: {0}")]
    Shutdown(String),
}

impl From<EngineError> for ScrapeError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Navigation { url, message } => ScrapeError::Navigation { url, message },
            EngineError::Timeout { url, timeout } => ScrapeError::NavigationTimeout { url, timeout },
            EngineError::Evaluation(message) => ScrapeError::Evaluation { message },
            EngineError::Launch(message) => ScrapeError::Session(SessionError::Launch(message)),
            EngineError::Shutdown(message) => {
                ScrapeError::Session(SessionError::Teardown(message))
            }
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// The opaque rendering capability the orchestrator consumes
///
/// Methods take `&mut self`: one engine is one browser session, and the
/// underlying page is not safe for concurrent operations, so exclusive
/// access enforces strictly sequential use.
#[async_trait]
pub trait RenderEngine: Send {
    /// Navigates to `url` and waits for the network to settle, bounded by
    /// `timeout`
    async fn navigate(&mut self, url: &str, timeout: Duration) -> EngineResult<()>;

    /// Evaluates a script expression on the current page and returns its
    /// JSON result
    async fn evaluate(&mut self, script: &str) -> EngineResult<Value>;

    /// Scrolls the page down by `pixels` to trigger lazy content loading
    async fn scroll_by(&mut self, pixels: u32) -> EngineResult<()>;

    /// Terminates the browser session; the engine is unusable afterwards
    async fn shutdown(&mut self) -> EngineResult<()>;
}
