//! Clipstream: a resilient fetch orchestrator for social-video metadata
//!
//! This crate scrapes public video, profile, and trending-hashtag metadata
//! from a JavaScript-rendered platform by driving one headless browser
//! session, with bounded retries, exponential backoff, scroll pagination,
//! and count/hashtag normalization into immutable records.

pub mod config;
pub mod engine;
pub mod output;
pub mod parse;
pub mod records;
pub mod scrape;

use std::time::Duration;
use thiserror::Error;

/// Main error type for clipstream operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation to {url} timed out after {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("Page evaluation failed: {message}")]
    Evaluation { message: String },

    #[error("Retries exhausted after {attempts} attempts: {source}")]
    ExhaustedRetries {
        attempts: u32,
        source: Box<ScrapeError>,
    },

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Sink(#[from] SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Whether the error is expected to possibly succeed on retry.
    ///
    /// Navigation failures, navigation timeouts, and evaluation failures are
    /// transient. Session lifecycle errors are never transient: retrying
    /// against a broken browser session is unsafe.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScrapeError::Navigation { .. }
                | ScrapeError::NavigationTimeout { .. }
                | ScrapeError::Evaluation { .. }
        )
    }
}

/// Session lifecycle errors: always fatal, never retried
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Session is {state:?}, expected Ready")]
    NotReady { state: scrape::SessionState },

    #[error("Session is closed and cannot be reused")]
    Closed,

    #[error("Browser teardown failed: {0}")]
    Teardown(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Record sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for clipstream operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

// Re-export commonly used types
pub use config::Config;
pub use records::{Batch, ProfileOutcome, TrendingHashtag, UserRecord, VideoRecord};
pub use scrape::{Orchestrator, Session, SessionState};
