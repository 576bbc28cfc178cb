use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for clipstream
///
/// Every field has a default, so the tool runs with no config file at all;
/// a TOML file overrides selectively and CLI flags override on top.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub session: SessionConfig,
    pub fetch: FetchConfig,
    pub platform: PlatformConfig,
    pub output: OutputConfig,
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Run the browser without a visible window.
    pub headless: bool,

    pub viewport_width: u32,
    pub viewport_height: u32,

    /// User agent presented to the platform. The default spoofs a plain
    /// desktop browser; automation-flavored agents get served different
    /// markup.
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

/// Fetch behavior: retries, backoff, timeouts, pagination
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Maximum attempts per operation, including the first.
    pub max_retries: u32,

    /// First backoff delay; doubles per attempt.
    pub backoff_base_ms: u64,

    /// Ceiling on any single backoff delay.
    pub backoff_max_ms: u64,

    /// Bound on navigation plus network-settled wait.
    pub navigation_timeout_ms: u64,

    /// Post-navigation settle before extraction.
    pub settle_ms: u64,

    /// Settle after each pagination scroll.
    pub scroll_settle_ms: u64,

    /// Assumed items loaded per scroll step.
    pub per_scroll_yield: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_ms: 4_000,
            backoff_max_ms: 10_000,
            navigation_timeout_ms: 30_000,
            settle_ms: 2_000,
            scroll_settle_ms: 2_000,
            per_scroll_yield: 10,
        }
    }
}

/// The scraped platform
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlatformConfig {
    /// Base URL operations are built against.
    pub base_url: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.tiktok.com".to_string(),
        }
    }
}

/// Record output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// File to write records to; stdout when absent.
    pub path: Option<PathBuf>,
}
