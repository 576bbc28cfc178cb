//! Chromium-backed rendering engine via the DevTools protocol
//!
//! Owns one browser process and one page. The browser is launched headless
//! with sandboxing disabled (required in constrained container
//! environments), a fixed viewport, and a spoofed desktop user agent.

use crate::config::SessionConfig;
use crate::engine::{EngineError, EngineResult, RenderEngine};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;

/// A live Chromium session: browser process, CDP event loop, and one page
pub struct ChromiumEngine {
    browser: Browser,
    page: Page,
    handler_task: tokio::task::JoinHandle<()>,
}

impl ChromiumEngine {
    /// Launches a Chromium process configured from `config`
    ///
    /// The CDP event handler runs on a spawned task for the lifetime of the
    /// session; [`RenderEngine::shutdown`] (or drop) stops it.
    pub async fn launch(config: &SessionConfig) -> EngineResult<Self> {
        let mut builder = BrowserConfig::builder()
            .viewport(Some(Viewport {
                width: config.viewport_width,
                height: config.viewport_height,
                device_scale_factor: Some(1.0),
                ..Default::default()
            }))
            .args([
                "--no-sandbox".to_string(),
                "--disable-setuid-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
                format!("--user-agent={}", config.user_agent),
                format!(
                    "--window-size={},{}",
                    config.viewport_width, config.viewport_height
                ),
            ]);

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(EngineError::Launch)?;

        tracing::debug!(headless = config.headless, "Launching Chromium");
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::warn!("CDP handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| EngineError::Launch(format!("Failed to create page: {e}")))?;

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }
}

#[async_trait]
impl RenderEngine for ChromiumEngine {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> EngineResult<()> {
        let navigation = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| EngineError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

            // Wait for the network-settled load event before extraction
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| EngineError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

            Ok(())
        };

        tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| EngineError::Timeout {
                url: url.to_string(),
                timeout,
            })?
    }

    async fn evaluate(&mut self, script: &str) -> EngineResult<Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| EngineError::Evaluation(e.to_string()))?;

        // A script returning undefined carries no value; map it to null
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn scroll_by(&mut self, pixels: u32) -> EngineResult<()> {
        self.page
            .evaluate(format!("window.scrollBy(0, {pixels})"))
            .await
            .map_err(|e| EngineError::Evaluation(format!("scroll failed: {e}")))?;
        Ok(())
    }

    async fn shutdown(&mut self) -> EngineResult<()> {
        tracing::debug!("Closing Chromium session");
        self.browser
            .close()
            .await
            .map_err(|e| EngineError::Shutdown(e.to_string()))?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}

impl Drop for ChromiumEngine {
    fn drop(&mut self) {
        // Dropping `Browser` kills the child process; stop the event loop
        // too so a cancelled operation cannot leak the task.
        self.handler_task.abort();
    }
}
