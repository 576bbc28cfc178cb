//! Scroll-driven pagination
//!
//! The platform loads content lazily as the page scrolls. The driver
//! triggers a fixed number of scroll steps derived from the target record
//! count and the assumed per-scroll yield, settling after each step so lazy
//! content can render. It never inspects the extracted content itself; the
//! orchestrator evaluates the page once scrolling is done.

use crate::engine::RenderEngine;
use std::time::Duration;

/// Assumed number of items one scroll step loads
pub const DEFAULT_PER_SCROLL_YIELD: usize = 10;

/// Drives incremental content loading on a single page
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    /// Pixels per scroll step, typically one viewport height.
    scroll_pixels: u32,
    /// Settle delay after each scroll so lazy content can render.
    settle_delay: Duration,
    /// Assumed items loaded per scroll; sets the iteration cap.
    per_scroll_yield: usize,
}

impl Paginator {
    pub fn new(scroll_pixels: u32, settle_delay: Duration, per_scroll_yield: usize) -> Self {
        Self {
            scroll_pixels,
            settle_delay,
            // A zero yield would make the step count meaningless
            per_scroll_yield: per_scroll_yield.max(1),
        }
    }

    /// Number of scroll steps needed to reach `target` items
    pub fn steps_for(&self, target: usize) -> usize {
        target / self.per_scroll_yield
    }

    /// Scrolls until the computed step cap for `target` is reached
    ///
    /// Returns the number of scroll steps performed. Each step is one
    /// scroll action plus one settle sleep; the settle is a suspension
    /// point distinct from retry backoff.
    pub async fn load_to_target<E: RenderEngine>(
        &self,
        engine: &mut E,
        target: usize,
    ) -> crate::Result<usize> {
        let steps = self.steps_for(target);
        tracing::debug!(target, steps, "Paginating by scroll");

        for step in 0..steps {
            engine.scroll_by(self.scroll_pixels).await?;
            tracing::trace!(step = step + 1, steps, "Scrolled, settling");
            tokio::time::sleep(self.settle_delay).await;
        }

        Ok(steps)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(1080, Duration::from_secs(2), DEFAULT_PER_SCROLL_YIELD)
    }
}
