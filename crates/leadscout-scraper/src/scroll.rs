//! Progressive loading of the virtualized results feed.

use std::time::Duration;

use crate::page::DirectoryPage;

/// Tuning for [`load_all`].
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// Pixels scrolled per step.
    pub step_px: i64,
    /// Pause after each step so asynchronously loaded content can render
    /// before the next height read.
    pub pause: Duration,
    /// Consecutive steps with no height growth before the feed is treated
    /// as fully loaded.
    pub max_stalled_steps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_px: 1000,
            pause: Duration::from_millis(500),
            max_stalled_steps: 5,
        }
    }
}

/// Scrolls the feed until its content stops growing.
///
/// Each step scrolls by a fixed amount, pauses, then re-reads the feed's
/// scroll height. A step where the cumulative scrolled distance has reached
/// the current height counts as stalled; growth resets the counter. After
/// `max_stalled_steps` consecutive stalls the feed is considered exhausted.
/// This terminates on the common "infinite scroll with a hard cap" pattern
/// instead of looping forever.
///
/// Scroll failures (stale feed handle, closed tab) end the pass silently:
/// whatever already loaded is what gets processed.
///
/// The inter-step pause is an async sleep: a scroll pass can run for
/// minutes on large feeds and must not pin a runtime worker thread for its
/// duration.
pub async fn load_all<P: DirectoryPage>(page: &P, feed: &P::Handle, config: &ScrollConfig) {
    let mut scrolled: i64 = 0;
    let mut stalled: u32 = 0;

    while stalled < config.max_stalled_steps {
        if page.scroll_by(feed, config.step_px).is_err() {
            tracing::debug!("feed scroll failed; stopping load pass");
            return;
        }
        scrolled = scrolled.saturating_add(config.step_px);

        if !config.pause.is_zero() {
            tokio::time::sleep(config.pause).await;
        }

        let height = page.scroll_height(feed);
        if scrolled >= height {
            stalled += 1;
        } else {
            stalled = 0;
        }
    }
}

#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;
