use std::cell::Cell;
use std::time::Duration;

use super::*;
use crate::error::ScrapeError;
use crate::page::AnchorInfo;

/// Feed whose height grows per scroll step until a hard cap.
struct CappedFeed {
    height: Cell<i64>,
    max_height: i64,
    growth_per_step: i64,
    steps: Cell<u32>,
}

impl CappedFeed {
    fn new(initial: i64, max_height: i64, growth_per_step: i64) -> Self {
        Self {
            height: Cell::new(initial),
            max_height,
            growth_per_step,
            steps: Cell::new(0),
        }
    }
}

impl DirectoryPage for CappedFeed {
    type Handle = ();

    fn open_search(&self, _query: &str) -> Result<(), ScrapeError> {
        Ok(())
    }

    fn wait_for_role(&self, _role: &str, _timeout: Duration) -> Option<Self::Handle> {
        Some(())
    }

    fn find_by_role(&self, _role: &str) -> Vec<Self::Handle> {
        Vec::new()
    }

    fn find_by_label_prefix(&self, _prefix: &str) -> Option<Self::Handle> {
        None
    }

    fn accessible_name(&self, _handle: &Self::Handle) -> Option<String> {
        None
    }

    fn visible_text(&self, _handle: &Self::Handle) -> String {
        String::new()
    }

    fn descendant_labels(&self, _handle: &Self::Handle) -> Vec<String> {
        Vec::new()
    }

    fn scroll_into_view(&self, _handle: &Self::Handle) -> Result<(), ScrapeError> {
        Ok(())
    }

    fn click(&self, _handle: &Self::Handle) -> Result<(), ScrapeError> {
        Ok(())
    }

    fn scroll_by(&self, _handle: &Self::Handle, _step_px: i64) -> Result<(), ScrapeError> {
        self.steps.set(self.steps.get() + 1);
        let grown = (self.height.get() + self.growth_per_step).min(self.max_height);
        self.height.set(grown);
        Ok(())
    }

    fn scroll_height(&self, _handle: &Self::Handle) -> i64 {
        self.height.get()
    }

    fn detail_anchors(&self) -> Vec<AnchorInfo> {
        Vec::new()
    }
}

fn fast_config() -> ScrollConfig {
    ScrollConfig {
        step_px: 1000,
        pause: Duration::ZERO,
        max_stalled_steps: 5,
    }
}

#[tokio::test]
async fn load_all_terminates_when_height_stops_growing() {
    // Height caps at 4000: three growth steps, then five stalled ones.
    let page = CappedFeed::new(1000, 4000, 1000);
    load_all(&page, &(), &fast_config()).await;
    assert_eq!(page.steps.get(), 8);
}

#[tokio::test]
async fn load_all_terminates_immediately_on_static_feed() {
    let page = CappedFeed::new(500, 500, 0);
    load_all(&page, &(), &fast_config()).await;
    assert_eq!(page.steps.get(), 5);
}

#[tokio::test]
async fn load_all_step_count_is_bounded_for_large_feeds() {
    let page = CappedFeed::new(1000, 50_000, 1000);
    load_all(&page, &(), &fast_config()).await;
    // 49 growth steps + 5 stalls; the point is that it terminates.
    assert!(page.steps.get() < 100);
}
