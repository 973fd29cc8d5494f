//! Top-level scrape control flow.
//!
//! One run is strictly sequential: listings are clicked one at a time
//! because the directory exposes a single shared detail panel, and a
//! concurrent click would repopulate it mid-read. The liveness pass is also
//! sequential, one URL at a time, to keep target servers unbothered and the
//! broken classification attributable to one HEAD→GET attempt sequence.

use std::time::Duration;

use reqwest::Client;

use leadscout_core::{
    detect_city, extract_specialty, is_qualified, AppConfig, Lead, BROKEN_LINK_NOTE,
};

use crate::error::ScrapeError;
use crate::extract::{extract_listing, pick_website};
use crate::page::DirectoryPage;
use crate::probe::{is_broken, ProbePolicy};
use crate::scroll::{load_all, ScrollConfig};

/// Fallback locator for the results feed when no `role="feed"` element
/// exists: the directory labels the container "Results for <query>".
const FEED_LABEL_PREFIX: &str = "Results for";

/// Bounded waits and policies for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// How long to wait for the results feed after navigation.
    pub feed_wait: Duration,
    /// How long to wait for the detail panel after clicking a listing.
    pub detail_wait: Duration,
    pub scroll: ScrollConfig,
    pub probe_policy: ProbePolicy,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            feed_wait: Duration::from_secs(10),
            detail_wait: Duration::from_secs(3),
            scroll: ScrollConfig::default(),
            probe_policy: ProbePolicy::default(),
        }
    }
}

impl ScrapeOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            feed_wait: Duration::from_secs(config.feed_wait_secs),
            detail_wait: Duration::from_secs(config.detail_wait_secs),
            scroll: ScrollConfig {
                step_px: config.scroll_step_px,
                pause: Duration::from_millis(config.scroll_pause_ms),
                max_stalled_steps: config.scroll_max_stalled_steps,
            },
            probe_policy: ProbePolicy {
                treat_auth_as_broken: config.probe_auth_broken,
            },
        }
    }
}

/// Drives one full scrape: search, scroll, extract, probe, qualify, tag.
///
/// Owns the page for the duration of the run; the browser session behind it
/// is released when the page (and with it this orchestrator) is dropped,
/// whether the run succeeded or not.
pub struct Orchestrator<P: DirectoryPage> {
    page: P,
    probe_http: Client,
    options: ScrapeOptions,
}

impl<P: DirectoryPage> Orchestrator<P> {
    pub fn new(page: P, probe_http: Client, options: ScrapeOptions) -> Self {
        Self {
            page,
            probe_http,
            options,
        }
    }

    /// Runs the pipeline for `query` and returns the qualified, tagged
    /// leads ready for the store upsert.
    ///
    /// Per-listing and per-probe failures are contained: a bad listing is
    /// logged and skipped, a failed probe classifies the site, and neither
    /// aborts the batch. Zero results (no feed found) is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Navigation`] only when the search session
    /// itself cannot be opened — the fatal path.
    pub async fn run(&self, query: &str) -> Result<Vec<Lead>, ScrapeError> {
        self.page.open_search(query)?;

        let feed = self
            .page
            .wait_for_role("feed", self.options.feed_wait)
            .or_else(|| self.page.find_by_label_prefix(FEED_LABEL_PREFIX));
        let Some(feed) = feed else {
            tracing::warn!(query, "no results feed found; treating as zero results");
            return Ok(Vec::new());
        };

        load_all(&self.page, &feed, &self.options.scroll).await;

        // Snapshot: listings loaded as a side effect of later clicks are
        // not revisited.
        let listings = self.page.find_by_role("article");
        tracing::info!(query, listings = listings.len(), "feed fully loaded");

        let mut leads: Vec<Lead> = Vec::with_capacity(listings.len());
        for (index, handle) in listings.iter().enumerate() {
            match self.process_listing(index, handle) {
                Ok(lead) => leads.push(lead),
                Err(error) => {
                    tracing::warn!(index, error = %error, "skipping listing");
                }
            }
        }
        let extracted = leads.len();

        // Second pass over all discovered websites, one URL at a time.
        for lead in &mut leads {
            if let Some(url) = lead.website.clone() {
                if is_broken(&self.probe_http, &url, &self.options.probe_policy).await {
                    tracing::info!(name = %lead.name, url, "website is broken");
                    lead.note = Some(BROKEN_LINK_NOTE.to_string());
                }
            }
        }

        let specialty = extract_specialty(query);
        let mut qualified: Vec<Lead> = leads.into_iter().filter(is_qualified).collect();
        for lead in &mut qualified {
            lead.city = detect_city(&lead.address);
            lead.specialty.clone_from(&specialty);
        }

        tracing::info!(extracted, qualified = qualified.len(), "scrape complete");
        Ok(qualified)
    }

    /// Clicks one listing, reads its list-level fields and the website from
    /// the refreshed detail panel. Any failure here skips only this listing.
    fn process_listing(&self, index: usize, handle: &P::Handle) -> Result<Lead, ScrapeError> {
        self.page
            .scroll_into_view(handle)
            .map_err(|e| interaction(index, &e))?;
        self.page.click(handle).map_err(|e| interaction(index, &e))?;

        // Tolerate a panel that never shows up; the website just stays None.
        if self
            .page
            .wait_for_role("main", self.options.detail_wait)
            .is_none()
        {
            tracing::debug!(index, "detail panel did not appear within the wait");
        }

        let raw = extract_listing(&self.page, handle);
        let website = pick_website(&self.page.detail_anchors());
        Ok(Lead::from_listing(raw, website))
    }
}

fn interaction(index: usize, error: &ScrapeError) -> ScrapeError {
    ScrapeError::Interaction {
        index,
        reason: error.to_string(),
    }
}
