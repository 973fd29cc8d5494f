/// Runtime configuration for a scrape run, assembled from environment
/// variables by [`crate::config`].
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the lead store REST endpoint.
    pub lead_store_url: String,
    /// Access credential for the lead store.
    pub lead_store_api_key: String,
    /// Directory search URL; the query is appended URL-encoded.
    pub search_base_url: String,
    pub log_level: String,
    /// User-Agent sent with liveness probe requests.
    pub probe_user_agent: String,
    pub probe_timeout_secs: u64,
    /// When false, 401/403 probe responses are treated as live rather than
    /// broken (bot-blocking is not site breakage).
    pub probe_auth_broken: bool,
    /// How long to wait for the detail panel after clicking a listing.
    pub detail_wait_secs: u64,
    /// How long to wait for the results feed after navigation.
    pub feed_wait_secs: u64,
    pub scroll_step_px: i64,
    pub scroll_pause_ms: u64,
    /// Consecutive no-growth scroll steps before the feed is considered
    /// fully loaded.
    pub scroll_max_stalled_steps: u32,
    pub store_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("lead_store_url", &self.lead_store_url)
            .field("lead_store_api_key", &"[redacted]")
            .field("search_base_url", &self.search_base_url)
            .field("log_level", &self.log_level)
            .field("probe_user_agent", &self.probe_user_agent)
            .field("probe_timeout_secs", &self.probe_timeout_secs)
            .field("probe_auth_broken", &self.probe_auth_broken)
            .field("detail_wait_secs", &self.detail_wait_secs)
            .field("feed_wait_secs", &self.feed_wait_secs)
            .field("scroll_step_px", &self.scroll_step_px)
            .field("scroll_pause_ms", &self.scroll_pause_ms)
            .field("scroll_max_stalled_steps", &self.scroll_max_stalled_steps)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .finish()
    }
}
