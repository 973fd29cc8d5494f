//! Lead data model and the qualification rule.
//!
//! A `Lead` travels through three states in one scrape run: extracted
//! (list-level fields plus the detail-panel website), enriched (the liveness
//! pass may add a [`BROKEN_LINK_NOTE`]), and tagged (city/specialty). Records
//! that fail [`is_qualified`] are discarded before the store upsert.

use serde::Serialize;

/// Note attached to a lead whose website failed the liveness probe.
pub const BROKEN_LINK_NOTE: &str = "Broken Link";

/// Initial pipeline status for every freshly scraped lead.
pub const NEW_STATUS: &str = "New";

/// Fields scraped from one rendered listing in the results feed.
///
/// Everything except `name` is best-effort: the source rendering is
/// unstructured text, so absent fields are `None`/empty, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub name: String,
    /// Raw numeric text from a `"<n> stars"` accessibility label, unparsed.
    pub rating_text: Option<String>,
    pub address_line: String,
    pub phone_line: Option<String>,
}

/// One business record as persisted to the lead store.
#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    /// Natural key in the store: upserts conflict on `name`.
    pub name: String,
    /// Parsed star rating in 0.0–5.0. `0.0` is a sentinel for "no rating
    /// could be parsed", not a true zero score.
    pub rating: f64,
    pub address: String,
    pub website: Option<String>,
    pub phone: String,
    /// Set to [`BROKEN_LINK_NOTE`] when the website probe classifies the
    /// site as broken.
    pub note: Option<String>,
    /// Canonical city from the locality table, or `"Unknown"`.
    pub city: String,
    pub specialty: Option<String>,
    pub status: String,
}

impl Lead {
    /// Builds a lead from list-level extraction plus the detail-panel
    /// website. City/specialty tagging happens later, after qualification.
    #[must_use]
    pub fn from_listing(raw: RawListing, website: Option<String>) -> Self {
        let rating = raw
            .rating_text
            .as_deref()
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|r| (0.0..=5.0).contains(r))
            .unwrap_or(0.0);
        Self {
            name: raw.name,
            rating,
            address: raw.address_line,
            website,
            phone: raw.phone_line.unwrap_or_default(),
            note: None,
            city: crate::classify::UNKNOWN_CITY.to_string(),
            specialty: None,
            status: NEW_STATUS.to_string(),
        }
    }

    /// True when the website probe marked this lead's site as broken.
    #[must_use]
    pub fn has_broken_link(&self) -> bool {
        self.note.as_deref() == Some(BROKEN_LINK_NOTE)
    }
}

/// The qualification rule: a business is a sales-worthy lead when its web
/// presence is weak on at least one axis.
///
/// - rating exists but is poor (`0 < rating < 3.5`), or
/// - it has no website at all, or
/// - its website is marked broken.
///
/// The unrated case (`rating == 0.0`) does not by itself qualify: absence of
/// a rating says nothing about the business.
#[must_use]
pub fn is_qualified(lead: &Lead) -> bool {
    (lead.rating > 0.0 && lead.rating < 3.5) || lead.website.is_none() || lead.has_broken_link()
}

#[cfg(test)]
#[path = "leads_test.rs"]
mod tests;
