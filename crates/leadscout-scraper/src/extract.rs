//! Field extraction from one rendered listing.
//!
//! The directory renders listings as unstructured text plus accessibility
//! metadata, so everything here is heuristic and best-effort: a field that
//! cannot be located comes back `None`/empty, and extraction never fails the
//! surrounding batch. The website URL is deliberately NOT read here — it
//! lives in the shared detail panel and is fetched per-listing by the
//! orchestrator after a click.

use regex::Regex;

use leadscout_core::RawListing;

use crate::page::{AnchorInfo, DirectoryPage};

/// Pulls list-level fields from one listing element.
pub fn extract_listing<P: DirectoryPage>(page: &P, handle: &P::Handle) -> RawListing {
    let text = page.visible_text(handle);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    // Accessible name is the reliable source; the first text line is the
    // fallback when the rendering carries no label.
    let name = page
        .accessible_name(handle)
        .unwrap_or_else(|| lines.first().map_or(String::new(), |l| (*l).to_string()));

    let rating_text = page
        .descendant_labels(handle)
        .iter()
        .find_map(|label| star_rating_text(label));

    RawListing {
        name,
        rating_text,
        address_line: pick_address_line(&lines),
        phone_line: pick_phone_line(&lines),
    }
}

/// Extracts the numeric part of a `"<number> stars"` accessibility label.
#[must_use]
pub fn star_rating_text(label: &str) -> Option<String> {
    let re = Regex::new(r"(?i)(\d+(?:\.\d+)?)\s+stars?").expect("valid stars regex");
    re.captures(label).map(|caps| caps[1].to_string())
}

/// Heuristic address pick: the third visible line, unless it does not look
/// like an address, in which case the first comma-bearing line that is not a
/// bare 5-digit postal fragment.
#[must_use]
pub fn pick_address_line(lines: &[&str]) -> String {
    if let Some(third) = lines.get(2) {
        if looks_like_address(third) {
            return (*third).to_string();
        }
    }
    lines
        .iter()
        .find(|line| looks_like_address(line))
        .map_or_else(String::new, |line| (*line).to_string())
}

fn looks_like_address(line: &str) -> bool {
    line.contains(',') && !is_postal_fragment(line)
}

/// A line that is only a 5-digit postal code (optionally comma-terminated)
/// is a wrapped fragment of the previous line, not an address.
fn is_postal_fragment(line: &str) -> bool {
    let re = Regex::new(r"^\d{5},?$").expect("valid postal regex");
    re.is_match(line.trim())
}

/// Heuristic phone pick: the first line matching a loose digit-group pattern
/// that is not hours-of-operation text. "Open"/"Closed" lines use similar
/// digit groupings ("Open 24 hours", "Closed · Opens 10 am") and must be
/// rejected.
#[must_use]
pub fn pick_phone_line(lines: &[&str]) -> Option<String> {
    let re = Regex::new(r"(?:\+?\d{1,3}[\s-])?\d{3,5}[\s-]\d{3,4}(?:[\s-]\d{3,4})?")
        .expect("valid phone regex");
    lines
        .iter()
        .find(|line| {
            !line.contains("Open") && !line.contains("Closed") && re.is_match(line)
        })
        .map(|line| (*line).to_string())
}

/// Resolves the business website from the detail-panel anchors.
///
/// Priority order, first match wins:
/// 1. the anchor tagged as the official/authority link,
/// 2. an anchor whose accessible label contains "website",
/// 3. an anchor whose tooltip contains "website".
///
/// Both text checks are case-insensitive; the directory renders "Website",
/// "Open website", and similar variants.
#[must_use]
pub fn pick_website(anchors: &[AnchorInfo]) -> Option<String> {
    let mentions_website =
        |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains("website"));

    if let Some(anchor) = anchors.iter().find(|a| a.is_authority) {
        return Some(anchor.href.clone());
    }
    if let Some(anchor) = anchors.iter().find(|a| mentions_website(a.label.as_deref())) {
        return Some(anchor.href.clone());
    }
    anchors
        .iter()
        .find(|a| mentions_website(a.tooltip.as_deref()))
        .map(|a| a.href.clone())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
