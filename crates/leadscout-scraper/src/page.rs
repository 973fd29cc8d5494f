//! Capability boundary over the rendered directory page.
//!
//! The directory is an unstable third-party rendering driven through browser
//! automation. The orchestrator never talks to the browser directly; it sees
//! only this trait, so the whole control flow runs against a fake page in
//! tests. Semantics are ARIA-level: elements are located by role, names come
//! from accessibility labels.

use std::time::Duration;

use crate::error::ScrapeError;

/// One anchor found in the detail panel, reduced to the attributes the
/// website lookup cares about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorInfo {
    pub href: String,
    /// Accessible label (`aria-label`), if any.
    pub label: Option<String>,
    /// Tooltip text (`data-tooltip`), if any.
    pub tooltip: Option<String>,
    /// True for the anchor the directory tags as the business's official
    /// ("authority") link.
    pub is_authority: bool,
}

/// Handle-based view of one rendered directory page.
///
/// The page owns a single shared detail panel: clicking a listing replaces
/// the panel's content, so callers must keep listing processing strictly
/// sequential. All read methods are best-effort; a stale or detached handle
/// yields empty results rather than an error.
pub trait DirectoryPage {
    /// Opaque reference to one rendered element. Cheap to clone; may go
    /// stale if the page re-renders.
    type Handle: Clone;

    /// Navigates to the search results for `query` and waits for the
    /// network to settle.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Navigation`] if the page cannot be opened at
    /// all. This is the fatal path; everything after it degrades gracefully.
    fn open_search(&self, query: &str) -> Result<(), ScrapeError>;

    /// Polls for the first element with the given ARIA role, up to `timeout`.
    fn wait_for_role(&self, role: &str, timeout: Duration) -> Option<Self::Handle>;

    /// Snapshot of all elements currently carrying the given ARIA role.
    fn find_by_role(&self, role: &str) -> Vec<Self::Handle>;

    /// First element whose accessible label starts with `prefix`.
    fn find_by_label_prefix(&self, prefix: &str) -> Option<Self::Handle>;

    /// The element's accessible (ARIA) name, if it has one.
    fn accessible_name(&self, handle: &Self::Handle) -> Option<String>;

    /// The element's rendered text content.
    fn visible_text(&self, handle: &Self::Handle) -> String;

    /// Accessible labels of the element's descendants, in document order.
    fn descendant_labels(&self, handle: &Self::Handle) -> Vec<String>;

    /// Scrolls the element into the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Session`] if the browser call fails.
    fn scroll_into_view(&self, handle: &Self::Handle) -> Result<(), ScrapeError>;

    /// Clicks the element. For a listing this repopulates the shared
    /// detail panel.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Session`] if the browser call fails.
    fn click(&self, handle: &Self::Handle) -> Result<(), ScrapeError>;

    /// Scrolls the element's own scroll container down by `step_px`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Session`] if the browser call fails.
    fn scroll_by(&self, handle: &Self::Handle, step_px: i64) -> Result<(), ScrapeError>;

    /// The element's current content height (`scrollHeight`).
    fn scroll_height(&self, handle: &Self::Handle) -> i64;

    /// All `href`-carrying anchors currently in the detail panel.
    fn detail_anchors(&self) -> Vec<AnchorInfo>;
}
