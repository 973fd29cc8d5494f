//! `headless_chrome`-backed implementation of [`DirectoryPage`].
//!
//! Handles are CDP node ids, rehydrated into [`Element`]s per call. Every
//! read is best-effort: a stale node id or a detached element resolves to an
//! empty result, matching the trait contract. The Chrome process is killed
//! when the owning [`ChromePage`] is dropped, so the automation session is
//! released no matter how a run ends.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, Element, LaunchOptions, Tab};

use crate::error::ScrapeError;
use crate::page::{AnchorInfo, DirectoryPage};

/// Live directory page in a headless Chrome tab.
pub struct ChromePage {
    // Held for its Drop impl; dropping the Browser terminates Chrome.
    _browser: Browser,
    tab: Arc<Tab>,
    search_base_url: String,
}

impl ChromePage {
    /// Launches headless Chrome and opens one tab.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Launch`] if Chrome cannot be started or the
    /// tab cannot be created. This is a fatal setup error for the run.
    pub fn new(search_base_url: &str) -> Result<Self, ScrapeError> {
        let browser = Browser::new(LaunchOptions {
            headless: true,
            ..Default::default()
        })
        .map_err(|e| ScrapeError::Launch {
            reason: e.to_string(),
        })?;
        let tab = browser.new_tab().map_err(|e| ScrapeError::Launch {
            reason: e.to_string(),
        })?;
        Ok(Self {
            _browser: browser,
            tab,
            search_base_url: search_base_url.to_string(),
        })
    }

    fn element(&self, node_id: u32) -> Option<Element<'_>> {
        Element::new(&self.tab, node_id).ok()
    }

    /// Reads one attribute from the flat name/value list CDP returns.
    fn attribute(element: &Element<'_>, name: &str) -> Option<String> {
        let attributes = element.get_attributes().ok().flatten()?;
        attributes
            .chunks_exact(2)
            .find(|pair| pair[0] == name)
            .map(|pair| pair[1].clone())
    }

    /// Runs a JS snippet against the element and reads a numeric result.
    fn js_number(&self, node_id: u32, function: &str) -> i64 {
        self.element(node_id)
            .and_then(|el| el.call_js_fn(function, Vec::new(), false).ok())
            .and_then(|obj| obj.value)
            .and_then(|v| v.as_f64())
            .map_or(0, |f| f as i64)
    }
}

/// Spaces become `+` in the directory's search path.
fn encode_query(query: &str) -> String {
    query.trim().replace(' ', "+")
}

impl DirectoryPage for ChromePage {
    type Handle = u32;

    fn open_search(&self, query: &str) -> Result<(), ScrapeError> {
        let url = format!("{}{}", self.search_base_url, encode_query(query));
        self.tab
            .navigate_to(&url)
            .map_err(|e| ScrapeError::Navigation {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::Navigation {
                url,
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn wait_for_role(&self, role: &str, timeout: Duration) -> Option<Self::Handle> {
        let selector = format!("[role='{role}']");
        self.tab
            .wait_for_element_with_custom_timeout(&selector, timeout)
            .ok()
            .map(|el| el.node_id)
    }

    fn find_by_role(&self, role: &str) -> Vec<Self::Handle> {
        let selector = format!("[role='{role}']");
        match self.tab.find_elements(&selector) {
            Ok(elements) => elements.iter().map(|el| el.node_id).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn find_by_label_prefix(&self, prefix: &str) -> Option<Self::Handle> {
        let selector = format!("[aria-label^='{prefix}']");
        self.tab
            .find_element(&selector)
            .ok()
            .map(|el| el.node_id)
    }

    fn accessible_name(&self, handle: &Self::Handle) -> Option<String> {
        let element = self.element(*handle)?;
        Self::attribute(&element, "aria-label").filter(|label| !label.is_empty())
    }

    fn visible_text(&self, handle: &Self::Handle) -> String {
        self.element(*handle)
            .and_then(|el| el.get_inner_text().ok())
            .unwrap_or_default()
    }

    fn descendant_labels(&self, handle: &Self::Handle) -> Vec<String> {
        let Some(element) = self.element(*handle) else {
            return Vec::new();
        };
        match element.find_elements("[aria-label]") {
            Ok(elements) => elements
                .iter()
                .filter_map(|el| Self::attribute(el, "aria-label"))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn scroll_into_view(&self, handle: &Self::Handle) -> Result<(), ScrapeError> {
        let element = self.element(*handle).ok_or_else(|| ScrapeError::Session {
            reason: "element handle is stale".to_string(),
        })?;
        element
            .scroll_into_view()
            .map_err(|e| ScrapeError::Session {
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn click(&self, handle: &Self::Handle) -> Result<(), ScrapeError> {
        let element = self.element(*handle).ok_or_else(|| ScrapeError::Session {
            reason: "element handle is stale".to_string(),
        })?;
        element.click().map_err(|e| ScrapeError::Session {
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn scroll_by(&self, handle: &Self::Handle, step_px: i64) -> Result<(), ScrapeError> {
        let element = self.element(*handle).ok_or_else(|| ScrapeError::Session {
            reason: "feed handle is stale".to_string(),
        })?;
        element
            .call_js_fn(
                "function(step) { this.scrollBy(0, step); }",
                vec![serde_json::json!(step_px)],
                false,
            )
            .map_err(|e| ScrapeError::Session {
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn scroll_height(&self, handle: &Self::Handle) -> i64 {
        self.js_number(*handle, "function() { return this.scrollHeight; }")
    }

    fn detail_anchors(&self) -> Vec<AnchorInfo> {
        match self.tab.find_elements("[role='main'] a[href]") {
            Ok(elements) => elements
                .iter()
                .filter_map(|el| {
                    let href = Self::attribute(el, "href")?;
                    Some(AnchorInfo {
                        href,
                        label: Self::attribute(el, "aria-label"),
                        tooltip: Self::attribute(el, "data-tooltip"),
                        is_authority: Self::attribute(el, "data-item-id").as_deref()
                            == Some("authority"),
                    })
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
