//! HTTP client for the remote lead store.
//!
//! The store is a PostgREST-style table endpoint keyed by business `name`.
//! The one write operation is a bulk insert-or-ignore upsert: conflicts on
//! `name` are skipped, never overwritten, so a row that was manually edited
//! downstream (e.g. its pipeline `status`) survives repeated scrapes of the
//! same business. The cost — ratings and notes never refresh — is accepted.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;

use leadscout_core::Lead;

/// Table that lead rows are written to.
const LEADS_TABLE: &str = "leads";

/// Ask the store to skip conflicting rows and echo back what it wrote, so
/// the caller can report inserted-vs-skipped counts.
const UPSERT_PREFER: &str = "resolution=ignore-duplicates,return=representation";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid store credential: {reason}")]
    InvalidCredential { reason: String },

    #[error("unexpected HTTP status {status} from lead store: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("malformed response from lead store: {reason}")]
    MalformedResponse { reason: String },
}

/// Client for the lead store's REST endpoint.
pub struct LeadStoreClient {
    client: Client,
    base_url: String,
}

impl LeadStoreClient {
    /// Creates a client with the store credential baked into default
    /// headers (`apikey` plus bearer auth, the PostgREST convention).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredential`] if the key is not a valid
    /// header value, or [`StoreError::Http`] if the client cannot be built.
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key_value =
            HeaderValue::from_str(api_key).map_err(|e| StoreError::InvalidCredential {
                reason: e.to_string(),
            })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            StoreError::InvalidCredential {
                reason: e.to_string(),
            }
        })?;
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Bulk-upserts leads keyed by `name` with skip-on-conflict semantics.
    ///
    /// Returns the number of rows the store actually wrote; resubmitting
    /// the same leads is a no-op that returns 0. An empty batch
    /// short-circuits without a request.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Http`] — network failure talking to the store.
    /// - [`StoreError::UnexpectedStatus`] — any non-2xx response.
    /// - [`StoreError::MalformedResponse`] — the echoed row list is not
    ///   valid JSON.
    pub async fn upsert_leads(&self, leads: &[Lead]) -> Result<usize, StoreError> {
        if leads.is_empty() {
            return Ok(0);
        }

        let url = format!("{}/rest/v1/{LEADS_TABLE}", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("on_conflict", "name")])
            .header("Prefer", UPSERT_PREFER)
            .header(CONTENT_TYPE, "application/json")
            .json(leads)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let written: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| StoreError::MalformedResponse {
                reason: e.to_string(),
            })?;

        tracing::debug!(
            submitted = leads.len(),
            written = written.len(),
            "lead upsert complete"
        );
        Ok(written.len())
    }
}
