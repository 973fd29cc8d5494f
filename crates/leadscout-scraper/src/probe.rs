//! Website liveness probing.
//!
//! Classification is deliberately aggressive: the downstream question is
//! "is this business's web presence unreliable?", not strict uptime
//! monitoring, so any client or server error counts as broken. HEAD is
//! tried first because it is cheap; many servers and WAFs reject it, so a
//! 405 or any transport failure falls back to a single GET. No retries
//! beyond that — one well-defined attempt sequence per URL keeps the
//! classification attributable.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::ScrapeError;

/// Tunable knobs for the broken-site classification.
#[derive(Debug, Clone)]
pub struct ProbePolicy {
    /// When false, 401/403 responses count as live. The reference behavior
    /// (true) conflates bot-blocking with breakage; deployments that see
    /// too many false positives can turn it off.
    pub treat_auth_as_broken: bool,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            treat_auth_as_broken: true,
        }
    }
}

/// Builds the HTTP client used for liveness probes: bounded per-request
/// timeout and a realistic browser User-Agent (some sites reject obvious
/// bot agents outright, which would skew the classification).
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the client cannot be constructed.
pub fn probe_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScrapeError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Returns `true` when `url` should be treated as a broken web presence.
///
/// Never fails: every error path (timeout, DNS, refused connection, TLS)
/// resolves to a boolean. Broken means the resolved response status is
/// ≥ 400 per `policy`, or both the HEAD and the fallback GET failed to
/// complete.
pub async fn is_broken(client: &Client, url: &str, policy: &ProbePolicy) -> bool {
    match client.head(url).send().await {
        Ok(response) if response.status() != StatusCode::METHOD_NOT_ALLOWED => {
            status_is_broken(response.status(), policy)
        }
        // 405 or transport failure: many servers reject HEAD; one GET
        // settles it.
        _ => match client.get(url).send().await {
            Ok(response) => status_is_broken(response.status(), policy),
            Err(error) => {
                tracing::debug!(url, error = %error, "probe failed on both HEAD and GET");
                true
            }
        },
    }
}

fn status_is_broken(status: StatusCode, policy: &ProbePolicy) -> bool {
    if !policy.treat_auth_as_broken
        && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    {
        return false;
    }
    status.as_u16() >= 400
}
