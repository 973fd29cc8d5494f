use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to launch browser: {reason}")]
    Launch { reason: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("browser session error: {reason}")]
    Session { reason: String },

    #[error("interaction with listing {index} failed: {reason}")]
    Interaction { index: usize, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
