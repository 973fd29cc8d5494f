pub mod app_config;
pub mod classify;
pub mod config;
pub mod leads;

use thiserror::Error;

pub use app_config::AppConfig;
pub use classify::{detect_city, extract_specialty, UNKNOWN_CITY};
pub use config::{load_app_config, load_app_config_from_env};
pub use leads::{is_qualified, Lead, RawListing, BROKEN_LINK_NOTE, NEW_STATUS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
