use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_SEARCH_BASE_URL: &str = "https://www.google.com/maps/search/";
const DEFAULT_PROBE_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{other}\""),
            }),
        }
    };

    let lead_store_url = require("LEAD_STORE_URL")?;
    let lead_store_api_key = require("LEAD_STORE_API_KEY")?;

    Ok(AppConfig {
        lead_store_url,
        lead_store_api_key,
        search_base_url: or_default("LEADSCOUT_SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL),
        log_level: or_default("LEADSCOUT_LOG_LEVEL", "info"),
        probe_user_agent: or_default("LEADSCOUT_PROBE_USER_AGENT", DEFAULT_PROBE_USER_AGENT),
        probe_timeout_secs: parse_u64("LEADSCOUT_PROBE_TIMEOUT_SECS", "8")?,
        probe_auth_broken: parse_bool("LEADSCOUT_PROBE_AUTH_BROKEN", "true")?,
        detail_wait_secs: parse_u64("LEADSCOUT_DETAIL_WAIT_SECS", "3")?,
        feed_wait_secs: parse_u64("LEADSCOUT_FEED_WAIT_SECS", "10")?,
        scroll_step_px: parse_i64("LEADSCOUT_SCROLL_STEP_PX", "1000")?,
        scroll_pause_ms: parse_u64("LEADSCOUT_SCROLL_PAUSE_MS", "500")?,
        scroll_max_stalled_steps: parse_u32("LEADSCOUT_SCROLL_MAX_STALLED_STEPS", "5")?,
        store_timeout_secs: parse_u64("LEADSCOUT_STORE_TIMEOUT_SECS", "30")?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
