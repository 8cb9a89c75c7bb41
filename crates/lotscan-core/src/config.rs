use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::app_config::{AppConfig, Pacing};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.toyotagallatin.com";
pub const DEFAULT_LISTING_PATHS: &str = "/inventory/new,/inventory/used";
pub const DEFAULT_OUTPUT_PATH: &str = "toyota_gallatin_inventory.csv";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ScraperAgent/1.0)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a config
/// pointed at the stock dealership.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_millis = |var: &str, default: &str| -> Result<Duration, ConfigError> {
        parse_u64(var, default).map(Duration::from_millis)
    };

    let base_url = parse_base_url(&or_default("LOTSCAN_BASE_URL", DEFAULT_BASE_URL))
        .map_err(|reason| invalid("LOTSCAN_BASE_URL", reason))?;

    let listing_urls = parse_listing_urls(
        &base_url,
        &or_default("LOTSCAN_LISTING_PATHS", DEFAULT_LISTING_PATHS),
    )
    .map_err(|reason| invalid("LOTSCAN_LISTING_PATHS", reason))?;

    let output_path = PathBuf::from(or_default("LOTSCAN_OUTPUT_PATH", DEFAULT_OUTPUT_PATH));
    let log_level = or_default("LOTSCAN_LOG_LEVEL", "info");
    let user_agent = or_default("LOTSCAN_USER_AGENT", DEFAULT_USER_AGENT);
    let headless = parse_bool(&or_default("LOTSCAN_HEADLESS", "true"))
        .map_err(|reason| invalid("LOTSCAN_HEADLESS", reason))?;
    let chrome_executable = lookup("LOTSCAN_CHROME_EXECUTABLE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let nav_timeout_secs = parse_u64("LOTSCAN_NAV_TIMEOUT_SECS", "30")?;

    let batch_size = parse_usize("LOTSCAN_BATCH_SIZE", "5")?;
    if batch_size == 0 {
        return Err(invalid("LOTSCAN_BATCH_SIZE", "must be at least 1".to_string()));
    }

    let pacing = Pacing {
        listing_settle: parse_millis("LOTSCAN_LISTING_SETTLE_MS", "800")?,
        click_settle: parse_millis("LOTSCAN_CLICK_SETTLE_MS", "1200")?,
        page_gap: parse_millis("LOTSCAN_PAGE_GAP_MS", "400")?,
        detail_settle: parse_millis("LOTSCAN_DETAIL_SETTLE_MS", "600")?,
        batch_size,
        batch_pause: parse_millis("LOTSCAN_BATCH_PAUSE_MS", "500")?,
        max_pages: parse_usize("LOTSCAN_MAX_PAGES", "200")?,
    };

    Ok(AppConfig {
        base_url,
        listing_urls,
        output_path,
        log_level,
        user_agent,
        headless,
        chrome_executable,
        nav_timeout_secs,
        pacing,
    })
}

/// Parses the dealership origin. Only `http` and `https` are accepted.
///
/// # Errors
///
/// Returns the reason text when the URL does not parse or has no host.
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme \"{}\"", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("URL has no host".to_string());
    }
    Ok(url)
}

/// Splits a comma-separated list of listing paths (or absolute URLs) and
/// resolves each against `base`.
///
/// # Errors
///
/// Returns the reason text when an entry cannot be joined or the list is empty.
pub fn parse_listing_urls(base: &Url, raw: &str) -> Result<Vec<Url>, String> {
    let urls = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| base.join(s).map_err(|e| format!("\"{s}\": {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    if urls.is_empty() {
        return Err("no listing paths given".to_string());
    }
    Ok(urls)
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got \"{other}\"")),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
