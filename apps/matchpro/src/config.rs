use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
///
/// The API key is optional here: its absence is reported when an analysis is
/// attempted, not at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let request_timeout = parse_timeout(std::env::var("MATCHPRO_TIMEOUT_SECS").ok().as_deref())?;

        Ok(Config {
            api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("API_KEY")),
            api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Parses `MATCHPRO_TIMEOUT_SECS`. Unset means the default; zero is rejected.
fn parse_timeout(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("MATCHPRO_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("MATCHPRO_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
