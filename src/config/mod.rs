//! Typed configuration from environment variables.
//!
//! Loads once at startup, fails fast if a value is present but unparsable.
//! Every variable has a default, so an empty environment is valid.

use crate::error::{Error, Result};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.mojang.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the profile lookup service.
    pub api_url: String,
    /// Per-request timeout for the lookup client.
    pub lookup_timeout: Duration,
    /// Maximum number of lookups in flight at once.
    pub max_jobs: usize,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_max_jobs(None)
    }

    /// Like [`Config::from_env`], but a given `max_jobs` replaces `MAX_JOBS`,
    /// which is then not read at all. The dispatcher validates the value.
    pub fn from_env_with_max_jobs(max_jobs: Option<usize>) -> Result<Self> {
        let max_jobs = match max_jobs {
            Some(n) => n,
            None => {
                let n = parsed_var("MAX_JOBS", 8usize)?;
                if n == 0 {
                    return Err(Error::Config("MAX_JOBS must be at least 1".to_string()));
                }
                n
            }
        };

        Ok(Self {
            api_url: std::env::var("PROFILE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            lookup_timeout: Duration::from_secs(parsed_var("LOOKUP_TIMEOUT_SECS", 10u64)?),
            max_jobs,
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parsed_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("invalid value for {name} ({raw:?}): {e}"))),
        Err(_) => Ok(default),
    }
}
