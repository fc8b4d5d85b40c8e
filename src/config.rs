//! ExerciseDB connection settings

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "exercisedb.p.rapidapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_KEY_ENV: &str = "EXERCISEDB_API_KEY";
pub const API_HOST_ENV: &str = "EXERCISEDB_API_HOST";
pub const BASE_URL_ENV: &str = "EXERCISEDB_BASE_URL";

/// Settings needed to talk to ExerciseDB through RapidAPI
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_host: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl Config {
    /// Build config from already-resolved values (CLI flags or env).
    /// A missing or blank key is fatal.
    pub fn resolve(
        api_key: Option<String>,
        api_host: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let api_host = api_host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        let raw_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw_url,
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            api_key,
            api_host,
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read config straight from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(API_HOST_ENV).ok(),
            std::env::var(BASE_URL_ENV).ok(),
        )
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
