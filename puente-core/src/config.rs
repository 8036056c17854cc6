//! Configuration management
//!
//! Secrets come from the environment (the deployment platform injects them):
//!
//! - `PUENTE_API_URL` - upstream aggregation API base URL
//! - `PUENTE_API_KEY` - static upstream API key
//! - `PUENTE_ENCRYPTION_KEY` - 32-byte symmetric key for credential blobs
//! - `PUENTE_COUNTRY` - catalog country filter (defaults to "PE")

use url::Url;

use crate::domain::result::{Error, Result};

pub const API_URL_ENV: &str = "PUENTE_API_URL";
pub const API_KEY_ENV: &str = "PUENTE_API_KEY";
pub const ENCRYPTION_KEY_ENV: &str = "PUENTE_ENCRYPTION_KEY";
pub const COUNTRY_ENV: &str = "PUENTE_COUNTRY";

const DEFAULT_COUNTRY: &str = "PE";

/// Puente configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub encryption_key: String,
    pub country: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        let api_url = require_env(API_URL_ENV)?;
        let api_key = require_env(API_KEY_ENV)?;
        let encryption_key = require_env(ENCRYPTION_KEY_ENV)?;

        let country = std::env::var(COUNTRY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        Self::new(api_url, api_key, encryption_key, country)
    }

    /// Build a configuration from explicit values
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        encryption_key: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self> {
        let api_url = api_url.into();
        let api_key = api_key.into();
        let encryption_key = encryption_key.into();

        let parsed = Url::parse(&api_url)
            .map_err(|e| Error::config(format!("invalid upstream API URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::config("upstream API URL must be http or https"));
        }

        if api_key.is_empty() {
            return Err(Error::config("upstream API key cannot be empty"));
        }

        // Fail at startup, not on the first encrypt call
        if encryption_key.as_bytes().len() != 32 {
            return Err(Error::config(
                "credential encryption key must be exactly 32 bytes",
            ));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            encryption_key,
            country: country.into(),
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::config(format!("{} is not set", name)))
}
