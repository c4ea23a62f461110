//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_API_URL` - Base URL of the REST backend (default: `http://127.0.0.1:8000/api`)
//! - `STOREFRONT_STORAGE_PATH` - JSON file holding the persisted access token
//!   (default: `.storefront/storage.json`)
//! - `STOREFRONT_MAILBOX_CAPACITY` - Mailbox size of every store (default: 32)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_STORAGE_PATH: &str = ".storefront/storage.json";
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub api_url: Url,
    pub storage_path: PathBuf,
    pub mailbox_capacity: usize,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(
            &lookup("STOREFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;
        let storage_path = lookup("STOREFRONT_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let mailbox_capacity = match lookup("STOREFRONT_MAILBOX_CAPACITY") {
            Some(raw) => parse_capacity(&raw)?,
            None => DEFAULT_MAILBOX_CAPACITY,
        };

        Ok(Self {
            api_url,
            storage_path,
            mailbox_capacity,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_API_URL".into(), reason);
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(url)
}

fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_MAILBOX_CAPACITY".into(), reason);
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be greater than zero".into())),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(invalid(e.to_string())),
    }
}
