//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (WEBSIFT_*)
//! 2. TOML config file (if WEBSIFT_CONFIG_FILE set)
//! 3. Built-in defaults

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_MAX_BYTES, DEFAULT_TIMEOUT_MS, FetchOptions};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (WEBSIFT_*)
/// 2. TOML config file (if WEBSIFT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string for HTTP requests.
    ///
    /// Set via WEBSIFT_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Default byte budget per fetch.
    ///
    /// Set via WEBSIFT_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Default fetch deadline in milliseconds.
    ///
    /// Set via WEBSIFT_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow.
    ///
    /// Set via WEBSIFT_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// HTML search endpoint queried by search_web.
    ///
    /// Set via WEBSIFT_SEARCH_URL environment variable.
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Result count used when search_web is called without a limit.
    ///
    /// Set via WEBSIFT_DEFAULT_SEARCH_LIMIT environment variable.
    #[serde(default = "default_search_limit")]
    pub default_search_limit: u8,
}

fn default_user_agent() -> String {
    concat!("Mozilla/5.0 (compatible; websift/", env!("CARGO_PKG_VERSION"), ")").into()
}

fn default_max_bytes() -> usize {
    DEFAULT_MAX_BYTES
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_redirects() -> usize {
    5
}

fn default_search_url() -> String {
    "https://duckduckgo.com/html".into()
}

fn default_search_limit() -> u8 {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            search_url: default_search_url(),
            default_search_limit: default_search_limit(),
        }
    }
}

impl AppConfig {
    /// Per-call fetch limits derived from this configuration.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions { timeout_ms: self.timeout_ms, max_bytes: self.max_bytes }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `WEBSIFT_`
    /// 2. TOML file from `WEBSIFT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("WEBSIFT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("WEBSIFT_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
