//! Client configuration.
//!
//! Values come from built-in defaults, optionally overridden by environment
//! variables. Configuration values are public; do not store secrets here.

use std::time::Duration;

use thiserror::Error;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const ENV_API_BASE_URL: &str = "EMPLOYME_API_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "EMPLOYME_TIMEOUT_SECS";
const ENV_CONNECT_TIMEOUT_SECS: &str = "EMPLOYME_CONNECT_TIMEOUT_SECS";

/// Errors raised while building a client configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is not an `http://` or `https://` URL.
    #[error("Invalid API base URL `{0}`: must start with http:// or https://")]
    InvalidBaseUrl(String),
    /// A numeric setting could not be parsed.
    #[error("Invalid value `{value}` for {name}: expected a whole number of seconds")]
    InvalidNumber {
        /// Name of the setting.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The underlying HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for an [`EmployMe`](crate::EmployMe) client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint is appended to, without a trailing slash.
    pub api_base_url: String,
    /// Total request timeout.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `api_base_url` with default timeouts.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            ..Self::default()
        })
    }

    /// Loads the configuration from the process environment.
    ///
    /// Reads `EMPLOYME_API_BASE_URL`, `EMPLOYME_TIMEOUT_SECS` and
    /// `EMPLOYME_CONNECT_TIMEOUT_SECS`. Unset or blank variables keep the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = Overrides {
            api_base_url: lookup(ENV_API_BASE_URL).as_deref().and_then(normalize_value),
            timeout: lookup(ENV_TIMEOUT_SECS).as_deref().and_then(normalize_value),
            connect_timeout: lookup(ENV_CONNECT_TIMEOUT_SECS)
                .as_deref()
                .and_then(normalize_value),
        };

        let mut config = Self::default();
        apply_overrides(&mut config, overrides)?;

        Ok(config)
    }
}

#[derive(Default)]
struct Overrides {
    api_base_url: Option<String>,
    timeout: Option<String>,
    connect_timeout: Option<String>,
}

fn apply_overrides(config: &mut ClientConfig, overrides: Overrides) -> Result<(), ConfigError> {
    if let Some(value) = overrides.api_base_url {
        config.api_base_url = normalize_base_url(&value)?;
    }
    if let Some(value) = overrides.timeout {
        config.timeout = parse_seconds(ENV_TIMEOUT_SECS, value)?;
    }
    if let Some(value) = overrides.connect_timeout {
        config.connect_timeout = parse_seconds(ENV_CONNECT_TIMEOUT_SECS, value)?;
    }
    Ok(())
}

fn parse_seconds(name: &'static str, value: String) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, ConfigError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(base_url.to_string()))
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
