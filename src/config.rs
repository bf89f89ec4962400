//! Okta connection settings.
//!
//! Configuration comes from five environment variables, two of which are
//! mandatory. Parsing is a pure function over a key/value map
//! ([`OktaConfig::parse`]) so it can be exercised without touching the process
//! environment; [`OktaConfig::from_env`] is the thin wrapper the server uses.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `OKTA_CLIENT_ORGURL` | yes | |
//! | `OKTA_API_TOKEN` | yes | |
//! | `OKTA_CONCURRENT_LIMIT` | no | 15 |
//! | `OKTA_REQUEST_TIMEOUT` | no | 30 |
//! | `OKTA_MAX_RETRIES` | no | 1 |
//!
//! # Example
//!
//! ```rust
//! use okta_mcp_server::config::OktaConfig;
//! use std::collections::HashMap;
//!
//! let env = HashMap::from([
//!     ("OKTA_CLIENT_ORGURL".to_string(), "https://example.okta.com".to_string()),
//!     ("OKTA_API_TOKEN".to_string(), "tok123".to_string()),
//! ]);
//! let config = OktaConfig::parse(&env).unwrap();
//! assert_eq!(config.concurrent_limit, 15);
//! assert_eq!(config.api_token.expose(), "tok123");
//! ```

use crate::error::{ConfigResult, ConfigurationError};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

pub const ORG_URL_VAR: &str = "OKTA_CLIENT_ORGURL";
pub const API_TOKEN_VAR: &str = "OKTA_API_TOKEN";
pub const CONCURRENT_LIMIT_VAR: &str = "OKTA_CONCURRENT_LIMIT";
pub const REQUEST_TIMEOUT_VAR: &str = "OKTA_REQUEST_TIMEOUT";
pub const MAX_RETRIES_VAR: &str = "OKTA_MAX_RETRIES";

pub const DEFAULT_CONCURRENT_LIMIT: u32 = 15;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// An API token that never prints itself.
///
/// `Debug` is redacted and there is no `Display`; callers that genuinely need
/// the value (the HTTP client building its `Authorization` header) go through
/// [`ApiToken::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 fingerprint, safe to log for correlating which token is in use.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        digest[..4].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Validated Okta configuration.
///
/// An instance only exists when both required variables were present and
/// non-empty; there is no partially valid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OktaConfig {
    /// Okta organization URL, e.g. `https://example.okta.com`
    pub org_url: String,
    /// Okta API token (SSWS)
    pub api_token: ApiToken,
    /// Maximum concurrent API requests
    pub concurrent_limit: u32,
    /// API request timeout in seconds
    pub request_timeout: u64,
    /// Maximum retries on rate limit
    pub max_retries: u32,
}

impl OktaConfig {
    /// Build a configuration with default limits.
    pub fn new(org_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            org_url: org_url.into(),
            api_token: ApiToken::new(api_token),
            concurrent_limit: DEFAULT_CONCURRENT_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::parse(&env)
    }

    /// Parse configuration from a variable map.
    ///
    /// Required values are trimmed and must be non-empty. Optional numeric
    /// values fall back to their defaults only when the variable is absent;
    /// a present but unparseable value is an error.
    pub fn parse(env: &HashMap<String, String>) -> ConfigResult<Self> {
        let org_url = required(env, ORG_URL_VAR);
        let api_token = required(env, API_TOKEN_VAR);

        let (org_url, api_token) = match (org_url, api_token) {
            (Some(url), Some(token)) => (url, token),
            (url, token) => {
                let mut variables = Vec::new();
                if url.is_none() {
                    variables.push(ORG_URL_VAR);
                }
                if token.is_none() {
                    variables.push(API_TOKEN_VAR);
                }
                return Err(ConfigurationError::MissingRequired { variables });
            }
        };

        let concurrent_limit = positive(env, CONCURRENT_LIMIT_VAR, DEFAULT_CONCURRENT_LIMIT)?;
        let request_timeout = positive(env, REQUEST_TIMEOUT_VAR, DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let max_retries = numeric(env, MAX_RETRIES_VAR, DEFAULT_MAX_RETRIES)?;

        Ok(Self {
            org_url,
            api_token: ApiToken::new(api_token),
            concurrent_limit,
            request_timeout,
            max_retries,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn required(env: &HashMap<String, String>, name: &str) -> Option<String> {
    env.get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn numeric<T>(env: &HashMap<String, String>, name: &'static str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env.get(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigurationError::invalid_numeric(name, raw.as_str(), e.to_string())),
    }
}

fn positive<T>(env: &HashMap<String, String>, name: &'static str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: fmt::Display,
{
    let value = numeric(env, name, default)?;
    if value == T::default() {
        let raw = env.get(name).map(String::as_str).unwrap_or_default();
        return Err(ConfigurationError::invalid_numeric(
            name,
            raw,
            "must be greater than zero",
        ));
    }
    Ok(value)
}
