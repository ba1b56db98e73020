//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FRESHFOLD_API_BASE_URL` - Base URL of the FreshFold REST API
//!
//! ## Optional
//! - `FRESHFOLD_API_TOKEN` - Static bearer token sent with every request
//! - `FRESHFOLD_USER_EMAIL` - Email used for per-customer endpoints
//! - `FRESHFOLD_DATA_DIR` - Directory for locally persisted state
//!   (default: `.freshfold`)
//! - `FRESHFOLD_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use fresh_fold_core::Email;

const DEFAULT_DATA_DIR: &str = ".freshfold";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the FreshFold REST API.
    pub api_base_url: Url,
    /// Optional static bearer token.
    pub api_token: Option<SecretString>,
    /// Email identifying the current customer, if configured.
    pub user_email: Option<Email>,
    /// Directory for locally persisted state (order history, preferences).
    pub data_dir: PathBuf,
    /// Timeout applied to every API request.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("user_email", &self.user_email)
            .field("data_dir", &self.data_dir)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("FRESHFOLD_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("FRESHFOLD_API_BASE_URL".to_owned(), e.to_string())
            })?;

        let api_token = get_optional_env("FRESHFOLD_API_TOKEN").map(SecretString::from);

        let user_email = get_optional_env("FRESHFOLD_USER_EMAIL")
            .map(|raw| {
                Email::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("FRESHFOLD_USER_EMAIL".to_owned(), e.to_string())
                })
            })
            .transpose()?;

        let data_dir =
            PathBuf::from(get_env_or_default("FRESHFOLD_DATA_DIR", DEFAULT_DATA_DIR));

        let timeout_secs = get_env_or_default(
            "FRESHFOLD_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("FRESHFOLD_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            api_token,
            user_email,
            data_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Get a required environment variable.
fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

/// Get an optional environment variable; empty values count as unset.
fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default fallback.
fn get_env_or_default(name: &str, default: &str) -> String {
    get_optional_env(name).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(token: Option<&str>) -> ClientConfig {
        ClientConfig {
            api_base_url: "https://api.freshfold.test/".parse().expect("valid url"),
            api_token: token.map(SecretString::from),
            user_email: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", sample_config(Some("super-secret-token")));
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_debug_without_token() {
        let rendered = format!("{:?}", sample_config(None));
        assert!(rendered.contains("api_token: None"));
    }
}
