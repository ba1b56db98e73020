//! Typed REST client for the FreshFold backend.
//!
//! One [`ApiClient`] instance is shared across the whole app; it is cheaply
//! cloneable via an `Arc` inner. Endpoint groups live in submodules:
//!
//! - [`orders`] - order listing and submission
//! - [`profile`] - customer profile
//! - [`notifications`] - notification inbox
//! - [`ml`] - remote segmentation / recommendation service
//! - [`dashboard`] - the reads backing the dashboard aggregator (the
//!   service catalog read is cached with a 5-minute TTL)

pub mod dashboard;
pub mod ml;
pub mod notifications;
pub mod orders;
pub mod profile;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use dashboard::Service;

/// How long the service catalog is cached.
const SERVICES_CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when talking to the FreshFold API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connect, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// Rate limited by the server.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The response body did not parse as the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A path could not be joined onto the base URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the FreshFold REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    services_cache: Cache<&'static str, Vec<Service>>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let services_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(SERVICES_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.clone(),
                token: config.api_token.clone(),
                services_cache,
            }),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// GET `path` and decode the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    /// DELETE `path`, ignoring the response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_ignore_body::<()>(Method::DELETE, path, None).await
    }

    /// Send a request where the response body does not matter (it may be
    /// empty or an acknowledgment blob).
    pub(crate) async fn send_ignore_body<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.request_raw(method, path, body).await?;
        Ok(())
    }

    /// Send `body` as JSON with the given method and decode the response.
    pub(crate) async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let text = self.request_raw(method, path, body).await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// Send a request and return the raw response body.
    ///
    /// Handles the shared response policy: `Retry-After` on 429, 404 as
    /// [`ApiError::NotFound`], and other non-success statuses as
    /// [`ApiError::Status`] with a truncated body.
    async fn request_raw<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let url = self.url(path)?;

        let mut request = self.inner.http.request(method, url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Read the body first for better error diagnostics
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_owned()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path,
                body = %text.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        Ok(text)
    }

    pub(crate) fn services_cache(&self) -> &Cache<&'static str, Vec<Service>> {
        &self.inner.services_cache
    }
}
