//! REST gateway implementation using reqwest.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::ApiToken;
use crate::config::RetryConfig;
use crate::error::ErrorKind;
use crate::transport::traits::{Gateway, ResourcePath};
use crate::user_agent;
use crate::Error;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.glassfrog.com/api/v3";

const AUTH_HEADER: HeaderName = HeaderName::from_static("x-auth-token");

// ============================================================================
// REST Gateway
// ============================================================================

/// Gateway talking to the GlassFrog REST API.
///
/// Every request is a GET carrying the `X-Auth-Token` header. Connection
/// failures and timeouts are retried per [`RetryConfig`]; an HTTP error
/// status is returned on the first occurrence.
#[derive(Clone)]
pub struct RestGateway {
    client: reqwest::Client,
    base_url: Url,
    token: ApiToken,
    retry_config: RetryConfig,
}

impl std::fmt::Debug for RestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestGateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestGateway {
    /// Creates a new REST gateway builder.
    pub fn builder() -> RestGatewayBuilder {
        RestGatewayBuilder::new()
    }

    /// Returns the API root this gateway talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a resource path against the base URL.
    fn url_for(&self, path: &ResourcePath) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::configuration("base URL cannot carry a path"))?;
            segments.pop_if_empty().extend(path.segments());
        }
        Ok(url)
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut token = HeaderValue::from_str(self.token.expose())
            .map_err(|_| Error::configuration("API token contains invalid header characters"))?;
        token.set_sensitive(true);
        headers.insert(AUTH_HEADER, token);

        Ok(headers)
    }

    /// Sends the request produced by `make_request`, retrying transient
    /// failures that never reached the server.
    async fn execute_with_retry<F, Fut>(&self, make_request: F) -> Result<reqwest::Response, Error>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match make_request().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let error = map_reqwest_error(e);
                    if !self.retry_config.should_retry(&error, attempt) {
                        return Err(error);
                    }

                    let delay = self.retry_config.delay_for_attempt(attempt);
                    warn!(attempt, ?delay, error = %error, "retrying GlassFrog request");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Turns a response into JSON, or into an error carrying status and body.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, Error> {
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response.text().await.unwrap_or_default();

            let error = Error::from_status(status.as_u16(), body);
            return Err(match retry_after {
                Some(delay) => error.with_retry_after(delay),
                None => error,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!("failed to parse response: {}", e),
            )
            .with_source(e)
        })
    }
}

#[async_trait::async_trait]
impl Gateway for RestGateway {
    async fn fetch(&self, path: &ResourcePath) -> Result<Value, Error> {
        let url = self.url_for(path)?;
        let headers = self.build_headers()?;
        debug!(%path, "GET");

        let response = self
            .execute_with_retry(|| self.client.get(url.clone()).headers(headers.clone()).send())
            .await?;

        let result = self.handle_response(response).await;
        if let Err(ref error) = result {
            debug!(%path, status = ?error.status(), kind = %error.kind(), "GET failed");
        }
        result
    }
}

// ============================================================================
// REST Gateway Builder
// ============================================================================

/// Builder for [`RestGateway`].
pub struct RestGatewayBuilder {
    base_url: String,
    token: Option<ApiToken>,
    retry_config: RetryConfig,
    timeout: Duration,
}

impl RestGatewayBuilder {
    fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            retry_config: RetryConfig::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API root. Defaults to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the API token.
    #[must_use]
    pub fn token(mut self, token: impl Into<ApiToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the gateway.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no token was given, if the base URL
    /// does not parse or is not http(s), or if the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<RestGateway, Error> {
        let token = self
            .token
            .ok_or_else(|| Error::configuration("an API token is required"))?;

        let base_url = Url::parse(&self.base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "unsupported base URL: {}",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| {
                Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
            })?;

        Ok(RestGateway {
            client,
            base_url,
            token,
            retry_config: self.retry_config,
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Maps reqwest errors to client errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("request timed out: {}", e)).with_source(e)
    } else if e.is_connect() {
        Error::connection(format!("connection failed: {}", e)).with_source(e)
    } else {
        Error::transport(format!("HTTP error: {}", e)).with_source(e)
    }
}

// ============================================================================
// Tests
// ============================================================================
