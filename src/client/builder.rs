//! Client builder with typestate pattern.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiToken, TOKEN_ENV_VAR};
use crate::config::RetryConfig;
use crate::transport::RestGateway;
use crate::{Client, Error};

/// Marker type: API token not yet provided.
pub struct NoToken;

/// Marker type: API token has been provided.
pub struct HasToken;

/// Builder for REST-backed [`Client`] instances.
///
/// Uses the typestate pattern so that `build()` is only available once an
/// API token has been set.
///
/// ## Required Configuration
///
/// - `token()` or `token_from_env()`: the GlassFrog API token
///
/// ## Optional Configuration
///
/// - `url()`: API root (default `https://api.glassfrog.com/api/v3`)
/// - `retry_config()`: retry behavior for connection failures
/// - `timeout()`: per-request timeout (default 30 seconds)
pub struct ClientBuilder<TokenState> {
    url: Option<String>,
    token: Option<ApiToken>,
    retry_config: RetryConfig,
    timeout: Option<Duration>,
    _token_state: PhantomData<TokenState>,
}

impl ClientBuilder<NoToken> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            token: None,
            retry_config: RetryConfig::default(),
            timeout: None,
            _token_state: PhantomData,
        }
    }

    /// Sets the API token.
    pub fn token(self, token: impl Into<ApiToken>) -> ClientBuilder<HasToken> {
        ClientBuilder {
            url: self.url,
            token: Some(token.into()),
            retry_config: self.retry_config,
            timeout: self.timeout,
            _token_state: PhantomData,
        }
    }

    /// Reads the API token from `GLASSFROG_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    /// variable is unset or empty.
    pub fn token_from_env(self) -> Result<ClientBuilder<HasToken>, Error> {
        self.token_from_env_var(TOKEN_ENV_VAR)
    }

    /// Reads the API token from the environment variable `name`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    /// variable is unset or empty.
    pub fn token_from_env_var(self, name: &str) -> Result<ClientBuilder<HasToken>, Error> {
        Ok(self.token(ApiToken::from_env_var(name)?))
    }
}

impl Default for ClientBuilder<NoToken> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ClientBuilder<T> {
    /// Sets the API root URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ClientBuilder<HasToken> {
    /// Builds the client.
    ///
    /// No request is made.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    /// URL is invalid.
    pub fn build(self) -> Result<Client, Error> {
        let mut gateway = RestGateway::builder().retry_config(self.retry_config);
        if let Some(url) = self.url {
            gateway = gateway.base_url(url);
        }
        if let Some(token) = self.token {
            gateway = gateway.token(token);
        }
        if let Some(timeout) = self.timeout {
            gateway = gateway.timeout(timeout);
        }

        Ok(Client::with_gateway(Arc::new(gateway.build()?)))
    }
}
