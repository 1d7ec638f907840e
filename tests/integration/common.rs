//! Common test harness for GlassFrog client integration tests.
//!
//! Provides a fake API server and helpers to mount GlassFrog responses.

use std::sync::Once;

use anyhow::{Context, Result};
use glassfrog::{Client, RetryConfig};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token every mounted route expects in `X-Auth-Token`.
pub const TEST_TOKEN: &str = "integration-test-token";

/// API root below the server URI.
pub const API_ROOT: &str = "/api/v3";

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A fake GlassFrog API.
pub struct TestApi {
    pub server: MockServer,
}

impl TestApi {
    /// Starts a fresh server.
    pub async fn start() -> Self {
        init_tracing();
        Self {
            server: MockServer::start().await,
        }
    }

    /// A REST client pointed at this server, without retries.
    pub fn client(&self) -> Result<Client> {
        Client::builder()
            .url(format!("{}{}", self.server.uri(), API_ROOT))
            .retry_config(RetryConfig::disabled())
            .token(TEST_TOKEN)
            .build()
            .context("Failed to build client for the test server")
    }

    /// Serves `body` at `/api/v3/{route}` for requests carrying the token.
    pub async fn mount(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{}/{}", API_ROOT, route)))
            .and(header("x-auth-token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serves an HTTP error status at `/api/v3/{route}`.
    pub async fn mount_status(&self, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("{}/{}", API_ROOT, route)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Paths of every request received so far, relative to the API root.
    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                request
                    .url
                    .path()
                    .trim_start_matches(API_ROOT)
                    .trim_start_matches('/')
                    .to_string()
            })
            .collect()
    }
}

/// Wraps records in a response envelope.
pub fn envelope(resource: &str, records: Vec<Value>) -> Value {
    glassfrog::testing::envelope(resource, records)
}

/// The circle used across resolution tests.
pub fn circle_of_life() -> Value {
    json!({
        "id": 42,
        "name": "Circle of Life",
        "short_name": "CoL",
        "strategy": "Emphasize learning over perfection",
        "organization_id": 7,
        "links": {
            "roles": [10, 20],
            "policies": [100],
            "domains": [1000, 2000],
            "supported_role": 50
        }
    })
}
