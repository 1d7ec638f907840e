//! MockGateway: canned responses and call recording.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::transport::{Gateway, ResourcePath};
use crate::{Client, Error};

/// An in-memory [`Gateway`] for tests.
///
/// Responses come from per-path routes first, then from a FIFO queue. A
/// route answers every request for its path; a queued response answers one
/// request. A request matching neither fails like a 404.
///
/// Every requested path is recorded, so tests can assert how many network
/// calls an operation made.
///
/// ## Example
///
/// ```rust
/// use glassfrog::testing::{MockGateway, envelope};
/// use glassfrog::transport::ResourcePath;
/// use serde_json::json;
///
/// let mock = MockGateway::new()
///     .on(ResourcePath::item("roles", 10), envelope("roles", vec![json!({"id": 10})]))
///     .then(envelope("people", vec![json!({"id": 5})]))
///     .then_status(503, "maintenance");
///
/// let client = mock.client();
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockGateway {
    routes: Arc<Mutex<HashMap<ResourcePath, Response>>>,
    queue: Arc<Mutex<VecDeque<Response>>>,
    calls: Arc<Mutex<Vec<ResourcePath>>>,
}

#[derive(Debug, Clone)]
enum Response {
    Json(Value),
    Status(u16, String),
}

impl Response {
    fn into_result(self) -> Result<Value, Error> {
        match self {
            Response::Json(body) => Ok(body),
            Response::Status(status, body) => Err(Error::from_status(status, body)),
        }
    }
}

impl MockGateway {
    /// Creates a gateway with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every request for `path` with `body`.
    #[must_use]
    pub fn on(self, path: ResourcePath, body: Value) -> Self {
        self.routes.lock().insert(path, Response::Json(body));
        self
    }

    /// Answers every request for `path` with an HTTP error status.
    #[must_use]
    pub fn on_status(self, path: ResourcePath, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .lock()
            .insert(path, Response::Status(status, body.into()));
        self
    }

    /// Queues `body` as the answer to the next unrouted request.
    #[must_use]
    pub fn then(self, body: Value) -> Self {
        self.queue.lock().push_back(Response::Json(body));
        self
    }

    /// Queues an HTTP error status as the answer to the next unrouted request.
    #[must_use]
    pub fn then_status(self, status: u16, body: impl Into<String>) -> Self {
        self.queue
            .lock()
            .push_back(Response::Status(status, body.into()));
        self
    }

    /// A [`Client`] backed by this gateway. Calls stay observable through
    /// `self`.
    pub fn client(&self) -> Client {
        Client::with_gateway(Arc::new(self.clone()))
    }

    /// Every path requested so far, in order.
    pub fn calls(&self) -> Vec<ResourcePath> {
        self.calls.lock().clone()
    }

    /// Number of requests made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of queued responses not consumed yet.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Clears routes, queued responses and recorded calls.
    pub fn reset(&self) {
        self.routes.lock().clear();
        self.queue.lock().clear();
        self.calls.lock().clear();
    }

    fn respond(&self, path: &ResourcePath) -> Response {
        if let Some(response) = self.routes.lock().get(path) {
            return response.clone();
        }
        self.queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| Response::Status(404, format!("no mock response for `{}`", path)))
    }
}

impl std::fmt::Debug for MockGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGateway")
            .field("routes", &self.routes.lock().len())
            .field("pending", &self.pending())
            .field("calls", &self.call_count())
            .finish()
    }
}

#[async_trait::async_trait]
impl Gateway for MockGateway {
    async fn fetch(&self, path: &ResourcePath) -> Result<Value, Error> {
        self.calls.lock().push(path.clone());
        self.respond(path).into_result()
    }
}

/// Wraps records in a response envelope keyed by `resource`.
///
/// ```rust
/// use glassfrog::testing::envelope;
/// use serde_json::json;
///
/// assert_eq!(
///     envelope("roles", vec![json!({"id": 10})]),
///     json!({"roles": [{"id": 10}]})
/// );
/// ```
pub fn envelope(resource: &str, records: Vec<Value>) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(resource.to_string(), Value::Array(records));
    Value::Object(body)
}
