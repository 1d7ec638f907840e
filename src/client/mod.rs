//! The client handle shared by every entity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glassfrog::prelude::*;
//!
//! # async fn example() -> Result<(), Error> {
//! // Reads GLASSFROG_API_TOKEN
//! let client = Client::from_env()?;
//!
//! for circle in client.list::<Circle>().await? {
//!     println!("{:?}", circle.name()?);
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "rest")]
mod builder;

#[cfg(feature = "rest")]
pub use builder::{ClientBuilder, HasToken, NoToken};

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::model::{self, Entities, Id, Resource};
use crate::transport::{Gateway, ResourcePath};
use crate::Error;

/// Entry point for fetching GlassFrog resources.
///
/// A `Client` is a cheap handle around a [`Gateway`]. Every entity keeps a
/// clone so that its relationships can be followed later.
///
/// ## Thread Safety
///
/// `Client` is `Clone`, `Send` and `Sync`; clones share the same gateway.
#[derive(Clone)]
pub struct Client {
    gateway: Arc<dyn Gateway>,
}

impl Client {
    /// Creates a new client builder.
    ///
    /// ```rust
    /// use glassfrog::{Client, RetryConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::builder()
    ///     .token("b8c7b0f1a6e5")
    ///     .retry_config(RetryConfig::new().with_max_retries(5))
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok::<(), glassfrog::Error>(())
    /// ```
    #[cfg(feature = "rest")]
    pub fn builder() -> ClientBuilder<NoToken> {
        ClientBuilder::new()
    }

    /// Creates a REST client authenticated with the token in
    /// `GLASSFROG_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    /// variable is unset or empty. No request is made.
    #[cfg(feature = "rest")]
    pub fn from_env() -> Result<Self, Error> {
        Self::builder().token_from_env()?.build()
    }

    /// Creates a client on top of any gateway.
    ///
    /// ```rust
    /// use glassfrog::Client;
    /// use glassfrog::testing::MockGateway;
    /// use std::sync::Arc;
    ///
    /// let client = Client::with_gateway(Arc::new(MockGateway::new()));
    /// ```
    pub fn with_gateway(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub(crate) fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }

    /// Fetches one record of an Addressable type.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Unsupported`](crate::ErrorKind::Unsupported) for a
    ///   Link-Only type, without a request
    /// - [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the API
    ///   answers 404
    /// - [`ErrorKind::DataFormat`](crate::ErrorKind::DataFormat) if the
    ///   response envelope is malformed
    /// - transport kinds for any other failure
    pub async fn get<R: Resource>(&self, id: Id) -> Result<R, Error> {
        model::get(self, id).await
    }

    /// Fetches the whole collection of an Addressable type.
    ///
    /// The request happens when awaited; records are wrapped as the
    /// returned iterator is consumed.
    pub async fn list<R: Resource>(&self) -> Result<Entities<R>, Error> {
        model::list(self).await
    }

    /// Fetches the `C` records nested under `parent`.
    ///
    /// Refused with [`ErrorKind::Unsupported`](crate::ErrorKind::Unsupported)
    /// when `P` is Link-Only.
    pub async fn detail<C: Resource, P: Resource>(&self, parent: &P) -> Result<Entities<C>, Error> {
        model::detail::<C, P>(parent).await
    }

    /// Fetches a raw JSON document by resource name.
    ///
    /// `id` selects one record; `parent` nests `resource` under the parent
    /// record `id`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument) if
    /// `parent` is given without `id`; no request is made.
    pub async fn fetch(&self, resource: &str, id: Option<Id>, parent: Option<&str>) -> Result<Value, Error> {
        let path = ResourcePath::from_parts(resource, id, parent)?;
        self.gateway.fetch(&path).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
