//! Testing utilities.
//!
//! - [`MockGateway`]: a [`Gateway`](crate::transport::Gateway) answering from
//!   canned responses and recording every request
//! - [`envelope`]: builds a response envelope from records
//!
//! ## Quick Start
//!
//! ```rust
//! use glassfrog::prelude::*;
//! use glassfrog::testing::{MockGateway, envelope};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! let mock = MockGateway::new().then(envelope("roles", vec![json!({
//!     "id": 1,
//!     "links": {"circle": null, "domains": [1000, 2000]}
//! })]));
//! let role: Role = mock.client().get(1).await?;
//!
//! // Domains are Link-Only: built locally, no further requests
//! assert_eq!(role.domains()?.len(), 2);
//! assert!(role.circle().await?.is_none());
//! assert_eq!(mock.call_count(), 1);
//! # Ok(())
//! # }
//! ```

mod mock_gateway;

pub use mock_gateway::{MockGateway, envelope};
