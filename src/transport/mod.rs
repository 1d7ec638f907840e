//! Transport layer for GlassFrog communication.
//!
//! The entity layer only ever needs one thing from the network: "GET this
//! resource path and hand me the JSON". That capability is the [`Gateway`]
//! trait. Implementations:
//!
//! - [`RestGateway`] (feature `rest`, default): authenticated HTTPS via reqwest
//! - [`MockGateway`](crate::testing::MockGateway): in-memory, for tests
//!
//! ## URL shapes
//!
//! ```rust
//! use glassfrog::ResourcePath;
//!
//! assert_eq!(ResourcePath::collection("circles").to_string(), "circles");
//! assert_eq!(ResourcePath::item("circles", 42).to_string(), "circles/42");
//! assert_eq!(
//!     ResourcePath::nested("circles", 42, "projects").to_string(),
//!     "circles/42/projects",
//! );
//! ```

mod traits;

#[cfg(feature = "rest")]
mod rest;

pub use traits::{Gateway, ResourcePath};

#[cfg(feature = "rest")]
pub use rest::{RestGateway, RestGatewayBuilder};
