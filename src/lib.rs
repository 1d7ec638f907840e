//! # GlassFrog Rust Client
//!
//! Typed, async access to the GlassFrog API: circles, roles, people,
//! assignments, projects and the policies, domains and accountabilities
//! linked from them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use glassfrog::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), glassfrog::Error> {
//!     // Reads GLASSFROG_API_TOKEN
//!     let client = Client::from_env()?;
//!
//!     let circle: Circle = client.get(42).await?;
//!     println!("{:?}", circle.name()?);
//!
//!     // Each role is fetched as the stream is polled
//!     let roles: Vec<Role> = circle.roles()?.try_collect().await?;
//!     for role in &roles {
//!         println!("  {:?} until {:?}", role.name()?, role.elected_until());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Entities**: every resource wraps one JSON record plus the side-loaded
//!   `linked` data it arrived with; field accessors read the record on demand
//! - **Capability tiers**: Circle, Role, Person and Assignment are
//!   *Addressable* and can be fetched directly; Organization, Domain,
//!   Policy, Accountability and Project are *Link-Only*
//! - **Link resolution**: following a relationship fetches Addressable
//!   targets and builds Link-Only targets locally, from side-loaded data
//!   when available
//! - **Laziness**: multi-valued relationships are `Stream`s that fetch one
//!   target per poll, in link order
//!
//! ## Features
//!
//! - `rest` (default): [`RestGateway`] over reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod model;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

#[cfg(feature = "rest")]
mod user_agent;

// Re-export main types at crate root for convenience
pub use client::Client;
#[cfg(feature = "rest")]
pub use client::ClientBuilder;
pub use error::{Error, ErrorKind, Result};
pub use model::{
    Accountability, Assignment, Circle, Domain, Entities, Entity, Id, LinkedBag, Organization,
    Person, Policy, Project, References, Resource, Role, Snapshot,
};

// Re-export auth and config types
pub use auth::ApiToken;
pub use config::RetryConfig;

// Re-export transport types
pub use transport::{Gateway, ResourcePath};
#[cfg(feature = "rest")]
pub use transport::RestGateway;
