//! Prelude module for convenient imports.
//!
//! ```rust
//! use glassfrog::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client and its configuration
//! - Error types
//! - Every resource type and the [`Resource`] trait
//! - The gateway abstraction

#[cfg(feature = "rest")]
pub use crate::client::ClientBuilder;
pub use crate::{
    auth::ApiToken,
    client::Client,
    config::RetryConfig,
    error::{Error, ErrorKind, Result},
    model::{
        Accountability, Assignment, Circle, Domain, Entities, Entity, Id, LinkedBag,
        Organization, Person, Policy, Project, References, Resource, Role, Snapshot,
    },
    transport::{Gateway, ResourcePath},
};
