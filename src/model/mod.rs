//! Typed GlassFrog resources and the link-resolution engine.
//!
//! Each resource type wraps an [`Entity`] (one JSON record plus the
//! side-loaded [`LinkedBag`] it came with) and declares three things:
//! its resource name, its [`Capability`] tier and its relationship table.
//!
//! | Type | Tier | Relationships |
//! |------|------|---------------|
//! | [`Circle`] | Addressable | organization, supported_role, roles, policies, domains, projects |
//! | [`Role`] | Addressable | organization, circle, supporting_circle, domains, accountabilities, people, assignments |
//! | [`Person`] | Addressable | organizations, circles, assignments |
//! | [`Assignment`] | Addressable | person, role |
//! | [`Project`] | Link-Only | person, role, circle |
//! | [`Organization`], [`Domain`], [`Policy`], [`Accountability`] | Link-Only | |
//!
//! Addressable types are fetched with [`Client::get`](crate::Client::get) and
//! [`Client::list`](crate::Client::list). Link-Only types refuse both without
//! a request and are only ever produced by following a relationship.
//!
//! ## Example
//!
//! ```rust
//! use futures::TryStreamExt;
//! use glassfrog::prelude::*;
//! use glassfrog::testing::{MockGateway, envelope};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! let mock = MockGateway::new()
//!     .then(envelope("circles", vec![json!({
//!         "id": 42,
//!         "name": "Circle of Life",
//!         "links": {"roles": [10, 20], "supported_role": 50}
//!     })]))
//!     .then(envelope("roles", vec![json!({"id": 10})]))
//!     .then(envelope("roles", vec![json!({"id": 20})]));
//! let client = mock.client();
//!
//! let circle: Circle = client.get(42).await?;
//! let roles: Vec<Role> = circle.roles()?.try_collect().await?;
//!
//! assert_eq!(roles.len(), 2);
//! assert_eq!(mock.call_count(), 3);
//! # Ok(())
//! # }
//! ```

/// Declares a resource newtype over [`Entity`] and its [`Resource`] impl.
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $name:ident => $resource:literal, $capability:ident, [$($relation:ident),* $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Entity);

        impl Resource for $name {
            const NAME: &'static str = $resource;
            type Capability = $capability;
            const RELATIONS: &'static [Relation] = &[$($name::$relation),*];

            fn from_entity(entity: Entity) -> Self {
                Self(entity)
            }

            fn entity(&self) -> &Entity {
                &self.0
            }

            fn into_entity(self) -> Entity {
                self.0
            }
        }
    };
}

mod assignment;
mod circle;
mod entity;
mod person;
mod project;
mod record;
mod reference;
mod relation;
mod role;

pub use assignment::Assignment;
pub use circle::Circle;
pub(crate) use entity::{detail, get, list};
pub use entity::{Addressable, Capability, Entities, Entity, LinkOnly, Operation, Resource};
pub use person::Person;
pub use project::Project;
pub use record::{Id, LinkedBag, Record, Snapshot};
pub use reference::{Accountability, Domain, Organization, Policy};
pub use relation::{Cardinality, LinkSource, References, Relation, Resolution};
pub use role::Role;
