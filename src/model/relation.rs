//! Declarative relationship tables and the link-resolution protocol.
//!
//! Every typed relationship accessor is a row in its type's
//! [`Resource::RELATIONS`] table and is served by the same three routines
//! on [`Entity`]:
//!
//! - [`Entity::resolve_one`] reads one id and fetches or builds the target
//! - [`Entity::resolve_many`] reads an id array and yields targets lazily
//! - [`Entity::build_one`] reads one id and builds without any request
//!
//! Fetch-or-build tries `get` first. A Link-Only target answers
//! [`ErrorKind::Unsupported`] without touching the network, and only that
//! kind falls back to building the entity locally: from the matching
//! side-loaded record if the source entity has one, otherwise from a bare
//! `{"id": ..}` record. Built entities inherit the source's linked bag.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde_json::Value;
use tracing::debug;

use super::entity::{Entity, Resource, get};
use super::record::{Id, LinkedBag, bare};
use crate::error::ErrorKind;
use crate::{Client, Error};

/// How many targets a relationship points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Zero or one target.
    One,
    /// An ordered list of targets.
    Many,
}

/// How a relationship's targets are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `get` the target, building it locally if the type is Link-Only.
    FetchOrBuild,
    /// Always build locally.
    BuildOnly,
    /// Fetch the child collection under this entity.
    Nested,
}

/// Where the target id(s) are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    /// A key of the record's `links` mapping.
    Links(&'static str),
    /// A top-level field of the record.
    Field(&'static str),
    /// The entity itself is the parent of the targets.
    Parent,
}

/// One row of a relationship table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Accessor name.
    pub name: &'static str,
    /// Where the link lives.
    pub source: LinkSource,
    /// Target resource name.
    pub target: &'static str,
    /// Single or multi reference.
    pub cardinality: Cardinality,
    /// Fetch strategy.
    pub resolution: Resolution,
}

impl Relation {
    /// Single reference read from `links[key]`.
    pub const fn one(name: &'static str, key: &'static str, target: &'static str) -> Self {
        Self {
            name,
            source: LinkSource::Links(key),
            target,
            cardinality: Cardinality::One,
            resolution: Resolution::FetchOrBuild,
        }
    }

    /// Multi reference read from the id array `links[key]`.
    pub const fn many(name: &'static str, key: &'static str, target: &'static str) -> Self {
        Self {
            name,
            source: LinkSource::Links(key),
            target,
            cardinality: Cardinality::Many,
            resolution: Resolution::FetchOrBuild,
        }
    }

    /// Single reference read from a top-level field and never fetched.
    pub const fn built(name: &'static str, field: &'static str, target: &'static str) -> Self {
        Self {
            name,
            source: LinkSource::Field(field),
            target,
            cardinality: Cardinality::One,
            resolution: Resolution::BuildOnly,
        }
    }

    /// Child collection fetched under the entity.
    pub const fn nested(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            source: LinkSource::Parent,
            target,
            cardinality: Cardinality::Many,
            resolution: Resolution::Nested,
        }
    }

    fn check<T: Resource>(&self, cardinality: Cardinality) -> Result<(), Error> {
        if self.target != T::NAME {
            return Err(Error::invalid_argument(format!(
                "relation `{}` targets `{}`, not `{}`",
                self.name,
                self.target,
                T::NAME
            )));
        }
        if self.cardinality != cardinality || self.resolution == Resolution::Nested {
            return Err(Error::invalid_argument(format!(
                "relation `{}` cannot be resolved as {:?}",
                self.name, cardinality
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Link reading
// ============================================================================

impl Entity {
    fn link_value(&self, relation: &Relation) -> Result<&Value, Error> {
        match relation.source {
            LinkSource::Links(key) => self.links()?.get(key).ok_or_else(|| {
                Error::data_format(format!("`links` has no `{}` entry", key))
            }),
            LinkSource::Field(field) => self.field(field),
            LinkSource::Parent => Err(Error::invalid_argument(format!(
                "relation `{}` has no link to read",
                relation.name
            ))),
        }
    }

    fn link_id(&self, relation: &Relation) -> Result<Option<Id>, Error> {
        parse_id(relation.name, self.link_value(relation)?)
    }

    fn link_ids(&self, relation: &Relation) -> Result<Vec<Id>, Error> {
        match self.link_value(relation)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    parse_id(relation.name, item)?.ok_or_else(|| {
                        Error::data_format(format!("`{}` contains a null id", relation.name))
                    })
                })
                .collect(),
            other => Err(Error::data_format(format!(
                "`{}` is not an id array: {}",
                relation.name, other
            ))),
        }
    }

    /// Resolves a single-reference relationship.
    ///
    /// Returns `Ok(None)` without any request when the link is `null`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::DataFormat`] if the link is missing or malformed. Errors
    /// from fetching an Addressable target are returned as they are.
    pub async fn resolve_one<T: Resource>(&self, relation: &Relation) -> Result<Option<T>, Error> {
        if relation.resolution == Resolution::BuildOnly {
            return self.build_one(relation);
        }
        relation.check::<T>(Cardinality::One)?;

        match self.link_id(relation)? {
            Some(id) => fetch_or_build(self.client().clone(), id, self.linked_handle())
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Builds the target of a single-reference relationship locally.
    pub fn build_one<T: Resource>(&self, relation: &Relation) -> Result<Option<T>, Error> {
        relation.check::<T>(Cardinality::One)?;

        Ok(self
            .link_id(relation)?
            .map(|id| build(self.client(), id, self.linked_handle())))
    }

    /// Resolves a multi-reference relationship.
    ///
    /// The id array is validated up front; targets are then fetched one at a
    /// time, in link order, as the returned stream is polled. A failure on
    /// one element is that element's item.
    pub fn resolve_many<T: Resource>(&self, relation: &Relation) -> Result<References<T>, Error> {
        relation.check::<T>(Cardinality::Many)?;

        let ids = self.link_ids(relation)?;
        let client = self.client().clone();
        let linked = self.linked_handle();
        let build_only = relation.resolution == Resolution::BuildOnly;
        Ok(References::new(ids, client, linked, build_only))
    }
}

fn parse_id(name: &str, value: &Value) -> Result<Option<Id>, Error> {
    match value {
        Value::Null => Ok(None),
        other => other.as_u64().map(Some).ok_or_else(|| {
            Error::data_format(format!("`{}` is not an id: {}", name, other))
        }),
    }
}

// ============================================================================
// Fetch or build
// ============================================================================

async fn fetch_or_build<T: Resource>(
    client: Client,
    id: Id,
    linked: Option<Arc<LinkedBag>>,
) -> Result<T, Error> {
    match get::<T>(&client, id).await {
        Ok(target) => Ok(target),
        Err(e) if e.kind() == ErrorKind::Unsupported => Ok(build(&client, id, linked)),
        Err(e) => Err(e),
    }
}

fn build<T: Resource>(client: &Client, id: Id, linked: Option<Arc<LinkedBag>>) -> T {
    let record = match linked.as_deref().and_then(|bag| bag.find(T::NAME, id)) {
        Some(record) => {
            debug!(resource = T::NAME, id, "building from side-loaded record");
            record.clone()
        }
        None => {
            debug!(resource = T::NAME, id, "building bare record");
            bare(id)
        }
    };
    T::from_entity(Entity::new(client.clone(), record, linked))
}

// ============================================================================
// References
// ============================================================================

/// Lazily resolved targets of a multi-reference relationship.
///
/// Yields one `Result` per linked id, in link order. Each target is fetched
/// only when the stream is polled for it.
pub struct References<T> {
    inner: BoxStream<'static, Result<T, Error>>,
    len: usize,
}

impl<T: Resource> References<T> {
    fn new(ids: Vec<Id>, client: Client, linked: Option<Arc<LinkedBag>>, build_only: bool) -> Self {
        let len = ids.len();
        let inner = if build_only {
            stream::iter(ids)
                .map(move |id| Ok(build(&client, id, linked.clone())))
                .boxed()
        } else {
            stream::iter(ids)
                .then(move |id| fetch_or_build(client.clone(), id, linked.clone()))
                .boxed()
        };
        Self { inner, len }
    }
}

impl<T> References<T> {
    /// Number of linked ids.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Stream for References<T> {
    type Item = Result<T, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> fmt::Debug for References<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("References").field("len", &self.len).finish_non_exhaustive()
    }
}
