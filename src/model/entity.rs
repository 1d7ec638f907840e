//! The shared entity base, capability tiers and the fetch operations.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use super::record::{Envelope, Id, LinkedBag, Record, Snapshot, into_record};
use super::relation::Relation;
use crate::transport::ResourcePath;
use crate::{Client, Error};

// ============================================================================
// Entity
// ============================================================================

/// One API record together with the side-loaded data it arrived with.
///
/// Every typed resource wraps an `Entity`. The record is kept verbatim; the
/// typed accessors read from it on demand. An entity also carries the
/// [`Client`] it came from so that its relationships can be followed.
#[derive(Clone)]
pub struct Entity {
    record: Record,
    linked: Option<Arc<LinkedBag>>,
    client: Client,
}

impl Entity {
    pub(crate) fn new(client: Client, record: Record, linked: Option<Arc<LinkedBag>>) -> Self {
        Self {
            record,
            linked,
            client,
        }
    }

    /// Wraps a JSON record.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::DataFormat`](crate::ErrorKind::DataFormat) if `value` is
    /// not a JSON object.
    pub fn from_value(client: &Client, value: Value, linked: Option<LinkedBag>) -> Result<Self, Error> {
        let record = into_record(value, "entity")?;
        Ok(Self::new(client.clone(), record, linked.map(Arc::new)))
    }

    /// Rebuilds an entity from its [`Snapshot`].
    pub fn from_snapshot(client: &Client, snapshot: Snapshot) -> Self {
        Self::new(client.clone(), snapshot.data, snapshot.linked_data.map(Arc::new))
    }

    /// The raw record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// The side-loaded data this entity was built with, if any.
    pub fn linked(&self) -> Option<&LinkedBag> {
        self.linked.as_deref()
    }

    pub(crate) fn linked_handle(&self) -> Option<Arc<LinkedBag>> {
        self.linked.clone()
    }

    /// The client used to follow relationships.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Captures the record and linked bag in serializable form.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            data: self.record.clone(),
            linked_data: self.linked.as_deref().cloned(),
        }
    }

    /// The record's `id`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::DataFormat`](crate::ErrorKind::DataFormat) if the field is
    /// missing or not a non-negative integer. GlassFrog ids are always
    /// integers, so string or negative ids are rejected rather than passed
    /// through.
    pub fn id(&self) -> Result<Id, Error> {
        let value = self.field("id")?;
        value
            .as_u64()
            .ok_or_else(|| Error::data_format(format!("`id` is not an integer: {}", value)))
    }

    /// A field that must be present (it may still be `null`).
    pub fn field(&self, name: &str) -> Result<&Value, Error> {
        self.record
            .get(name)
            .ok_or_else(|| Error::data_format(format!("record has no `{}` field", name)))
    }

    /// A text field. `null` reads as `None`.
    pub fn text(&self, name: &str) -> Result<Option<&str>, Error> {
        match self.field(name)? {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text)),
            other => Err(Error::data_format(format!(
                "`{}` is not a string: {}",
                name, other
            ))),
        }
    }

    /// A boolean field. `null` reads as `None`.
    pub fn flag(&self, name: &str) -> Result<Option<bool>, Error> {
        match self.field(name)? {
            Value::Null => Ok(None),
            Value::Bool(flag) => Ok(Some(*flag)),
            other => Err(Error::data_format(format!(
                "`{}` is not a boolean: {}",
                name, other
            ))),
        }
    }

    /// A numeric field. `null` reads as `None`.
    pub fn number(&self, name: &str) -> Result<Option<f64>, Error> {
        match self.field(name)? {
            Value::Null => Ok(None),
            Value::Number(number) => Ok(number.as_f64()),
            other => Err(Error::data_format(format!(
                "`{}` is not a number: {}",
                name, other
            ))),
        }
    }

    /// A `YYYY-MM-DD` date. Anything missing or unparsable reads as `None`.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        let text = self.record.get(name)?.as_str()?;
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    }

    /// An RFC 3339 timestamp. Anything missing or unparsable reads as `None`.
    pub fn datetime(&self, name: &str) -> Option<DateTime<Utc>> {
        let text = self.record.get(name)?.as_str()?;
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    /// The record's `links` mapping.
    pub fn links(&self) -> Result<&Record, Error> {
        match self.field("links")? {
            Value::Object(links) => Ok(links),
            other => Err(Error::data_format(format!(
                "`links` is not an object: {}",
                other
            ))),
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("record", &self.record)
            .field("linked", &self.linked)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record && self.linked == other.linked
    }
}

// ============================================================================
// Capabilities
// ============================================================================

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Addressable {}
    impl Sealed for super::LinkOnly {}
}

/// A fetch operation subject to the capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch one record by id.
    Get,
    /// Fetch a whole collection.
    List,
    /// Fetch a child collection under a parent record.
    Detail,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get => write!(f, "get"),
            Operation::List => write!(f, "list"),
            Operation::Detail => write!(f, "detail"),
        }
    }
}

/// Whether a resource type has its own API endpoints.
///
/// Implemented only by [`Addressable`] and [`LinkOnly`].
pub trait Capability: sealed::Sealed + Send + Sync + 'static {
    /// `true` if the type can be fetched directly.
    const ADDRESSABLE: bool;

    /// Admits or refuses `operation` on `resource`.
    fn admit(operation: Operation, resource: &'static str) -> Result<(), Error>;
}

/// Types with their own endpoints: get, list and detail are served.
#[derive(Debug, Clone, Copy)]
pub enum Addressable {}

/// Types that only exist as side-loaded data or bare links.
#[derive(Debug, Clone, Copy)]
pub enum LinkOnly {}

impl Capability for Addressable {
    const ADDRESSABLE: bool = true;

    fn admit(_operation: Operation, _resource: &'static str) -> Result<(), Error> {
        Ok(())
    }
}

impl Capability for LinkOnly {
    const ADDRESSABLE: bool = false;

    fn admit(operation: Operation, resource: &'static str) -> Result<(), Error> {
        Err(Error::unsupported(format!(
            "`{}` cannot be fetched ({})",
            resource, operation
        )))
    }
}

// ============================================================================
// Resource
// ============================================================================

/// A typed API resource.
///
/// Implementors are thin wrappers around [`Entity`] declared with their
/// resource name, capability tier and relationship table.
pub trait Resource: Sized + Clone + fmt::Debug + Send + Sync + 'static {
    /// Resource name as used in URLs and envelopes, e.g. `circles`.
    const NAME: &'static str;

    /// [`Addressable`] or [`LinkOnly`].
    type Capability: Capability;

    /// Every relationship this type exposes.
    const RELATIONS: &'static [Relation];

    /// Wraps an entity.
    fn from_entity(entity: Entity) -> Self;

    /// The wrapped entity.
    fn entity(&self) -> &Entity;

    /// Unwraps the entity.
    fn into_entity(self) -> Entity;

    /// The record's `id`.
    fn id(&self) -> Result<Id, Error> {
        self.entity().id()
    }

    /// Captures the record and linked bag in serializable form.
    fn snapshot(&self) -> Snapshot {
        self.entity().snapshot()
    }

    /// Wraps a JSON record.
    fn from_value(client: &Client, value: Value, linked: Option<LinkedBag>) -> Result<Self, Error> {
        Entity::from_value(client, value, linked).map(Self::from_entity)
    }

    /// Rebuilds the resource from its [`Snapshot`].
    fn from_snapshot(client: &Client, snapshot: Snapshot) -> Self {
        Self::from_entity(Entity::from_snapshot(client, snapshot))
    }
}

// ============================================================================
// Operations
// ============================================================================

pub(crate) async fn get<R: Resource>(client: &Client, id: Id) -> Result<R, Error> {
    R::Capability::admit(Operation::Get, R::NAME)?;

    let path = ResourcePath::item(R::NAME, id);
    debug!(resource = R::NAME, id, "fetching record");
    let body = client.gateway().fetch(&path).await.map_err(|e| absent(e, &path))?;
    let (record, linked) = Envelope::parse(R::NAME, body)?.into_first(R::NAME)?;

    Ok(R::from_entity(Entity::new(client.clone(), record, linked)))
}

pub(crate) async fn list<R: Resource>(client: &Client) -> Result<Entities<R>, Error> {
    R::Capability::admit(Operation::List, R::NAME)?;

    let path = ResourcePath::collection(R::NAME);
    debug!(resource = R::NAME, "fetching collection");
    let body = client.gateway().fetch(&path).await?;
    let envelope = Envelope::parse(R::NAME, body)?;

    Ok(Entities::new(client.clone(), envelope))
}

pub(crate) async fn detail<C: Resource, P: Resource>(parent: &P) -> Result<Entities<C>, Error> {
    P::Capability::admit(Operation::Detail, P::NAME)?;

    let entity = parent.entity();
    let path = ResourcePath::nested(P::NAME, entity.id()?, C::NAME);
    debug!(parent = P::NAME, resource = C::NAME, "fetching nested collection");
    let body = entity
        .client()
        .gateway()
        .fetch(&path)
        .await
        .map_err(|e| {
            if C::Capability::ADDRESSABLE {
                absent(e, &path)
            } else {
                unreachable_child::<C>(e, &path)
            }
        })?;
    let envelope = Envelope::parse(C::NAME, body)?;

    Ok(Entities::new(entity.client().clone(), envelope))
}

/// A 404 under a parent means the API has no such nested link-only
/// collection, which is an unsupported fetch rather than a missing record.
fn unreachable_child<C: Resource>(error: Error, path: &ResourcePath) -> Error {
    if error.status() == Some(404) {
        Error::unsupported(format!("`{}` cannot be fetched (`{}`)", C::NAME, path)).with_source(error)
    } else {
        error
    }
}

/// Turns a 404 into a not-found error naming the missing record.
fn absent(error: Error, path: &ResourcePath) -> Error {
    if error.status() == Some(404) {
        Error::not_found(format!("`{}` does not exist", path)).with_source(error)
    } else {
        error
    }
}

// ============================================================================
// Entities
// ============================================================================

/// The records of one collection response, wrapped on demand.
///
/// Single pass: each record is wrapped as it is yielded. Every item shares
/// the response's linked bag.
pub struct Entities<R> {
    records: std::vec::IntoIter<Record>,
    linked: Option<Arc<LinkedBag>>,
    client: Client,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Entities<R> {
    fn new(client: Client, envelope: Envelope) -> Self {
        Self {
            records: envelope.records.into_iter(),
            linked: envelope.linked,
            client,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Iterator for Entities<R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let record = self.records.next()?;
        Some(R::from_entity(Entity::new(
            self.client.clone(),
            record,
            self.linked.clone(),
        )))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl<R: Resource> ExactSizeIterator for Entities<R> {}

impl<R> fmt::Debug for Entities<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entities")
            .field("remaining", &self.records.len())
            .field("linked", &self.linked.is_some())
            .finish()
    }
}
