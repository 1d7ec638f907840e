//! Gateway trait and request addressing.

use std::fmt;

use serde_json::Value;

use crate::model::Id;
use crate::Error;

/// A request target in one of the three URL shapes the API serves.
///
/// A nested path always carries its parent id; [`from_parts`] is the only
/// way to ask for a nested path without one, and it refuses.
///
/// [`from_parts`]: ResourcePath::from_parts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourcePath {
    /// `/{resource}`
    Collection {
        /// Resource name, e.g. `circles`.
        resource: String,
    },
    /// `/{resource}/{id}`
    Item {
        /// Resource name.
        resource: String,
        /// Record id.
        id: Id,
    },
    /// `/{parent}/{id}/{resource}`
    Nested {
        /// Parent resource name, e.g. `circles`.
        parent: String,
        /// Parent record id.
        id: Id,
        /// Child resource name, e.g. `projects`.
        resource: String,
    },
}

impl ResourcePath {
    /// Path of a whole collection.
    pub fn collection(resource: impl Into<String>) -> Self {
        ResourcePath::Collection {
            resource: resource.into(),
        }
    }

    /// Path of a single record.
    pub fn item(resource: impl Into<String>, id: Id) -> Self {
        ResourcePath::Item {
            resource: resource.into(),
            id,
        }
    }

    /// Path of a child collection under a parent record.
    pub fn nested(parent: impl Into<String>, id: Id, resource: impl Into<String>) -> Self {
        ResourcePath::Nested {
            parent: parent.into(),
            id,
            resource: resource.into(),
        }
    }

    /// Builds a path from the loose `(resource, id?, parent?)` triple.
    ///
    /// # Errors
    ///
    /// A parent without an id is a caller error ([`ErrorKind::InvalidArgument`]).
    ///
    /// [`ErrorKind::InvalidArgument`]: crate::ErrorKind::InvalidArgument
    pub fn from_parts(resource: &str, id: Option<Id>, parent: Option<&str>) -> Result<Self, Error> {
        match (parent, id) {
            (Some(parent), Some(id)) => Ok(Self::nested(parent, id, resource)),
            (Some(parent), None) => Err(Error::invalid_argument(format!(
                "nested resource `{}` under `{}` requires a parent id",
                resource, parent
            ))),
            (None, Some(id)) => Ok(Self::item(resource, id)),
            (None, None) => Ok(Self::collection(resource)),
        }
    }

    /// The resource whose records the response is keyed by.
    pub fn resource(&self) -> &str {
        match self {
            ResourcePath::Collection { resource }
            | ResourcePath::Item { resource, .. }
            | ResourcePath::Nested { resource, .. } => resource,
        }
    }

    /// Path segments, in URL order.
    pub fn segments(&self) -> Vec<String> {
        match self {
            ResourcePath::Collection { resource } => vec![resource.clone()],
            ResourcePath::Item { resource, id } => vec![resource.clone(), id.to_string()],
            ResourcePath::Nested {
                parent,
                id,
                resource,
            } => vec![parent.clone(), id.to_string(), resource.clone()],
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("/"))
    }
}

/// The network capability consumed by the entity layer.
///
/// A gateway performs one authenticated GET and returns the decoded JSON
/// body. Failures use the crate's error taxonomy: a 404 is
/// [`ErrorKind::NotFound`](crate::ErrorKind::NotFound), other statuses and
/// connection problems are transport kinds. Retrying is the gateway's job.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Fetches the JSON document at `path`.
    async fn fetch(&self, path: &ResourcePath) -> Result<Value, Error>;
}
