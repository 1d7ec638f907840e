//! Raw JSON records, side-loaded data and the response envelope.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

/// Record identifier as used by the API.
pub type Id = u64;

/// One JSON object as returned by the API.
pub type Record = Map<String, Value>;

/// Side-loaded records returned next to a primary fetch, keyed by resource
/// name (the envelope's `linked` member).
///
/// ```rust
/// use glassfrog::LinkedBag;
/// use serde_json::json;
///
/// let bag: LinkedBag = serde_json::from_value(json!({
///     "domains": [{"id": 1000, "description": "potato 1000"}]
/// }))?;
/// assert_eq!(bag.find("domains", 1000).unwrap()["description"], "potato 1000");
/// assert!(bag.find("domains", 2000).is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkedBag(BTreeMap<String, Vec<Record>>);

impl LinkedBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the side-loaded records of one resource.
    #[must_use]
    pub fn with(mut self, resource: impl Into<String>, records: Vec<Record>) -> Self {
        self.0.insert(resource.into(), records);
        self
    }

    /// All side-loaded records of `resource`, in response order.
    pub fn records(&self, resource: &str) -> &[Record] {
        self.0.get(resource).map(Vec::as_slice).unwrap_or_default()
    }

    /// The side-loaded record of `resource` whose `id` is `id`.
    pub fn find(&self, resource: &str, id: Id) -> Option<&Record> {
        self.records(resource)
            .iter()
            .find(|record| record.get("id").and_then(Value::as_u64) == Some(id))
    }

    /// Resource names present in the bag.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `true` if nothing was side-loaded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<Record>)> for LinkedBag {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Record>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Serializable form of an entity: its record plus its linked bag.
///
/// Reconstructing an entity from a snapshot yields the same record and bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The entity's own record.
    pub data: Record,
    /// The side-loaded data the entity was built with.
    #[serde(default)]
    pub linked_data: Option<LinkedBag>,
}

/// A decoded response body: the records keyed by the requested resource and
/// the optional side-loaded bag.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) records: Vec<Record>,
    pub(crate) linked: Option<Arc<LinkedBag>>,
}

impl Envelope {
    /// Splits a response body into records of `resource` and the linked bag.
    pub(crate) fn parse(resource: &str, body: Value) -> Result<Self, Error> {
        let Value::Object(mut body) = body else {
            return Err(Error::data_format(format!(
                "response for `{}` is not a JSON object",
                resource
            )));
        };

        let records = match body.remove(resource) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| into_record(item, resource))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(Error::data_format(format!(
                    "`{}` in response is not an array",
                    resource
                )));
            }
            None => {
                return Err(Error::data_format(format!(
                    "response has no `{}` member",
                    resource
                )));
            }
        };

        let linked = match body.remove("linked") {
            None | Some(Value::Null) => None,
            Some(value) => Some(Arc::new(serde_json::from_value::<LinkedBag>(value)?)),
        };

        Ok(Self { records, linked })
    }

    /// The first record, as returned for a single-item fetch.
    pub(crate) fn into_first(self, resource: &str) -> Result<(Record, Option<Arc<LinkedBag>>), Error> {
        let Self { records, linked } = self;
        let record = records.into_iter().next().ok_or_else(|| {
            Error::data_format(format!("response has an empty `{}` array", resource))
        })?;
        Ok((record, linked))
    }
}

/// Accepts a JSON object as a record.
pub(crate) fn into_record(value: Value, resource: &str) -> Result<Record, Error> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(Error::data_format(format!(
            "`{}` record is not an object: {}",
            resource, other
        ))),
    }
}

/// A record holding nothing but an id.
pub(crate) fn bare(id: Id) -> Record {
    let mut record = Record::new();
    record.insert("id".to_string(), Value::from(id));
    record
}
