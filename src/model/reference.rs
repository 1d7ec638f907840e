//! Link-Only resources: no endpoints, only reachable through relationships.

use super::entity::{Entity, LinkOnly, Resource};
use super::relation::Relation;
use crate::Error;

resource! {
    /// The organization owning every other record.
    Organization => "organizations", LinkOnly, []
}

impl Organization {
    /// Organization name, when the record was side-loaded.
    pub fn name(&self) -> Result<Option<&str>, Error> {
        self.0.text("name")
    }
}

resource! {
    /// An area a role or circle has exclusive control over.
    Domain => "domains", LinkOnly, []
}

impl Domain {
    /// What the domain covers.
    pub fn description(&self) -> Result<Option<&str>, Error> {
        self.0.text("description")
    }
}

resource! {
    /// A circle policy.
    Policy => "policies", LinkOnly, []
}

impl Policy {
    /// Short title.
    pub fn title(&self) -> Result<Option<&str>, Error> {
        self.0.text("title")
    }

    /// Full policy text.
    pub fn body(&self) -> Result<Option<&str>, Error> {
        self.0.text("body")
    }
}

resource! {
    /// An ongoing activity a role is expected to perform.
    Accountability => "accountabilities", LinkOnly, []
}

impl Accountability {
    /// The activity, e.g. "Scheduling tactical meetings".
    pub fn description(&self) -> Result<Option<&str>, Error> {
        self.0.text("description")
    }
}
