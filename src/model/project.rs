use chrono::{DateTime, Utc};

use super::entity::{Entity, LinkOnly, Resource};
use super::relation::Relation;
use super::{Circle, Person, Role};
use crate::Error;

resource! {
    /// A project tracked by a circle.
    ///
    /// Projects have no endpoint of their own; they are fetched through
    /// [`Circle::projects`].
    Project => "projects", LinkOnly,
    [PERSON, ROLE, CIRCLE]
}

impl Project {
    /// Person working on the project.
    pub const PERSON: Relation = Relation::one("person", "person", Person::NAME);
    /// Role owning the project.
    pub const ROLE: Relation = Relation::one("role", "role", Role::NAME);
    /// Circle tracking the project.
    pub const CIRCLE: Relation = Relation::one("circle", "circle", Circle::NAME);

    /// What the project delivers.
    pub fn description(&self) -> Result<Option<&str>, Error> {
        self.0.text("description")
    }

    /// `Current`, `Waiting`, `Done` or `Future`.
    pub fn status(&self) -> Result<Option<&str>, Error> {
        self.0.text("status")
    }

    /// Who the project is waiting on.
    pub fn waiting_on_who(&self) -> Result<Option<&str>, Error> {
        self.0.text("waiting_on_who")
    }

    /// What the project is waiting on.
    pub fn waiting_on_what(&self) -> Result<Option<&str>, Error> {
        self.0.text("waiting_on_what")
    }

    /// External link.
    pub fn link(&self) -> Result<Option<&str>, Error> {
        self.0.text("link")
    }

    /// Estimated value.
    pub fn value(&self) -> Result<Option<f64>, Error> {
        self.0.number("value")
    }

    /// Estimated effort.
    pub fn effort(&self) -> Result<Option<f64>, Error> {
        self.0.number("effort")
    }

    /// Return on investment, as computed by the API.
    pub fn roi(&self) -> Result<Option<f64>, Error> {
        self.0.number("roi")
    }

    /// Whether only circle members can see the project.
    pub fn private_to_circle(&self) -> Result<Option<bool>, Error> {
        self.0.flag("private_to_circle")
    }

    /// Creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.datetime("created_at")
    }

    /// Archival time; `None` while the project is active.
    pub fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.0.datetime("archived_at")
    }

    /// Person working on the project, fetched.
    pub async fn person(&self) -> Result<Option<Person>, Error> {
        self.0.resolve_one(&Self::PERSON).await
    }

    /// Role owning the project, fetched.
    pub async fn role(&self) -> Result<Option<Role>, Error> {
        self.0.resolve_one(&Self::ROLE).await
    }

    /// Circle tracking the project, fetched.
    pub async fn circle(&self) -> Result<Option<Circle>, Error> {
        self.0.resolve_one(&Self::CIRCLE).await
    }
}
