use chrono::NaiveDate;

use super::entity::{Addressable, Entities, Entity, Resource, detail};
use super::relation::{References, Relation};
use super::{Accountability, Assignment, Circle, Domain, Organization, Person};
use crate::Error;

resource! {
    /// A role inside a circle.
    Role => "roles", Addressable,
    [
        ORGANIZATION,
        CIRCLE,
        SUPPORTING_CIRCLE,
        DOMAINS,
        ACCOUNTABILITIES,
        PEOPLE,
        ASSIGNMENTS,
    ]
}

impl Role {
    /// Owning organization, read from `organization_id` and never fetched.
    pub const ORGANIZATION: Relation =
        Relation::built("organization", "organization_id", Organization::NAME);
    /// The circle the role belongs to.
    pub const CIRCLE: Relation = Relation::one("circle", "circle", Circle::NAME);
    /// The sub-circle that fills this role, if it was expanded into one.
    pub const SUPPORTING_CIRCLE: Relation =
        Relation::one("supporting_circle", "supporting_circle", Circle::NAME);
    /// Domains held by the role.
    pub const DOMAINS: Relation = Relation::many("domains", "domains", Domain::NAME);
    /// Accountabilities of the role.
    pub const ACCOUNTABILITIES: Relation =
        Relation::many("accountabilities", "accountabilities", Accountability::NAME);
    /// People filling the role.
    pub const PEOPLE: Relation = Relation::many("people", "people", Person::NAME);
    /// Fetched from `roles/{id}/assignments`.
    pub const ASSIGNMENTS: Relation = Relation::nested("assignments", Assignment::NAME);

    /// Full name.
    pub fn name(&self) -> Result<Option<&str>, Error> {
        self.0.text("name")
    }

    /// Abbreviated name.
    pub fn short_name(&self) -> Result<Option<&str>, Error> {
        self.0.text("short_name")
    }

    /// Purpose text.
    pub fn purpose(&self) -> Result<Option<&str>, Error> {
        self.0.text("purpose")
    }

    /// Whether this is a core role (lead link, rep link, facilitator, secretary).
    pub fn is_core(&self) -> Result<Option<bool>, Error> {
        self.0.flag("is_core")
    }

    /// End of the current term for elected roles.
    pub fn elected_until(&self) -> Option<NaiveDate> {
        self.0.date("elected_until")
    }

    /// The owning organization.
    pub fn organization(&self) -> Result<Option<Organization>, Error> {
        self.0.build_one(&Self::ORGANIZATION)
    }

    /// The circle the role belongs to, fetched.
    pub async fn circle(&self) -> Result<Option<Circle>, Error> {
        self.0.resolve_one(&Self::CIRCLE).await
    }

    /// The supporting sub-circle, fetched.
    pub async fn supporting_circle(&self) -> Result<Option<Circle>, Error> {
        self.0.resolve_one(&Self::SUPPORTING_CIRCLE).await
    }

    /// Domains, built from side-loaded data.
    pub fn domains(&self) -> Result<References<Domain>, Error> {
        self.0.resolve_many(&Self::DOMAINS)
    }

    /// Accountabilities, built from side-loaded data.
    pub fn accountabilities(&self) -> Result<References<Accountability>, Error> {
        self.0.resolve_many(&Self::ACCOUNTABILITIES)
    }

    /// People filling the role, fetched one by one.
    pub fn people(&self) -> Result<References<Person>, Error> {
        self.0.resolve_many(&Self::PEOPLE)
    }

    /// Assignments of people to this role.
    pub async fn assignments(&self) -> Result<Entities<Assignment>, Error> {
        detail::<Assignment, _>(self).await
    }
}
