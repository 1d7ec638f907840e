use super::entity::{Addressable, Entities, Entity, Resource, detail};
use super::relation::{References, Relation};
use super::{Domain, Organization, Policy, Project, Role};
use crate::Error;

resource! {
    /// A circle: a group of roles sharing a purpose.
    Circle => "circles", Addressable,
    [ORGANIZATION, SUPPORTED_ROLE, ROLES, POLICIES, DOMAINS, PROJECTS]
}

impl Circle {
    /// Owning organization, read from `organization_id` and never fetched.
    pub const ORGANIZATION: Relation =
        Relation::built("organization", "organization_id", Organization::NAME);
    /// The role this circle fills in its super-circle.
    pub const SUPPORTED_ROLE: Relation =
        Relation::one("supported_role", "supported_role", Role::NAME);
    /// Roles inside the circle.
    pub const ROLES: Relation = Relation::many("roles", "roles", Role::NAME);
    /// Circle policies.
    pub const POLICIES: Relation = Relation::many("policies", "policies", Policy::NAME);
    /// Domains owned by the circle.
    pub const DOMAINS: Relation = Relation::many("domains", "domains", Domain::NAME);
    /// Fetched from `circles/{id}/projects`.
    pub const PROJECTS: Relation = Relation::nested("projects", Project::NAME);

    /// Full name.
    pub fn name(&self) -> Result<Option<&str>, Error> {
        self.0.text("name")
    }

    /// Abbreviated name.
    pub fn short_name(&self) -> Result<Option<&str>, Error> {
        self.0.text("short_name")
    }

    /// Strategy text.
    pub fn strategy(&self) -> Result<Option<&str>, Error> {
        self.0.text("strategy")
    }

    /// The owning organization.
    pub fn organization(&self) -> Result<Option<Organization>, Error> {
        self.0.build_one(&Self::ORGANIZATION)
    }

    /// The role this circle fills in its super-circle, fetched.
    pub async fn supported_role(&self) -> Result<Option<Role>, Error> {
        self.0.resolve_one(&Self::SUPPORTED_ROLE).await
    }

    /// Roles inside the circle, fetched one by one as the stream is polled.
    pub fn roles(&self) -> Result<References<Role>, Error> {
        self.0.resolve_many(&Self::ROLES)
    }

    /// Circle policies, built from side-loaded data.
    pub fn policies(&self) -> Result<References<Policy>, Error> {
        self.0.resolve_many(&Self::POLICIES)
    }

    /// Circle domains, built from side-loaded data.
    pub fn domains(&self) -> Result<References<Domain>, Error> {
        self.0.resolve_many(&Self::DOMAINS)
    }

    /// Projects owned by the circle.
    pub async fn projects(&self) -> Result<Entities<Project>, Error> {
        detail::<Project, _>(self).await
    }
}
