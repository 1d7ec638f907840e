use super::entity::{Addressable, Entities, Entity, Resource, detail};
use super::relation::{References, Relation};
use super::{Assignment, Circle, Organization};
use crate::Error;

resource! {
    /// A person in the organization.
    Person => "people", Addressable,
    [ORGANIZATIONS, CIRCLES, ASSIGNMENTS]
}

impl Person {
    /// Organizations the person belongs to.
    pub const ORGANIZATIONS: Relation =
        Relation::many("organizations", "organization_ids", Organization::NAME);
    /// Circles the person has a role in.
    pub const CIRCLES: Relation = Relation::many("circles", "circles", Circle::NAME);
    /// Fetched from `people/{id}/assignments`.
    pub const ASSIGNMENTS: Relation = Relation::nested("assignments", Assignment::NAME);

    /// Display name.
    pub fn name(&self) -> Result<Option<&str>, Error> {
        self.0.text("name")
    }

    /// Email address.
    pub fn email(&self) -> Result<Option<&str>, Error> {
        self.0.text("email")
    }

    /// Organizations, built locally.
    pub fn organizations(&self) -> Result<References<Organization>, Error> {
        self.0.resolve_many(&Self::ORGANIZATIONS)
    }

    /// Circles, fetched one by one.
    pub fn circles(&self) -> Result<References<Circle>, Error> {
        self.0.resolve_many(&Self::CIRCLES)
    }

    /// Role assignments of this person.
    pub async fn assignments(&self) -> Result<Entities<Assignment>, Error> {
        detail::<Assignment, _>(self).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{MockGateway, envelope};
    use crate::transport::ResourcePath;
    use futures::TryStreamExt;
    use serde_json::{Value, json};

    fn sample() -> Value {
        json!({
            "id": 5,
            "name": "Ana",
            "email": "ana@example.com",
            "links": {"organization_ids": [7], "circles": [42]}
        })
    }

    #[test]
    fn test_fields() {
        let person = Person::from_value(&MockGateway::new().client(), sample(), None).unwrap();
        assert_eq!(person.id().unwrap(), 5);
        assert_eq!(person.name().unwrap(), Some("Ana"));
        assert_eq!(person.email().unwrap(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn test_organizations_are_built() {
        let mock = MockGateway::new();
        let person = Person::from_value(&mock.client(), sample(), None).unwrap();

        let organizations: Vec<Organization> =
            person.organizations().unwrap().try_collect().await.unwrap();
        assert_eq!(organizations.len(), 1);
        assert_eq!(organizations[0].id().unwrap(), 7);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_circles_are_fetched() {
        let mock = MockGateway::new().on(
            ResourcePath::item("circles", 42),
            envelope("circles", vec![json!({"id": 42, "name": "Ops"})]),
        );
        let person = Person::from_value(&mock.client(), sample(), None).unwrap();

        let circles: Vec<Circle> = person.circles().unwrap().try_collect().await.unwrap();
        assert_eq!(circles[0].name().unwrap(), Some("Ops"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_assignments_detail() {
        let mock = MockGateway::new().then(envelope("assignments", vec![json!({"id": 9})]));
        let person = Person::from_value(&mock.client(), sample(), None).unwrap();

        let assignments: Vec<Assignment> = person.assignments().await.unwrap().collect();
        assert_eq!(assignments[0].id().unwrap(), 9);
        assert_eq!(mock.calls(), vec![ResourcePath::nested("people", 5, "assignments")]);
    }
}
