use chrono::NaiveDate;

use super::entity::{Addressable, Entity, Resource};
use super::relation::Relation;
use super::{Person, Role};
use crate::Error;

resource! {
    /// A person filling a role.
    Assignment => "assignments", Addressable,
    [PERSON, ROLE]
}

impl Assignment {
    /// The assigned person.
    pub const PERSON: Relation = Relation::one("person", "person", Person::NAME);
    /// The role being filled.
    pub const ROLE: Relation = Relation::one("role", "role", Role::NAME);

    /// Focus of the assignment, if the role is filled several times.
    pub fn focus(&self) -> Result<Option<&str>, Error> {
        self.0.text("focus")
    }

    /// Date of the election, for elected roles.
    pub fn election(&self) -> Option<NaiveDate> {
        self.0.date("election")
    }

    /// Whether the person is excluded from governance and tactical meetings.
    pub fn exclude_from_meetings(&self) -> Result<Option<bool>, Error> {
        self.0.flag("exclude_from_meetings")
    }

    /// The assigned person, fetched.
    pub async fn person(&self) -> Result<Option<Person>, Error> {
        self.0.resolve_one(&Self::PERSON).await
    }

    /// The role being filled, fetched.
    pub async fn role(&self) -> Result<Option<Role>, Error> {
        self.0.resolve_one(&Self::ROLE).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::testing::{MockGateway, envelope};
    use crate::transport::ResourcePath;
    use serde_json::json;

    #[test]
    fn test_fields() {
        let assignment = Assignment::from_value(
            &MockGateway::new().client(),
            json!({
                "id": 9,
                "focus": "Europe",
                "election": "2016-11-30",
                "exclude_from_meetings": false,
                "links": {"person": 5, "role": 1}
            }),
            None,
        )
        .unwrap();

        assert_eq!(assignment.focus().unwrap(), Some("Europe"));
        assert_eq!(assignment.election(), NaiveDate::from_ymd_opt(2016, 11, 30));
        assert_eq!(assignment.exclude_from_meetings().unwrap(), Some(false));
    }

    #[test]
    fn test_missing_flag_is_data_format() {
        let assignment =
            Assignment::from_value(&MockGateway::new().client(), json!({"id": 9}), None).unwrap();
        assert_eq!(
            assignment.exclude_from_meetings().unwrap_err().kind(),
            ErrorKind::DataFormat
        );
        assert_eq!(assignment.election(), None);
    }

    #[tokio::test]
    async fn test_person_and_role_are_fetched() {
        let mock = MockGateway::new()
            .on(
                ResourcePath::item("people", 5),
                envelope("people", vec![json!({"id": 5, "name": "Ana"})]),
            )
            .on(
                ResourcePath::item("roles", 1),
                envelope("roles", vec![json!({"id": 1, "name": "Secretary"})]),
            );
        let assignment = Assignment::from_value(
            &mock.client(),
            json!({"id": 9, "links": {"person": 5, "role": 1}}),
            None,
        )
        .unwrap();

        let person = assignment.person().await.unwrap().unwrap();
        let role = assignment.role().await.unwrap().unwrap();
        assert_eq!(person.name().unwrap(), Some("Ana"));
        assert_eq!(role.name().unwrap(), Some("Secretary"));
        assert_eq!(mock.call_count(), 2);
    }
}
