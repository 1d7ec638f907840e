//! Following links across resources end to end.

use futures::{StreamExt, TryStreamExt};
use glassfrog::prelude::*;
use serde_json::json;

use crate::common::{TestApi, circle_of_life, envelope};

#[tokio::test]
async fn test_circle_roles_are_fetched_in_link_order() {
    let api = TestApi::start().await;
    api.mount("circles/42", envelope("circles", vec![circle_of_life()]))
        .await;
    api.mount("roles/10", envelope("roles", vec![json!({"id": 10, "name": "Lead Link"})]))
        .await;
    api.mount("roles/20", envelope("roles", vec![json!({"id": 20, "name": "Secretary"})]))
        .await;
    let client = api.client().expect("client should build");

    let circle: Circle = client.get(42).await.expect("get should succeed");
    let roles: Vec<Role> = circle
        .roles()
        .expect("links should be valid")
        .try_collect()
        .await
        .expect("roles should resolve");

    let ids: Vec<_> = roles.iter().map(|r| r.id().unwrap()).collect();
    assert_eq!(ids, vec![10, 20]);
    assert_eq!(roles[1].name().unwrap(), Some("Secretary"));
    assert_eq!(
        api.received_paths().await,
        vec!["circles/42", "roles/10", "roles/20"]
    );
}

#[tokio::test]
async fn test_dropping_the_stream_stops_fetching() {
    let api = TestApi::start().await;
    api.mount("circles/42", envelope("circles", vec![circle_of_life()]))
        .await;
    api.mount("roles/10", envelope("roles", vec![json!({"id": 10})]))
        .await;
    let client = api.client().expect("client should build");

    let circle: Circle = client.get(42).await.expect("get should succeed");
    let first = circle
        .roles()
        .expect("links should be valid")
        .next()
        .await
        .expect("one role is linked")
        .expect("role should resolve");

    assert_eq!(first.id().unwrap(), 10);
    assert_eq!(api.received_paths().await, vec!["circles/42", "roles/10"]);
}

#[tokio::test]
async fn test_side_loaded_records_satisfy_link_only_targets() {
    let api = TestApi::start().await;
    api.mount(
        "roles/1",
        json!({
            "roles": [{
                "id": 1,
                "name": "Secretary",
                "organization_id": 7,
                "links": {
                    "circle": null,
                    "domains": [1000, 2000],
                    "accountabilities": [3000]
                }
            }],
            "linked": {
                "domains": [{"id": 1000, "description": "potato 1000"}],
                "accountabilities": [{"id": 3000, "description": "Scheduling meetings"}]
            }
        }),
    )
    .await;
    let client = api.client().expect("client should build");

    let role: Role = client.get(1).await.expect("get should succeed");

    let domains: Vec<Domain> = role.domains().unwrap().try_collect().await.unwrap();
    assert_eq!(domains[0].description().unwrap(), Some("potato 1000"));
    assert_eq!(domains[1].id().unwrap(), 2000);
    assert_eq!(domains[1].entity().record().len(), 1);

    let accountabilities: Vec<Accountability> =
        role.accountabilities().unwrap().try_collect().await.unwrap();
    assert_eq!(
        accountabilities[0].description().unwrap(),
        Some("Scheduling meetings")
    );

    assert!(role.circle().await.unwrap().is_none());
    assert_eq!(role.organization().unwrap().unwrap().id().unwrap(), 7);
    assert_eq!(api.received_paths().await, vec!["roles/1"]);
}

#[tokio::test]
async fn test_missing_role_surfaces_mid_stream() {
    let api = TestApi::start().await;
    api.mount("circles/42", envelope("circles", vec![circle_of_life()]))
        .await;
    api.mount("roles/10", envelope("roles", vec![json!({"id": 10})]))
        .await;
    api.mount_status("roles/20", 404, "").await;
    let client = api.client().expect("client should build");

    let circle: Circle = client.get(42).await.expect("get should succeed");
    let results: Vec<Result<Role>> = circle.roles().unwrap().collect().await;

    assert!(results[0].is_ok());
    assert_eq!(
        results[1].as_ref().unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn test_projects_through_circle() {
    let api = TestApi::start().await;
    api.mount("circles/42", envelope("circles", vec![circle_of_life()]))
        .await;
    api.mount(
        "circles/42/projects",
        json!({
            "projects": [{
                "id": 3,
                "description": "New website",
                "status": "Current",
                "created_at": "2015-01-09T20:09:21.000Z",
                "archived_at": null,
                "links": {"person": 5, "role": null, "circle": 42}
            }],
            "linked": {"people": [{"id": 5, "name": "Ana"}]}
        }),
    )
    .await;
    api.mount("people/5", envelope("people", vec![json!({"id": 5, "name": "Ana"})]))
        .await;
    let client = api.client().expect("client should build");

    let circle: Circle = client.get(42).await.expect("get should succeed");
    let projects: Vec<Project> = circle.projects().await.expect("detail should succeed").collect();

    assert_eq!(projects[0].description().unwrap(), Some("New website"));
    assert!(projects[0].created_at().is_some());
    assert!(projects[0].archived_at().is_none());

    let person = projects[0].person().await.unwrap().unwrap();
    assert_eq!(person.name().unwrap(), Some("Ana"));
    assert_eq!(
        api.received_paths().await,
        vec!["circles/42", "circles/42/projects", "people/5"]
    );
}

#[tokio::test]
async fn test_snapshot_survives_json_text() {
    let api = TestApi::start().await;
    api.mount(
        "people/5",
        json!({
            "people": [{"id": 5, "name": "Ana", "links": {"organization_ids": [7], "circles": []}}],
            "linked": {"organizations": [{"id": 7, "name": "Acme"}]}
        }),
    )
    .await;
    let client = api.client().expect("client should build");

    let person: Person = client.get(5).await.expect("get should succeed");
    let text = serde_json::to_string(&person.snapshot()).unwrap();
    let restored = Person::from_snapshot(&client, serde_json::from_str(&text).unwrap());

    assert_eq!(restored, person);

    let organizations: Vec<Organization> =
        restored.organizations().unwrap().try_collect().await.unwrap();
    assert_eq!(organizations[0].name().unwrap(), Some("Acme"));
    assert_eq!(api.received_paths().await, vec!["people/5"]);
}
