//! Fetch operations through the REST gateway.

use glassfrog::prelude::*;
use glassfrog::ApiToken;
use serde_json::json;

use crate::common::{TestApi, circle_of_life, envelope};

#[tokio::test]
async fn test_get_circle() {
    let api = TestApi::start().await;
    api.mount("circles/42", envelope("circles", vec![circle_of_life()]))
        .await;
    let client = api.client().expect("client should build");

    let circle: Circle = client.get(42).await.expect("get should succeed");

    assert_eq!(circle.id().unwrap(), 42);
    assert_eq!(circle.name().unwrap(), Some("Circle of Life"));
    assert_eq!(circle.short_name().unwrap(), Some("CoL"));
    assert_eq!(api.received_paths().await, vec!["circles/42"]);
}

#[tokio::test]
async fn test_list_people() {
    let api = TestApi::start().await;
    api.mount(
        "people",
        json!({
            "people": [
                {"id": 1, "name": "Ana", "email": "ana@example.com"},
                {"id": 2, "name": "Bo", "email": "bo@example.com"}
            ],
            "linked": {"circles": [{"id": 42, "name": "Circle of Life"}]}
        }),
    )
    .await;
    let client = api.client().expect("client should build");

    let people: Vec<Person> = client.list::<Person>().await.expect("list should succeed").collect();

    let names: Vec<_> = people.iter().map(|p| p.name().unwrap()).collect();
    assert_eq!(names, vec![Some("Ana"), Some("Bo")]);
    assert!(people.iter().all(|p| p.entity().linked().is_some()));
}

#[tokio::test]
async fn test_get_missing_record_is_not_found() {
    let api = TestApi::start().await;
    api.mount_status("roles/999", 404, "").await;
    let client = api.client().expect("client should build");

    let err = client.get::<Role>(999).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(api.received_paths().await, vec!["roles/999"]);
}

#[tokio::test]
async fn test_server_error_passes_through() {
    let api = TestApi::start().await;
    api.mount_status("assignments", 502, "bad gateway").await;
    let client = api.client().expect("client should build");

    let err = client.list::<Assignment>().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.message(), "bad gateway");
}

#[tokio::test]
async fn test_link_only_types_never_reach_the_server() {
    let api = TestApi::start().await;
    let client = api.client().expect("client should build");

    assert_eq!(
        client.get::<Domain>(1).await.unwrap_err().kind(),
        ErrorKind::Unsupported
    );
    assert_eq!(
        client.list::<Project>().await.unwrap_err().kind(),
        ErrorKind::Unsupported
    );
    assert!(api.received_paths().await.is_empty());
}

#[tokio::test]
async fn test_raw_fetch_uses_three_url_shapes() {
    let api = TestApi::start().await;
    api.mount("circles", json!({"circles": []})).await;
    api.mount("circles/42", json!({"circles": [{"id": 42}]})).await;
    api.mount("circles/42/projects", json!({"projects": []})).await;
    let client = api.client().expect("client should build");

    client.fetch("circles", None, None).await.unwrap();
    client.fetch("circles", Some(42), None).await.unwrap();
    client.fetch("projects", Some(42), Some("circles")).await.unwrap();

    let err = client
        .fetch("projects", None, Some("circles"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(
        api.received_paths().await,
        vec!["circles", "circles/42", "circles/42/projects"]
    );
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let api = TestApi::start().await;
    api.mount("circles/42", envelope("circles", vec![circle_of_life()]))
        .await;
    api.mount_status("circles/42", 401, "invalid token").await;

    let client = Client::builder()
        .url(format!("{}/api/v3", api.server.uri()))
        .retry_config(RetryConfig::disabled())
        .token("someone-elses-token")
        .build()
        .expect("client should build");

    let err = client.get::<Circle>(42).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

// Tests share one process, so GLASSFROG_API_TOKEN itself is never mutated.
#[test]
fn test_missing_token_fails_before_any_request() {
    let err = ApiToken::from_env_var("GLASSFROG_INTEGRATION_TOKEN_NEVER_SET").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
