use std::time::Duration;

use httpmock::Method::{DELETE, GET, POST, PUT};
use httpmock::MockServer;
use launchpad_client::{
    ApplicationDraft, ApplicationId, BackendClient, ClientConfig, ClientError, ForwardedHeaders,
    RequestBody, StatusCode,
};
use serde_json::json;

fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(&server.base_url()).expect("client")
}

#[tokio::test]
async fn test_list_forwards_cookie_and_disables_caching() -> Result<(), Box<dyn std::error::Error>>
{
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/applications")
                .header("cookie", "session=abc")
                .header("cache-control", "no-store")
                .header("accept", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"[{"id":1,"name":"Campus Map"}]"#);
        })
        .await;

    let client = client_for(&server);
    let headers = ForwardedHeaders::default().with_cookie("session=abc");
    let response = client.applications().list(&headers).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json()?,
        Some(json!([{"id": 1, "name": "Campus Map"}]))
    );
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_get_uses_no_cache_and_item_path() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/applications/42")
                .header("cache-control", "no-cache")
                .header("x-request-id", "req-42");
            then.status(200).body(r#"{"id":42,"name":"X"}"#);
        })
        .await;

    let client = client_for(&server);
    let headers = ForwardedHeaders::default().with_request_id("req-42");
    let response = client
        .applications()
        .get(&ApplicationId::from(42), &headers)
        .await?;

    assert_eq!(response.json()?, Some(json!({"id": 42, "name": "X"})));
    mock.assert_hits_async(1).await;

    Ok(())
}

#[tokio::test]
async fn test_create_sends_body_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let draft = ApplicationDraft {
        name: "A".to_string(),
        description: "B".to_string(),
        owners: "C".to_string(),
    };
    let body = serde_json::to_string(&draft)?;

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/applications")
                .header("content-type", "application/json")
                .header("cache-control", "no-store")
                .body(r#"{"name":"A","description":"B","owners":"C"}"#);
            then.status(201)
                .body(r#"{"id":"ods_app_1","name":"A","description":"B","owners":"C"}"#);
        })
        .await;

    let client = client_for(&server);
    let response = client
        .applications()
        .create(&ForwardedHeaders::default(), RequestBody::from(body))
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_update_streams_body() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/applications/7")
                .body(r#"{"name":"renamed"}"#);
            then.status(200);
        })
        .await;

    let client = client_for(&server);
    let body = RequestBody::Streamed(reqwest::Body::from(r#"{"name":"renamed"}"#));
    let response = client
        .applications()
        .update(&ApplicationId::from(7), &ForwardedHeaders::default(), body)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.is_empty());
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_delete_returns_backend_status() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/applications/gone");
            then.status(500).body("no rows in result set\n");
        })
        .await;

    let client = client_for(&server);
    let response = client
        .applications()
        .delete(&ApplicationId::from("gone"), &ForwardedHeaders::default())
        .await?;

    // Non-2xx is still a response, not a transport error
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "no rows in result set");
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_connect_error() {
    // Nothing listens on port 1
    let client = BackendClient::new("http://127.0.0.1:1").expect("client");
    let result = client.applications().list(&ForwardedHeaders::default()).await;

    assert!(matches!(result, Err(ClientError::Connect(_))));
}

#[tokio::test]
async fn test_slow_backend_is_timeout_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/applications");
            then.status(200)
                .delay(Duration::from_millis(500))
                .body("[]");
        })
        .await;

    let config = ClientConfig {
        timeout: Duration::from_millis(100),
        ..ClientConfig::default()
    };
    let client = BackendClient::new_with_config(&server.base_url(), config).expect("client");
    let result = client.applications().list(&ForwardedHeaders::default()).await;

    assert!(matches!(result, Err(ClientError::Timeout(_))));
}
