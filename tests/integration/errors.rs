//! Error normalization end to end.

use super::common::authenticated_client;
use seniorvu::client::Failure;
use seniorvu::{ConfigPatch, ErrorKind, SeniorVu};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_first_structured_error_wins() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/leads"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{"message": "A"}, {"message": "B"}]
        })))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let err = client.leads().post(&json!({})).await.unwrap_err();

    assert_eq!(err.to_string(), "A");
    assert_eq!(err.status(), Some(422));
    assert!(matches!(
        err.failure(),
        Some(Failure::Response { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_error_entry_without_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": ["room type is required"]
        })))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let err = client.rooms().get().await.unwrap_err();
    assert_eq!(err.to_string(), "room type is required");
}

#[tokio::test]
async fn test_unstructured_body_becomes_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let err = client.events().get().await.unwrap_err();
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[tokio::test]
async fn test_empty_500_is_unknown_issue() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/hours"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let err = client.hours().get().await.unwrap_err();
    assert_eq!(err.to_string(), "Unknown issue");
}

#[tokio::test]
async fn test_no_response() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server, "t1");
    drop(server);

    let err = client.video().get().await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoResponse));
    assert_eq!(err.to_string(), "No response from API");
    assert!(matches!(err.failure(), Some(Failure::NoResponse(_))));
}

#[tokio::test]
async fn test_token_never_leaks_into_messages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/payment"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"message": "Bearer abc.def.ghi is not valid"}]
        })))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "abc.def.ghi");
    let err = client.payment().get().await.unwrap_err();

    assert!(!err.to_string().contains("abc.def.ghi"));
    assert!(err.to_string().contains("[REDACTED]"));
}

#[tokio::test]
async fn test_invalid_base_url_is_rejected() {
    let err = SeniorVu::new(ConfigPatch::new().base_url("::not a url::")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
}
