//! Session lifecycle against a mocked API.

use super::common::{client, http_config, init_tracing};
use seniorvu::{ConfigPatch, Credentials, ErrorKind, SeniorVu};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_then_chained_get() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "foo@foo.com", "password": "password"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t1"})))
        .expect(1)
        .mount(&server)
        .await;

    // The login response carries no expiry, so the first request refreshes.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "t1",
            "expireAt": "2099-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/communities/1/purchasedLeads"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 10}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let result = client
        .authenticate_with(
            Credentials::new()
                .with_email("foo@foo.com")
                .with_password("password"),
        )
        .await
        .expect("login should succeed");
    assert_eq!(result.token, "t1");

    let reply = client
        .communities()
        .arg(1)
        .purchased_leads()
        .get()
        .await
        .expect("request should succeed");

    assert_eq!(reply.into_data(), Some(json!([{"id": 10}])));
}

#[tokio::test]
async fn test_api_key_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"apiKey": "key-123"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "t2", "userId": "u-9"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .config(ConfigPatch::new().api_key("key-123"))
        .expect("config should apply");
    let result = client.authenticate().await.expect("login should succeed");

    assert_eq!(result.user_id.as_deref(), Some("u-9"));
    assert_eq!(client.session().user_id(), Some("u-9"));
}

#[tokio::test]
async fn test_configured_one_time_token_is_exchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"token": "srvu-0123456789abcdef"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "session", "userToken": "user-token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    init_tracing();
    let client = SeniorVu::with_http_config(
        ConfigPatch::new()
            .base_url(server.uri())
            .token("srvu-0123456789abcdef")
            .email("foo@foo.com")
            .password("password"),
        http_config(),
    )
    .expect("client should build");

    client.authenticate().await.expect("exchange should succeed");

    let session = client.session();
    assert_eq!(session.token(), Some("session"));
    assert_eq!(session.user_token(), Some("user-token"));
}

#[tokio::test]
async fn test_login_without_token_in_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .authenticate_with(Credentials::new().with_api_key("k"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::NoTokenReceived));
    assert_eq!(client.token(), None);
}

#[tokio::test]
async fn test_login_without_credentials_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.authenticate().await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoAuthOptions));
}

// ============================================================================
// Manual token and refresh
// ============================================================================

#[tokio::test]
async fn test_manual_token_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("Authorization", "Bearer token-foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "token-foo",
            "expireAt": 4_070_908_800_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("Authorization", "Bearer token-foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .config(ConfigPatch::new().token("token-foo"))
        .expect("config should apply");
    assert_eq!(
        client.authorization_header().as_deref(),
        Some("Bearer token-foo")
    );

    client.me().get().await.expect("request should succeed");
}

#[tokio::test]
async fn test_explicit_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "renewed",
            "expireAt": "2099-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    // Without a session this is a no-op.
    client.refresh_token().await.expect("no-op refresh");

    client
        .config(ConfigPatch::new().token("old"))
        .expect("config should apply");
    client.refresh_token().await.expect("refresh should succeed");

    assert_eq!(client.token().as_deref(), Some("renewed"));
    assert!(!client.tokens().needs_refresh());
}

#[tokio::test]
async fn test_register() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/registration"))
        .and(body_json(json!({"email": "new@foo.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let created = client
        .register(&json!({"email": "new@foo.com", "password": "pw"}))
        .await
        .expect("registration should succeed");

    assert_eq!(created["id"], 3);
}
