//! Configuration resolution as seen by requests.

use super::common::{authenticated_client, http_config, init_tracing};
use seniorvu::api::{PRODUCTION_URL, STAGING_URL};
use seniorvu::{ConfigPatch, SeniorVu};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_env_staging() {
    init_tracing();
    let client = SeniorVu::with_http_config(ConfigPatch::new(), http_config())
        .expect("client should build");
    assert_eq!(client.base_url(), PRODUCTION_URL);

    client
        .config(ConfigPatch::new().base_url("http://localhost:3000"))
        .expect("config should apply");
    client
        .config(ConfigPatch::new().env("staging"))
        .expect("config should apply");
    assert_eq!(client.base_url(), STAGING_URL);
}

#[test]
fn test_null_patch_keeps_staging() {
    let client = SeniorVu::with_http_config(
        ConfigPatch::from_json(json!({"env": "staging"})).expect("patch should parse"),
        http_config(),
    )
    .expect("client should build");

    client
        .config(ConfigPatch::from_json(json!({"baseUrl": null, "env": "staging"})).expect("patch should parse"))
        .expect("config should apply");
    assert_eq!(client.base_url(), STAGING_URL);

    client
        .config(ConfigPatch::from_json(json!({"baseUrl": null, "token": null})).expect("patch should parse"))
        .expect("config should apply");
    assert_eq!(client.base_url(), STAGING_URL);
    assert_eq!(client.token(), None);
}

#[test]
fn test_prod_prefix() {
    let client = SeniorVu::with_http_config(ConfigPatch::new().env("production"), http_config())
        .expect("client should build");
    assert_eq!(client.base_url(), PRODUCTION_URL);
}

#[tokio::test]
async fn test_reconfigured_base_url_applies_to_next_request() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/amenities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["first"])))
        .expect(1)
        .mount(&first)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/amenities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["second"])))
        .expect(1)
        .mount(&second)
        .await;

    let client = authenticated_client(&first, "t1");
    let reply = client.amenities().get().await.expect("request should succeed");
    assert_eq!(reply.into_data(), Some(json!(["first"])));

    client
        .config(ConfigPatch::new().base_url(format!("{}/", second.uri())))
        .expect("config should apply");
    let reply = client.amenities().get().await.expect("request should succeed");
    assert_eq!(reply.into_data(), Some(json!(["second"])));

    // The session survives reconfiguration.
    assert_eq!(client.token().as_deref(), Some("t1"));
}
