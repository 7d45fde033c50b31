//! Chained requests against a mocked API.

use super::common::authenticated_client;
use seniorvu::{Path, Reply};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Verbs
// ============================================================================

#[tokio::test]
async fn test_communities_with_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/communities"))
        .and(query_param("limit", "1"))
        .and(query_param("q", "Denver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let reply = client
        .communities()
        .arg(json!({"limit": 1, "q": "Denver"}))
        .get()
        .await
        .expect("request should succeed");

    let communities: Vec<serde_json::Value> = reply.json().expect("payload should parse");
    assert_eq!(communities.len(), 1);
}

#[tokio::test]
async fn test_get_body_merges_over_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    client
        .leads()
        .arg(json!({"limit": 10, "offset": 40}))
        .get_with(&json!({"limit": 20}))
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn test_post_purchased_lead() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/communities/1/purchasedLeads"))
        .and(header("Authorization", "Bearer t1"))
        .and(body_json(json!({"leadId": 42, "note": "call back"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let reply = client
        .communities()
        .arg(1)
        .purchased_leads()
        .post(&json!({"leadId": 42, "note": "call back"}))
        .await
        .expect("request should succeed");

    assert_eq!(reply.data(), Some(&json!({"id": 99})));
}

#[tokio::test]
async fn test_put_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/communities/1/reviews/5"))
        .and(body_json(json!({"rating": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "rating": 4})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/communities/1/reviews/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let updated = client
        .communities()
        .arg(1)
        .reviews()
        .arg(5)
        .put(&json!({"rating": 4}))
        .await
        .expect("update should succeed");
    assert_eq!(updated.data().map(|v| &v["rating"]), Some(&json!(4)));

    let deleted = client
        .communities()
        .arg(1)
        .reviews()
        .arg(5)
        .delete()
        .await
        .expect("delete should succeed");
    assert!(matches!(deleted, Reply::Raw(ref raw) if raw.status == 204));
}

#[tokio::test]
async fn test_delete_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/leads/deleteCreated"))
        .and(body_json(json!({"ids": [1, 2]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let reply = client
        .leads()
        .delete_created()
        .delete_with(&json!({"ids": [1, 2]}))
        .await
        .expect("delete should succeed");
    assert_eq!(reply.data(), Some(&json!({"deleted": 2})));
}

#[tokio::test]
async fn test_path_by_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/forgotPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");
    let reply = client
        .path(Path::Users)
        .path(Path::ForgotPassword)
        .get()
        .await
        .expect("request should succeed");

    assert_eq!(reply.into_data(), Some(json!("ok")));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_interleaved_chains_stay_separate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/communities/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "community"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/leads/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "lead"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server, "t1");

    let a = client.communities();
    let b = client.leads();
    assert_eq!(a.segments(), ["communities"]);
    assert_eq!(b.segments(), ["leads"]);

    let first = a.arg(1).get();
    let second = b.arg(2).get();
    let (first, second) = futures::join!(first, second);

    assert_eq!(
        first.expect("first should succeed").into_data(),
        Some(json!({"kind": "community"}))
    );
    assert_eq!(
        second.expect("second should succeed").into_data(),
        Some(json!({"kind": "lead"}))
    );
}

#[tokio::test]
async fn test_concurrent_tasks_share_one_client() {
    let server = MockServer::start().await;

    for id in 0..8 {
        Mock::given(method("GET"))
            .and(path(format!("/api/rooms/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": id})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = authenticated_client(&server, "t1");
    let tasks: Vec<_> = (0..8)
        .map(|id| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .rooms()
                    .arg(id)
                    .get()
                    .await
                    .map(|reply| (id, reply.into_data()))
            })
        })
        .collect();

    for task in tasks {
        let (id, data) = task
            .await
            .expect("task should not panic")
            .expect("request should succeed");
        assert_eq!(data, Some(json!({"id": id})));
    }
}
