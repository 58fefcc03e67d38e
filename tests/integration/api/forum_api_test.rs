//! Forum API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use threadboard::shared::{AppConfig, BackendPreference};

use super::create_test_server;
use crate::common::local_config;

async fn create_post(server: &axum_test::TestServer, topic: &str) -> String {
    let response = server
        .post("/api/forum/posts")
        .json(&json!({
            "name": "Ada",
            "topic": topic,
            "message": "Analytical engines are neat",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Post added successfully");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_create_and_list_posts() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));

    let first = create_post(&server, "First topic").await;
    let second = create_post(&server, "Second topic").await;
    assert_eq!(first, "1");
    assert_eq!(second, "2");

    let posts: Value = server.get("/api/forum/posts").await.json();
    assert_eq!(posts.as_array().unwrap().len(), 2);
    assert_eq!(posts[0]["id"], "2");
    assert_eq!(posts[0]["reply_count"], 0);
    assert_eq!(posts[0]["replies"], json!([]));

    let limited: Value = server
        .get("/api/forum/posts")
        .add_query_param("limit", 1)
        .await
        .json();
    assert_eq!(limited.as_array().unwrap().len(), 1);
    assert_eq!(limited[0]["topic"], "Second topic");
}

#[tokio::test]
async fn test_default_limit_is_ten() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));

    for i in 0..12 {
        create_post(&server, &format!("Topic {}", i)).await;
    }

    let posts: Value = server.get("/api/forum/posts").await.json();
    assert_eq!(posts.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_validation_error_response() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));

    let response = server
        .post("/api/forum/posts")
        .json(&json!({ "name": "Ada", "topic": "shor", "message": "Analytical engines are neat" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("topic"));

    let missing = server.post("/api/forum/posts").json(&json!({})).await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reply_flow() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));
    let id = create_post(&server, "Engines").await;

    let response = server
        .post(&format!("/api/forum/posts/{}/replies", id))
        .json(&json!({ "name": "Grace", "message": "Lovely engine" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["message"], "Reply added successfully");

    let posts: Value = server.get("/api/forum/posts").await.json();
    assert_eq!(posts[0]["reply_count"], 1);
    assert_eq!(posts[0]["replies"][0]["name"], "Grace");
}

#[tokio::test]
async fn test_reply_to_unknown_post_is_not_found() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));
    create_post(&server, "Engines").await;

    let response = server
        .post("/api/forum/posts/42/replies")
        .json(&json!({ "name": "Grace", "message": "Lovely engine" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));
    create_post(&server, "Rust traits").await;
    create_post(&server, "Gardening").await;

    let hits: Value = server
        .get("/api/forum/search")
        .add_query_param("q", "TRAITS")
        .await
        .json();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["topic"], "Rust traits");

    let short: Value = server
        .get("/api/forum/search")
        .add_query_param("q", "r")
        .await
        .json();
    assert_eq!(short, json!([]));

    let empty: Value = server.get("/api/forum/search").await.json();
    assert_eq!(empty, json!([]));
}

#[tokio::test]
async fn test_status_local() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));

    let status: Value = server.get("/api/forum/status").await.json();
    assert_eq!(status["mode"], "local");
    assert_eq!(status["remote_configured"], false);
    assert_eq!(status["configuration_error"], Value::Null);
    assert_eq!(status["identity_mode"], "demo");
}

#[tokio::test]
async fn test_unconfigured_store() {
    let config = AppConfig::builder()
        .backend(BackendPreference::Remote)
        .build()
        .unwrap();
    let server = create_test_server(&config);

    let status: Value = server.get("/api/forum/status").await.json();
    assert_eq!(status["mode"], "unconfigured");
    assert!(status["configuration_error"]
        .as_str()
        .unwrap()
        .contains("not configured"));

    let response = server
        .post("/api/forum/posts")
        .json(&json!({ "name": "Ada", "topic": "Engines", "message": "Analytical engines are neat" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let posts: Value = server.get("/api/forum/posts").await.json();
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn test_unknown_route() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&local_config(&dir));

    let response = server.get("/api/forum/nothing-here").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
