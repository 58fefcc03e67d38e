//! Firestore store against a mocked REST endpoint

use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use threadboard::forum::{BackendMode, FirestoreStore, ForumService, PostStore};
use threadboard::shared::{AppConfig, ForumError};
use wiremock::matchers::{body_string_contains, header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::assert_ok;
use crate::common::{
    emulator_config, hosted_service_account, mount_commit_error, mount_commit_ok,
    mount_posts_query, mount_replies_query, post_document, reply_document,
};

async fn emulator_service(server: &MockServer) -> ForumService {
    let store = assert_ok!(FirestoreStore::connect(&emulator_config(server)));
    ForumService::with_store(Arc::new(store))
}

async fn commit_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().ends_with(":commit"))
        .map(|r: &Request| r.body_json::<Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn test_selector_picks_remote_with_emulator() {
    let server = MockServer::start().await;
    let forum = ForumService::from_config(&emulator_config(&server));
    assert_eq!(forum.mode(), BackendMode::Remote);
    assert!(forum.selection().is_remote_configured());
    assert!(forum.selection().last_configuration_error().is_none());
}

#[tokio::test]
async fn test_add_post_commit_body() {
    let server = MockServer::start().await;
    mount_commit_ok(&server).await;
    let forum = emulator_service(&server).await;

    let id = assert_ok!(forum.add_post("Ada", "<b>Engines</b>", "Analytical engines are neat").await);

    let bodies = commit_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let write = &bodies[0]["writes"][0];
    let name = write["update"]["name"].as_str().unwrap();
    assert!(name.ends_with(&format!("/forum_posts/{}", id)));

    let fields = &write["update"]["fields"];
    assert_eq!(fields["topic"]["stringValue"], "Engines");
    assert_eq!(fields["reply_count"]["integerValue"], "0");
    assert!(fields["created_at"]["stringValue"].as_str().unwrap().ends_with('Z'));
    assert_eq!(write["updateTransforms"][0]["fieldPath"], "timestamp");
    assert_eq!(write["updateTransforms"][0]["setToServerValue"], "REQUEST_TIME");
    assert_eq!(write["currentDocument"]["exists"], false);
}

#[tokio::test]
async fn test_emulator_uses_owner_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r":commit$"))
        .and(header("authorization", "Bearer owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "writeResults": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let forum = emulator_service(&server).await;
    assert_ok!(forum.add_post("Ada", "Engines", "Analytical engines are neat").await);
}

#[tokio::test]
async fn test_list_posts_decodes_documents() {
    let server = MockServer::start().await;
    mount_posts_query(
        &server,
        vec![
            post_document(
                "p2",
                json!({
                    "name": { "stringValue": "Grace" },
                    "topic": { "stringValue": "Compilers" },
                    "message": { "stringValue": "Who wrote the first one?" },
                    "timestamp": { "timestampValue": "2024-05-02T09:30:15.123456Z" },
                    "reply_count": { "integerValue": "1" },
                }),
            ),
            post_document(
                "p1",
                json!({
                    "name": { "stringValue": "Ada" },
                    "topic": { "stringValue": "Engines" },
                    "message": { "stringValue": "Analytical engines are neat" },
                    "created_at": { "stringValue": "2024-05-01T08:00:00.000001Z" },
                }),
            ),
        ],
    )
    .await;
    mount_replies_query(
        &server,
        "p2",
        vec![reply_document(
            "p2",
            "r1",
            json!({
                "name": { "stringValue": "Linus" },
                "message": { "stringValue": "It was a team effort" },
                "timestamp": { "timestampValue": "2024-05-02T10:00:00Z" },
            }),
        )],
    )
    .await;
    mount_replies_query(&server, "p1", vec![]).await;

    let forum = emulator_service(&server).await;
    let posts = forum.list_posts(10).await;

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id.as_str(), "p2");
    assert_eq!(posts[0].timestamp, "2024-05-02 09:30:15");
    assert_eq!(posts[0].reply_count, 1);
    assert_eq!(posts[0].replies.len(), 1);
    assert_eq!(posts[0].replies[0].name, "Linus");
    assert_eq!(posts[0].replies[0].timestamp, "2024-05-02 10:00:00");

    assert_eq!(posts[1].id.as_str(), "p1");
    assert_eq!(posts[1].timestamp, "2024-05-01 08:00:00");
    assert_eq!(posts[1].reply_count, 0);
    assert!(posts[1].replies.is_empty());

    assert_eq!(forum.search("team effort").await.len(), 1);
}

#[tokio::test]
async fn test_list_many_posts_keeps_order_and_replies() {
    const POSTS: usize = 40;

    let server = MockServer::start().await;
    let documents = (0..POSTS)
        .map(|i| {
            let reply_count = if i % 7 == 0 { "1" } else { "0" };
            post_document(
                &format!("p{}", i),
                json!({
                    "name": { "stringValue": "Ada" },
                    "topic": { "stringValue": format!("Topic {}", i) },
                    "message": { "stringValue": "Analytical engines are neat" },
                    "reply_count": { "integerValue": reply_count },
                }),
            )
        })
        .collect();
    mount_posts_query(&server, documents).await;
    for i in (0..POSTS).filter(|i| i % 7 == 0) {
        let post_id = format!("p{}", i);
        let reply = reply_document(
            &post_id,
            "r1",
            json!({
                "name": { "stringValue": "Grace" },
                "message": { "stringValue": format!("Reply to {}", post_id) },
            }),
        );
        mount_replies_query(&server, &post_id, vec![reply]).await;
    }
    Mock::given(method("POST"))
        .and(path_regex(r"/forum_posts/[^/]+:runQuery$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "readTime": "2024-05-01T12:00:00.000000Z" }])),
        )
        .mount(&server)
        .await;

    let forum = emulator_service(&server).await;
    let posts = forum.list_posts(POSTS).await;

    assert_eq!(posts.len(), POSTS);
    for (i, post) in posts.iter().enumerate() {
        assert_eq!(post.id.as_str(), format!("p{}", i));
        if i % 7 == 0 {
            assert_eq!(post.replies.len(), 1);
            assert_eq!(post.replies[0].message, format!("Reply to p{}", i));
        } else {
            assert!(post.replies.is_empty());
        }
    }
}

#[tokio::test]
async fn test_list_query_orders_newest_first_with_limit() {
    let server = MockServer::start().await;
    mount_posts_query(&server, vec![]).await;
    let forum = emulator_service(&server).await;

    assert!(forum.list_posts(3).await.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();
    let query = &body["structuredQuery"];
    assert_eq!(query["from"][0]["collectionId"], "forum_posts");
    assert_eq!(query["orderBy"][0]["field"]["fieldPath"], "timestamp");
    assert_eq!(query["orderBy"][0]["direction"], "DESCENDING");
    assert_eq!(query["limit"], 3);
}

#[tokio::test]
async fn test_list_failure_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r":runQuery$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let forum = emulator_service(&server).await;
    assert!(forum.list_posts(10).await.is_empty());
    assert!(forum.search("anything").await.is_empty());
}

#[tokio::test]
async fn test_reply_commit_carries_increment() {
    let server = MockServer::start().await;
    mount_commit_ok(&server).await;
    let forum = emulator_service(&server).await;

    assert_ok!(forum.add_reply("p1", "Grace", "Nice engine").await);

    let bodies = commit_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let writes = bodies[0]["writes"].as_array().unwrap();
    assert_eq!(writes.len(), 2);

    let reply_name = writes[0]["update"]["name"].as_str().unwrap();
    assert!(reply_name.contains("/forum_posts/p1/replies/"));
    assert_eq!(writes[0]["update"]["fields"]["message"]["stringValue"], "Nice engine");

    let increment = &writes[1];
    assert!(increment["transform"]["document"]
        .as_str()
        .unwrap()
        .ends_with("/forum_posts/p1"));
    assert_eq!(
        increment["transform"]["fieldTransforms"][0]["fieldPath"],
        "reply_count"
    );
    assert_eq!(
        increment["transform"]["fieldTransforms"][0]["increment"]["integerValue"],
        "1"
    );
    assert_eq!(increment["currentDocument"]["exists"], true);
}

#[tokio::test]
async fn test_reply_to_missing_post() {
    let server = MockServer::start().await;
    mount_commit_error(&server, 404, "NOT_FOUND", "No document to update").await;
    let forum = emulator_service(&server).await;

    assert_eq!(
        forum.add_reply("ghost", "Grace", "Anyone here?").await,
        Err(ForumError::post_not_found("ghost"))
    );
}

#[tokio::test]
async fn test_reply_to_nested_path_writes_nothing() {
    let server = MockServer::start().await;
    mount_commit_ok(&server).await;
    let forum = emulator_service(&server).await;

    for post_id in ["p1/replies/r1", "p1/", "../p1", ".."] {
        assert_eq!(
            forum.add_reply(post_id, "Mallory", "Sneaky").await,
            Err(ForumError::post_not_found(post_id))
        );
    }

    assert!(commit_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn test_increment_rejects_unaddressable_post_id() {
    let server = MockServer::start().await;
    mount_commit_ok(&server).await;
    let store = assert_ok!(FirestoreStore::connect(&emulator_config(&server)));

    assert_matches!(
        store.increment_reply_count(&"".into()).await,
        Err(ForumError::PostNotFound { .. })
    );
    assert_matches!(
        store.increment_reply_count(&"p1/replies/r1".into()).await,
        Err(ForumError::PostNotFound { .. })
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bare_404_is_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r":commit$"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    let forum = emulator_service(&server).await;

    assert_matches!(
        forum.add_reply("p1", "Grace", "Nice engine").await,
        Err(ForumError::Store { .. })
    );
}

#[tokio::test]
async fn test_reply_precondition_failure_is_not_found() {
    let server = MockServer::start().await;
    mount_commit_error(&server, 400, "FAILED_PRECONDITION", "the stored version does not match").await;
    let forum = emulator_service(&server).await;

    assert_matches!(
        forum.add_reply("ghost", "Grace", "Anyone here?").await,
        Err(ForumError::PostNotFound { .. })
    );
}

#[tokio::test]
async fn test_write_failure_is_store_error() {
    let server = MockServer::start().await;
    mount_commit_error(&server, 403, "PERMISSION_DENIED", "Missing or insufficient permissions").await;
    let forum = emulator_service(&server).await;

    assert_matches!(
        forum.add_post("Ada", "Engines", "Analytical engines are neat").await,
        Err(ForumError::Store { .. })
    );
    assert_matches!(
        forum.add_reply("p1", "Grace", "Nice engine").await,
        Err(ForumError::Store { .. })
    );
}

#[tokio::test]
async fn test_concurrent_replies_each_increment() {
    const REPLIES: usize = 12;

    let server = MockServer::start().await;
    mount_commit_ok(&server).await;
    let forum = emulator_service(&server).await;

    let tasks: Vec<_> = (0..REPLIES)
        .map(|i| {
            let forum = forum.clone();
            tokio::spawn(async move {
                forum
                    .add_reply("p1", "Tester", &format!("Concurrent reply {}", i))
                    .await
            })
        })
        .collect();
    for task in tasks {
        assert_ok!(task.await.unwrap());
    }

    // No read of the counter: every request is a commit with its own increment
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), REPLIES);

    let increments: i64 = commit_bodies(&server)
        .await
        .iter()
        .map(|body| {
            let transform = &body["writes"][1]["transform"]["fieldTransforms"][0];
            transform["increment"]["integerValue"]
                .as_str()
                .unwrap()
                .parse::<i64>()
                .unwrap()
        })
        .sum();
    assert_eq!(increments, REPLIES as i64);
}

#[tokio::test]
async fn test_increment_reply_count() {
    let server = MockServer::start().await;
    mount_commit_ok(&server).await;
    let store = assert_ok!(FirestoreStore::connect(&emulator_config(&server)));

    assert_ok!(store.increment_reply_count(&"p1".into()).await);

    let bodies = commit_bodies(&server).await;
    let writes = bodies[0]["writes"].as_array().unwrap();
    assert_eq!(writes.len(), 1);
    assert!(writes[0].get("update").is_none());
}

#[tokio::test]
async fn test_service_account_token_exchange_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test-token",
            "expires_in": 3599,
            "token_type": "Bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1/projects/demo-forum/.*:commit$"))
        .and(header("authorization", "Bearer ya29.test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "writeResults": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let config = AppConfig::builder()
        .service_account_json(hosted_service_account(&format!("{}/token", server.uri())))
        .firestore_base_url(format!("{}/v1", server.uri()))
        .build()
        .unwrap();
    let store = assert_ok!(FirestoreStore::connect(&config));
    assert_eq!(store.kind(), threadboard::forum::StoreKind::Remote);

    let forum = ForumService::with_store(Arc::new(store));
    assert_ok!(forum.add_post("Ada", "Engines", "Analytical engines are neat").await);
    assert_ok!(forum.add_post("Grace", "Compilers", "Who wrote the first one?").await);
}

#[tokio::test]
async fn test_token_rejection_is_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature.",
        })))
        .mount(&server)
        .await;

    let config = AppConfig::builder()
        .service_account_json(hosted_service_account(&format!("{}/token", server.uri())))
        .firestore_base_url(format!("{}/v1", server.uri()))
        .build()
        .unwrap();
    let forum = ForumService::from_config(&config);
    assert_eq!(forum.mode(), BackendMode::Remote);

    assert_matches!(
        forum.add_post("Ada", "Engines", "Analytical engines are neat").await,
        Err(ForumError::Store { .. })
    );
}

#[tokio::test]
async fn test_bad_private_key_falls_back_to_local() {
    let dir = tempfile::TempDir::new().unwrap();
    let blob = json!({
        "project_id": "demo-forum",
        "client_email": "forum@demo-forum.iam.gserviceaccount.com",
        "private_key": "not a key",
    })
    .to_string();
    let config = AppConfig::builder()
        .service_account_json(blob)
        .local_store_path(dir.path().join("forum_posts.json"))
        .build()
        .unwrap();

    let forum = ForumService::from_config(&config);
    assert_eq!(forum.mode(), BackendMode::Local);
    assert!(forum
        .selection()
        .last_configuration_error()
        .unwrap()
        .starts_with("Firestore initialization failed"));
}
