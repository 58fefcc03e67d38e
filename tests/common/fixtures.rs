//! Local store fixtures
//!
//! Every store lives in its own `TempDir`, which must be kept alive for as
//! long as the store is used.

use std::sync::Arc;

use tempfile::TempDir;
use threadboard::forum::{ForumService, LocalFileStore};
use threadboard::shared::{AppConfig, BackendPreference};

/// Test RSA key used to sign service-account assertions
pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_service_account_key.pem");

/// Project id used by every Firestore test
pub const TEST_PROJECT: &str = "demo-forum";

/// A local store in a fresh temporary directory
pub struct TestStore {
    pub dir: TempDir,
    pub store: Arc<LocalFileStore>,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(LocalFileStore::new(dir.path().join("forum_posts.json")));
        Self { dir, store }
    }

    pub fn service(&self) -> ForumService {
        ForumService::with_store(self.store.clone())
    }

    pub fn raw_file(&self) -> String {
        std::fs::read_to_string(self.store.path()).unwrap_or_default()
    }
}

/// Config that forces the local store into `dir`, with demo identity
pub fn local_config(dir: &TempDir) -> AppConfig {
    AppConfig::builder()
        .backend(BackendPreference::Local)
        .local_store_path(dir.path().join("forum_posts.json"))
        .build()
        .expect("Failed to build local config")
}

/// Service-account blob for the emulator (only `project_id` matters)
pub fn emulator_service_account() -> String {
    serde_json::json!({ "project_id": TEST_PROJECT }).to_string()
}

/// Service-account blob whose token endpoint is `token_uri`
pub fn hosted_service_account(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": TEST_PROJECT,
        "private_key_id": "test-key-id",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": "forum@demo-forum.iam.gserviceaccount.com",
        "token_uri": token_uri,
    })
    .to_string()
}
