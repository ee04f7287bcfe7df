//! Test helpers
//!
//! Wires the real router to a local storage backend, a mockito-backed
//! vision endpoint, and a scratch staging root, so the moderation flow
//! runs end to end without any external service.

pub mod fixtures;

use std::sync::Arc;

use axum_test::TestServer;
use mockito::{Matcher, Mock, ServerGuard};
use obscura_core::{Config, StorageBackend};
use obscura_handler::routes::build_router;
use obscura_handler::state::AppState;
use obscura_storage::{LocalStorage, Storage};
use obscura_vision::{GoogleVisionClient, SafetyClassifier};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const SOURCE_BUCKET: &str = "uploads";
pub const BLURRED_BUCKET: &str = "blurred";

pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<dyn Storage>,
    pub vision: ServerGuard,
    pub staging_dir: TempDir,
    _storage_dir: TempDir,
}

pub async fn setup_test_app() -> TestApp {
    let storage_dir = TempDir::new().expect("Failed to create storage dir");
    let staging_dir = TempDir::new().expect("Failed to create staging dir");
    let vision = mockito::Server::new_async().await;

    let config = Config {
        server_port: 0,
        environment: "test".to_string(),
        blurred_bucket: BLURRED_BUCKET.to_string(),
        trigger_bucket: Some(SOURCE_BUCKET.to_string()),
        log_output_path: None,
        vision_api_key: "test-key".to_string(),
        vision_api_url: vision.url(),
        vision_timeout_seconds: 5,
        storage_backend: StorageBackend::Local,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(storage_dir.path().to_string_lossy().to_string()),
        staging_root: Some(staging_dir.path().to_string_lossy().to_string()),
    };
    config.validate().expect("Test config should be valid");

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(storage_dir.path())
            .await
            .expect("Failed to create local storage"),
    );
    let classifier: Arc<dyn SafetyClassifier> = Arc::new(
        GoogleVisionClient::from_config(&config).expect("Failed to build vision client"),
    );

    let state = Arc::new(AppState::new(config, storage.clone(), classifier));
    let server = TestServer::new(build_router(state)).expect("Failed to start test server");

    TestApp {
        server,
        storage,
        vision,
        staging_dir,
        _storage_dir: storage_dir,
    }
}

impl TestApp {
    /// CloudEvent body for a finalized object in the source bucket.
    pub fn finalized_event(&self, name: &str) -> Value {
        json!({
            "id": "5e9f24a",
            "source": "//storage.googleapis.com/projects/_/buckets/uploads",
            "specversion": "1.0",
            "type": "google.cloud.storage.object.v1.finalized",
            "data": {
                "bucket": SOURCE_BUCKET,
                "name": name,
                "metageneration": "1",
                "timeCreated": "2020-04-23T07:38:57.230Z",
                "updated": "2020-04-23T07:38:57.230Z"
            }
        })
    }

    /// Stub the vision endpoint with a successful annotate response.
    pub async fn mock_annotation(&mut self, body: Value) -> Mock {
        self.vision
            .mock("POST", "/v1/images:annotate")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Stub the vision endpoint with an HTTP failure.
    pub async fn mock_annotation_failure(&mut self, status: usize, body: &str) -> Mock {
        self.vision
            .mock("POST", "/v1/images:annotate")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }

    /// Entries left under the staging root. Zero after an invocation
    /// means the working directory was cleaned up.
    pub fn staged_entries(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Safe-search response with the given likelihood for each category.
pub fn annotation_response(adult: &str, violence: &str) -> Value {
    json!({
        "responses": [{
            "safeSearchAnnotation": {
                "adult": adult,
                "spoof": "VERY_UNLIKELY",
                "medical": "UNLIKELY",
                "violence": violence,
                "racy": "POSSIBLE"
            }
        }]
    })
}

/// Response with no annotation, as returned for objects the vision
/// backend could not fetch.
pub fn empty_annotation_response() -> Value {
    json!({"responses": [{}]})
}
