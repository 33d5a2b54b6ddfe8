//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock external catalog injected, enabling comprehensive E2E
//! testing without real API keys.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use shelfmark_core::{
    testing::MockBookCatalog, AuthConfig, AuthMethod, BookCatalog, BookStore, Config,
    DatabaseConfig, NoneAuthenticator, SqliteBookStore,
};
use shelfmark_core::config::ServerConfig;

/// Re-export fixtures for test convenience
pub use shelfmark_core::testing::fixtures;

/// Test fixture for E2E testing with a mock catalog.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_create_list() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture
///         .post("/api/v1/users/alice/lists", json!({ "name": "Reading" }))
///         .await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock external catalog - configure search results and bestsellers
    pub catalog: Arc<MockBookCatalog>,
    /// Temporary directory for the test database
    #[allow(dead_code)]
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let catalog = Arc::new(MockBookCatalog::new());

        let config = Config {
            auth: AuthConfig {
                method: AuthMethod::None,
                api_key: None,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            catalogs: None,
        };

        let store: Arc<dyn BookStore> = Arc::new(
            SqliteBookStore::new(&db_path).expect("Failed to create book store"),
        );

        let state = Arc::new(shelfmark_server::state::AppState::new(
            config,
            Arc::new(NoneAuthenticator),
            store,
            Some(Arc::clone(&catalog) as Arc<dyn BookCatalog>),
        ));

        let router = shelfmark_server::api::create_router(state);

        Self {
            router,
            catalog,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a request to the test server.
    ///
    /// The path is percent-encoded the way a real HTTP client would encode
    /// it on the wire, so tests can use readable unencoded paths.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        // Characters `http::Uri` rejects in a path; everything else
        // (including `/`, `?`, `=`) passes through unchanged.
        const INVALID_URI_CHARS: &percent_encoding::AsciiSet = &percent_encoding::CONTROLS
            .add(b' ')
            .add(b'"')
            .add(b'<')
            .add(b'>')
            .add(b'\\')
            .add(b'^')
            .add(b'`')
            .add(b'{')
            .add(b'|')
            .add(b'}');
        let path = percent_encoding::utf8_percent_encode(path, INVALID_URI_CHARS).to_string();
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
