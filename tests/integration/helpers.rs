//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use nimbus_core::config::logging::LoggingConfig;
use nimbus_core::config::server::ServerConfig;
use nimbus_core::config::storage::{LocalStorageConfig, S3StorageConfig, StorageConfig};
use nimbus_core::config::{AppConfig, AuthConfig, DatabaseConfig};

/// A password that satisfies the server-side policy.
pub const STRONG_PASSWORD: &str = "tr4verse-Mango-Kite!";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Root of the local object store
    pub storage_root: std::path::PathBuf,
    /// Staging directory for uploads
    pub staging_dir: std::path::PathBuf,
    /// Keeps the temp dirs alive for the test's duration
    _data_dir: tempfile::TempDir,
}

/// Response captured from the router
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body (Null when empty or not JSON)
    pub body: Value,
}

impl TestApp {
    /// Create a test application, or `None` when no test database is
    /// configured.
    pub async fn try_new() -> Option<Self> {
        let url = std::env::var("NIMBUS_TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .ok();
        let Some(url) = url else {
            eprintln!("NIMBUS_TEST_DATABASE_URL not set; skipping integration test");
            return None;
        };

        let data_dir = tempfile::tempdir().expect("temp dir");
        let storage_root = data_dir.path().join("storage");
        let staging_dir = data_dir.path().join("staging");

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 10,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                jwt_ttl_minutes: 60,
                password_min_length: 8,
            },
            storage: StorageConfig {
                data_root: data_dir.path().display().to_string(),
                staging_dir: staging_dir.display().to_string(),
                provider: "local".to_string(),
                max_upload_size_bytes: 10 * 1024 * 1024,
                local: LocalStorageConfig {
                    root_path: storage_root.display().to_string(),
                },
                s3: S3StorageConfig::default(),
            },
            logging: LoggingConfig::default(),
        };

        let db_pool = nimbus_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        nimbus_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let state = nimbus_api::build_state(config, db_pool.clone())
            .await
            .expect("Failed to build state");
        let router = nimbus_api::build_router(state);

        Some(Self {
            router,
            db_pool,
            storage_root,
            staging_dir,
            _data_dir: data_dir,
        })
    }

    /// Issue a request with an optional JSON body and bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request build");

        self.send(request).await
    }

    /// Issue a multipart upload with `folder` and `file` fields.
    pub async fn upload(
        &self,
        token: &str,
        folder: &str,
        file_name: &str,
        content: &str,
    ) -> TestResponse {
        let boundary = "X-NIMBUS-TEST-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"folder\"\r\n\r\n\
             {folder}\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .method("POST")
            .uri("/files/upload")
            .header("authorization", format!("Bearer {token}"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request build");

        self.send(request).await
    }

    /// Register a fresh user and log in, returning the bearer token.
    pub async fn register_and_login(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        let username = format!("user-{}", &suffix[..12]);
        let email = format!("{username}@example.com");

        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": STRONG_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "register: {:?}",
            response.body
        );

        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": STRONG_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login: {:?}", response.body);

        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Count files under the staging directory.
    pub fn staging_file_count(&self) -> usize {
        match std::fs::read_dir(&self.staging_dir) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }

    /// Count blobs under the local storage root (recursively).
    pub fn stored_blob_count(&self) -> usize {
        fn walk(dir: &std::path::Path) -> usize {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return 0;
            };
            entries
                .flatten()
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() { walk(&path) } else { 1 }
                })
                .sum()
        }
        walk(&self.storage_root)
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body read")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
