//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use nimbus_auth::jwt::decoder::JwtDecoder;
use nimbus_auth::jwt::encoder::JwtEncoder;
use nimbus_auth::password::hasher::PasswordHasher;
use nimbus_core::config::AppConfig;
use nimbus_core::traits::ObjectStore;
use nimbus_database::repositories::file::FileRepository;
use nimbus_database::repositories::user::UserRepository;
use nimbus_service::auth::service::AuthService;
use nimbus_service::file::service::FileService;
use nimbus_service::file::upload::UploadService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Object store (local or S3)
    pub store: Arc<dyn ObjectStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2id)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// File repository
    pub file_repo: Arc<FileRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login service
    pub auth_service: Arc<AuthService>,
    /// File listing/download/delete service
    pub file_service: Arc<FileService>,
    /// Upload pipeline service
    pub upload_service: Arc<UploadService>,
}
