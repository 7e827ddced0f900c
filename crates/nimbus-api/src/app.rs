//! Application builder — wires repositories, services, and the router
//! into a running server.

use std::sync::Arc;

use sqlx::PgPool;

use nimbus_auth::jwt::decoder::JwtDecoder;
use nimbus_auth::jwt::encoder::JwtEncoder;
use nimbus_auth::password::hasher::PasswordHasher;
use nimbus_auth::password::validator::PasswordValidator;
use nimbus_core::config::AppConfig;
use nimbus_core::error::AppError;
use nimbus_database::repositories::file::FileRepository;
use nimbus_database::repositories::user::UserRepository;
use nimbus_service::auth::service::AuthService;
use nimbus_service::file::service::FileService;
use nimbus_service::file::upload::UploadService;
use nimbus_storage::staging::StagingArea;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared application state from configuration and a
/// connected database pool.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    // ── Storage ──────────────────────────────────────────────
    let store = nimbus_storage::build_object_store(&config.storage).await?;
    let staging = StagingArea::new(&config.storage.staging_dir).await?;

    // ── Repositories ─────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let file_repo = Arc::new(FileRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));

    // ── Services ─────────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        password_validator,
        Arc::clone(&jwt_encoder),
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&store),
    ));
    let upload_service = Arc::new(UploadService::new(
        Arc::clone(&file_repo),
        Arc::clone(&store),
        staging,
        config.storage.max_upload_size_bytes,
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        store,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        user_repo,
        file_repo,
        auth_service,
        file_service,
        upload_service,
    })
}

/// Runs the Nimbus server with the given configuration and database
/// pool. Blocks until ctrl-c.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Nimbus server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
