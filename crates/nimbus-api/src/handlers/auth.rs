//! Auth handlers — register and login.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use nimbus_core::error::AppError;
use nimbus_service::auth::service::RegisterRequest as SvcRegister;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::dto::response::{LoginResponse, MessageResponse};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .auth_service
        .register(SvcRegister {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(MessageResponse::new("Registration successful")))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
    }))
}
