//! Registration and login service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use nimbus_auth::jwt::encoder::JwtEncoder;
use nimbus_auth::password::hasher::PasswordHasher;
use nimbus_auth::password::validator::PasswordValidator;
use nimbus_core::error::AppError;
use nimbus_database::repositories::user::UserRepository;
use nimbus_entity::user::{CreateUser, User};

/// Handles account registration and credential login.
#[derive(Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher (Argon2id).
    hasher: Arc<PasswordHasher>,
    /// Password policy validator.
    validator: Arc<PasswordValidator>,
    /// JWT encoder.
    jwt_encoder: Arc<JwtEncoder>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

/// Data supplied at registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address (the login identity).
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        jwt_encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            jwt_encoder,
        }
    }

    /// Registers a new account.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        let username = req.username.trim();
        let email = req.email.trim();

        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        self.validator.validate(&req.password)?;

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username is already taken"));
        }
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Authenticates by email + password and issues a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let (token, expires_at) = self.jwt_encoder.issue_token(user.id, &user.username)?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome {
            token,
            expires_at,
            user,
        })
    }
}
