//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use voyago_core::error::CoreError;
use voyago_core::user::{normalize_email, validate_email, validate_password};
use voyago_db::models::user::{CreateUser, User, UserResponse};
use voyago_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account and return a token for it immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let username = input.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }

    let email = normalize_email(&input.email);
    validate_email(&email).map_err(CoreError::Validation)?;
    validate_password(&input.password).map_err(CoreError::Validation)?;

    // Check-then-insert; the unique constraints remain the backstop under
    // concurrent registration, surfacing as 409 via the sqlx classifier.
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }
    if UserRepo::find_by_username(&state.pool, &username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    let response = auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns a fresh token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !user.is_active() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");
    let response = auth_response(&state, &user)?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a token for the user and build the response envelope.
fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = generate_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.token_expiry_hours * 3600;

    Ok(AuthResponse {
        token,
        expires_in,
        user: user.to_response(),
    })
}
