//! Handlers for the `/users` resource (profile, password, preferences).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use voyago_core::error::CoreError;
use voyago_core::user::{normalize_email, validate_email, validate_password};
use voyago_db::models::preference::{
    SaveTravelPreference, SaveUserPreference, TravelPreference, UserPreference,
};
use voyago_db::models::user::{UpdateUserProfile, UserResponse};
use voyago_db::repositories::UserRepo;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// GET /api/v1/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })
        })?;
    Ok(Json(DataResponse {
        data: user.to_response(),
    }))
}

/// PUT /api/v1/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<UpdateUserProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.username = input.username.trim().to_string();
    if input.username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }
    input.email = normalize_email(&input.email);
    validate_email(&input.email).map_err(CoreError::Validation)?;

    if !UserRepo::update_profile(&state.pool, auth.user_id, &input).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }));
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })
        })?;
    Ok(Json(DataResponse {
        data: user.to_response(),
    }))
}

/// PUT /api/v1/users/password
///
/// Verify the current password before storing a new hash. Returns 204.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password(&input.new_password).map_err(CoreError::Validation)?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })
        })?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, auth.user_id, &new_hash).await?;

    tracing::info!(user_id = auth.user_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// GET /api/v1/users/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserPreference>>> {
    let prefs = UserRepo::find_preferences(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Preferences",
                id: auth.user_id,
            })
        })?;
    Ok(Json(DataResponse { data: prefs }))
}

/// PUT /api/v1/users/preferences
///
/// Insert-or-update keyed on the user; there is at most one row per user.
pub async fn save_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SaveUserPreference>,
) -> AppResult<Json<DataResponse<UserPreference>>> {
    let saved = UserRepo::save_preferences(&state.pool, auth.user_id, &input).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// GET /api/v1/users/travel-preferences
pub async fn get_travel_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<TravelPreference>>> {
    let prefs = UserRepo::find_travel_preferences(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Travel preferences",
                id: auth.user_id,
            })
        })?;
    Ok(Json(DataResponse { data: prefs }))
}

/// PUT /api/v1/users/travel-preferences
pub async fn save_travel_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SaveTravelPreference>,
) -> AppResult<Json<DataResponse<TravelPreference>>> {
    let saved = UserRepo::save_travel_preferences(&state.pool, auth.user_id, &input).await?;
    Ok(Json(DataResponse { data: saved }))
}
