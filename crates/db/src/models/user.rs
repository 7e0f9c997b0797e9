//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voyago_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    /// NULL in legacy rows; decoded to `true` at the read boundary.
    pub is_active: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Whether the account is active. A missing flag defaults to active.
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    /// Project into the safe external representation.
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar: self.avatar.clone().unwrap_or_default(),
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub avatar: String,
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// DTO for updating profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserProfile {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}
