//! User preference models (general settings and travel preferences).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voyago_core::types::{DbId, Timestamp};

/// General account preferences from the `user_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub language: String,
    pub currency: String,
    pub notification_enabled: bool,
    pub theme: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for saving general preferences (insert-or-update keyed on user).
#[derive(Debug, Clone, Deserialize)]
pub struct SaveUserPreference {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default = "default_notifications")]
    pub notification_enabled: bool,
    #[serde(default)]
    pub theme: String,
}

fn default_notifications() -> bool {
    true
}

/// Travel-style preferences from the `user_travel_preferences` table.
///
/// Tag lists are stored as JSONB arrays of strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TravelPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub travel_style: String,
    pub budget_level: String,
    pub transport_prefer: String,
    pub preferred_tags: sqlx::types::Json<Vec<String>>,
    pub excluded_tags: sqlx::types::Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for saving travel preferences (insert-or-update keyed on user).
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTravelPreference {
    #[serde(default)]
    pub travel_style: String,
    #[serde(default)]
    pub budget_level: String,
    #[serde(default)]
    pub transport_prefer: String,
    #[serde(default)]
    pub preferred_tags: Vec<String>,
    #[serde(default)]
    pub excluded_tags: Vec<String>,
}
