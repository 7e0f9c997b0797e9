//! Repository for the `users`, `user_preferences`, and
//! `user_travel_preferences` tables.

use sqlx::PgPool;
use voyago_core::types::DbId;

use crate::models::preference::{
    SaveTravelPreference, SaveUserPreference, TravelPreference, UserPreference,
};
use crate::models::user::{CreateUser, UpdateUserProfile, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
    phone, avatar, is_active, created_at, updated_at";

/// Column list for `user_preferences` queries.
const PREF_COLUMNS: &str = "id, user_id, language, currency, notification_enabled, \
    theme, created_at, updated_at";

/// Column list for `user_travel_preferences` queries.
const TRAVEL_COLUMNS: &str = "id, user_id, travel_style, budget_level, transport_prefer, \
    preferred_tags, excluded_tags, created_at, updated_at";

/// Provides CRUD operations for user accounts and their preference records.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                (username, email, password_hash, first_name, last_name, phone, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite profile fields and refresh `updated_at`.
    ///
    /// Returns `false` if no row with the given id exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET \
                username = $2, email = $3, first_name = $4, last_name = $5, \
                phone = $6, avatar = $7, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(&input.avatar)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored password hash.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user row. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // General preferences
    // -----------------------------------------------------------------------

    /// Fetch a user's general preferences, if any were saved.
    pub async fn find_preferences(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserPreference>, sqlx::Error> {
        let query = format!("SELECT {PREF_COLUMNS} FROM user_preferences WHERE user_id = $1");
        sqlx::query_as::<_, UserPreference>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a user's general preferences, returning the stored row.
    pub async fn save_preferences(
        pool: &PgPool,
        user_id: DbId,
        input: &SaveUserPreference,
    ) -> Result<UserPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences \
                (user_id, language, currency, notification_enabled, theme) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id) DO UPDATE SET \
                language = EXCLUDED.language, \
                currency = EXCLUDED.currency, \
                notification_enabled = EXCLUDED.notification_enabled, \
                theme = EXCLUDED.theme, \
                updated_at = NOW() \
             RETURNING {PREF_COLUMNS}"
        );
        sqlx::query_as::<_, UserPreference>(&query)
            .bind(user_id)
            .bind(&input.language)
            .bind(&input.currency)
            .bind(input.notification_enabled)
            .bind(&input.theme)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Travel preferences
    // -----------------------------------------------------------------------

    /// Fetch a user's travel preferences, if any were saved.
    pub async fn find_travel_preferences(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<TravelPreference>, sqlx::Error> {
        let query =
            format!("SELECT {TRAVEL_COLUMNS} FROM user_travel_preferences WHERE user_id = $1");
        sqlx::query_as::<_, TravelPreference>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a user's travel preferences, returning the stored row.
    pub async fn save_travel_preferences(
        pool: &PgPool,
        user_id: DbId,
        input: &SaveTravelPreference,
    ) -> Result<TravelPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_travel_preferences \
                (user_id, travel_style, budget_level, transport_prefer, \
                 preferred_tags, excluded_tags) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id) DO UPDATE SET \
                travel_style = EXCLUDED.travel_style, \
                budget_level = EXCLUDED.budget_level, \
                transport_prefer = EXCLUDED.transport_prefer, \
                preferred_tags = EXCLUDED.preferred_tags, \
                excluded_tags = EXCLUDED.excluded_tags, \
                updated_at = NOW() \
             RETURNING {TRAVEL_COLUMNS}"
        );
        sqlx::query_as::<_, TravelPreference>(&query)
            .bind(user_id)
            .bind(&input.travel_style)
            .bind(&input.budget_level)
            .bind(&input.transport_prefer)
            .bind(sqlx::types::Json(&input.preferred_tags))
            .bind(sqlx::types::Json(&input.excluded_tags))
            .fetch_one(pool)
            .await
    }
}
