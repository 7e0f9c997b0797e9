//! Route definitions for the `/users` resource. All routes require auth.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /profile             -> get_profile
/// PUT /profile             -> update_profile
/// PUT /password            -> change_password
/// GET /preferences         -> get_preferences
/// PUT /preferences         -> save_preferences
/// GET /travel-preferences  -> get_travel_preferences
/// PUT /travel-preferences  -> save_travel_preferences
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/password", put(users::change_password))
        .route(
            "/preferences",
            get(users::get_preferences).put(users::save_preferences),
        )
        .route(
            "/travel-preferences",
            get(users::get_travel_preferences).put(users::save_travel_preferences),
        )
}
