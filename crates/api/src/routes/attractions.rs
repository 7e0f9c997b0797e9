//! Route definitions for the `/attractions` catalog (read-only).

use axum::routing::get;
use axum::Router;

use crate::handlers::attractions;
use crate::state::AppState;

/// Routes mounted at `/attractions`.
///
/// ```text
/// GET /                     -> search
/// GET /popular              -> popular
/// GET /{id}                 -> get_by_id
/// GET /category/{category}  -> by_category
/// GET /country/{country}    -> by_country
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attractions::search))
        .route("/popular", get(attractions::popular))
        .route("/{id}", get(attractions::get_by_id))
        .route("/category/{category}", get(attractions::by_category))
        .route("/country/{country}", get(attractions::by_country))
}
