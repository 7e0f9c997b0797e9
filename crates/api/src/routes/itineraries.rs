//! Route definitions for the `/itineraries` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::itineraries;
use crate::state::AppState;

/// Routes mounted at `/itineraries`.
///
/// Days and items are addressed by their own ids once created, so their
/// mutation routes sit under `/days/{day_id}` and `/items/{item_id}` rather
/// than nesting the full hierarchy in the path.
///
/// ```text
/// GET    /                      -> list_mine
/// POST   /                      -> create
/// GET    /public                -> list_public (cached)
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/days             -> add_day
/// PUT    /days/{day_id}         -> update_day
/// DELETE /days/{day_id}         -> delete_day
/// POST   /days/{day_id}/items   -> add_item
/// PUT    /items/{item_id}       -> update_item
/// DELETE /items/{item_id}       -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(itineraries::list_mine).post(itineraries::create))
        .route("/public", get(itineraries::list_public))
        .route(
            "/{id}",
            get(itineraries::get_by_id)
                .put(itineraries::update)
                .delete(itineraries::delete),
        )
        .route("/{id}/days", post(itineraries::add_day))
        .route(
            "/days/{day_id}",
            put(itineraries::update_day).delete(itineraries::delete_day),
        )
        .route("/days/{day_id}/items", post(itineraries::add_item))
        .route(
            "/items/{item_id}",
            put(itineraries::update_item).delete(itineraries::delete_item),
        )
}
