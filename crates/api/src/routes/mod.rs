pub mod attractions;
pub mod auth;
pub mod health;
pub mod itineraries;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
///
/// /users/profile                       get, update (auth required)
/// /users/password                      change password (PUT)
/// /users/preferences                   get, save (GET, PUT)
/// /users/travel-preferences            get, save (GET, PUT)
///
/// /attractions                         search (?name, city, country, category,
///                                      min_rating, sort_by, page, limit)
/// /attractions/popular                 most popular (?limit)
/// /attractions/{id}                    get one
/// /attractions/category/{category}     by category (paginated)
/// /attractions/country/{country}       by country (paginated)
///
/// /itineraries                         list mine, create (auth required)
/// /itineraries/public                  public listing (cached)
/// /itineraries/{id}                    get, update, delete
/// /itineraries/{id}/days               append day (POST)
/// /itineraries/days/{day_id}           update, delete day
/// /itineraries/days/{day_id}/items     append item (POST)
/// /itineraries/items/{item_id}         update, delete item
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/attractions", attractions::router())
        .nest("/itineraries", itineraries::router())
}
