//! HTTP request handlers, grouped by resource.

pub mod attractions;
pub mod auth;
pub mod itineraries;
pub mod users;
