//! Domain layer for the travel-planning backend.
//!
//! This crate has no internal dependencies so it can be used by both the
//! repository layer and the API layer. It holds the error taxonomy, shared
//! type aliases, pagination clamps, and pure per-domain validation logic.

pub mod attraction;
pub mod error;
pub mod itinerary;
pub mod pagination;
pub mod timefmt;
pub mod types;
pub mod user;
