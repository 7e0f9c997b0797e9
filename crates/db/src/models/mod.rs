//! Entity models and DTOs.

pub mod attraction;
pub mod itinerary;
pub mod preference;
pub mod user;
