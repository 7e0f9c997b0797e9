//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attraction_repo;
pub mod itinerary_repo;
pub mod user_repo;

pub use attraction_repo::AttractionRepo;
pub use itinerary_repo::ItineraryRepo;
pub use user_repo::UserRepo;
