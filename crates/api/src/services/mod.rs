//! Domain orchestration on top of the repository layer.

pub mod itinerary;
