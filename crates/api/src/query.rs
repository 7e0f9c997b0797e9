//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?page=&limit=`).
///
/// Used by any handler that supports paginated listing. Values are clamped
/// via `voyago_core::pagination` before they reach the database.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
