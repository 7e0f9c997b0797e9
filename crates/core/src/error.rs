//! Domain error taxonomy shared by every layer.

use crate::types::DbId;

/// Domain-level error type.
///
/// Repositories return raw `sqlx::Error`; services and handlers translate
/// domain failures into one of these variants. The API layer maps them onto
/// HTTP status codes (Validation -> 400, Unauthorized -> 401, Forbidden -> 403,
/// NotFound -> 404, Conflict -> 409, Internal -> 500).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity id does not resolve to a row.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Bad input shape or values; nothing was persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness or state conflict (e.g. email already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The authenticated caller is not the resource owner.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Store or transport failure, wrapped with context.
    #[error("Internal error: {0}")]
    Internal(String),
}
