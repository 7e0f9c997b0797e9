use std::sync::Arc;

use crate::cache::Cache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: voyago_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Optional Redis cache. `None` when `REDIS_URL` is not configured;
    /// handlers fall back to the database transparently.
    pub cache: Option<Cache>,
}
