use std::sync::Arc;

use crate::config::ServerConfig;
use crate::evidence::PhotoStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). Both the database pool and the photo store are injected here
/// rather than reached through globals.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vistoria_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Evidence photo storage rooted at the configured upload directory.
    pub photos: Arc<PhotoStore>,
}
