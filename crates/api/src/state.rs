use std::sync::Arc;

use curio_matching::{MatchingService, PgMatchStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything non-trivial sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: curio_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Matching orchestrator over the same pool.
    pub matching: Arc<MatchingService<PgMatchStore>>,
}

impl AppState {
    pub fn new(pool: curio_db::DbPool, config: ServerConfig) -> Self {
        let matching = MatchingService::new(PgMatchStore::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            matching: Arc::new(matching),
        }
    }
}
