use std::collections::BTreeMap;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use curio_db::repositories::MatchJobRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Match jobs per status; empty when the database is unreachable.
    pub match_jobs: BTreeMap<&'static str, i64>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let match_jobs = match MatchJobRepo::count_by_status(&state.pool).await {
        Ok(counts) => Some(
            counts
                .into_iter()
                .map(|(status, count)| (status.as_str(), count))
                .collect(),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };

    Json(HealthResponse {
        status: if match_jobs.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy: match_jobs.is_some(),
        match_jobs: match_jobs.unwrap_or_default(),
    })
}

/// Mounted at the root, outside `/api/v1` and without auth.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
