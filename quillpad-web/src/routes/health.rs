/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool": { "active": 0, "idle": 1, "total": 1 }
/// }
/// ```
///
/// Always answers 200; an unreachable database reports `"degraded"`.

use crate::app::AppState;
use axum::{extract::State, Json};
use quillpad_shared::db::pool;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
    pub pool: PoolUsage,
}

/// Connection counts at the time of the check
#[derive(Debug, Serialize, Deserialize)]
pub struct PoolUsage {
    pub active: usize,
    pub idle: usize,
    pub total: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match pool::health_check(state.db.pool()).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            false
        }
    };

    let stats = state.db.stats();

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        pool: PoolUsage {
            active: stats.active_connections,
            idle: stats.idle_connections,
            total: stats.total_connections,
        },
    })
}
