/// Health check endpoint
///
/// The only route outside the pre-shared key gate. Reports whether the
/// database answers a probe, plus connection pool occupancy for dashboards.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool_size": 3,
///   "pool_idle": 2
/// }
/// ```
use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tasknest_shared::db;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` when the database probe succeeds, `degraded` otherwise
    pub status: String,

    /// Application version
    pub version: String,

    /// Database probe outcome: `connected` or `disconnected`
    pub database: String,

    /// Open connections in the pool
    pub pool_size: u32,

    /// Idle connections in the pool
    pub pool_idle: usize,
}

/// Health check handler
///
/// Never fails: a broken database turns into a `degraded` report, not an
/// error response, so monitors can always read the body.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = db::pool::health_check(&state.db).await.is_ok();

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected {
            "connected"
        } else {
            "disconnected"
        }
        .to_string(),
        pool_size: state.db.size(),
        pool_idle: state.db.num_idle(),
    })
}
