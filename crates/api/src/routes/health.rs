use axum::extract::State;
use axum::{routing::get, Json, Router};
use rugcat_db::repositories::RugRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Rugs currently listed in the catalog; absent when the database is down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sellable_rugs: Option<i64>,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let sellable_rugs = match RugRepo::count_sellable(&state.pool).await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = sellable_rugs.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        sellable_rugs,
    })
}

/// Root-level routes outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
