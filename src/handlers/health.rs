use axum::{extract::State, http::StatusCode, response::Json};
use std::path::Path;
use tracing::instrument;

use crate::schemas::{AppState, HealthResponse, SourceHealth};

fn presence(path: &Path) -> String {
    if path.exists() {
        "available".to_string()
    } else {
        "missing".to_string()
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sources: SourceHealth {
            pred_dir: presence(&state.sources.pred_dir),
            predictions: presence(&state.sources.pred_path),
            metrics: presence(&state.sources.metrics_path),
        },
    };

    Ok(Json(response))
}
