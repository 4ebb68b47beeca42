pub mod daily;
pub mod health;
pub mod intraday;

use axum::http::StatusCode;
use axum::response::Json;
use dataset::DatasetError;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

/// Map dataset errors onto HTTP responses carrying the error taxonomy's
/// codes. Missing sources and empty selections are expected operational
/// conditions, not server faults.
pub fn error_response(err: DatasetError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        DatasetError::MissingSource(_) => (StatusCode::NOT_FOUND, "missing_source"),
        DatasetError::MissingColumn { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "missing_column"),
        DatasetError::EmptySelection => (StatusCode::NOT_FOUND, "empty_selection"),
        DatasetError::InvalidRange { .. } => (StatusCode::BAD_REQUEST, "invalid_range"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    if status.is_server_error() {
        error!("request failed: {}", err);
    } else {
        warn!("request rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}
