//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' response payloads so the
//! frontend can deserialize API responses without duplicating shapes.

mod range;
mod views;

pub use range::DateRange;
pub use views::{
    ComparisonMetric, DailyFilters, DailyView, IntradayView, LatestQuote, ModelScores, RawTable,
    TrendPoint, TrendSeries,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in stockdash/src/schemas.rs with the
/// same field names. We mirror it here for the frontend to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
