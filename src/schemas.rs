use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use common::{
    ComparisonMetric, DailyFilters, DailyView, DateRange, IntradayView, LatestQuote, ModelScores,
    RawTable, TrendPoint, TrendSeries,
};
use dataset::FrameStore;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Filesystem locations of the dashboard's input files
    pub sources: Arc<DataSources>,
    /// Parsed-frame memoization, keyed by (path, mtime)
    pub store: Arc<FrameStore>,
    /// Cache for assembled views
    pub cache: Cache<String, CachedData>,
}

/// Filesystem locations of the dashboard's input files.
#[derive(Debug, Clone)]
pub struct DataSources {
    /// Directory of per-company intraday prediction CSVs
    pub pred_dir: PathBuf,
    /// Combined daily predictions file
    pub pred_path: PathBuf,
    /// Per-company model metrics file
    pub metrics_path: PathBuf,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Intraday(IntradayView),
    Daily(DailyView),
    Filters(DailyFilters),
}

/// Query parameters for the intraday prediction view
#[derive(Debug, Deserialize, ToSchema)]
pub struct IntradayViewQuery {
    /// Start of the inclusive date filter (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// End of the inclusive date filter (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    /// Which actual/predicted pair the trend chart compares
    #[serde(default)]
    pub comparison: ComparisonMetric,
}

/// Query parameters for the daily prediction view
#[derive(Debug, Deserialize, ToSchema)]
pub struct DailyViewQuery {
    /// Company to display
    pub company: String,
    /// Target OHLC field
    pub target: String,
    /// Prediction model (a single option exists today)
    pub model: Option<String>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Presence of the configured data sources
    pub sources: SourceHealth,
}

/// Presence of each configured data source
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SourceHealth {
    /// Per-company predictions directory
    pub pred_dir: String,
    /// Combined daily predictions file
    pub predictions: String,
    /// Model metrics file
    pub metrics: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::intraday::list_companies,
        crate::handlers::intraday::get_company_view,
        crate::handlers::daily::get_filters,
        crate::handlers::daily::get_view,
    ),
    components(
        schemas(
            ApiResponse<IntradayView>,
            ApiResponse<DailyView>,
            ApiResponse<DailyFilters>,
            ApiResponse<Vec<String>>,
            ErrorResponse,
            HealthResponse,
            SourceHealth,
            IntradayViewQuery,
            DailyViewQuery,
            IntradayView,
            DailyView,
            DailyFilters,
            ComparisonMetric,
            DateRange,
            LatestQuote,
            ModelScores,
            RawTable,
            TrendPoint,
            TrendSeries,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "intraday", description = "Per-company intraday prediction views"),
        (name = "daily", description = "Combined daily prediction and metrics views"),
    ),
    info(
        title = "Stockdash API",
        description = "Stock prediction dashboard API - read-only views over pre-computed prediction and metrics files",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
