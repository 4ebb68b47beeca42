use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{DateRange, IntradayView, LatestQuote};
use dataset::columns::{self, ColumnRoleMap};
use dataset::{filter, format, loader, DatasetError};
use polars::prelude::DataFrame;
use tracing::instrument;

use crate::handlers::error_response;
use crate::helpers::converters;
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, IntradayViewQuery};

/// List companies that have a predictions file
#[utoipa::path(
    get,
    path = "/api/v1/intraday/companies",
    tag = "intraday",
    responses(
        (status = 200, description = "Companies discovered in the predictions directory", body = ApiResponse<Vec<String>>),
        (status = 404, description = "Predictions directory missing or empty", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, (StatusCode, Json<ErrorResponse>)> {
    let files = loader::list_company_files(&state.sources.pred_dir).map_err(error_response)?;
    let companies: Vec<String> = files.into_keys().collect();

    let response = ApiResponse {
        data: companies,
        message: "Companies retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the intraday prediction view for one company
#[utoipa::path(
    get,
    path = "/api/v1/intraday/companies/{company}/view",
    tag = "intraday",
    params(
        ("company" = String, Path, description = "Company display name (file stem)"),
    ),
    responses(
        (status = 200, description = "Prediction view retrieved successfully", body = ApiResponse<IntradayView>),
        (status = 400, description = "Reversed date range", body = ErrorResponse),
        (status = 404, description = "Unknown company or empty selection", body = ErrorResponse),
        (status = 422, description = "Mandatory prediction columns missing", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_company_view(
    Path(company): Path<String>,
    Query(query): Query<IntradayViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<IntradayView>>, (StatusCode, Json<ErrorResponse>)> {
    // Create cache key
    let cache_key = format!("intraday_{}_{:?}", company, query);

    // Check cache first
    if let Some(CachedData::Intraday(view)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: view,
            message: "Prediction view retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let view = build_view(&state, &company, &query).map_err(error_response)?;

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Intraday(view.clone()))
        .await;

    let response = ApiResponse {
        data: view,
        message: "Prediction view retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Assemble the intraday view for one company file.
fn build_view(
    state: &AppState,
    company: &str,
    query: &IntradayViewQuery,
) -> dataset::Result<IntradayView> {
    let files = loader::list_company_files(&state.sources.pred_dir)?;
    let path = files.get(company).ok_or_else(|| {
        DatasetError::MissingSource(format!("no predictions file for company '{company}'"))
    })?;
    let loaded = state.store.load(path)?;
    let date_column = loaded.date_column.as_deref();

    let available = match date_column {
        Some(column) => filter::date_bounds(&loaded.frame, column)?
            .map(|(start, end)| DateRange::new(start, end)),
        None => None,
    };

    // An open end of the requested range falls back to the file's own
    // bounds; without a date column the range cannot apply.
    let frame = match (date_column, available) {
        (Some(column), Some(bounds)) if query.start_date.is_some() || query.end_date.is_some() => {
            let start = query.start_date.unwrap_or(bounds.start);
            let end = query.end_date.unwrap_or(bounds.end);
            filter::by_date_range(&loaded.frame, Some(column), start, end)?
        }
        _ => loaded.frame.clone(),
    };

    let roles = ColumnRoleMap::from_frame(&frame);
    roles.require(columns::MANDATORY_PREDICTION_ROLES)?;

    if frame.height() == 0 {
        return Err(DatasetError::EmptySelection);
    }

    let latest_signal = match roles.resolve("buy_sell_label") {
        Some(column) => converters::latest_label(&frame, column)?,
        None => None,
    };

    let latest = LatestQuote {
        high: latest_quote(&frame, &roles, columns::HIGH_SOURCE)?,
        low: latest_quote(&frame, &roles, columns::LOW_SOURCE)?,
        close: latest_quote(&frame, &roles, columns::CLOSE_SOURCE)?,
    };

    let (actual_column, predicted_column) =
        roles
            .comparison_pair(query.comparison)
            .ok_or_else(|| DatasetError::MissingColumn {
                missing: columns::MANDATORY_PREDICTION_ROLES
                    .iter()
                    .map(|role| role.to_string())
                    .collect(),
                available: roles.available(),
            })?;

    let trend = converters::trend_series(
        &frame,
        date_column,
        query.comparison.title(),
        &actual_column,
        &predicted_column,
        &actual_column,
        &predicted_column,
    )?;
    let rows = converters::frame_to_table(&frame)?;

    Ok(IntradayView {
        company: company.to_string(),
        date_column: date_column.map(str::to_string),
        available,
        latest_signal,
        latest,
        trend,
        rows,
    })
}

/// Latest value from the first present column of `chain`, formatted for
/// display.
fn latest_quote(
    frame: &DataFrame,
    roles: &ColumnRoleMap,
    chain: &[&str],
) -> dataset::Result<String> {
    match roles.resolve_first(chain) {
        Some(column) => Ok(format::price(converters::latest_value(frame, column)?)),
        None => Ok(format::NOT_AVAILABLE.to_string()),
    }
}
