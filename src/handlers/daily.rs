use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::{DailyFilters, DailyView, ModelScores};
use dataset::columns::{self, ColumnRoleMap};
use dataset::{filter, format, DatasetError};
use polars::prelude::DataFrame;
use tracing::{instrument, warn};

use crate::handlers::error_response;
use crate::helpers::converters;
use crate::schemas::{ApiResponse, AppState, CachedData, DailyViewQuery, ErrorResponse};

/// Prediction models the dashboard can attribute its data to. The
/// source files carry results of a single model today.
pub const MODEL_OPTIONS: &[&str] = &["RandomForest_v1"];

/// Get the selector options for the daily dashboard
#[utoipa::path(
    get,
    path = "/api/v1/daily/filters",
    tag = "daily",
    responses(
        (status = 200, description = "Filter options retrieved successfully", body = ApiResponse<DailyFilters>),
        (status = 404, description = "Predictions file missing or empty", body = ErrorResponse),
        (status = 422, description = "Predictions file lacks required columns", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_filters(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DailyFilters>>, (StatusCode, Json<ErrorResponse>)> {
    let cache_key = "daily_filters".to_string();

    if let Some(CachedData::Filters(filters)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: filters,
            message: "Filter options retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let filters = build_filters(&state).map_err(error_response)?;

    state
        .cache
        .insert(cache_key, CachedData::Filters(filters.clone()))
        .await;

    let response = ApiResponse {
        data: filters,
        message: "Filter options retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

fn build_filters(state: &AppState) -> dataset::Result<DailyFilters> {
    let loaded = state.store.load(&state.sources.pred_path)?;
    if loaded.frame.height() == 0 {
        return Err(DatasetError::MissingSource(format!(
            "predictions file {} is empty",
            state.sources.pred_path.display()
        )));
    }

    let roles = ColumnRoleMap::from_frame(&loaded.frame);
    let resolved = roles.require(columns::DAILY_PREDICTION_ROLES)?;
    let (company_column, target_column) = (&resolved[0], &resolved[1]);

    Ok(DailyFilters {
        companies: filter::distinct_values(&loaded.frame, company_column)?,
        targets: filter::distinct_values(&loaded.frame, target_column)?,
        models: MODEL_OPTIONS.iter().map(|model| model.to_string()).collect(),
    })
}

/// Get the daily prediction view for one (company, target) selection
#[utoipa::path(
    get,
    path = "/api/v1/daily/view",
    tag = "daily",
    responses(
        (status = 200, description = "Daily view retrieved successfully", body = ApiResponse<DailyView>),
        (status = 404, description = "Missing source or empty selection", body = ErrorResponse),
        (status = 422, description = "Required columns missing", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_view(
    Query(query): Query<DailyViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DailyView>>, (StatusCode, Json<ErrorResponse>)> {
    // Create cache key
    let cache_key = format!("daily_{:?}", query);

    // Check cache first
    if let Some(CachedData::Daily(view)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: view,
            message: "Daily view retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let view = build_view(&state, &query).map_err(error_response)?;

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Daily(view.clone()))
        .await;

    let message = if view.scores.is_some() {
        "Daily view retrieved successfully".to_string()
    } else {
        "Daily view retrieved; no metrics found for this company".to_string()
    };
    let response = ApiResponse {
        data: view,
        message,
        success: true,
    };
    Ok(Json(response))
}

/// Assemble the daily view: filtered prediction trend plus the
/// company's accuracy scores.
fn build_view(state: &AppState, query: &DailyViewQuery) -> dataset::Result<DailyView> {
    let predictions = state.store.load(&state.sources.pred_path)?;
    if predictions.frame.height() == 0 {
        return Err(DatasetError::MissingSource(format!(
            "predictions file {} is empty",
            state.sources.pred_path.display()
        )));
    }

    let roles = ColumnRoleMap::from_frame(&predictions.frame);
    let resolved = roles.require(columns::DAILY_PREDICTION_ROLES)?;
    let (company_column, target_column, y_true_column, y_pred_column) =
        (&resolved[0], &resolved[1], &resolved[2], &resolved[3]);

    let selection = filter::by_values(
        &predictions.frame,
        &[
            (company_column, &query.company),
            (target_column, &query.target),
        ],
    )?;
    if selection.height() == 0 {
        return Err(DatasetError::EmptySelection);
    }

    let trend = converters::trend_series(
        &selection,
        predictions.date_column.as_deref(),
        &format!("{} – {}", query.company, query.target.to_uppercase()),
        y_true_column,
        y_pred_column,
        "Actual",
        "Predicted",
    )?;
    let rows = converters::frame_to_table(&selection)?;

    let (scores, metrics_row) = company_scores(state, &query.company, &query.target)?;

    let model = query
        .model
        .clone()
        .unwrap_or_else(|| MODEL_OPTIONS[0].to_string());

    Ok(DailyView {
        company: query.company.clone(),
        target: query.target.clone(),
        model,
        trend,
        scores,
        rows,
        metrics_row,
    })
}

/// Accuracy scores for `company`, read from the metrics file. A company
/// without a metrics row yields `None` rather than an error.
fn company_scores(
    state: &AppState,
    company: &str,
    target: &str,
) -> dataset::Result<(Option<ModelScores>, Option<common::RawTable>)> {
    let metrics = state.store.load(&state.sources.metrics_path)?;
    if metrics.frame.height() == 0 {
        return Err(DatasetError::MissingSource(format!(
            "metrics file {} is empty",
            state.sources.metrics_path.display()
        )));
    }

    let roles = ColumnRoleMap::from_frame(&metrics.frame);
    let resolved = roles.require(columns::METRICS_ROLES)?;
    let company_column = &resolved[0];

    let row = filter::by_value(&metrics.frame, company_column, company)?;
    if row.height() == 0 {
        warn!("no metrics row for company '{}'", company);
        return Ok((None, None));
    }
    // At most one row per company is expected; the first wins if the
    // file carries duplicates.
    let row = row.head(Some(1));

    let scores = score_board(&row, target)?;
    let table = converters::frame_to_table(&row)?;
    Ok((Some(scores), Some(table)))
}

/// Score columns follow the fixed `<target>_<METRIC>` pattern of the
/// metrics file; a missing column is a representable "N/A", not an
/// error.
fn score_board(row: &DataFrame, target: &str) -> dataset::Result<ModelScores> {
    let score_value = |suffix: &str| -> dataset::Result<Option<f64>> {
        let column = format!("{target}_{suffix}");
        let present = row
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == column);
        if present {
            converters::latest_value(row, &column)
        } else {
            Ok(None)
        }
    };

    Ok(ModelScores {
        rmse: format::score(score_value("RMSE")?),
        mae: format::score(score_value("MAE")?),
        mape: format::percent(score_value("MAPE")?),
        r2: format::score(score_value("R2")?),
    })
}
