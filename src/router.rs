use crate::handlers::{
    daily::{get_filters, get_view},
    health::health_check,
    intraday::{get_company_view, list_companies},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Intraday dashboard (one CSV per company)
        .route("/api/v1/intraday/companies", get(list_companies))
        .route(
            "/api/v1/intraday/companies/:company/view",
            get(get_company_view),
        )
        // Daily dashboard (combined predictions + metrics files)
        .route("/api/v1/daily/filters", get(get_filters))
        .route("/api/v1/daily/view", get(get_view))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
