use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use creditsmart::catalog::Catalog;
use creditsmart::workflows::application::{application_router, ApplicationReviewService};
use creditsmart::workflows::simulator::simulator_router;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Catalog search, application review and the operational endpoints on one router. Expects an
/// `Extension<AppState>` layer.
pub(crate) fn site_routes(catalog: Arc<Catalog>) -> axum::Router {
    let review = Arc::new(ApplicationReviewService::new(catalog.clone()));

    simulator_router(catalog)
        .merge(application_router(review))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
