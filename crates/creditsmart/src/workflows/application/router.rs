use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicationFields, FormField};
use super::service::{ApplicationReviewService, QuoteError};

#[derive(Debug, Deserialize)]
pub struct FieldCheckRequest {
    pub field: FormField,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub tipo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldCheckResponse {
    pub field: FormField,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub producto: String,
    pub monto: String,
    pub plazo: u32,
}

/// Router exposing application review, single-field checks, and installment quotes.
pub fn application_router(service: Arc<ApplicationReviewService>) -> Router {
    Router::new()
        .route("/api/v1/applications", post(submit_handler))
        .route("/api/v1/applications/validate", post(validate_handler))
        .route("/api/v1/quotes", post(quote_handler))
        .with_state(service)
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<ApplicationReviewService>>,
    axum::Json(payload): axum::Json<ApplicationFields>,
) -> Response {
    match service.submit(payload) {
        Ok(acknowledgment) => (StatusCode::ACCEPTED, axum::Json(acknowledgment)).into_response(),
        Err(rejected) => {
            let payload = json!({
                "error": rejected.to_string(),
                "errors": rejected.messages(),
                "touched": rejected.touched,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<ApplicationReviewService>>,
    axum::Json(request): axum::Json<FieldCheckRequest>,
) -> Response {
    let error = service.validate_field(request.field, &request.value, request.tipo.as_deref());
    let body = FieldCheckResponse {
        field: request.field,
        valid: error.is_none(),
        error: error.map(|error| error.to_string()),
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn quote_handler(
    State(service): State<Arc<ApplicationReviewService>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response {
    match service.quote(&request.producto, &request.monto, request.plazo) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => {
            let status = match error {
                QuoteError::UnknownProduct(_) => StatusCode::NOT_FOUND,
                QuoteError::TermOutOfRange { .. } => StatusCode::BAD_REQUEST,
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
