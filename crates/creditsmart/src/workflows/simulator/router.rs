use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::filter::{filter_credits, AmountRange, CreditFilter};
use crate::catalog::{Catalog, CreditCardView};

/// Query string accepted by the catalog search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CreditSearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub producto: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RangeChipView {
    pub token: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct CreditSearchResponse {
    pub filter: CreditFilter,
    pub has_active_filters: bool,
    pub ranges: Vec<RangeChipView>,
    pub results: Vec<CreditCardView>,
}

/// Router exposing catalog search and product lookup.
pub fn simulator_router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/v1/credits", get(search_handler))
        .route("/api/v1/credits/:product_id", get(product_handler))
        .with_state(catalog)
}

pub(crate) async fn search_handler(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<CreditSearchParams>,
) -> Response {
    let range = match params.range.as_deref().map(str::parse::<AmountRange>) {
        None => AmountRange::All,
        Some(Ok(range)) => range,
        Some(Err(error)) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let filter = CreditFilter {
        query: params.q.unwrap_or_default(),
        range,
        preselected_id: params
            .producto
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty()),
    };

    let results = filter_credits(&catalog, &filter)
        .into_iter()
        .map(CreditCardView::from)
        .collect();
    let ranges = AmountRange::ordered()
        .into_iter()
        .map(|chip| RangeChipView {
            token: chip.token(),
            label: chip.label(),
            active: chip == filter.range,
        })
        .collect();

    let body = CreditSearchResponse {
        has_active_filters: !filter.query.is_empty() || filter.range != AmountRange::All,
        filter,
        ranges,
        results,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn product_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(product_id): Path<String>,
) -> Response {
    match catalog.by_id(&product_id) {
        Some(product) => {
            (StatusCode::OK, axum::Json(CreditCardView::from(product))).into_response()
        }
        None => {
            let payload = json!({ "error": format!("unknown credit product '{product_id}'") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let router = simulator_router(Arc::new(Catalog::standard()));
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let payload = serde_json::from_slice(&bytes).expect("json body");
        (status, payload)
    }

    fn result_ids(payload: &Value) -> Vec<String> {
        payload["results"]
            .as_array()
            .expect("results array")
            .iter()
            .filter_map(|card| card["id"].as_str().map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn search_without_params_lists_catalog() {
        let (status, payload) = get_json("/api/v1/credits").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result_ids(&payload).len(), 6);
        assert_eq!(payload["has_active_filters"], Value::Bool(false));
        assert_eq!(payload["ranges"][0]["active"], Value::Bool(true));
    }

    #[tokio::test]
    async fn search_applies_query_and_range() {
        let (status, payload) =
            get_json("/api/v1/credits?q=cr%C3%A9dito&range=50000000-999999999").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            result_ids(&payload),
            ["libre", "vehiculo", "vivienda", "empresarial"]
        );
        assert_eq!(payload["ranges"][4]["active"], Value::Bool(true));
    }

    #[tokio::test]
    async fn unknown_range_is_a_bad_request() {
        let (status, payload) = get_json("/api/v1/credits?range=1-2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("1-2"));
    }

    #[tokio::test]
    async fn product_lookup_by_id() {
        let (status, payload) = get_json("/api/v1/credits/educativo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["name"], Value::from("Crédito Educativo"));

        let (status, _) = get_json("/api/v1/credits/hipoteca").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
