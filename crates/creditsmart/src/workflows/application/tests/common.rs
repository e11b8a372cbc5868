use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::catalog::{Catalog, CreditProduct};
use crate::workflows::application::{
    application_router, ApplicationFields, ApplicationForm, ApplicationReviewService, FormField,
};

pub(super) fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::standard())
}

pub(super) fn product(id: &str) -> CreditProduct {
    Catalog::standard()
        .by_id(id)
        .cloned()
        .unwrap_or_else(|| panic!("product {id} present in standard catalog"))
}

/// A payload that passes every rule for "Crédito Vehículo" over 36 months.
pub(super) fn valid_fields() -> ApplicationFields {
    ApplicationFields {
        full_name: "María Fernanda Gómez".to_string(),
        national_id: "1.032.456.789".to_string(),
        email: "maria.gomez@correo.co".to_string(),
        phone: "300 123 4567".to_string(),
        credit_type: "Crédito Vehículo".to_string(),
        amount: "$ 20.000.000".to_string(),
        term: "36".to_string(),
        purpose: "Compra de vehículo familiar usado".to_string(),
        employer: "Transportes Andinos S.A.S.".to_string(),
        job_title: "Coordinadora logística".to_string(),
        monthly_income: "$ 4.500.000".to_string(),
    }
}

pub(super) fn fill(form: &mut ApplicationForm, fields: &ApplicationFields) {
    for field in FormField::ordered() {
        form.change(field, fields.get(field));
    }
}

pub(super) fn review_service() -> Arc<ApplicationReviewService> {
    Arc::new(ApplicationReviewService::new(catalog()))
}

pub(super) fn router() -> axum::Router {
    application_router(review_service())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
