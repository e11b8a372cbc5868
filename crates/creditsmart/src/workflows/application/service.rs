use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::domain::{ApplicationFields, FormField};
use super::form::{ApplicationForm, FormEffect, SubmittedApplication};
use super::validation::{validate_field, FieldError, ValidationContext};
use crate::amortization::quote;
use crate::catalog::Catalog;
use crate::money::{format_money, format_rate, parse_money_string};

pub const ACKNOWLEDGMENT_MESSAGE: &str =
    "Gracias por confiar en CreditSmart. En breve te contactaremos para continuar el proceso.";

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_reference() -> String {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("CS-{id:06}")
}

/// Confirmation returned once an application passes validation. Nothing is stored.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationAcknowledgment {
    pub reference: String,
    pub received_at: DateTime<Utc>,
    pub message: &'static str,
    pub application: SubmittedApplication,
}

/// Submission that failed bulk validation; every field counts as touched afterwards.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("application has {} invalid field(s)", .errors.len())]
pub struct ApplicationRejected {
    pub errors: BTreeMap<FormField, FieldError>,
    pub touched: Vec<FormField>,
}

impl ApplicationRejected {
    /// Field key to message, as rendered under each input.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.errors
            .iter()
            .map(|(field, error)| (field.key(), error.to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("unknown credit product '{0}'")]
    UnknownProduct(String),
    #[error("term must be between 1 and {max} months for this product (got {term})")]
    TermOutOfRange { term: u32, max: u32 },
}

/// Installment estimate for a product, amount and term.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteView {
    pub product_id: String,
    pub product_name: String,
    pub rate_label: String,
    pub principal: u64,
    pub term_months: u32,
    pub monthly_payment: u64,
    pub monthly_payment_label: String,
    pub total_paid: u64,
    pub total_interest: u64,
    pub within_bounds: bool,
}

/// Stateless façade over the form controller for callers that hold a complete payload.
pub struct ApplicationReviewService {
    catalog: Arc<Catalog>,
}

impl ApplicationReviewService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replay a payload through a fresh form and submit it.
    pub fn submit(
        &self,
        payload: ApplicationFields,
    ) -> Result<ApplicationAcknowledgment, ApplicationRejected> {
        let mut form = ApplicationForm::new(self.catalog.clone());
        for field in FormField::ordered() {
            form.change(field, payload.get(field));
        }

        match form.submit() {
            FormEffect::Submitted(application) => {
                let reference = next_reference();
                info!(%reference, product = %application.product_id, "application acknowledged");
                Ok(ApplicationAcknowledgment {
                    reference,
                    received_at: Utc::now(),
                    message: ACKNOWLEDGMENT_MESSAGE,
                    application,
                })
            }
            _ => Err(ApplicationRejected {
                errors: form.errors().clone(),
                touched: form.touched_fields().collect(),
            }),
        }
    }

    /// Check a single input the way the form does on blur. `credit_type` is the selected product
    /// (id or name); empty means the first catalog entry.
    pub fn validate_field(
        &self,
        field: FormField,
        value: &str,
        credit_type: Option<&str>,
    ) -> Option<FieldError> {
        let product = match credit_type.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => self.catalog.resolve(key),
            None => Some(self.catalog.default_product()),
        };
        validate_field(field, value, &ValidationContext::for_product(product))
    }

    pub fn quote(
        &self,
        product_key: &str,
        amount: &str,
        term_months: u32,
    ) -> Result<QuoteView, QuoteError> {
        let product = self
            .catalog
            .resolve(product_key)
            .ok_or_else(|| QuoteError::UnknownProduct(product_key.to_string()))?;

        if term_months == 0 || term_months > product.term_max {
            return Err(QuoteError::TermOutOfRange {
                term: term_months,
                max: product.term_max,
            });
        }

        let principal = parse_money_string(amount);
        let estimate = quote(principal, product.rate, term_months);

        Ok(QuoteView {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            rate_label: format_rate(product.rate),
            principal,
            term_months,
            monthly_payment: estimate.monthly_payment,
            monthly_payment_label: format_money(estimate.monthly_payment),
            total_paid: estimate.total_paid,
            total_interest: estimate.total_interest,
            within_bounds: product.accepts_amount(principal),
        })
    }
}
