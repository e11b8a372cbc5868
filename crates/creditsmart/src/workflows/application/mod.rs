//! Credit application intake: field validation, the form controller with its estimated
//! installment, and the review service exposed over HTTP.

pub mod domain;
pub mod form;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationFields, FormField, FormFieldParseError, TermOption};
pub use form::{ApplicationForm, FormCommand, FormEffect, FormState, SubmittedApplication};
pub use router::application_router;
pub use service::{
    ApplicationAcknowledgment, ApplicationRejected, ApplicationReviewService, QuoteError,
    QuoteView,
};
pub use validation::{validate_all, validate_field, FieldError, ValidationContext};
