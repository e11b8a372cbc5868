use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::domain::{ApplicationFields, FormField, TermOption};
use crate::catalog::CreditProduct;
use crate::money::{format_money, parse_money_string};

pub const MIN_NAME_CHARS: usize = 3;
pub const MIN_PURPOSE_CHARS: usize = 10;
pub const NATIONAL_ID_DIGITS: (usize, usize) = (6, 10);
pub const PHONE_DIGITS: (usize, usize) = (7, 10);
pub const MIN_MONTHLY_INCOME: u64 = 1_000_000;

fn peso(amount: &u64) -> String {
    format_money(*amount)
}

/// User-facing problem with a single input. `Display` renders the message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("El nombre es requerido")]
    NameRequired,
    #[error("El nombre debe tener al menos 3 caracteres")]
    NameTooShort,
    #[error("La cédula es requerida")]
    NationalIdRequired,
    #[error("La cédula debe tener entre 6 y 10 dígitos")]
    NationalIdLength,
    #[error("El email es requerido")]
    EmailRequired,
    #[error("Email inválido")]
    EmailInvalid,
    #[error("El teléfono es requerido")]
    PhoneRequired,
    #[error("El teléfono debe tener entre 7 y 10 dígitos")]
    PhoneLength,
    #[error("El tipo de crédito seleccionado no está disponible")]
    UnknownProduct,
    #[error("El monto es requerido")]
    AmountRequired,
    #[error("El monto debe ser mayor a cero")]
    AmountNotPositive,
    #[error("El monto mínimo es {}", peso(.min))]
    AmountBelowMinimum { min: u64 },
    #[error("El monto máximo es {}", peso(.max))]
    AmountAboveMaximum { max: u64 },
    #[error("El plazo debe ser de 12, 24, 36, 48 o 60 meses")]
    UnsupportedTerm,
    #[error("El destino del crédito es requerido")]
    PurposeRequired,
    #[error("Describe el uso del crédito (mínimo 10 caracteres)")]
    PurposeTooShort,
    #[error("El nombre de la empresa es requerido")]
    EmployerRequired,
    #[error("El cargo es requerido")]
    JobTitleRequired,
    #[error("Los ingresos son requeridos")]
    IncomeRequired,
    #[error("Los ingresos deben ser al menos {}", peso(.min))]
    IncomeBelowMinimum { min: u64 },
}

/// What a field is checked against besides its own value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    /// Product currently selected on the form; `None` when the selection does not resolve.
    pub product: Option<&'a CreditProduct>,
}

impl<'a> ValidationContext<'a> {
    pub fn for_product(product: Option<&'a CreditProduct>) -> Self {
        Self { product }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

fn check_digits(
    value: &str,
    (min, max): (usize, usize),
    missing: FieldError,
    out_of_range: FieldError,
) -> Option<FieldError> {
    match digit_count(value) {
        0 => Some(missing),
        count if count < min || count > max => Some(out_of_range),
        _ => None,
    }
}

fn check_text(
    value: &str,
    min_chars: usize,
    missing: FieldError,
    too_short: FieldError,
) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(missing)
    } else if trimmed.chars().count() < min_chars {
        Some(too_short)
    } else {
        None
    }
}

fn check_amount(value: &str, product: Option<&CreditProduct>) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::AmountRequired);
    }

    let amount = parse_money_string(value);
    match product {
        Some(product) if amount < product.min => {
            Some(FieldError::AmountBelowMinimum { min: product.min })
        }
        Some(product) if amount > product.max => {
            Some(FieldError::AmountAboveMaximum { max: product.max })
        }
        Some(_) => None,
        None if amount == 0 => Some(FieldError::AmountNotPositive),
        None => None,
    }
}

/// Check one raw input. Every rule is independent of the other fields except the amount, which
/// is bounded by the selected product.
///
/// The product and term selectors only offer valid choices, so `UnknownProduct` and
/// `UnsupportedTerm` can never fire for values picked on the form. They exist for payloads that
/// arrive whole from outside, such as the review endpoint.
pub fn validate_field(
    field: FormField,
    value: &str,
    context: &ValidationContext<'_>,
) -> Option<FieldError> {
    match field {
        FormField::FullName => check_text(
            value,
            MIN_NAME_CHARS,
            FieldError::NameRequired,
            FieldError::NameTooShort,
        ),
        FormField::NationalId => check_digits(
            value,
            NATIONAL_ID_DIGITS,
            FieldError::NationalIdRequired,
            FieldError::NationalIdLength,
        ),
        FormField::Email => {
            if value.trim().is_empty() {
                Some(FieldError::EmailRequired)
            } else if !email_pattern().is_match(value) {
                Some(FieldError::EmailInvalid)
            } else {
                None
            }
        }
        FormField::Phone => check_digits(
            value,
            PHONE_DIGITS,
            FieldError::PhoneRequired,
            FieldError::PhoneLength,
        ),
        FormField::CreditType => context
            .product
            .is_none()
            .then_some(FieldError::UnknownProduct),
        FormField::Amount => check_amount(value, context.product),
        FormField::Term => TermOption::parse(value)
            .is_none()
            .then_some(FieldError::UnsupportedTerm),
        FormField::Purpose => check_text(
            value,
            MIN_PURPOSE_CHARS,
            FieldError::PurposeRequired,
            FieldError::PurposeTooShort,
        ),
        FormField::Employer => value
            .trim()
            .is_empty()
            .then_some(FieldError::EmployerRequired),
        FormField::JobTitle => value
            .trim()
            .is_empty()
            .then_some(FieldError::JobTitleRequired),
        FormField::MonthlyIncome => {
            if value.is_empty() {
                Some(FieldError::IncomeRequired)
            } else if parse_money_string(value) < MIN_MONTHLY_INCOME {
                Some(FieldError::IncomeBelowMinimum {
                    min: MIN_MONTHLY_INCOME,
                })
            } else {
                None
            }
        }
    }
}

/// Validate every input, keeping only the failures.
pub fn validate_all(
    fields: &ApplicationFields,
    context: &ValidationContext<'_>,
) -> BTreeMap<FormField, FieldError> {
    FormField::ordered()
        .into_iter()
        .filter_map(|field| {
            validate_field(field, fields.get(field), context).map(|error| (field, error))
        })
        .collect()
}
