use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{ApplicationFields, FormField, TermOption};
use super::validation::{validate_all, validate_field, FieldError, ValidationContext};
use crate::amortization::monthly_payment;
use crate::catalog::{Catalog, CreditProduct};
use crate::money::{format_money_input, parse_money_string};

/// Lifecycle of one application session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Editing,
    /// Held only while a submit command runs its bulk validation.
    Submitting,
    /// Validation passed and the acknowledgment is on screen.
    Submitted,
}

/// Discrete user interactions the form reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormCommand {
    Change { field: FormField, value: String },
    Blur { field: FormField },
    Submit,
    Clear,
    Acknowledge,
    ReturnHome,
}

/// What happened as a result of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    Updated,
    /// The command does not apply in the current state.
    Ignored,
    Rejected { error_count: usize },
    Submitted(SubmittedApplication),
    Reset,
    /// The session was reset and the caller should leave the form.
    NavigateHome,
}

/// Validated application handed to the acknowledgment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedApplication {
    pub fields: ApplicationFields,
    pub product_id: String,
    pub product_name: String,
    pub amount: u64,
    pub term_months: u32,
    pub monthly_income: u64,
    pub monthly_payment: u64,
}

/// Controller behind the application page: raw inputs, touched flags, per-field errors, and the
/// derived monthly installment.
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    catalog: Arc<Catalog>,
    fields: ApplicationFields,
    touched: BTreeSet<FormField>,
    errors: BTreeMap<FormField, FieldError>,
    monthly_payment: u64,
    state: FormState,
}

impl ApplicationForm {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_preselection(catalog, None)
    }

    /// Start a session with a product chosen from a link. The key may be a product id or name; an
    /// unknown or missing key falls back to the first catalog entry.
    pub fn with_preselection(catalog: Arc<Catalog>, preselected: Option<&str>) -> Self {
        let product_name = preselected
            .and_then(|key| catalog.resolve(key))
            .unwrap_or_else(|| catalog.default_product())
            .name
            .clone();

        Self {
            fields: ApplicationFields::blank(product_name),
            catalog,
            touched: BTreeSet::new(),
            errors: BTreeMap::new(),
            monthly_payment: 0,
            state: FormState::Editing,
        }
    }

    pub fn fields(&self) -> &ApplicationFields {
        &self.fields
    }

    pub fn value(&self, field: FormField) -> &str {
        self.fields.get(field)
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn monthly_payment(&self) -> u64 {
        self.monthly_payment
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn touched_fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.touched.iter().copied()
    }

    pub fn errors(&self) -> &BTreeMap<FormField, FieldError> {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Error to display under a field: only once the user has left it.
    pub fn visible_error(&self, field: FormField) -> Option<&FieldError> {
        self.error(field).filter(|_| self.is_touched(field))
    }

    /// Product named by the selector. An empty selection means the first catalog entry.
    pub fn selected_product(&self) -> Option<&CreditProduct> {
        let selection = self.fields.credit_type.trim();
        if selection.is_empty() {
            return Some(self.catalog.default_product());
        }
        self.catalog.resolve(selection)
    }

    pub fn apply(&mut self, command: FormCommand) -> FormEffect {
        match command {
            FormCommand::Change { field, value } => self.change(field, value),
            FormCommand::Blur { field } => self.blur(field),
            FormCommand::Submit => self.submit(),
            FormCommand::Clear => self.clear(),
            FormCommand::Acknowledge => self.acknowledge(),
            FormCommand::ReturnHome => self.return_home(),
        }
    }

    pub fn change(&mut self, field: FormField, value: impl Into<String>) -> FormEffect {
        if self.state != FormState::Editing {
            return FormEffect::Ignored;
        }

        let value = value.into();
        let value = if field.is_currency() {
            format_money_input(&value)
        } else if field == FormField::CreditType {
            self.catalog
                .resolve(&value)
                .map(|product| product.name.clone())
                .unwrap_or(value)
        } else {
            value
        };
        self.fields.set(field, value);

        if self.is_touched(field) {
            self.revalidate(field);
        }
        if field == FormField::CreditType && self.is_touched(FormField::Amount) {
            self.revalidate(FormField::Amount);
        }
        if field.affects_payment() {
            self.recompute_payment();
        }

        debug!(field = field.key(), "application field changed");
        FormEffect::Updated
    }

    pub fn blur(&mut self, field: FormField) -> FormEffect {
        if self.state != FormState::Editing {
            return FormEffect::Ignored;
        }

        self.touched.insert(field);
        self.revalidate(field);
        FormEffect::Updated
    }

    /// Validate every field, mark all of them touched, and move to `Submitted` when nothing
    /// failed.
    pub fn submit(&mut self) -> FormEffect {
        if self.state != FormState::Editing {
            return FormEffect::Ignored;
        }
        self.state = FormState::Submitting;

        let errors = validate_all(&self.fields, &self.context());
        self.touched.extend(FormField::ordered());

        if !errors.is_empty() {
            let rejected: Vec<&str> = errors.keys().map(|field| field.key()).collect();
            warn!(error_count = errors.len(), fields = ?rejected, "application rejected");
            let error_count = errors.len();
            self.errors = errors;
            self.state = FormState::Editing;
            return FormEffect::Rejected { error_count };
        }

        self.errors.clear();
        match self.submission() {
            Some(application) => {
                info!(
                    product = %application.product_id,
                    term_months = application.term_months,
                    "application submitted"
                );
                self.state = FormState::Submitted;
                FormEffect::Submitted(application)
            }
            None => {
                self.state = FormState::Editing;
                FormEffect::Rejected { error_count: 0 }
            }
        }
    }

    /// Discard everything typed so far without validating.
    pub fn clear(&mut self) -> FormEffect {
        if self.state != FormState::Editing {
            return FormEffect::Ignored;
        }
        self.reset();
        FormEffect::Reset
    }

    /// Close the acknowledgment and start over on a fresh form.
    pub fn acknowledge(&mut self) -> FormEffect {
        if self.state != FormState::Submitted {
            return FormEffect::Ignored;
        }
        self.reset();
        FormEffect::Reset
    }

    /// Close the acknowledgment, start over, and leave the page.
    pub fn return_home(&mut self) -> FormEffect {
        if self.state != FormState::Submitted {
            return FormEffect::Ignored;
        }
        self.reset();
        FormEffect::NavigateHome
    }

    fn context(&self) -> ValidationContext<'_> {
        ValidationContext::for_product(self.selected_product())
    }

    fn revalidate(&mut self, field: FormField) {
        let outcome = validate_field(field, self.fields.get(field), &self.context());
        match outcome {
            Some(error) => {
                self.errors.insert(field, error);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn recompute_payment(&mut self) {
        let amount = parse_money_string(&self.fields.amount);
        let term = TermOption::parse(&self.fields.term);
        self.monthly_payment = match (self.selected_product(), term) {
            (Some(product), Some(term)) if amount > 0 => {
                monthly_payment(amount, product.rate, term.months())
            }
            _ => 0,
        };
    }

    fn submission(&self) -> Option<SubmittedApplication> {
        let product = self.selected_product()?;
        let term = TermOption::parse(&self.fields.term)?;
        let amount = parse_money_string(&self.fields.amount);

        let mut fields = self.fields.clone();
        fields.credit_type = product.name.clone();

        Some(SubmittedApplication {
            fields,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            amount,
            term_months: term.months(),
            monthly_income: parse_money_string(&self.fields.monthly_income),
            monthly_payment: monthly_payment(amount, product.rate, term.months()),
        })
    }

    fn reset(&mut self) {
        let product_name = self.catalog.default_product().name.clone();
        self.fields = ApplicationFields::blank(product_name);
        self.touched.clear();
        self.errors.clear();
        self.monthly_payment = 0;
        self.state = FormState::Editing;
    }
}
