use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eleven inputs of the credit application form, keyed on the wire by their Spanish names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormField {
    #[serde(rename = "nombre")]
    FullName,
    #[serde(rename = "cedula")]
    NationalId,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "telefono")]
    Phone,
    #[serde(rename = "tipo")]
    CreditType,
    #[serde(rename = "monto")]
    Amount,
    #[serde(rename = "plazo")]
    Term,
    #[serde(rename = "destino")]
    Purpose,
    #[serde(rename = "empresa")]
    Employer,
    #[serde(rename = "cargo")]
    JobTitle,
    #[serde(rename = "ingresos")]
    MonthlyIncome,
}

impl FormField {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::FullName,
            Self::NationalId,
            Self::Email,
            Self::Phone,
            Self::CreditType,
            Self::Amount,
            Self::Term,
            Self::Purpose,
            Self::Employer,
            Self::JobTitle,
            Self::MonthlyIncome,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "nombre",
            Self::NationalId => "cedula",
            Self::Email => "email",
            Self::Phone => "telefono",
            Self::CreditType => "tipo",
            Self::Amount => "monto",
            Self::Term => "plazo",
            Self::Purpose => "destino",
            Self::Employer => "empresa",
            Self::JobTitle => "cargo",
            Self::MonthlyIncome => "ingresos",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Nombre completo",
            Self::NationalId => "Cédula",
            Self::Email => "Email",
            Self::Phone => "Teléfono",
            Self::CreditType => "Tipo de crédito",
            Self::Amount => "Monto solicitado",
            Self::Term => "Plazo (meses)",
            Self::Purpose => "Destino del crédito",
            Self::Employer => "Empresa donde trabaja",
            Self::JobTitle => "Cargo",
            Self::MonthlyIncome => "Ingresos mensuales",
        }
    }

    /// Inputs typed as peso amounts and reformatted on every keystroke.
    pub const fn is_currency(self) -> bool {
        matches!(self, Self::Amount | Self::MonthlyIncome)
    }

    /// Inputs chosen from a fixed list rather than typed.
    pub const fn is_selector(self) -> bool {
        matches!(self, Self::CreditType | Self::Term)
    }

    /// Inputs feeding the estimated monthly installment.
    pub const fn affects_payment(self) -> bool {
        matches!(self, Self::CreditType | Self::Amount | Self::Term)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application field '{0}'")]
pub struct FormFieldParseError(pub String);

impl FromStr for FormField {
    type Err = FormFieldParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|field| field.key() == value)
            .ok_or_else(|| FormFieldParseError(value.to_string()))
    }
}

/// Installment counts offered by the term selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermOption {
    #[default]
    Months12,
    Months24,
    Months36,
    Months48,
    Months60,
}

impl TermOption {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Months12,
            Self::Months24,
            Self::Months36,
            Self::Months48,
            Self::Months60,
        ]
    }

    pub const fn months(self) -> u32 {
        match self {
            Self::Months12 => 12,
            Self::Months24 => 24,
            Self::Months36 => 36,
            Self::Months48 => 48,
            Self::Months60 => 60,
        }
    }

    pub fn from_months(months: u32) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| option.months() == months)
    }

    /// Parse the selector's raw value, e.g. `"36"`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().and_then(Self::from_months)
    }
}

/// Raw values of the form inputs, exactly as typed or selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationFields {
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "tipo")]
    pub credit_type: String,
    #[serde(rename = "monto")]
    pub amount: String,
    #[serde(rename = "plazo")]
    pub term: String,
    #[serde(rename = "destino")]
    pub purpose: String,
    #[serde(rename = "empresa")]
    pub employer: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    #[serde(rename = "ingresos")]
    pub monthly_income: String,
}

impl Default for ApplicationFields {
    fn default() -> Self {
        Self::blank(String::new())
    }
}

impl ApplicationFields {
    /// Empty inputs with the given product selected and the default term.
    pub fn blank(credit_type: impl Into<String>) -> Self {
        Self {
            full_name: String::new(),
            national_id: String::new(),
            email: String::new(),
            phone: String::new(),
            credit_type: credit_type.into(),
            amount: String::new(),
            term: TermOption::default().months().to_string(),
            purpose: String::new(),
            employer: String::new(),
            job_title: String::new(),
            monthly_income: String::new(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::NationalId => &self.national_id,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::CreditType => &self.credit_type,
            FormField::Amount => &self.amount,
            FormField::Term => &self.term,
            FormField::Purpose => &self.purpose,
            FormField::Employer => &self.employer,
            FormField::JobTitle => &self.job_title,
            FormField::MonthlyIncome => &self.monthly_income,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::NationalId => &mut self.national_id,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::CreditType => &mut self.credit_type,
            FormField::Amount => &mut self.amount,
            FormField::Term => &mut self.term,
            FormField::Purpose => &mut self.purpose,
            FormField::Employer => &mut self.employer,
            FormField::JobTitle => &mut self.job_title,
            FormField::MonthlyIncome => &mut self.monthly_income,
        };
        *slot = value;
    }
}
