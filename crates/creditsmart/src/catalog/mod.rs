mod import;
mod view;

pub use import::CatalogImportError;
pub use view::CreditCardView;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A credit product offered on the site. Amounts are whole pesos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Nominal annual rate as a fraction (`0.169` is 16.9%).
    pub rate: f64,
    pub min: u64,
    pub max: u64,
    pub term_max: u32,
}

impl CreditProduct {
    pub fn accepts_amount(&self, amount: u64) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

/// Invariant violations detected while assembling a catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one product")]
    Empty,
    #[error("duplicate product id '{0}'")]
    DuplicateId(String),
    #[error("duplicate product name '{0}'")]
    DuplicateName(String),
    #[error("product '{id}' has min {min} not below max {max}")]
    InvertedBounds { id: String, min: u64, max: u64 },
    #[error("product '{0}' must allow at least one month")]
    ZeroTerm(String),
    #[error("product '{id}' has invalid annual rate {rate}")]
    InvalidRate { id: String, rate: f64 },
}

/// Read-only, ordered list of credit products.
///
/// Products are addressed by `id` from the simulator and by `name` from the application form;
/// both keys are unique so they always resolve to the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<CreditProduct>,
}

impl Catalog {
    pub fn new(products: Vec<CreditProduct>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for product in &products {
            if !ids.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if !names.insert(product.name.as_str()) {
                return Err(CatalogError::DuplicateName(product.name.clone()));
            }
            if product.min >= product.max {
                return Err(CatalogError::InvertedBounds {
                    id: product.id.clone(),
                    min: product.min,
                    max: product.max,
                });
            }
            if product.term_max == 0 {
                return Err(CatalogError::ZeroTerm(product.id.clone()));
            }
            if !product.rate.is_finite() || product.rate < 0.0 {
                return Err(CatalogError::InvalidRate {
                    id: product.id.clone(),
                    rate: product.rate,
                });
            }
        }

        Ok(Self { products })
    }

    /// The products CreditSmart offers out of the box.
    pub fn standard() -> Self {
        Self {
            products: standard_products(),
        }
    }

    pub fn products(&self) -> &[CreditProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First entry, used when an application starts without a preselected product.
    pub fn default_product(&self) -> &CreditProduct {
        &self.products[0]
    }

    pub fn by_id(&self, id: &str) -> Option<&CreditProduct> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&CreditProduct> {
        self.products.iter().find(|product| product.name == name)
    }

    /// Look a product up by either natural key; ids win when a value could be both.
    pub fn resolve(&self, key: &str) -> Option<&CreditProduct> {
        let key = key.trim();
        self.by_id(key).or_else(|| self.by_name(key))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn product(
    id: &str,
    name: &str,
    rate: f64,
    (min, max): (u64, u64),
    term_max: u32,
    icon: &str,
    description: &str,
) -> CreditProduct {
    CreditProduct {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        rate,
        min,
        max,
        term_max,
    }
}

fn standard_products() -> Vec<CreditProduct> {
    vec![
        product(
            "libre",
            "Crédito Libre Inversión",
            0.169,
            (1_000_000, 50_000_000),
            60,
            "credit-libre.png",
            "Flexibilidad para usar el dinero en lo que necesites.",
        ),
        product(
            "vehiculo",
            "Crédito Vehículo",
            0.155,
            (5_000_000, 80_000_000),
            60,
            "credit-vehiculo.png",
            "Adquiere tu carro con cuotas a tu medida.",
        ),
        product(
            "vivienda",
            "Crédito Vivienda",
            0.128,
            (40_000_000, 500_000_000),
            240,
            "credit-vivienda.jpg",
            "Tu hogar, más cerca con tasas competitivas.",
        ),
        product(
            "educativo",
            "Crédito Educativo",
            0.142,
            (1_000_000, 30_000_000),
            48,
            "credit-educativo.png",
            "Financia tus estudios con planes flexibles.",
        ),
        product(
            "empresarial",
            "Crédito Empresarial",
            0.180,
            (10_000_000, 300_000_000),
            84,
            "credit-empresarial.png",
            "Impulsa tu negocio con capital oportuno.",
        ),
        product(
            "consumo",
            "Crédito de Consumo",
            0.224,
            (500_000, 10_000_000),
            24,
            "credit-consumo.png",
            "Compra lo que quieras, cuando quieras. Sin trámites extensos.",
        ),
    ]
}
