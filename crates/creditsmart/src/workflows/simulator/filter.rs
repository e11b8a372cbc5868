use crate::catalog::{Catalog, CreditProduct};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount-range chips offered by the simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AmountRange {
    #[default]
    All,
    UpTo5M,
    From5MTo20M,
    From20MTo50M,
    Over50M,
}

impl AmountRange {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::All,
            Self::UpTo5M,
            Self::From5MTo20M,
            Self::From20MTo50M,
            Self::Over50M,
        ]
    }

    /// Wire token, also used in links.
    pub const fn token(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::UpTo5M => "0-5000000",
            Self::From5MTo20M => "5000000-20000000",
            Self::From20MTo50M => "20000000-50000000",
            Self::Over50M => "50000000-999999999",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::UpTo5M => "Hasta $5M",
            Self::From5MTo20M => "$5M – $20M",
            Self::From20MTo50M => "$20M – $50M",
            Self::Over50M => "Más de $50M",
        }
    }

    /// Inclusive `(min, max)` bounds; `None` for the unconstrained chip.
    pub const fn bounds(self) -> Option<(u64, u64)> {
        match self {
            Self::All => None,
            Self::UpTo5M => Some((0, 5_000_000)),
            Self::From5MTo20M => Some((5_000_000, 20_000_000)),
            Self::From20MTo50M => Some((20_000_000, 50_000_000)),
            Self::Over50M => Some((50_000_000, 999_999_999)),
        }
    }

    /// Whether a product's `[min, max]` interval overlaps this range at all.
    pub fn overlaps(self, product: &CreditProduct) -> bool {
        let Some((min, max)) = self.bounds() else {
            return true;
        };
        let within = |value: u64| value >= min && value <= max;

        within(product.min) || within(product.max) || (product.min <= min && product.max >= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown amount range '{0}'")]
pub struct AmountRangeParseError(pub String);

impl FromStr for AmountRange {
    type Err = AmountRangeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|range| range.token() == value)
            .ok_or_else(|| AmountRangeParseError(value.to_string()))
    }
}

impl TryFrom<String> for AmountRange {
    type Error = AmountRangeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AmountRange> for String {
    fn from(range: AmountRange) -> Self {
        range.token().to_string()
    }
}

impl fmt::Display for AmountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Criteria applied by [`filter_credits`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub range: AmountRange,
    #[serde(default)]
    pub preselected_id: Option<String>,
}

impl CreditFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.preselected_id.is_none()
            && self.query.trim().is_empty()
            && self.range == AmountRange::All
    }
}

/// Narrow the catalog by preselected id, then name substring, then amount range. Catalog order is
/// preserved.
pub fn filter_credits<'c>(catalog: &'c Catalog, filter: &CreditFilter) -> Vec<&'c CreditProduct> {
    let mut results: Vec<&CreditProduct> = catalog.products().iter().collect();

    if let Some(id) = filter.preselected_id.as_deref() {
        results.retain(|product| product.id == id);
    }

    let query = filter.query.trim().to_lowercase();
    if !query.is_empty() {
        results.retain(|product| product.name.to_lowercase().contains(&query));
    }

    if filter.range != AmountRange::All {
        results.retain(|product| filter.range.overlaps(product));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&CreditProduct]) -> Vec<String> {
        products.iter().map(|product| product.id.clone()).collect()
    }

    #[test]
    fn unconstrained_filter_returns_catalog_in_order() {
        let catalog = Catalog::standard();
        let results = filter_credits(&catalog, &CreditFilter::default());
        assert_eq!(
            ids(&results),
            ["libre", "vehiculo", "vivienda", "educativo", "empresarial", "consumo"]
        );
    }

    #[test]
    fn query_matches_names_case_insensitively() {
        let catalog = Catalog::standard();
        let filter = CreditFilter {
            query: "  VEHÍCULO ".to_string(),
            ..CreditFilter::default()
        };
        assert_eq!(ids(&filter_credits(&catalog, &filter)), ["vehiculo"]);

        let filter = CreditFilter {
            query: "crédito".to_string(),
            ..CreditFilter::default()
        };
        assert_eq!(filter_credits(&catalog, &filter).len(), 6);
    }

    #[test]
    fn range_keeps_partial_overlaps() {
        let catalog = Catalog::standard();
        let filter = CreditFilter {
            range: AmountRange::UpTo5M,
            ..CreditFilter::default()
        };
        assert_eq!(
            ids(&filter_credits(&catalog, &filter)),
            ["libre", "vehiculo", "educativo", "consumo"]
        );

        let filter = CreditFilter {
            range: AmountRange::From20MTo50M,
            ..CreditFilter::default()
        };
        assert_eq!(
            ids(&filter_credits(&catalog, &filter)),
            ["libre", "vehiculo", "vivienda", "educativo", "empresarial"]
        );

        let filter = CreditFilter {
            range: AmountRange::Over50M,
            ..CreditFilter::default()
        };
        assert_eq!(
            ids(&filter_credits(&catalog, &filter)),
            ["libre", "vehiculo", "vivienda", "empresarial"]
        );
    }

    #[test]
    fn containing_interval_counts_as_overlap() {
        let catalog = Catalog::standard();
        let vivienda = catalog.by_id("vivienda").expect("vivienda present");
        assert!(!AmountRange::UpTo5M.overlaps(vivienda));
        let empresarial = catalog.by_id("empresarial").expect("empresarial present");
        assert!(AmountRange::From20MTo50M.overlaps(empresarial));
    }

    #[test]
    fn preselection_is_applied_before_other_criteria() {
        let catalog = Catalog::standard();
        let filter = CreditFilter {
            query: "vivienda".to_string(),
            range: AmountRange::All,
            preselected_id: Some("vehiculo".to_string()),
        };
        assert!(filter_credits(&catalog, &filter).is_empty());

        let filter = CreditFilter {
            preselected_id: Some("vehiculo".to_string()),
            ..CreditFilter::default()
        };
        assert_eq!(ids(&filter_credits(&catalog, &filter)), ["vehiculo"]);
    }

    #[test]
    fn range_tokens_parse_and_display() {
        for range in AmountRange::ordered() {
            assert_eq!(range.token().parse::<AmountRange>(), Ok(range));
            assert_eq!(range.to_string(), range.token());
        }
        assert_eq!(
            "1-2".parse::<AmountRange>(),
            Err(AmountRangeParseError("1-2".to_string()))
        );
    }

    #[test]
    fn range_serializes_as_token() {
        let json = serde_json::to_string(&AmountRange::From5MTo20M).expect("serializes");
        assert_eq!(json, "\"5000000-20000000\"");
        let parsed: AmountRange = serde_json::from_str("\"all\"").expect("deserializes");
        assert_eq!(parsed, AmountRange::All);
    }
}
