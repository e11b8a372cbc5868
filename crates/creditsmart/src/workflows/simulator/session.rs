use super::filter::{filter_credits, AmountRange, CreditFilter};
use crate::catalog::{Catalog, CreditProduct};
use std::sync::Arc;

/// Search state behind the simulator page.
///
/// Results stay `None` until the filters have been applied once, so an empty match list is never
/// confused with a page that has not searched yet.
#[derive(Debug, Clone)]
pub struct SimulatorSession {
    catalog: Arc<Catalog>,
    filter: CreditFilter,
    results: Option<Vec<CreditProduct>>,
}

impl SimulatorSession {
    pub fn new(catalog: Arc<Catalog>, preselected_id: Option<String>) -> Self {
        let preselected_id = preselected_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Self {
            catalog,
            filter: CreditFilter {
                preselected_id,
                ..CreditFilter::default()
            },
            results: None,
        }
    }

    pub fn filter(&self) -> &CreditFilter {
        &self.filter
    }

    pub fn results(&self) -> Option<&[CreditProduct]> {
        self.results.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> &[CreditProduct] {
        self.filter.query = query.into();
        self.apply()
    }

    pub fn set_range(&mut self, range: AmountRange) -> &[CreditProduct] {
        self.filter.range = range;
        self.apply()
    }

    /// Reset the search box and range chip. A preselected product stays selected.
    pub fn clear_filters(&mut self) -> &[CreditProduct] {
        self.filter.query.clear();
        self.filter.range = AmountRange::All;
        self.apply()
    }

    /// Whether the "clear filters" action should be offered.
    pub fn has_active_filters(&self) -> bool {
        !self.filter.query.is_empty() || self.filter.range != AmountRange::All
    }

    pub fn apply(&mut self) -> &[CreditProduct] {
        let matches = filter_credits(&self.catalog, &self.filter)
            .into_iter()
            .cloned()
            .collect();
        self.results.insert(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(preselected: Option<&str>) -> SimulatorSession {
        SimulatorSession::new(
            Arc::new(Catalog::standard()),
            preselected.map(str::to_string),
        )
    }

    #[test]
    fn results_are_absent_until_applied() {
        let mut simulator = session(None);
        assert!(simulator.results().is_none());

        simulator.set_query("inexistente");
        assert_eq!(simulator.results().map(<[CreditProduct]>::len), Some(0));
    }

    #[test]
    fn criteria_accumulate_across_updates() {
        let mut simulator = session(None);
        simulator.set_range(AmountRange::UpTo5M);
        let ids: Vec<&str> = simulator
            .set_query("educ")
            .iter()
            .map(|product| product.id.as_str())
            .collect();
        assert_eq!(ids, ["educativo"]);
        assert!(simulator.has_active_filters());
    }

    #[test]
    fn clearing_keeps_preselected_product() {
        let mut simulator = session(Some(" vivienda "));
        simulator.set_query("vehículo");
        assert!(simulator.results().is_some_and(<[CreditProduct]>::is_empty));

        let cleared = simulator.clear_filters();
        assert_eq!(cleared.len(), 1);
        assert_eq!(cleared[0].id, "vivienda");
        assert!(!simulator.has_active_filters());
    }
}
