use creditsmart::amortization::{monthly_payment, quote};
use creditsmart::catalog::Catalog;
use creditsmart::money::{format_money, format_money_input, parse_money_string};
use creditsmart::workflows::simulator::{filter_credits, AmountRange, CreditFilter};
use proptest::prelude::*;

fn range_strategy() -> impl Strategy<Value = AmountRange> {
    prop::sample::select(AmountRange::ordered().to_vec())
}

fn preselection_strategy() -> impl Strategy<Value = Option<String>> {
    let ids: Vec<String> = Catalog::standard()
        .products()
        .iter()
        .map(|product| product.id.clone())
        .collect();
    prop::option::of(prop::sample::select(ids))
}

proptest! {
    #[test]
    fn installments_cover_principal(
        principal in 100_000u64..=500_000_000,
        rate in 0.01f64..0.5,
        term in 1u32..=240,
    ) {
        let payment = monthly_payment(principal, rate, term);
        prop_assert!(payment > 0);
        prop_assert!(payment * u64::from(term) >= principal);
    }

    #[test]
    fn higher_rates_never_lower_the_installment(
        principal in 1_000_000u64..=100_000_000,
        low in 0.01f64..0.25,
        spread in 0.001f64..0.25,
        term in 1u32..=120,
    ) {
        let cheap = monthly_payment(principal, low, term);
        let dear = monthly_payment(principal, low + spread, term);
        prop_assert!(dear >= cheap);
    }

    #[test]
    fn quote_totals_are_consistent(
        principal in 0u64..=500_000_000,
        rate in 0.0f64..0.5,
        term in 0u32..=240,
    ) {
        let estimate = quote(principal, rate, term);
        prop_assert_eq!(estimate.total_paid, estimate.monthly_payment * u64::from(term));
        prop_assert_eq!(estimate.total_interest, estimate.total_paid.saturating_sub(principal));
    }

    #[test]
    fn formatted_amounts_parse_back(value in any::<u64>()) {
        prop_assert_eq!(parse_money_string(&format_money(value)), value);
    }

    #[test]
    fn currency_input_normalisation_is_stable(raw in "[0-9$ .,a-z]{0,16}") {
        let once = format_money_input(&raw);
        prop_assert_eq!(format_money_input(&once), once.clone());
        if once.is_empty() {
            prop_assert!(!raw.chars().any(|ch| ch.is_ascii_digit()));
        }
    }

    #[test]
    fn every_filter_is_a_subsequence_of_the_unconstrained_listing(
        query in "[a-zA-Z ]{0,6}",
        range in range_strategy(),
        preselected_id in preselection_strategy(),
    ) {
        let catalog = Catalog::standard();
        let everything = filter_credits(&catalog, &CreditFilter::default());
        prop_assert_eq!(everything.len(), catalog.len());

        let filter = CreditFilter { query, range, preselected_id: preselected_id.clone() };
        let narrowed = filter_credits(&catalog, &filter);

        prop_assert!(narrowed.len() <= everything.len());
        let mut remaining = everything.iter();
        for product in &narrowed {
            prop_assert!(remaining.any(|listed| listed.id == product.id));
        }
        if let Some(id) = preselected_id {
            prop_assert!(narrowed.len() <= 1);
            prop_assert!(narrowed.iter().all(|product| product.id == id));
        }
    }

    #[test]
    fn filtering_only_narrows_the_catalog(query in "[a-zA-Z ]{0,6}", range in range_strategy()) {
        let catalog = Catalog::standard();
        let by_query = CreditFilter { query: query.clone(), ..CreditFilter::default() };
        let both = CreditFilter { query: query.clone(), range, preselected_id: None };

        let wide = filter_credits(&catalog, &by_query);
        let narrow = filter_credits(&catalog, &both);

        prop_assert!(narrow.len() <= wide.len());
        prop_assert!(narrow.iter().all(|product| wide.iter().any(|kept| kept.id == product.id)));
        let needle = query.trim().to_lowercase();
        prop_assert!(narrow.iter().all(|product| product.name.to_lowercase().contains(&needle)));
        prop_assert_eq!(filter_credits(&catalog, &both), narrow);
    }
}
