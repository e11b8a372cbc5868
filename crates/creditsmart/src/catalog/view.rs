use super::CreditProduct;
use crate::money::{format_money, format_rate};
use serde::Serialize;
use url::form_urlencoded;

/// Display projection of a product as shown on a catalog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_path: String,
    pub rate_label: String,
    pub amount_label: String,
    pub term_label: String,
    pub details_link: String,
    pub apply_link: String,
}

impl From<&CreditProduct> for CreditCardView {
    fn from(product: &CreditProduct) -> Self {
        let details_query = form_urlencoded::Serializer::new(String::new())
            .append_pair("producto", &product.id)
            .finish();
        let apply_query = form_urlencoded::Serializer::new(String::new())
            .append_pair("tipo", &product.name)
            .finish();

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            image_path: format!("/img/{}", product.icon),
            rate_label: format_rate(product.rate),
            amount_label: format!(
                "{} – {}",
                format_money(product.min),
                format_money(product.max)
            ),
            term_label: format!("hasta {} meses", product.term_max),
            details_link: format!("/simulador?{details_query}"),
            apply_link: format!("/solicitar?{apply_query}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn card_labels_use_site_formatting() {
        let catalog = Catalog::standard();
        let card = CreditCardView::from(catalog.by_id("vehiculo").expect("vehiculo present"));

        assert_eq!(card.rate_label, "15.5% anual");
        assert_eq!(card.amount_label, "$\u{a0}5.000.000 – $\u{a0}80.000.000");
        assert_eq!(card.term_label, "hasta 60 meses");
        assert_eq!(card.image_path, "/img/credit-vehiculo.png");
        assert_eq!(card.details_link, "/simulador?producto=vehiculo");
    }

    #[test]
    fn apply_link_round_trips_product_name() {
        let catalog = Catalog::standard();
        let card = CreditCardView::from(catalog.by_id("consumo").expect("consumo present"));

        let query = card
            .apply_link
            .strip_prefix("/solicitar?")
            .expect("apply link targets the form");
        let (key, value) = form_urlencoded::parse(query.as_bytes())
            .next()
            .expect("one query pair");
        assert_eq!(key, "tipo");
        assert_eq!(catalog.resolve(&value).map(|p| p.id.as_str()), Some("consumo"));
    }
}
