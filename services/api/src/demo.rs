use crate::infra::load_catalog;
use clap::Args;
use creditsmart::catalog::{Catalog, CreditCardView};
use creditsmart::config::AppConfig;
use creditsmart::error::AppError;
use creditsmart::money::format_money;
use creditsmart::workflows::application::{
    ApplicationForm, ApplicationReviewService, FormCommand, FormEffect, FormField,
};
use creditsmart::workflows::simulator::{AmountRange, SimulatorSession};
use std::sync::Arc;

const DEFAULT_DEMO_PRODUCT: &str = "vehiculo";

#[derive(Args, Debug, Default)]
pub(crate) struct SimulateArgs {
    /// Only products whose name contains this text (case-insensitive)
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Amount range token: all, 0-5000000, 5000000-20000000, 20000000-50000000, 50000000-999999999
    #[arg(long, default_value_t = AmountRange::All)]
    pub(crate) range: AmountRange,
    /// Restrict the search to one product id, as a simulator link does
    #[arg(long)]
    pub(crate) product: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Product id or name
    #[arg(long)]
    pub(crate) product: String,
    /// Amount in pesos; separators and currency symbols are ignored
    #[arg(long)]
    pub(crate) amount: String,
    /// Term in months
    #[arg(long)]
    pub(crate) term: u32,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Product id or name to preselect. Defaults to the vehicle credit.
    #[arg(long)]
    pub(crate) product: Option<String>,
}

fn configured_catalog() -> Result<Arc<Catalog>, AppError> {
    let config = AppConfig::load()?;
    load_catalog(&config.catalog)
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let SimulateArgs {
        query,
        range,
        product,
    } = args;

    let mut session = SimulatorSession::new(configured_catalog()?, product);
    session.set_range(range);
    let results = session.set_query(query.unwrap_or_default()).to_vec();

    let filter = session.filter();
    println!("CreditSmart simulator");
    println!(
        "- Search: \"{}\" | Range: {} | Product: {}",
        filter.query,
        filter.range.label(),
        filter.preselected_id.as_deref().unwrap_or("any")
    );

    if results.is_empty() {
        println!("\nNo se encontraron créditos que coincidan con tu búsqueda.");
        return Ok(());
    }

    for product in &results {
        render_card(&CreditCardView::from(product));
    }
    Ok(())
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let service = ApplicationReviewService::new(configured_catalog()?);
    let view = service.quote(&args.product, &args.amount, args.term)?;

    println!("{} ({})", view.product_name, view.rate_label);
    println!(
        "- {} over {} months",
        format_money(view.principal),
        view.term_months
    );
    println!("- Cuota mensual estimada: {}", view.monthly_payment_label);
    println!(
        "- Total paid {} | interest {}",
        format_money(view.total_paid),
        format_money(view.total_interest)
    );
    if !view.within_bounds {
        println!("  Note: amount is outside the range this product accepts");
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = configured_catalog()?;
    let product = args.product.as_deref().unwrap_or(DEFAULT_DEMO_PRODUCT);

    println!("CreditSmart application demo (personal fields redacted)");
    let mut form = ApplicationForm::with_preselection(catalog.clone(), Some(product));
    println!("- Selected product: {}", form.value(FormField::CreditType));

    for (field, value) in demo_answers() {
        let value = if field == FormField::Employer {
            ""
        } else {
            value
        };
        form.apply(FormCommand::Change {
            field,
            value: value.to_string(),
        });
        form.apply(FormCommand::Blur { field });
    }
    println!(
        "- Estimated installment: {}",
        format_money(form.monthly_payment())
    );

    match form.apply(FormCommand::Submit) {
        FormEffect::Rejected { error_count } => {
            println!("- First attempt rejected with {error_count} error(s):");
            for (field, error) in form.errors() {
                println!("    - {}: {}", field.label(), error);
            }
        }
        other => println!("- First attempt unexpectedly returned {other:?}"),
    }

    form.apply(FormCommand::Change {
        field: FormField::Employer,
        value: "Transportes Andinos S.A.S.".to_string(),
    });
    let application = match form.apply(FormCommand::Submit) {
        FormEffect::Submitted(application) => application,
        other => {
            println!("- Second attempt did not submit: {other:?}");
            return Ok(());
        }
    };
    println!(
        "- Second attempt accepted: {} | {} over {} months | installment {}",
        application.product_name,
        format_money(application.amount),
        application.term_months,
        format_money(application.monthly_payment)
    );

    let service = ApplicationReviewService::new(catalog);
    match service.submit(application.fields.clone()) {
        Ok(acknowledgment) => {
            println!("- Reference {}: {}", acknowledgment.reference, acknowledgment.message)
        }
        Err(rejected) => println!("- Review service disagreed: {rejected}"),
    }

    form.apply(FormCommand::Acknowledge);
    println!(
        "- Form reset; selected product back to {}",
        form.value(FormField::CreditType)
    );
    Ok(())
}

fn demo_answers() -> [(FormField, &'static str); 10] {
    [
        (FormField::FullName, "María Fernanda Gómez"),
        (FormField::NationalId, "1.032.456.789"),
        (FormField::Email, "maria.gomez@correo.co"),
        (FormField::Phone, "300 123 4567"),
        (FormField::Amount, "20000000"),
        (FormField::Term, "36"),
        (FormField::Purpose, "Compra de vehículo familiar usado"),
        (FormField::Employer, "Transportes Andinos S.A.S."),
        (FormField::JobTitle, "Coordinadora logística"),
        (FormField::MonthlyIncome, "4500000"),
    ]
}

fn render_card(card: &CreditCardView) {
    println!("\n{}", card.name);
    println!("  {}", card.description);
    println!(
        "  Tasa: {} | Monto: {} | Plazo: {}",
        card.rate_label, card.amount_label, card.term_label
    );
    println!("  Detalle: {} | Solicitar: {}", card.details_link, card.apply_link);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_answers_pass_validation_for_the_default_product() {
        let catalog = Arc::new(Catalog::standard());
        let mut form = ApplicationForm::with_preselection(catalog, Some(DEFAULT_DEMO_PRODUCT));
        for (field, value) in demo_answers() {
            form.change(field, value);
        }
        assert!(matches!(form.submit(), FormEffect::Submitted(_)));
    }

    #[test]
    fn demo_answers_cover_every_free_text_field() {
        let answered: Vec<FormField> = demo_answers().iter().map(|(field, _)| *field).collect();
        for field in FormField::ordered() {
            if field != FormField::CreditType {
                assert!(answered.contains(&field), "{field} missing from demo");
            }
        }
    }
}
