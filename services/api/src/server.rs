use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use creditsmart::config::AppConfig;
use creditsmart::error::AppError;
use creditsmart::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&config.catalog)?;
    let products = catalog.len();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(prometheus_handle);

    let app = site_routes(catalog)
        .layer(Extension(app_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    app_state.mark_ready();

    info!(?config.environment, %addr, products, "creditsmart api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
