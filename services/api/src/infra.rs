use creditsmart::catalog::Catalog;
use creditsmart::config::CatalogConfig;
use creditsmart::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
        }
    }

    pub(crate) fn mark_ready(&self) {
        self.readiness.store(true, Ordering::Release);
    }
}

/// Catalog for this process: the CSV named in configuration, or the built-in products.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<Arc<Catalog>, AppError> {
    let catalog = match &config.csv_path {
        Some(path) => {
            let catalog = Catalog::from_csv_path(path)?;
            info!(path = %path.display(), products = catalog.len(), "catalog loaded from csv");
            catalog
        }
        None => Catalog::standard(),
    };
    Ok(Arc::new(catalog))
}
