use super::{Catalog, CatalogError, CreditProduct};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Failure to load a catalog from a CSV export.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog rejected: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    rate: f64,
    min: u64,
    max: u64,
    term_max: u32,
}

impl From<CatalogRow> for CreditProduct {
    fn from(row: CatalogRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            rate: row.rate,
            min: row.min,
            max: row.max,
            term_max: row.term_max,
        }
    }
}

impl Catalog {
    /// Load products from CSV with the header `id,name,description,icon,rate,min,max,term_max`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        for record in csv_reader.deserialize::<CatalogRow>() {
            products.push(CreditProduct::from(record?));
        }

        Ok(Self::new(products)?)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,name,description,icon,rate,min,max,term_max\n";

    #[test]
    fn loads_rows_in_file_order() {
        let csv = format!(
            "{HEADER}moto,Crédito Moto,Tu moto al día,credit-moto.png,0.21,2000000,15000000,36\n\
             libre, Crédito Libre Inversión ,,,0.169,1000000,50000000,60\n"
        );
        let catalog = Catalog::from_csv_reader(Cursor::new(csv)).expect("catalog loads");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.default_product().id, "moto");
        let libre = catalog.by_name("Crédito Libre Inversión").expect("trimmed name");
        assert_eq!(libre.max, 50_000_000);
        assert!(libre.icon.is_empty());
    }

    #[test]
    fn rejects_malformed_numbers() {
        let csv = format!("{HEADER}moto,Crédito Moto,,,abc,2000000,15000000,36\n");
        let err = Catalog::from_csv_reader(Cursor::new(csv)).expect_err("rate must parse");
        assert!(matches!(err, CatalogImportError::Csv(_)));
    }

    #[test]
    fn rejects_rows_violating_catalog_invariants() {
        let csv = format!("{HEADER}moto,Crédito Moto,,,0.21,15000000,2000000,36\n");
        let err = Catalog::from_csv_reader(Cursor::new(csv)).expect_err("bounds inverted");
        assert!(matches!(
            err,
            CatalogImportError::Catalog(CatalogError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Catalog::from_csv_path("/nonexistent/creditsmart/catalog.csv")
            .expect_err("file does not exist");
        assert!(matches!(err, CatalogImportError::Io(_)));
    }
}
