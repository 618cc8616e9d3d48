//! JSON catalog loading.
//!
//! A catalog file is a JSON array of product records in the storefront's
//! shape (see `NewProduct`). Each record is validated as it is parsed, then
//! the catalog checks id/slug uniqueness.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use hastkala_core::DomainError;

use crate::product::Product;
use crate::provider::InMemoryCatalog;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Domain(#[from] DomainError),
}

impl InMemoryCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_parsed(products)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, CatalogLoadError> {
        let products: Vec<Product> = serde_json::from_reader(reader)?;
        Self::from_parsed(products)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_reader(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "catalog loaded from file"
        );
        Ok(catalog)
    }

    fn from_parsed(products: Vec<Product>) -> Result<Self, CatalogLoadError> {
        Ok(Self::new(products)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CatalogProvider;

    const TWO_PRODUCTS: &str = r#"[
        {"id": "a1", "name": "Ilkal Saree", "slug": "ilkal-saree", "price": 3200,
         "category": "sarees", "material": "cotton", "sizes": ["one-size"], "images": ["i.jpg"]},
        {"id": "a2", "name": "Pashmina Shawl", "slug": "pashmina-shawl", "price": 8900,
         "originalPrice": 9900, "category": "shawls", "material": "wool",
         "sizes": ["one-size"], "images": ["p.jpg"], "featured": true}
    ]"#;

    #[test]
    fn loads_records_in_order() {
        let catalog = InMemoryCatalog::from_json_str(TWO_PRODUCTS).unwrap();
        assert_eq!(catalog.len(), 2);
        let names: Vec<_> = catalog.products().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Ilkal Saree", "Pashmina Shawl"]);
        assert_eq!(catalog.by_slug("pashmina-shawl").unwrap().category().as_str(), "shawls");
        assert!(catalog.by_slug("ilkal-saree").unwrap().in_stock());
    }

    #[test]
    fn reader_and_str_agree() {
        let from_reader = InMemoryCatalog::from_json_reader(TWO_PRODUCTS.as_bytes()).unwrap();
        assert_eq!(from_reader, InMemoryCatalog::from_json_str(TWO_PRODUCTS).unwrap());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            InMemoryCatalog::from_json_str("{not json"),
            Err(CatalogLoadError::Parse(_))
        ));
    }

    #[test]
    fn invalid_record_is_a_parse_error() {
        let json = r#"[{"id": "x", "name": "No Sizes", "slug": "no-sizes", "price": 10,
            "category": "sarees", "material": "silk", "sizes": [], "images": ["x.jpg"]}]"#;
        match InMemoryCatalog::from_json_str(json) {
            Err(CatalogLoadError::Parse(e)) => {
                assert!(e.to_string().contains("sizes cannot be empty"))
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_slug_is_a_domain_error() {
        let json = r#"[
            {"id": "1", "name": "A", "slug": "same", "price": 10, "category": "sarees",
             "material": "silk", "sizes": ["one-size"], "images": ["a.jpg"]},
            {"id": "2", "name": "B", "slug": "same", "price": 10, "category": "sarees",
             "material": "silk", "sizes": ["one-size"], "images": ["b.jpg"]}
        ]"#;
        assert!(matches!(
            InMemoryCatalog::from_json_str(json),
            Err(CatalogLoadError::Domain(DomainError::Conflict(_)))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = InMemoryCatalog::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir()
            .join(format!("hastkala-catalog-{}.json", std::process::id()));
        std::fs::write(&path, TWO_PRODUCTS).unwrap();
        let catalog = InMemoryCatalog::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(catalog.unwrap().len(), 2);
    }
}
