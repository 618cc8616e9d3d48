//! Built-in six-product storefront catalog.

use crate::loader::CatalogLoadError;
use crate::provider::InMemoryCatalog;

/// Raw JSON of the built-in catalog.
pub const SEED_CATALOG_JSON: &str = include_str!("../data/seed_catalog.json");

/// Parse and validate the built-in catalog.
pub fn catalog() -> Result<InMemoryCatalog, CatalogLoadError> {
    let catalog = InMemoryCatalog::from_json_str(SEED_CATALOG_JSON)?;
    tracing::debug!(products = catalog.len(), "seed catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Category, Material};
    use crate::provider::CatalogProvider;

    #[test]
    fn seed_validates() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.len(), 6);

        let saree = catalog.by_slug("kanchipuram-silk-saree").unwrap();
        assert_eq!(saree.price().amount(), 15999);
        assert_eq!(saree.category(), &Category::Sarees);
        assert_eq!(saree.material(), &Material::Silk);
        assert_eq!(saree.images().len(), 3);
        assert_eq!(saree.review_count(), 1);
    }

    #[test]
    fn seed_uses_only_known_facets() {
        let catalog = catalog().unwrap();
        assert!(catalog.products().iter().all(|p| p.category().is_known()));
        assert!(catalog.products().iter().all(|p| p.material().is_known()));
    }
}
