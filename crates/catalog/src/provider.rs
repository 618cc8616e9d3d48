//! Read-only catalog data sources.

use std::collections::HashSet;
use std::sync::Arc;

use hastkala_core::{DomainError, DomainResult, Entity};

use crate::engine;
use crate::product::{Category, Product};
use crate::query::Query;

/// Injected, read-only product collection.
///
/// Pages depend on this trait instead of a global list so tests can supply
/// synthetic fixtures. The default methods delegate to `engine`.
pub trait CatalogProvider: Send + Sync {
    /// The full catalog in insertion order.
    fn products(&self) -> &[Product];

    fn query(&self, query: &Query) -> Vec<&Product> {
        engine::apply(self.products(), query)
    }

    fn by_slug(&self, slug: &str) -> Option<&Product> {
        engine::find_by_slug(self.products(), slug)
    }

    fn by_id(&self, id: &str) -> Option<&Product> {
        engine::find_by_id(self.products(), id)
    }

    fn featured(&self) -> Vec<&Product> {
        engine::filter_featured(self.products())
    }

    fn in_category(&self, category: &Category) -> Vec<&Product> {
        engine::filter_by_category(self.products(), category)
    }

    fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        engine::related_products(self.products(), product, limit)
    }
}

impl<S> CatalogProvider for Arc<S>
where
    S: CatalogProvider + ?Sized,
{
    fn products(&self) -> &[Product] {
        (**self).products()
    }
}

/// In-memory catalog with unique ids and slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Build a catalog, rejecting duplicate ids or slugs.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut ids = HashSet::with_capacity(products.len());
        let mut slugs = HashSet::with_capacity(products.len());

        for product in &products {
            if !ids.insert(product.id()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id `{}`",
                    product.id()
                )));
            }
            if !slugs.insert(product.slug()) {
                return Err(DomainError::conflict(format!(
                    "duplicate slug `{}` (product {})",
                    product.slug(),
                    product.id()
                )));
            }
        }

        Ok(Self { products })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}
