//! Catalog query engine.
//!
//! Pure derivations over a product slice: every function borrows the input,
//! never reorders or mutates it, and returns a new view. None of them can
//! fail; "nothing matched" is an empty view or `None`.

use hastkala_core::Entity;

use crate::product::{Category, Product};
use crate::query::Query;

/// Related-product count shown on the product page.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Filter by every active facet and bracket, then order by the sort key.
///
/// Filtering keeps input order; sorting is stable, so equal keys keep their
/// catalog order.
pub fn apply<'a>(products: &'a [Product], query: &Query) -> Vec<&'a Product> {
    let mut view: Vec<&Product> = products
        .iter()
        .filter(|p| query.matches_category(p))
        .filter(|p| query.matches_material(p))
        .filter(|p| query.matches_price(p))
        .collect();

    query.sort_key.sort(&mut view);

    tracing::debug!(
        input = products.len(),
        matched = view.len(),
        categories = query.categories.len(),
        materials = query.materials.len(),
        price = %query.price_bracket,
        sort = %query.sort_key,
        "catalog query applied"
    );
    view
}

/// First product with this slug, in input order.
pub fn find_by_slug<'a>(products: &'a [Product], slug: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.slug().as_str() == slug)
}

/// First product with this id, in input order.
pub fn find_by_id<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id().as_str() == id)
}

pub fn filter_featured(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.featured()).collect()
}

pub fn filter_by_category<'a>(products: &'a [Product], category: &Category) -> Vec<&'a Product> {
    products.iter().filter(|p| p.category() == category).collect()
}

/// Up to `limit` other products from the same category, in input order.
pub fn related_products<'a>(
    products: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category() == product.category() && !p.same_identity(product))
        .take(limit)
        .collect()
}
