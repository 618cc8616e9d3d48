//! Storefront catalog (read-only).
//!
//! Product records, shop queries and the pure filter/sort/derive pipeline the
//! shop, home and product pages call into. No IO beyond loading a catalog
//! file; querying never fails.

pub mod cli;
pub mod collation;
pub mod config;
pub mod engine;
pub mod loader;
pub mod product;
pub mod provider;
pub mod query;
pub mod seed;

pub use config::CatalogConfig;
pub use engine::{
    DEFAULT_RELATED_LIMIT, apply, filter_by_category, filter_featured, find_by_id, find_by_slug,
    related_products,
};
pub use loader::CatalogLoadError;
pub use product::{Category, Material, NewProduct, Price, Product, Rating, Review};
pub use provider::{CatalogProvider, InMemoryCatalog};
pub use query::{PriceBracket, Query, SortKey};
