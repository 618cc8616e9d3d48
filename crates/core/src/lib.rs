//! `hastkala-core`: domain foundation building blocks for the storefront.
//!
//! This crate contains **pure domain** primitives (no IO, no presentation).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, ReviewId, Slug};
pub use value_object::ValueObject;
