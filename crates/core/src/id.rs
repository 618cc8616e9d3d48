//! Strongly-typed identifiers used across the domain.
//!
//! Catalog identifiers are opaque strings supplied by the data source, so the
//! newtypes only guard shape (non-blank, URL-safe for slugs) and never mint
//! values themselves.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Identifier of a review (unique within its product).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReviewId(String);

/// URL-safe product handle (`kanchipuram-silk-saree`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

fn non_blank(name: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_id(format!("{name} cannot be blank")));
    }
    Ok(())
}

fn url_safe(name: &str, value: &str) -> DomainResult<()> {
    non_blank(name, value)?;

    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(DomainError::invalid_id(format!(
            "{name} `{value}` contains `{bad}` (allowed: a-z, 0-9, -)"
        )));
    }
    if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
        return Err(DomainError::invalid_id(format!(
            "{name} `{value}` has a stray hyphen"
        )));
    }
    Ok(())
}

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal, $check:path) => {
        impl $t {
            /// Validate and wrap an identifier.
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                let value = value.into();
                $check($name, &value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_newtype!(ProductId, "ProductId", non_blank);
impl_string_newtype!(ReviewId, "ReviewId", non_blank);
impl_string_newtype!(Slug, "Slug", url_safe);
