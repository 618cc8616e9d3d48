use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hastkala_core::{DomainError, DomainResult, Entity, ProductId, ReviewId, Slug, ValueObject};

macro_rules! impl_facet {
    ($t:ident, $name:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $t {
            /// Labels the storefront ships filters for.
            pub const KNOWN_LABELS: &'static [&'static str] = &[$($label),+];

            /// Normalize a label (trimmed, lowercase) into a facet value.
            ///
            /// Labels outside the known set become `Other`, so construct
            /// values through this function rather than `Other` directly.
            pub fn parse(value: &str) -> DomainResult<Self> {
                let label = value.trim().to_ascii_lowercase();
                if label.is_empty() {
                    return Err(DomainError::validation(concat!($name, " cannot be blank")));
                }
                Ok(match label.as_str() {
                    $($label => Self::$variant,)+
                    _ => Self::Other(label),
                })
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(label) => label.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                match value {
                    $t::Other(label) => label,
                    known => known.as_str().to_string(),
                }
            }
        }
    };
}

/// Product category facet (extensible).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Sarees,
    Kurtas,
    Accessories,
    Other(String),
}

impl_facet!(Category, "category", {
    Sarees => "sarees",
    Kurtas => "kurtas",
    Accessories => "accessories",
});

/// Fabric facet (extensible).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Material {
    Silk,
    Cotton,
    Other(String),
}

impl_facet!(Material, "material", {
    Silk => "silk",
    Cotton => "cotton",
});

/// Positive whole-rupee amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Price(u64);

impl Price {
    pub fn new(amount: u64) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> u64 {
        self.0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u64> for Price {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for u64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> DomainResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&stars) {
            return Err(DomainError::validation(format!(
                "rating must be between {} and {} (got {stars})",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(stars))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl ValueObject for Rating {}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Customer review embedded in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user: String,
    pub rating: Rating,
    pub comment: String,
    pub date: NaiveDate,
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn default_in_stock() -> bool {
    true
}

/// Unvalidated product record, as supplied by a catalog data source.
///
/// Field names follow the storefront's JSON (`originalPrice`, `inStock`,
/// `color`). Convert with `Product::try_from`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: ProductId,
    pub slug: Slug,
    pub name: String,
    pub price: u64,
    #[serde(default)]
    pub original_price: Option<u64>,
    pub category: Category,
    pub material: Material,
    #[serde(default)]
    pub origin: String,
    #[serde(default, rename = "color")]
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Immutable catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NewProduct")]
pub struct Product {
    id: ProductId,
    slug: Slug,
    name: String,
    price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_price: Option<Price>,
    category: Category,
    material: Material,
    origin: String,
    #[serde(rename = "color")]
    colors: BTreeSet<String>,
    sizes: Vec<String>,
    in_stock: bool,
    featured: bool,
    images: Vec<String>,
    description: String,
    details: Vec<String>,
    reviews: Vec<Review>,
}

impl TryFrom<NewProduct> for Product {
    type Error = DomainError;

    fn try_from(new: NewProduct) -> Result<Self, Self::Error> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: name cannot be empty",
                new.id
            )));
        }

        let price = Price::new(new.price)
            .map_err(|e| DomainError::validation(format!("product {}: {e}", new.id)))?;

        let original_price = match new.original_price {
            Some(anchor) if anchor <= new.price => {
                return Err(DomainError::invariant(format!(
                    "product {}: original price {anchor} must exceed price {}",
                    new.id, new.price
                )));
            }
            Some(anchor) => Some(Price::new(anchor)?),
            None => None,
        };

        if new.sizes.is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: sizes cannot be empty",
                new.id
            )));
        }
        if new.images.is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: images cannot be empty",
                new.id
            )));
        }

        let mut seen = HashSet::with_capacity(new.reviews.len());
        for review in &new.reviews {
            if !seen.insert(review.id()) {
                return Err(DomainError::invariant(format!(
                    "product {}: duplicate review id {}",
                    new.id, review.id
                )));
            }
        }

        Ok(Self {
            id: new.id,
            slug: new.slug,
            name: new.name,
            price,
            original_price,
            category: new.category,
            material: new.material,
            origin: new.origin,
            colors: new.colors.into_iter().collect(),
            sizes: new.sizes,
            in_stock: new.in_stock,
            featured: new.featured,
            images: new.images,
            description: new.description,
            details: new.details,
            reviews: new.reviews,
        })
    }
}

impl Product {
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn original_price(&self) -> Option<Price> {
        self.original_price
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn colors(&self) -> &BTreeSet<String> {
        &self.colors
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn featured(&self) -> bool {
        self.featured
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Canonical listing image (first of `images`).
    pub fn thumbnail(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or_default()
    }

    /// Out-of-stock products are listed but cannot be added to the cart.
    pub fn is_purchasable(&self) -> bool {
        self.in_stock
    }

    /// A size must be chosen before adding to cart when more than one exists.
    pub fn requires_size_selection(&self) -> bool {
        self.sizes.len() > 1
    }

    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some()
    }

    /// Discount against the original price, rounded to a whole percent.
    pub fn savings_percent(&self) -> Option<u8> {
        let anchor = self.original_price?.amount() as f64;
        let pct = (1.0 - self.price.amount() as f64 / anchor) * 100.0;
        Some(pct.round() as u8)
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Mean star rating; `None` when the product has no reviews.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating.stars())).sum();
        Some(f64::from(total) / self.reviews.len() as f64)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
