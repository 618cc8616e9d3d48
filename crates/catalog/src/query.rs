//! Shop filter/sort selections.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use hastkala_core::{DomainError, DomainResult};

use crate::collation;
use crate::product::{Category, Material, Product};

/// Upper bound (exclusive) of the cheapest bracket.
pub const BUDGET_CEILING: u64 = 2000;
/// Upper bound (inclusive) of the middle bracket.
pub const PREMIUM_FLOOR: u64 = 5000;

/// Mutually exclusive, exhaustive price ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriceBracket {
    #[default]
    All,
    /// `price < 2000`
    Under2000,
    /// `2000 <= price <= 5000`
    From2000To5000,
    /// `price > 5000`
    Above5000,
}

impl PriceBracket {
    /// The three concrete brackets (every price belongs to exactly one).
    pub const RANGES: [PriceBracket; 3] = [Self::Under2000, Self::From2000To5000, Self::Above5000];

    /// The concrete bracket a price falls into.
    pub fn of(amount: u64) -> Self {
        if amount < BUDGET_CEILING {
            Self::Under2000
        } else if amount <= PREMIUM_FLOOR {
            Self::From2000To5000
        } else {
            Self::Above5000
        }
    }

    pub fn contains(self, amount: u64) -> bool {
        match self {
            Self::All => true,
            bracket => Self::of(amount) == bracket,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Under2000 => "under-2000",
            Self::From2000To5000 => "2000-5000",
            Self::Above5000 => "above-5000",
        }
    }

    /// Strict parse; accepts the shop's wire names and snake_case aliases.
    pub fn parse(value: &str) -> DomainResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "under-2000" | "under_2000" => Ok(Self::Under2000),
            "2000-5000" | "2000_to_5000" => Ok(Self::From2000To5000),
            "above-5000" | "above_5000" => Ok(Self::Above5000),
            other => Err(DomainError::validation(format!("unknown price bracket `{other}`"))),
        }
    }

    /// Unknown names mean "no price filter".
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|_| {
            tracing::debug!(value, "unknown price bracket, treating as all");
            Self::All
        })
    }
}

impl core::fmt::Display for PriceBracket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PriceBracket {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<String> for PriceBracket {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<PriceBracket> for String {
    fn from(value: PriceBracket) -> Self {
        value.as_str().to_string()
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Catalog insertion order. Does not move featured products first.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-low",
            Self::PriceDesc => "price-high",
            Self::NameAsc => "name",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "featured" | "" => Ok(Self::Featured),
            "price-low" | "price_asc" | "price-asc" => Ok(Self::PriceAsc),
            "price-high" | "price_desc" | "price-desc" => Ok(Self::PriceDesc),
            "name" | "name_asc" | "name-asc" => Ok(Self::NameAsc),
            other => Err(DomainError::validation(format!("unknown sort key `{other}`"))),
        }
    }

    /// Unknown names mean catalog order.
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|_| {
            tracing::debug!(value, "unknown sort key, keeping catalog order");
            Self::Featured
        })
    }

    /// Stable in-place sort of a derived view.
    pub fn sort(self, products: &mut [&Product]) {
        match self {
            Self::Featured => {}
            Self::PriceAsc => products.sort_by_key(|p| p.price()),
            Self::PriceDesc => products.sort_by_key(|p| Reverse(p.price())),
            Self::NameAsc => products.sort_by_cached_key(|p| {
                let (key, name) = collation::sort_key(p.name());
                (key, name.to_string())
            }),
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.as_str().to_string()
    }
}

/// Filter and sort selections for one catalog derivation.
///
/// Empty facet sets mean "no filter" on that facet; a product matches a
/// non-empty set when its single value is a member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Query {
    pub categories: BTreeSet<Category>,
    pub materials: BTreeSet<Material>,
    pub price_bracket: PriceBracket,
    pub sort_key: SortKey,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shop landing state for `/shop?category=<c>`.
    pub fn for_category(category: Category) -> Self {
        Self::new().with_category(category)
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.insert(material);
        self
    }

    pub fn with_price_bracket(mut self, bracket: PriceBracket) -> Self {
        self.price_bracket = bracket;
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Build from URL search parameters (`category=sarees&price=under-2000`).
    ///
    /// Values are form-urlencoded. Repeated `category`/`material` keys
    /// accumulate. Unknown keys, blank facet labels and unknown bracket/sort
    /// names are ignored.
    pub fn from_search_params(params: &str) -> Self {
        let mut query = Self::new();
        let params = params.strip_prefix('?').unwrap_or(params);

        for (key, value) in form_urlencoded::parse(params.as_bytes()) {
            match key.as_ref() {
                "category" => {
                    if let Ok(category) = Category::parse(&value) {
                        query.categories.insert(category);
                    }
                }
                "material" => {
                    if let Ok(material) = Material::parse(&value) {
                        query.materials.insert(material);
                    }
                }
                "price" => query.price_bracket = PriceBracket::parse_lenient(&value),
                "sort" => query.sort_key = SortKey::parse_lenient(&value),
                other => tracing::debug!(key = other, "ignoring unknown search param"),
            }
        }
        query
    }

    /// Render back to search parameters; the catalog defaults are omitted.
    pub fn to_search_params(&self) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        for category in &self.categories {
            params.append_pair("category", category.as_str());
        }
        for material in &self.materials {
            params.append_pair("material", material.as_str());
        }
        if self.price_bracket != PriceBracket::All {
            params.append_pair("price", self.price_bracket.as_str());
        }
        if self.sort_key != SortKey::Featured {
            params.append_pair("sort", self.sort_key.as_str());
        }
        params.finish()
    }

    /// Flip a category checkbox; returns whether it is now selected.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        if self.categories.remove(&category) {
            false
        } else {
            self.categories.insert(category)
        }
    }

    /// Flip a material checkbox; returns whether it is now selected.
    pub fn toggle_material(&mut self, material: Material) -> bool {
        if self.materials.remove(&material) {
            false
        } else {
            self.materials.insert(material)
        }
    }

    /// "Clear All Filters": drops facets and bracket, keeps the sort key.
    pub fn clear_filters(&mut self) {
        self.categories.clear();
        self.materials.clear();
        self.price_bracket = PriceBracket::All;
    }

    /// Whether any filter is active (sorting alone does not count).
    pub fn is_filtered(&self) -> bool {
        !self.categories.is_empty()
            || !self.materials.is_empty()
            || self.price_bracket != PriceBracket::All
    }

    pub fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(product.category())
    }

    pub fn matches_material(&self, product: &Product) -> bool {
        self.materials.is_empty() || self.materials.contains(product.material())
    }

    pub fn matches_price(&self, product: &Product) -> bool {
        self.price_bracket.contains(product.price().amount())
    }

    /// All active filters hold for `product`.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_material(product)
            && self.matches_price(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries_belong_to_middle() {
        assert_eq!(PriceBracket::of(1999), PriceBracket::Under2000);
        assert_eq!(PriceBracket::of(2000), PriceBracket::From2000To5000);
        assert_eq!(PriceBracket::of(5000), PriceBracket::From2000To5000);
        assert_eq!(PriceBracket::of(5001), PriceBracket::Above5000);
        assert!(!PriceBracket::Under2000.contains(2000));
        assert!(!PriceBracket::Above5000.contains(5000));
        assert!(PriceBracket::All.contains(0));
    }

    #[test]
    fn parses_wire_names_and_aliases() {
        assert_eq!(PriceBracket::parse("under-2000").unwrap(), PriceBracket::Under2000);
        assert_eq!(PriceBracket::parse("2000_to_5000").unwrap(), PriceBracket::From2000To5000);
        assert_eq!("above_5000".parse::<PriceBracket>().unwrap(), PriceBracket::Above5000);
        assert_eq!(SortKey::parse("price-low").unwrap(), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("price_desc").unwrap(), SortKey::PriceDesc);
        assert_eq!("name_asc".parse::<SortKey>().unwrap(), SortKey::NameAsc);
    }

    #[test]
    fn unknown_names_fall_back() {
        assert!(matches!(PriceBracket::parse("cheap"), Err(DomainError::Validation(_))));
        assert_eq!(PriceBracket::parse_lenient("cheap"), PriceBracket::All);
        assert!(SortKey::parse("rating").is_err());
        assert_eq!(SortKey::parse_lenient("rating"), SortKey::Featured);

        let key: SortKey = serde_json::from_str("\"popularity\"").unwrap();
        assert_eq!(key, SortKey::Featured);
        let bracket: PriceBracket = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(bracket, PriceBracket::All);
    }

    #[test]
    fn search_params_build_query() {
        let query = Query::from_search_params(
            "?category=sarees&category=Kurtas&material=silk&price=2000-5000&sort=price-high&utm=x",
        );
        assert_eq!(
            query.categories,
            BTreeSet::from([Category::Sarees, Category::Kurtas])
        );
        assert_eq!(query.materials, BTreeSet::from([Material::Silk]));
        assert_eq!(query.price_bracket, PriceBracket::From2000To5000);
        assert_eq!(query.sort_key, SortKey::PriceDesc);
    }

    #[test]
    fn search_params_ignore_junk() {
        let query = Query::from_search_params("category=&price=bogus&sort&&");
        assert_eq!(query, Query::new());
        assert!(!query.is_filtered());
        assert_eq!(Query::from_search_params(""), Query::new());
    }

    #[test]
    fn search_params_render_round_trip() {
        let query = Query::for_category(Category::Accessories)
            .with_material(Material::Cotton)
            .with_price_bracket(PriceBracket::Under2000)
            .sorted_by(SortKey::NameAsc);
        let rendered = query.to_search_params();
        assert_eq!(rendered, "category=accessories&material=cotton&price=under-2000&sort=name");
        assert_eq!(Query::from_search_params(&rendered), query);
        assert_eq!(Query::new().to_search_params(), "");
    }

    #[test]
    fn search_params_decode_percent_and_plus() {
        let query =
            Query::from_search_params("category=home%20decor&material=raw+silk&sort=price%2Dlow");
        assert_eq!(
            query.categories,
            BTreeSet::from([Category::Other("home decor".to_string())])
        );
        assert_eq!(
            query.materials,
            BTreeSet::from([Material::Other("raw silk".to_string())])
        );
        assert_eq!(query.sort_key, SortKey::PriceAsc);
    }

    #[test]
    fn search_params_escape_reserved_characters() {
        let query = Query::for_category(Category::parse("silk&cotton").unwrap())
            .with_material(Material::parse("tussar=wild silk").unwrap());
        let rendered = query.to_search_params();
        assert_eq!(rendered, "category=silk%26cotton&material=tussar%3Dwild+silk");
        assert_eq!(Query::from_search_params(&rendered), query);
    }

    #[test]
    fn toggles_flip_selection() {
        let mut query = Query::new();
        assert!(query.toggle_category(Category::Sarees));
        assert!(query.toggle_material(Material::Silk));
        assert!(query.is_filtered());
        assert!(!query.toggle_category(Category::Sarees));
        assert!(!query.toggle_material(Material::Silk));
        assert!(!query.is_filtered());
    }

    #[test]
    fn clear_filters_keeps_sort() {
        let mut query = Query::for_category(Category::Kurtas)
            .with_material(Material::Cotton)
            .with_price_bracket(PriceBracket::Above5000)
            .sorted_by(SortKey::PriceAsc);
        query.clear_filters();
        assert!(!query.is_filtered());
        assert_eq!(query.sort_key, SortKey::PriceAsc);
    }

    #[test]
    fn sorting_alone_is_not_filtering() {
        assert!(!Query::new().sorted_by(SortKey::NameAsc).is_filtered());
        assert!(Query::new().with_price_bracket(PriceBracket::Under2000).is_filtered());
    }

    #[test]
    fn query_json_uses_wire_names() {
        let query = Query::for_category(Category::Sarees).sorted_by(SortKey::PriceAsc);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["categories"], serde_json::json!(["sarees"]));
        assert_eq!(json["priceBracket"], "all");
        assert_eq!(json["sortKey"], "price-low");

        let partial: Query = serde_json::from_str(r#"{"materials": ["cotton"]}"#).unwrap();
        assert_eq!(partial, Query::new().with_material(Material::Cotton));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: every price lands in exactly one concrete bracket.
            #[test]
            fn brackets_partition_prices(amount in 0u64..1_000_000) {
                let hits = PriceBracket::RANGES
                    .iter()
                    .filter(|b| b.contains(amount))
                    .count();
                prop_assert_eq!(hits, 1);
                prop_assert!(PriceBracket::All.contains(amount));
            }
        }
    }
}
