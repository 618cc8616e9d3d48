//! Environment configuration for catalog consumers.

use std::path::PathBuf;

use crate::engine::DEFAULT_RELATED_LIMIT;
use crate::loader::CatalogLoadError;
use crate::provider::InMemoryCatalog;
use crate::seed;

pub const CATALOG_PATH_ENV: &str = "HASTKALA_CATALOG_PATH";
pub const RELATED_LIMIT_ENV: &str = "HASTKALA_RELATED_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in seed catalog when `None`.
    pub catalog_path: Option<PathBuf>,
    pub related_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(CATALOG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(RELATED_LIMIT_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(limit) => config.related_limit = limit,
                Err(_) => tracing::warn!(
                    value = %raw,
                    fallback = DEFAULT_RELATED_LIMIT,
                    "{RELATED_LIMIT_ENV} is not a number; using default"
                ),
            }
        }

        config
    }

    /// Load the configured catalog.
    pub fn load_catalog(&self) -> Result<InMemoryCatalog, CatalogLoadError> {
        match &self.catalog_path {
            Some(path) => InMemoryCatalog::from_json_file(path),
            None => {
                tracing::info!("{CATALOG_PATH_ENV} not set; using built-in catalog");
                seed::catalog()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = CatalogConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.related_limit, 3);
        assert_eq!(config.load_catalog().unwrap().len(), 6);
    }

    #[test]
    fn reads_overrides() {
        let config = CatalogConfig::from_lookup(lookup(&[
            (CATALOG_PATH_ENV, "/srv/catalog.json"),
            (RELATED_LIMIT_ENV, " 5 "),
        ]));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.related_limit, 5);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = CatalogConfig::from_lookup(lookup(&[
            (CATALOG_PATH_ENV, "  "),
            (RELATED_LIMIT_ENV, "three"),
        ]));
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let config = CatalogConfig {
            catalog_path: Some(PathBuf::from("/nope/catalog.json")),
            ..CatalogConfig::default()
        };
        assert!(matches!(config.load_catalog(), Err(CatalogLoadError::Io { .. })));
    }
}
