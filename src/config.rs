//! Store configuration.
//!
//! Values come from the process environment (after `.env` is loaded by the
//! binary). Every setting has a default, so an empty environment is valid.

use std::path::PathBuf;
use crate::domain::value_objects::DEFAULT_CURRENCY;

pub const DEFAULT_PRODUCTS_KEY: &str = "moanaa-products";
pub const DEFAULT_ORDERS_KEY: &str = "moanaa-orders";
pub const DEFAULT_TOP_PRODUCTS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory used by the file-backed substrate.
    pub data_dir: PathBuf,
    pub products_key: String,
    pub orders_key: String,
    pub currency: String,
    /// Length of the top-selling list.
    pub top_products: usize,
    /// Load the sample catalog and orders when nothing was saved yet.
    pub seed_when_empty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            products_key: DEFAULT_PRODUCTS_KEY.to_string(),
            orders_key: DEFAULT_ORDERS_KEY.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            top_products: DEFAULT_TOP_PRODUCTS,
            seed_when_empty: true,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(dir) = lookup("STORE_DATA_DIR") { config.data_dir = PathBuf::from(dir); }
        if let Some(key) = lookup("STORE_PRODUCTS_KEY") { config.products_key = key; }
        if let Some(key) = lookup("STORE_ORDERS_KEY") { config.orders_key = key; }
        if let Some(currency) = lookup("STORE_CURRENCY") { config.currency = currency.trim().to_uppercase(); }
        if let Some(raw) = lookup("STORE_TOP_PRODUCTS") {
            config.top_products = raw.trim().parse().map_err(|_| ConfigError::invalid("STORE_TOP_PRODUCTS", &raw, "expected a positive integer"))?;
        }
        if let Some(raw) = lookup("STORE_SEED") {
            config.seed_when_empty = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::invalid("STORE_SEED", &raw, "expected true or false")),
            };
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_products == 0 {
            return Err(ConfigError::invalid("STORE_TOP_PRODUCTS", "0", "must be at least 1"));
        }
        if self.products_key.is_empty() || self.orders_key.is_empty() {
            return Err(ConfigError::invalid("STORE_PRODUCTS_KEY/STORE_ORDERS_KEY", "", "keys must not be empty"));
        }
        if self.products_key == self.orders_key {
            return Err(ConfigError::invalid("STORE_ORDERS_KEY", &self.orders_key, "must differ from the products key"));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::invalid("STORE_CURRENCY", &self.currency, "expected a three-letter currency code"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid { key: &'static str, value: String, reason: &'static str },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: &'static str) -> Self {
        Self::Invalid { key, value: value.to_string(), reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.products_key, "moanaa-products");
        assert_eq!(config.top_products, 3);
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("STORE_TOP_PRODUCTS", "5"),
            ("STORE_CURRENCY", "usd"),
            ("STORE_SEED", "off"),
            ("STORE_DATA_DIR", "/var/lib/moanaa"),
        ]))
        .unwrap();
        assert_eq!(config.top_products, 5);
        assert_eq!(config.currency, "USD");
        assert!(!config.seed_when_empty);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/moanaa"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(StoreConfig::from_lookup(lookup(&[("STORE_TOP_PRODUCTS", "0")])).is_err());
        assert!(StoreConfig::from_lookup(lookup(&[("STORE_TOP_PRODUCTS", "three")])).is_err());
        assert!(StoreConfig::from_lookup(lookup(&[("STORE_SEED", "maybe")])).is_err());
        assert!(StoreConfig::from_lookup(lookup(&[("STORE_ORDERS_KEY", "moanaa-products")])).is_err());
        assert!(StoreConfig::from_lookup(lookup(&[("STORE_CURRENCY", "pound")])).is_err());
    }
}
