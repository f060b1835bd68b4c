//! Book configuration.
//!
//! Only sizing and display defaults live here; book semantics are fixed.
//!
//! ## Environment
//!
//! | Variable                    | Field            | Default |
//! |-----------------------------|------------------|---------|
//! | `LIMIT_BOOK_ORDER_CAPACITY` | `order_capacity` | 4096    |
//! | `LIMIT_BOOK_DEFAULT_DEPTH`  | `default_depth`  | 10      |
//!
//! Unset variables keep their defaults.

use config::{Config, Environment, Map};
use serde::Deserialize;

use crate::error::BookError;

/// Prefix shared by every environment variable the book reads
pub const ENV_PREFIX: &str = "LIMIT_BOOK";

/// Sizing and display settings for an [`OrderBook`](crate::orderbook::OrderBook)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Orders to pre-allocate in the slab and locator
    pub order_capacity: usize,

    /// Levels per side shown when no depth is given
    pub default_depth: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: 4096,
            default_depth: 10,
        }
    }
}

impl BookConfig {
    /// Defaults overridden by any `LIMIT_BOOK_*` variables in the process environment
    pub fn from_env() -> Result<Self, BookError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`BookConfig::from_env`], reading `vars` instead of the process environment
    ///
    /// ```
    /// use limit_book::BookConfig;
    ///
    /// let config = BookConfig::from_vars([("LIMIT_BOOK_DEFAULT_DEPTH", "3")]).unwrap();
    /// assert_eq!(config.default_depth, 3);
    /// ```
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, BookError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self, BookError> {
        let settings = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = BookConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, BookConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = BookConfig::from_vars([
            ("LIMIT_BOOK_ORDER_CAPACITY", "100000"),
            ("LIMIT_BOOK_DEFAULT_DEPTH", "5"),
        ])
        .unwrap();
        assert_eq!(config.order_capacity, 100_000);
        assert_eq!(config.default_depth, 5);
    }

    #[test]
    fn test_partial_override_keeps_other_default() {
        let config = BookConfig::from_vars([("LIMIT_BOOK_DEFAULT_DEPTH", "2")]).unwrap();
        assert_eq!(config.default_depth, 2);
        assert_eq!(config.order_capacity, BookConfig::default().order_capacity);
    }

    #[test]
    fn test_other_prefixes_ignored() {
        let config = BookConfig::from_vars([("OTHER_DEFAULT_DEPTH", "99")]).unwrap();
        assert_eq!(config, BookConfig::default());
    }

    #[test]
    fn test_unparsable_value() {
        let err = BookConfig::from_vars([("LIMIT_BOOK_DEFAULT_DEPTH", "deep")]).unwrap_err();
        assert!(matches!(err, BookError::InvalidConfig(_)), "got {err:?}");
    }
}
