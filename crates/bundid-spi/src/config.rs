//! Provider factory configuration.
//!
//! Factories receive their configuration through a [`FactoryConfig`] scope.
//! Keys are the camel-case names shown in the admin console
//! (`activeForIdp`, `minimumStorkLevel`, ...).

use std::collections::HashMap;

/// Configuration interface for factory initialization.
pub trait FactoryConfig: Send + Sync {
    /// Gets a string configuration value.
    fn get(&self, key: &str) -> Option<&str>;

    /// Gets an integer configuration value.
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Gets a boolean configuration value.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// Configuration scope backed by explicit key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct MapScope {
    values: HashMap<String, String>,
}

impl MapScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl FactoryConfig for MapScope {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for MapScope {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

/// Configuration scope backed by environment variables.
///
/// Variables follow the `KC_SPI_<SPI>_<PROVIDER>_<KEY>` convention, so the
/// `activeForIdp` key of the `bundid-protocol` provider of the
/// `saml-authentication-preprocessor` SPI is read from
/// `KC_SPI_SAML_AUTHENTICATION_PREPROCESSOR_BUNDID_PROTOCOL_ACTIVE_FOR_IDP`.
///
/// The matching variables are captured once when the scope is created.
#[derive(Debug, Clone)]
pub struct EnvScope {
    prefix: String,
    values: HashMap<String, String>,
}

impl EnvScope {
    /// Captures the variables of the current process environment.
    #[must_use]
    pub fn new(spi: &str, provider: &str) -> Self {
        Self::from_vars(spi, provider, std::env::vars())
    }

    /// Builds the scope from an explicit variable set.
    #[must_use]
    pub fn from_vars<I>(spi: &str, provider: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("KC_SPI_{}_{}_", env_segment(spi), env_segment(provider));
        let values = vars
            .into_iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .collect();
        Self { prefix, values }
    }

    /// Returns the variable name a configuration key is read from.
    #[must_use]
    pub fn variable_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, env_segment(key))
    }
}

impl FactoryConfig for EnvScope {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&self.variable_name(key)).map(String::as_str)
    }
}

/// Converts `camelCase`, `kebab-case` and `dotted.names` into `SCREAMING_SNAKE_CASE`.
fn env_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c.to_ascii_uppercase());
        } else {
            out.push('_');
            prev_lower = false;
        }
    }
    out
}
