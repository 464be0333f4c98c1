//! Realm and identity provider mapper configuration models.

use std::collections::HashMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuration of one identity provider mapper instance.
///
/// Administrators attach any number of mapper instances to an identity
/// provider. Each instance names its mapper type and carries a flat
/// string map of settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProviderMapperModel {
    /// Unique identifier for this mapper instance.
    pub id: Uuid,

    /// Mapper name (user-defined).
    pub name: String,

    /// Alias of the identity provider this mapper belongs to.
    pub identity_provider_alias: String,

    /// Mapper type ID (e.g., `"saml-bundid-session-attribute-idp-mapper"`).
    pub identity_provider_mapper: String,

    /// Configuration key-value pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl IdentityProviderMapperModel {
    /// Creates a new mapper configuration.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        identity_provider_alias: impl Into<String>,
        mapper_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            identity_provider_alias: identity_provider_alias.into(),
            identity_provider_mapper: mapper_type.into(),
            config: HashMap::new(),
        }
    }

    /// Sets a configuration value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Gets a non-blank configuration value.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Gets a configuration value as a boolean.
    ///
    /// Only `"true"` (in any case) is true; anything else, including a
    /// missing key, is false.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Gets a configuration value, returning a default if not present.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

/// Read access to the realm the current login belongs to.
pub trait RealmModel: Send + Sync + Debug {
    /// Returns the realm name.
    fn name(&self) -> &str;

    /// Returns the mapper instances configured for an identity provider, in
    /// configuration order.
    fn identity_provider_mappers_by_alias(&self, alias: &str) -> Vec<&IdentityProviderMapperModel>;
}

/// In-memory realm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Realm {
    /// Unique realm identifier.
    pub id: Uuid,

    /// Realm name.
    pub name: String,

    /// Identity provider mappers across all providers of the realm.
    #[serde(default)]
    pub identity_provider_mappers: Vec<IdentityProviderMapperModel>,
}

impl Realm {
    /// Creates an empty realm.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            identity_provider_mappers: Vec::new(),
        }
    }

    /// Adds an identity provider mapper.
    #[must_use]
    pub fn with_mapper(mut self, mapper: IdentityProviderMapperModel) -> Self {
        self.identity_provider_mappers.push(mapper);
        self
    }
}

impl RealmModel for Realm {
    fn name(&self) -> &str {
        &self.name
    }

    fn identity_provider_mappers_by_alias(&self, alias: &str) -> Vec<&IdentityProviderMapperModel> {
        self.identity_provider_mappers
            .iter()
            .filter(|m| m.identity_provider_alias == alias)
            .collect()
    }
}
