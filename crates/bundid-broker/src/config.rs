//! Preprocessor configuration.

use bundid_spi::FactoryConfig;
use serde::{Deserialize, Serialize};

use crate::attribute::eq_ignore_case;
use crate::extension::DisplayInformation;

/// Key of the identity provider alias the preprocessor is active for.
pub const ACTIVE_FOR_IDP: &str = "activeForIdp";
/// Key of the online service identifier shown by BundID.
pub const ONLINE_SERVICE_ID: &str = "onlineServiceId";
/// Key of the organization name shown by BundID.
pub const ORGANIZATION_DISPLAY_NAME: &str = "organizationDisplayName";
/// Key of the lowest STORK level ever requested.
pub const MINIMUM_STORK_LEVEL: &str = "minimumStorkLevel";

/// Default identity provider alias.
pub const DEFAULT_ACTIVE_FOR_IDP: &str = "bundid";

/// Configuration of the BundID authentication preprocessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreprocessorConfig {
    /// Alias of the identity provider to act on (compared ignoring case).
    pub active_for_idp: String,

    /// Online service identifier for the BundID login page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_service_id: Option<String>,

    /// Organization name for the BundID login page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_display_name: Option<String>,

    /// Lower bound for the requested level of authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_stork_level: Option<i32>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            active_for_idp: DEFAULT_ACTIVE_FOR_IDP.to_string(),
            online_service_id: None,
            organization_display_name: None,
            minimum_stork_level: None,
        }
    }
}

impl PreprocessorConfig {
    /// Reads the configuration from a factory scope.
    ///
    /// A `minimumStorkLevel` that is not an integer is ignored.
    #[must_use]
    pub fn from_scope(scope: &dyn FactoryConfig) -> Self {
        let non_blank = |key: &str| {
            scope
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let minimum_stork_level = non_blank(MINIMUM_STORK_LEVEL).and_then(|raw| {
            raw.parse::<i32>()
                .inspect_err(|e| {
                    tracing::warn!(
                        key = MINIMUM_STORK_LEVEL,
                        value = %raw,
                        error = %e,
                        "Ignoring invalid minimum STORK level"
                    );
                })
                .ok()
        });

        Self {
            active_for_idp: non_blank(ACTIVE_FOR_IDP)
                .unwrap_or_else(|| DEFAULT_ACTIVE_FOR_IDP.to_string()),
            online_service_id: non_blank(ONLINE_SERVICE_ID),
            organization_display_name: non_blank(ORGANIZATION_DISPLAY_NAME),
            minimum_stork_level,
        }
    }

    /// Sets the identity provider alias.
    #[must_use]
    pub fn with_active_for_idp(mut self, alias: impl Into<String>) -> Self {
        self.active_for_idp = alias.into();
        self
    }

    /// Sets the online service identifier.
    #[must_use]
    pub fn with_online_service_id(mut self, id: impl Into<String>) -> Self {
        self.online_service_id = Some(id.into());
        self
    }

    /// Sets the organization display name.
    #[must_use]
    pub fn with_organization_display_name(mut self, name: impl Into<String>) -> Self {
        self.organization_display_name = Some(name.into());
        self
    }

    /// Sets the minimum STORK level.
    #[must_use]
    pub const fn with_minimum_stork_level(mut self, level: i32) -> Self {
        self.minimum_stork_level = Some(level);
        self
    }

    /// Checks whether the preprocessor acts on an identity provider.
    #[must_use]
    pub fn is_active_for(&self, alias: &str) -> bool {
        eq_ignore_case(&self.active_for_idp, alias)
    }

    /// Returns the display information to attach, if any value is set.
    #[must_use]
    pub fn display_information(&self) -> Option<DisplayInformation> {
        let online_service_id = self.online_service_id.as_deref().filter(|v| !v.is_empty());
        let organization_display_name = self
            .organization_display_name
            .as_deref()
            .filter(|v| !v.is_empty());
        if online_service_id.is_none() && organization_display_name.is_none() {
            return None;
        }
        Some(DisplayInformation::new(online_service_id, organization_display_name))
    }
}
