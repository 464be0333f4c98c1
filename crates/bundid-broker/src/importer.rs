//! Copying assertion attributes into user session notes.
//!
//! Each importer instance copies one attribute. The value ends up under
//! `<prefix><session.attribute>`; if BundID annotated the attribute with a
//! trust level, the level's authn context class reference is stored next to
//! it under `<prefix><session.attribute>-verified-level`.

use std::fmt;

use bundid_spi::{BrokeredIdentityContext, IdentityProviderMapperModel};
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeLocator;
use crate::error::{BrokerError, BrokerResult};
use crate::mappers::{
    ATTRIBUTE_FRIENDLY_NAME, ATTRIBUTE_NAME, SESSION_ATTRIBUTE, SESSION_ATTRIBUTE_EXCLUDE_FROM_AUTOMAPPER,
    SESSION_ATTRIBUTE_MULTI_VALUE_POLICY, SESSION_ATTRIBUTE_PREFIX,
};

/// Prefix of session notes that are copied into tokens.
pub const BUNDID_SESSION_ATTRIBUTE_PREFIX: &str = "ba.bundid_prop_";

/// Prefix of session notes excluded from the automatic token mapping.
pub const BUNDID_SESSION_ATTRIBUTE_PREFIX_EXCLUDE_FROM_AUTOMAPPER: &str = "ba.";

/// Suffix of the note holding the verified trust level of an attribute.
pub const VERIFIED_LEVEL_SUFFIX: &str = "-verified-level";

/// What to do when an attribute carries more than one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultiValuePolicy {
    /// Keep the first value and log a warning.
    #[default]
    First,
    /// Fail the login.
    Fail,
}

impl MultiValuePolicy {
    /// All policies, in the order offered in the admin console.
    pub const ALL: [Self; 2] = [Self::First, Self::Fail];

    /// Returns the configuration value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "FIRST",
            Self::Fail => "FAIL",
        }
    }

    /// Parses a configuration value, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for MultiValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the attribute to search for from a mapper configuration.
///
/// `attribute.name` takes priority over `attribute.friendly.name`. Blank
/// values count as absent.
#[must_use]
pub fn source_attribute(model: &IdentityProviderMapperModel) -> Option<&str> {
    model
        .get_non_empty(ATTRIBUTE_NAME)
        .or_else(|| model.get_non_empty(ATTRIBUTE_FRIENDLY_NAME))
}

/// Copies one assertion attribute into a user session note.
#[derive(Debug, Clone, Copy)]
pub struct SessionAttributeImporter<'m> {
    model: &'m IdentityProviderMapperModel,
}

impl<'m> SessionAttributeImporter<'m> {
    /// Creates an importer for a mapper configuration.
    #[must_use]
    pub const fn new(model: &'m IdentityProviderMapperModel) -> Self {
        Self { model }
    }

    /// Returns the session note key without prefix.
    #[must_use]
    pub fn destination(&self) -> Option<&'m str> {
        self.model.get_non_empty(SESSION_ATTRIBUTE)
    }

    /// Returns the prefix for the session note keys.
    ///
    /// A configured `session.attribute.prefix` wins. Otherwise the
    /// `excludeFromAutomapper` flag selects between `ba.` and
    /// `ba.bundid_prop_`.
    #[must_use]
    pub fn prefix(&self) -> &'m str {
        if let Some(prefix) = self.model.get_non_empty(SESSION_ATTRIBUTE_PREFIX) {
            return prefix;
        }
        if self.model.get_bool(SESSION_ATTRIBUTE_EXCLUDE_FROM_AUTOMAPPER) {
            BUNDID_SESSION_ATTRIBUTE_PREFIX_EXCLUDE_FROM_AUTOMAPPER
        } else {
            BUNDID_SESSION_ATTRIBUTE_PREFIX
        }
    }

    /// Returns the configured multi-value policy.
    #[must_use]
    pub fn multi_value_policy(&self) -> MultiValuePolicy {
        let Some(value) = self.model.get_non_empty(SESSION_ATTRIBUTE_MULTI_VALUE_POLICY) else {
            return MultiValuePolicy::default();
        };
        MultiValuePolicy::parse(value).unwrap_or_else(|| {
            tracing::warn!(
                mapper = %self.model.name,
                value = %value,
                "Unknown multi-value policy, using FIRST"
            );
            MultiValuePolicy::First
        })
    }

    /// Imports the attribute into the authentication session.
    ///
    /// Returns the stored value, or `None` if nothing was written because no
    /// destination is configured or the assertion lacks the attribute.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::AmbiguousAttribute`] if the attribute has
    /// several values and the policy is [`MultiValuePolicy::Fail`].
    pub fn import(&self, context: &mut BrokeredIdentityContext) -> BrokerResult<Option<String>> {
        let Some(destination) = self.destination() else {
            return Ok(None);
        };
        let Some(source) = source_attribute(self.model) else {
            tracing::debug!(mapper = %self.model.name, "No attribute name configured");
            return Ok(None);
        };
        let Some(assertion) = context.assertion.as_ref() else {
            tracing::debug!(mapper = %self.model.name, "Brokered identity carries no assertion");
            return Ok(None);
        };

        let locator = AttributeLocator::new(assertion);
        let Some(first) = locator.first_value(source) else {
            return Ok(None);
        };
        if first.is_ambiguous() {
            match self.multi_value_policy() {
                MultiValuePolicy::First => tracing::warn!(
                    attribute = %source,
                    values = first.total,
                    "Attribute has more than one value. Discarding all but the first."
                ),
                MultiValuePolicy::Fail => {
                    return Err(BrokerError::AmbiguousAttribute {
                        attribute: source.to_string(),
                        count: first.total,
                    });
                }
            }
        }
        let trust_level = locator.find_trust_annotation(source);

        let key = format!("{}{destination}", self.prefix());
        let session = context.authentication_session_mut();
        session.set_user_session_note(&key, &first.value);
        if let Some(level) = trust_level {
            session.set_user_session_note(&format!("{key}{VERIFIED_LEVEL_SUFFIX}"), level.full_name());
        }

        tracing::debug!(
            attribute = %source,
            note = %key,
            trust_level = ?trust_level,
            "Imported BundID attribute"
        );
        Ok(Some(first.value))
    }
}
