//! Identity provider mappers.
//!
//! | Mapper type ID | Mapper |
//! |----------------|--------|
//! | `saml-bundid-session-attribute-idp-mapper` | [`BundIdSessionAttributeMapper`] |
//! | `saml-bundid-session-email-idp-mapper` | [`BundIdSessionEmailMapper`] |
//! | `saml-auth-session-attribute-idp-mapper` | [`AuthSessionAttributeMapper`] |
//! | `saml-retrieval-time-session-attribute-idp-mapper` | [`RetrievalTimestampAttributeMapper`] |

mod auth_session;
mod retrieval_timestamp;
mod session_attribute;
mod session_email;

use bundid_saml::AttributeNameFormat;
use bundid_spi::ConfigProperty;

pub use auth_session::AuthSessionAttributeMapper;
pub use retrieval_timestamp::RetrievalTimestampAttributeMapper;
pub use session_attribute::BundIdSessionAttributeMapper;
pub use session_email::BundIdSessionEmailMapper;

use crate::importer::MultiValuePolicy;

/// Type ID of [`BundIdSessionAttributeMapper`].
pub const SESSION_ATTRIBUTE_IMPORTER_ID: &str = "saml-bundid-session-attribute-idp-mapper";
/// Type ID of [`BundIdSessionEmailMapper`].
pub const SESSION_EMAIL_IMPORTER_ID: &str = "saml-bundid-session-email-idp-mapper";
/// Type ID of [`AuthSessionAttributeMapper`].
pub const AUTH_SESSION_ATTRIBUTE_IMPORTER_ID: &str = "saml-auth-session-attribute-idp-mapper";
/// Type ID of [`RetrievalTimestampAttributeMapper`].
pub const RETRIEVAL_TIMESTAMP_IMPORTER_ID: &str = "saml-retrieval-time-session-attribute-idp-mapper";

// ============================================================================
// Configuration keys
// ============================================================================

/// Attribute name to search for in the assertion.
pub const ATTRIBUTE_NAME: &str = "attribute.name";
/// Friendly name to search for if no name is configured.
pub const ATTRIBUTE_FRIENDLY_NAME: &str = "attribute.friendly.name";
/// OID requested from BundID.
pub const ATTRIBUTE_OID: &str = "attribute.oid";
/// Whether BundID must deliver the attribute.
pub const ATTRIBUTE_REQUIRED: &str = "attribute.required";
/// Name format of the attribute.
pub const ATTRIBUTE_NAME_FORMAT: &str = "attribute.name.format";
/// Session note key to store the value under.
pub const SESSION_ATTRIBUTE: &str = "session.attribute";
/// Custom session note prefix.
pub const SESSION_ATTRIBUTE_PREFIX: &str = "session.attribute.prefix";
/// Store under the `ba.` prefix so the token mapper skips the note.
pub const SESSION_ATTRIBUTE_EXCLUDE_FROM_AUTOMAPPER: &str = "session.attribute.excludeFromAutomapper";
/// Behavior for attributes with several values.
pub const SESSION_ATTRIBUTE_MULTI_VALUE_POLICY: &str = "session.attribute.multiValuePolicy";

fn attribute_name_properties() -> Vec<ConfigProperty> {
    vec![
        ConfigProperty::string(ATTRIBUTE_NAME, "Attribute Name").with_help(
            "Name of attribute to search for in assertion.  You can leave this blank and specify a friendly name instead.",
        ),
        ConfigProperty::string(ATTRIBUTE_FRIENDLY_NAME, "Friendly Name").with_help(
            "Friendly name of attribute to search for in assertion.  You can leave this blank and specify a name instead.",
        ),
    ]
}

fn name_format_property() -> ConfigProperty {
    ConfigProperty::list(
        ATTRIBUTE_NAME_FORMAT,
        "Name Format",
        AttributeNameFormat::ALL
            .iter()
            .map(|format| format.name().to_string())
            .collect(),
    )
    .with_help("Name format of attribute to specify in the RequestedAttribute element. Default to basic format.")
    .with_default(AttributeNameFormat::default().name())
}

fn session_attribute_property() -> ConfigProperty {
    ConfigProperty::string(SESSION_ATTRIBUTE, "Session Attribute Name")
        .with_help("Session attribute name to store saml attribute.")
}

/// Configuration of the BundID session attribute importers.
fn bundid_importer_properties() -> Vec<ConfigProperty> {
    let mut properties = attribute_name_properties();
    properties.extend([
        ConfigProperty::string(ATTRIBUTE_OID, "OID")
            .with_help("Attribute-OID for RequestedAttributes. Check BundID-Documentation."),
        ConfigProperty::boolean(ATTRIBUTE_REQUIRED, "Required?")
            .with_help("Request the attribute as required from BundID."),
        name_format_property(),
        session_attribute_property(),
        ConfigProperty::string(SESSION_ATTRIBUTE_PREFIX, "Session Attribute Prefix")
            .with_help("Optional custom prefix."),
        ConfigProperty::boolean(
            SESSION_ATTRIBUTE_EXCLUDE_FROM_AUTOMAPPER,
            "Session Attribute exclude from automapping.",
        )
        .with_help("Exclude from automatic mapping with the BundID protocol mapper."),
        ConfigProperty::list(
            SESSION_ATTRIBUTE_MULTI_VALUE_POLICY,
            "Multiple Values",
            MultiValuePolicy::ALL
                .iter()
                .map(|policy| policy.as_str().to_string())
                .collect(),
        )
        .with_help("FIRST keeps the first value and logs a warning, FAIL aborts the login.")
        .with_default(MultiValuePolicy::default().as_str()),
    ]);
    properties
}
