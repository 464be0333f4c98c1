//! SAML 2.0 constants and URIs.
//!
//! Attribute name formats offered by the requested attribute mapper.

// ============================================================================
// Attribute Name Formats
// ============================================================================

/// SAML attribute name formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeNameFormat {
    /// Basic name format.
    #[default]
    Basic,
    /// URI name format.
    Uri,
    /// Unspecified name format.
    Unspecified,
}

impl AttributeNameFormat {
    /// All formats in the order they are offered to administrators.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Uri, Self::Unspecified];

    /// Returns the URI for this name format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Basic => "urn:oasis:names:tc:SAML:2.0:attrname-format:basic",
            Self::Uri => "urn:oasis:names:tc:SAML:2.0:attrname-format:uri",
            Self::Unspecified => "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified",
        }
    }

    /// Returns the symbolic name used in mapper configuration.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Basic => "ATTRIBUTE_FORMAT_BASIC",
            Self::Uri => "ATTRIBUTE_FORMAT_URI",
            Self::Unspecified => "ATTRIBUTE_FORMAT_UNSPECIFIED",
        }
    }

    /// Parses a format from its symbolic name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }
}
