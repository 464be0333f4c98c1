//! SAML error types.
//!
//! Provides error types for SAML operations including XML parsing and
//! structural validation of protocol messages.

use thiserror::Error;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML protocol errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Missing required element or attribute.
    #[error("missing required element: {0}")]
    MissingElement(String),
}

impl From<quick_xml::Error> for SamlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SamlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<std::str::Utf8Error> for SamlError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}
