//! Broker extension error types.

use bundid_saml::SamlError;
use bundid_spi::SpiError;
use thiserror::Error;

/// Errors raised by the BundID broker extensions.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The vendor extension block could not be written.
    #[error("failed to serialize BundID extension: {0}")]
    ExtensionSerialization(String),

    /// An extension element of the request could not be read.
    #[error("failed to deserialize BundID extension: {0}")]
    ExtensionDeserialization(String),

    /// An attribute carries more than one value and the mapper is configured
    /// to reject that.
    #[error("attribute '{attribute}' has {count} values")]
    AmbiguousAttribute {
        /// Attribute name that was searched for.
        attribute: String,
        /// Number of values found.
        count: usize,
    },

    /// SAML message error.
    #[error(transparent)]
    Saml(#[from] SamlError),

    /// Host platform error.
    #[error(transparent)]
    Spi(#[from] SpiError),
}

impl BrokerError {
    /// Checks if this error concerns the extension block.
    #[must_use]
    pub const fn is_extension_error(&self) -> bool {
        matches!(
            self,
            Self::ExtensionSerialization(_) | Self::ExtensionDeserialization(_)
        )
    }
}

impl From<BrokerError> for SpiError {
    fn from(err: BrokerError) -> Self {
        match err {
            BrokerError::Spi(inner) => inner,
            BrokerError::Saml(inner) => Self::Saml(inner),
            other => Self::Mapper(other.to_string()),
        }
    }
}

/// Result type for broker extension operations.
pub type BrokerResult<T> = Result<T, BrokerError>;
