//! SPI error types.

use bundid_saml::SamlError;
use thiserror::Error;

/// Error type for SPI operations.
#[derive(Debug, Error)]
pub enum SpiError {
    /// Provider not found.
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A mapper failed while processing a federation event or request.
    #[error("mapper failed: {0}")]
    Mapper(String),

    /// SAML message error.
    #[error(transparent)]
    Saml(#[from] SamlError),
}

impl SpiError {
    /// Checks if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::ProviderNotFound(_))
    }
}

/// Result type for SPI operations.
pub type SpiResult<T> = Result<T, SpiError>;
