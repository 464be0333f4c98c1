//! # bundid-broker
//!
//! Extensions that let the identity broker talk to BundID, the German
//! federal identity service, over SAML.
//!
//! ## Outgoing requests
//!
//! [`BundIdAuthenticationPreprocessor`] runs before a login request is sent.
//! It requests a STORK assurance level and assembles the AKDB
//! `AuthenticationRequest` extension: the attributes every configured
//! [`BundIdSessionAttributeMapper`] asks for, plus optional display
//! information for the BundID login page.
//!
//! ## Incoming assertions
//!
//! The identity provider mappers in [`mappers`] copy assertion attributes
//! into session notes, together with the trust level BundID reports for
//! each attribute. [`BundIdProtocolMapper`] later turns those notes into
//! token claims.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bundid_broker::{BundIdAuthenticationPreprocessor, builtin_mapper_registry};
//! use bundid_spi::EnvScope;
//!
//! let scope = EnvScope::new("saml-authentication-preprocessor", "bundid-protocol");
//! let preprocessor =
//!     BundIdAuthenticationPreprocessor::from_scope(&scope, Arc::new(builtin_mapper_registry()));
//! let request = preprocessor.before_sending_login_request(request, &auth_session)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attribute;
pub mod config;
pub mod contributor;
pub mod error;
pub mod extension;
pub mod importer;
pub mod mappers;
pub mod preprocessor;
pub mod protocol_mapper;
pub mod trust_level;

use std::sync::Arc;

use bundid_spi::IdentityProviderMapperRegistry;

pub use attribute::{AttributeLocator, FirstValue, NameMatching};
pub use config::PreprocessorConfig;
pub use error::{BrokerError, BrokerResult};
pub use extension::{
    AuthenticationRequest, DisplayInformation, DisplayInformationVersion, RequestedAttribute,
};
pub use importer::{MultiValuePolicy, SessionAttributeImporter};
pub use mappers::{
    AuthSessionAttributeMapper, BundIdSessionAttributeMapper, BundIdSessionEmailMapper,
    RetrievalTimestampAttributeMapper,
};
pub use preprocessor::BundIdAuthenticationPreprocessor;
pub use protocol_mapper::{BundIdProtocolMapper, ProtocolMapperModel, TokenType};
pub use trust_level::AuthnLevel;

/// Creates a registry with all BundID identity provider mappers.
#[must_use]
pub fn builtin_mapper_registry() -> IdentityProviderMapperRegistry {
    let mut registry = IdentityProviderMapperRegistry::new();
    registry.register(Arc::new(BundIdSessionAttributeMapper));
    registry.register(Arc::new(BundIdSessionEmailMapper));
    registry.register(Arc::new(AuthSessionAttributeMapper));
    registry.register(Arc::new(RetrievalTimestampAttributeMapper));
    registry
}
