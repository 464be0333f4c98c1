//! # bundid-spi
//!
//! Service Provider Interface (SPI) contracts between the host identity
//! broker and the BundID extensions.
//!
//! The broker owns sessions, realms and the mapper configuration UI. This
//! crate describes the narrow slice of that surface the extensions use.
//!
//! ## Design
//!
//! - [`AuthenticationSessionModel`] - Notes attached to an in-progress login
//! - [`RealmModel`] - Lookup of the mapper instances configured per provider
//! - [`IdentityProviderMapper`] - Base trait for identity provider mappers
//! - [`SamlAuthnRequestUpdater`] - Optional capability to modify an outgoing
//!   `AuthnRequest`, discovered through [`IdentityProviderMapper::as_request_updater`]
//! - [`IdentityProviderMapperRegistry`] - Mapper type id to instance lookup
//! - [`SamlAuthenticationPreprocessor`] - Hook run before a login request is sent
//! - [`FactoryConfig`] - Provider factory configuration scopes

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod mapper;
pub mod preprocessor;
pub mod realm;
pub mod session;

pub use config::{EnvScope, FactoryConfig, MapScope};
pub use context::BrokeredIdentityContext;
pub use error::{SpiError, SpiResult};
pub use mapper::{
    ConfigProperty, ConfigPropertyType, FederationEvent, IdentityProviderMapper,
    IdentityProviderMapperRegistry, SamlAuthnRequestUpdater, SyncMode,
};
pub use preprocessor::{SAML_AUTHENTICATION_PREPROCESSOR_SPI, SamlAuthenticationPreprocessor};
pub use realm::{IdentityProviderMapperModel, Realm, RealmModel};
pub use session::{
    AuthenticationSession, AuthenticationSessionModel, NO_LOA, REQUESTED_LEVEL_OF_AUTHENTICATION,
};
