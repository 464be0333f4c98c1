//! Identity provider mapper SPI.
//!
//! Identity provider mappers run while a brokered login is processed. The
//! broker calls every mapper instance configured on the provider at three
//! points of the flow, described by [`FederationEvent`].
//!
//! ## Design
//!
//! - [`IdentityProviderMapper`] defines the contract for mappers
//! - [`SamlAuthnRequestUpdater`] is an optional capability for mappers that
//!   contribute to the outgoing SAML `AuthnRequest`
//! - [`ConfigProperty`] describes the settings a mapper accepts
//! - [`IdentityProviderMapperRegistry`] manages mapper registration and lookup

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bundid_saml::AuthnRequest;
use serde::{Deserialize, Serialize};

use crate::context::BrokeredIdentityContext;
use crate::error::{SpiError, SpiResult};
use crate::realm::IdentityProviderMapperModel;

/// Configuration property definition for mapper UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigProperty {
    /// Property name (config key).
    pub name: String,

    /// Display label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Property type.
    pub property_type: ConfigPropertyType,

    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Whether the property is required.
    #[serde(default)]
    pub required: bool,

    /// Options for select types.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
}

/// Configuration property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPropertyType {
    /// Text input.
    String,
    /// Boolean checkbox.
    Boolean,
    /// Select dropdown.
    List,
}

impl ConfigProperty {
    /// Creates a new string property.
    #[must_use]
    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type: ConfigPropertyType::String,
            default_value: None,
            required: false,
            options: vec![],
        }
    }

    /// Creates a new boolean property.
    #[must_use]
    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            property_type: ConfigPropertyType::Boolean,
            default_value: Some("false".to_string()),
            ..Self::string(name, label)
        }
    }

    /// Creates a new list (select) property.
    #[must_use]
    pub fn list(name: impl Into<String>, label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            property_type: ConfigPropertyType::List,
            options,
            ..Self::string(name, label)
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Marks the property as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// How brokered user data is synchronized on subsequent logins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncMode {
    /// Behavior of mappers created before sync modes existed.
    Legacy,
    /// Import data only when the user is first created.
    Import,
    /// Update data on every login.
    Force,
}

impl SyncMode {
    /// All sync modes.
    pub const ALL: [Self; 3] = [Self::Legacy, Self::Import, Self::Force];
}

/// Point of the brokered login flow at which a mapper is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FederationEvent {
    /// The assertion was received, before any user is looked up.
    Preprocess,
    /// An existing user is linked to the brokered identity again.
    UpdateBrokeredUser,
    /// A new user is created from the brokered identity.
    ImportNewUser,
}

impl FederationEvent {
    /// Returns the event name used in log output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preprocess => "preprocess",
            Self::UpdateBrokeredUser => "update-brokered-user",
            Self::ImportNewUser => "import-new-user",
        }
    }
}

impl fmt::Display for FederationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability of mappers that modify the outgoing SAML `AuthnRequest`.
///
/// Invoked sequentially for every configured mapper instance before the
/// request is sent.
pub trait SamlAuthnRequestUpdater: Send + Sync {
    /// Updates the outgoing request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request cannot be updated. The login attempt
    /// is aborted.
    fn update_request(
        &self,
        model: &IdentityProviderMapperModel,
        request: &mut AuthnRequest,
    ) -> SpiResult<()>;
}

/// Identity provider mapper.
///
/// A mapper type is registered once; the broker calls it with the
/// configuration of each mapper instance of that type.
pub trait IdentityProviderMapper: Send + Sync {
    /// Returns the mapper type ID.
    fn id(&self) -> &'static str;

    /// Returns the category shown in the admin console.
    fn display_category(&self) -> &'static str;

    /// Returns the display name of the mapper type.
    fn display_type(&self) -> &'static str;

    /// Returns the help text.
    fn help_text(&self) -> &'static str;

    /// Returns the identity provider types this mapper works with.
    fn compatible_providers(&self) -> &'static [&'static str] {
        &["saml"]
    }

    /// Returns configuration properties for this mapper.
    fn config_properties(&self) -> Vec<ConfigProperty>;

    /// Checks whether the mapper supports a sync mode.
    fn supports_sync_mode(&self, _mode: SyncMode) -> bool {
        true
    }

    /// Handles a federation event.
    ///
    /// The three lifecycle entry points delegate here.
    ///
    /// ## Errors
    ///
    /// Returns an error if the mapper cannot process the brokered identity.
    fn on_federation_event(
        &self,
        _event: FederationEvent,
        _model: &IdentityProviderMapperModel,
        _context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        Ok(())
    }

    /// Called after the assertion was received.
    ///
    /// ## Errors
    ///
    /// See [`IdentityProviderMapper::on_federation_event`].
    fn preprocess_federated_identity(
        &self,
        model: &IdentityProviderMapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        self.on_federation_event(FederationEvent::Preprocess, model, context)
    }

    /// Called when an existing user logs in through the provider again.
    ///
    /// ## Errors
    ///
    /// See [`IdentityProviderMapper::on_federation_event`].
    fn update_brokered_user(
        &self,
        model: &IdentityProviderMapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        self.on_federation_event(FederationEvent::UpdateBrokeredUser, model, context)
    }

    /// Called when a new user is imported from the provider.
    ///
    /// ## Errors
    ///
    /// See [`IdentityProviderMapper::on_federation_event`].
    fn import_new_user(
        &self,
        model: &IdentityProviderMapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        self.on_federation_event(FederationEvent::ImportNewUser, model, context)
    }

    /// Returns the request update capability, if the mapper has one.
    fn as_request_updater(&self) -> Option<&dyn SamlAuthnRequestUpdater> {
        None
    }
}

/// Registry of identity provider mapper types.
#[derive(Default, Clone)]
pub struct IdentityProviderMapperRegistry {
    /// Registered mappers by ID.
    mappers: HashMap<String, Arc<dyn IdentityProviderMapper>>,
}

impl fmt::Debug for IdentityProviderMapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityProviderMapperRegistry")
            .field("mappers", &self.mapper_ids())
            .finish()
    }
}

impl IdentityProviderMapperRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapper type, replacing any mapper with the same ID.
    pub fn register(&mut self, mapper: Arc<dyn IdentityProviderMapper>) {
        self.mappers.insert(mapper.id().to_string(), mapper);
    }

    /// Gets a mapper by type ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn IdentityProviderMapper>> {
        self.mappers.get(id)
    }

    /// Returns the registered mapper IDs, sorted.
    #[must_use]
    pub fn mapper_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.mappers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered mappers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Checks if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Invokes the mapper instance described by `model` for an event.
    ///
    /// ## Errors
    ///
    /// Returns [`SpiError::ProviderNotFound`] if the mapper type is not
    /// registered, or the mapper's own error.
    pub fn dispatch(
        &self,
        event: FederationEvent,
        model: &IdentityProviderMapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        let mapper = self
            .get(&model.identity_provider_mapper)
            .ok_or_else(|| SpiError::ProviderNotFound(model.identity_provider_mapper.clone()))?;

        tracing::trace!(
            mapper = %model.name,
            mapper_type = %model.identity_provider_mapper,
            event = %event,
            "Invoking identity provider mapper"
        );

        match event {
            FederationEvent::Preprocess => mapper.preprocess_federated_identity(model, context),
            FederationEvent::UpdateBrokeredUser => mapper.update_brokered_user(model, context),
            FederationEvent::ImportNewUser => mapper.import_new_user(model, context),
        }
    }
}
