//! BundID authentication preprocessor.
//!
//! Runs once per outgoing `AuthnRequest`, right before it is sent to the
//! broker:
//!
//! 1. Extracts the identity provider alias from the assertion consumer
//!    service URL (`.../broker/{alias}/endpoint`).
//! 2. Skips providers other than the configured one.
//! 3. Requests the STORK level asked for by the client, raised to the
//!    configured minimum, with comparison `minimum`.
//! 4. Lets every mapper configured on the provider that can update requests
//!    add its requested attribute.
//! 5. Attaches display information if configured.
//!
//! Step 4 runs the mappers one after another. Each performs a full
//! read-modify-write of the extension block.

use std::sync::{Arc, LazyLock};

use bundid_saml::{AuthnRequest, RequestedAuthnContext};
use bundid_spi::{
    AuthenticationSessionModel, FactoryConfig, IdentityProviderMapperRegistry,
    SamlAuthenticationPreprocessor, SpiResult,
};
use regex::Regex;

use crate::config::PreprocessorConfig;
use crate::error::BrokerResult;
use crate::extension::AuthenticationRequest;
use crate::trust_level::AuthnLevel;

/// Provider id of the preprocessor.
pub const PROVIDER_ID: &str = "bundid-protocol";

static BROKER_ENDPOINT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*/broker/(.+)/endpoint.*$")
        .expect("broker endpoint path is a valid regex pattern")
});

/// Extracts the identity provider alias from an assertion consumer service URL.
///
/// Absolute URLs are matched on their path. Anything else is matched as is,
/// minus query and fragment. The path is percent-decoded before matching.
#[must_use]
pub fn identity_provider_from_acs_url(acs_url: &str) -> Option<String> {
    let raw_path = match url::Url::parse(acs_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => acs_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    let path = urlencoding::decode(&raw_path)
        .map_or_else(|_| raw_path.clone(), std::borrow::Cow::into_owned);

    BROKER_ENDPOINT_PATH
        .captures(&path)
        .and_then(|captures| captures.get(1))
        .map(|alias| alias.as_str().to_string())
}

/// Adds BundID specific content to outgoing login requests.
#[derive(Debug, Clone)]
pub struct BundIdAuthenticationPreprocessor {
    config: PreprocessorConfig,
    registry: Arc<IdentityProviderMapperRegistry>,
}

impl BundIdAuthenticationPreprocessor {
    /// Creates a preprocessor.
    #[must_use]
    pub const fn new(
        config: PreprocessorConfig,
        registry: Arc<IdentityProviderMapperRegistry>,
    ) -> Self {
        Self { config, registry }
    }

    /// Creates a preprocessor configured from a factory scope.
    #[must_use]
    pub fn from_scope(
        scope: &dyn FactoryConfig,
        registry: Arc<IdentityProviderMapperRegistry>,
    ) -> Self {
        Self::new(PreprocessorConfig::from_scope(scope), registry)
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Updates a login request in place.
    ///
    /// Requests for other identity providers, or with an assertion consumer
    /// service URL that does not point at a broker endpoint, are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension block cannot be read or written or
    /// a mapper fails to update the request. The request may be partially
    /// updated in that case and must not be sent.
    pub fn update_login_request(
        &self,
        request: &mut AuthnRequest,
        session: &dyn AuthenticationSessionModel,
    ) -> BrokerResult<()> {
        let Some(idp) = request
            .assertion_consumer_service_url
            .as_deref()
            .and_then(identity_provider_from_acs_url)
        else {
            tracing::warn!(
                request_id = %request.id,
                acs_url = ?request.assertion_consumer_service_url,
                "Cannot determine identity provider from assertion consumer service URL"
            );
            return Ok(());
        };

        if !self.config.is_active_for(&idp) {
            tracing::trace!(
                idp = %idp,
                active_for = %self.config.active_for_idp,
                "Skipping login request for other identity provider"
            );
            return Ok(());
        }

        let requested = session.requested_level_of_authentication();
        let effective = self
            .config
            .minimum_stork_level
            .map_or(requested, |minimum| requested.max(minimum));
        let level = AuthnLevel::from_level_of_authentication(effective);
        request.requested_authn_context = Some(RequestedAuthnContext::minimum(level.full_name()));
        tracing::debug!(
            idp = %idp,
            requested,
            effective,
            level = %level,
            "Requesting authentication level"
        );

        let realm = session.realm();
        for model in realm.identity_provider_mappers_by_alias(&idp) {
            let Some(mapper) = self.registry.get(&model.identity_provider_mapper) else {
                tracing::debug!(
                    mapper = %model.name,
                    mapper_type = %model.identity_provider_mapper,
                    "Skipping unknown mapper type"
                );
                continue;
            };
            if let Some(updater) = mapper.as_request_updater() {
                updater.update_request(model, request)?;
            }
        }

        if let Some(display_information) = self.config.display_information() {
            AuthenticationRequest::modify(request, |extension| {
                extension.set_display_information(display_information);
            })?;
        }

        Ok(())
    }
}

impl SamlAuthenticationPreprocessor for BundIdAuthenticationPreprocessor {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn before_sending_login_request(
        &self,
        mut request: AuthnRequest,
        auth_session: &dyn AuthenticationSessionModel,
    ) -> SpiResult<AuthnRequest> {
        self.update_login_request(&mut request, auth_session)?;
        Ok(request)
    }
}
