//! BundID session e-mail importer.

use bundid_saml::AuthnRequest;
use bundid_spi::{
    BrokeredIdentityContext, ConfigProperty, FederationEvent, IdentityProviderMapper,
    IdentityProviderMapperModel, SamlAuthnRequestUpdater, SpiResult,
};

use super::{SESSION_EMAIL_IMPORTER_ID, bundid_importer_properties};
use crate::contributor::contribute_from_model;
use crate::importer::SessionAttributeImporter;

/// Like [`super::BundIdSessionAttributeMapper`], and additionally uses the
/// imported value as the brokered user's e-mail address.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundIdSessionEmailMapper;

impl IdentityProviderMapper for BundIdSessionEmailMapper {
    fn id(&self) -> &'static str {
        SESSION_EMAIL_IMPORTER_ID
    }

    fn display_category(&self) -> &'static str {
        "BundID Session Email Importer"
    }

    fn display_type(&self) -> &'static str {
        "BundID Session Email Importer"
    }

    fn help_text(&self) -> &'static str {
        "Import declared saml attribute if it exists in assertion into the specified session attribute and use it as e-mail."
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        bundid_importer_properties()
    }

    fn on_federation_event(
        &self,
        event: FederationEvent,
        model: &IdentityProviderMapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        tracing::trace!(mapper = %model.name, event = %event, "Importing BundID e-mail");
        if let Some(email) = SessionAttributeImporter::new(model).import(context)? {
            context.email = Some(email);
        }
        Ok(())
    }

    fn as_request_updater(&self) -> Option<&dyn SamlAuthnRequestUpdater> {
        Some(self)
    }
}

impl SamlAuthnRequestUpdater for BundIdSessionEmailMapper {
    fn update_request(
        &self,
        model: &IdentityProviderMapperModel,
        request: &mut AuthnRequest,
    ) -> SpiResult<()> {
        contribute_from_model(model, request)?;
        Ok(())
    }
}
