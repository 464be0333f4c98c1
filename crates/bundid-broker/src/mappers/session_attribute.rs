//! BundID session attribute importer.

use bundid_saml::AuthnRequest;
use bundid_spi::{
    BrokeredIdentityContext, ConfigProperty, FederationEvent, IdentityProviderMapper,
    IdentityProviderMapperModel, SamlAuthnRequestUpdater, SpiResult,
};

use super::{SESSION_ATTRIBUTE_IMPORTER_ID, bundid_importer_properties};
use crate::contributor::contribute_from_model;
use crate::importer::SessionAttributeImporter;

/// Requests one attribute from BundID and copies it into a user session note.
///
/// Before the login request is sent, the configured OID is added to the
/// request's `RequestedAttributes`. When the assertion comes back, the
/// attribute value and its trust level are stored in the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundIdSessionAttributeMapper;

impl IdentityProviderMapper for BundIdSessionAttributeMapper {
    fn id(&self) -> &'static str {
        SESSION_ATTRIBUTE_IMPORTER_ID
    }

    fn display_category(&self) -> &'static str {
        "BundID Session Attribute Importer"
    }

    fn display_type(&self) -> &'static str {
        "BundID Session Attribute Importer"
    }

    fn help_text(&self) -> &'static str {
        "Import declared saml attribute if it exists in assertion into the specified session attribute."
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
        tracing::trace!(mapper = %model.name, event = %event, "Importing BundID session attribute");
        SessionAttributeImporter::new(model).import(context)?;
        Ok(())
    }

    fn as_request_updater(&self) -> Option<&dyn SamlAuthnRequestUpdater> {
        Some(self)
    }
}

impl SamlAuthnRequestUpdater for BundIdSessionAttributeMapper {
    fn update_request(
        &self,
        model: &IdentityProviderMapperModel,
        request: &mut AuthnRequest,
    ) -> SpiResult<()> {
        contribute_from_model(model, request)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bundid_saml::{Assertion, Attribute, AttributeStatement};
    use bundid_spi::{AuthenticationSession, Realm, SyncMode};

    use super::*;
    use crate::extension::AuthenticationRequest;
    use crate::mappers::{ATTRIBUTE_NAME, ATTRIBUTE_OID, SESSION_ATTRIBUTE, SESSION_ATTRIBUTE_PREFIX};
    use crate::trust_level::trust_level_qname;

    fn model() -> IdentityProviderMapperModel {
        IdentityProviderMapperModel::new("given-name", "bundid", SESSION_ATTRIBUTE_IMPORTER_ID)
            .with_config(ATTRIBUTE_NAME, "attrName")
            .with_config(SESSION_ATTRIBUTE, "targetAttribute")
    }

    fn context() -> BrokeredIdentityContext {
        let assertion = Assertion::new("https://id.bund.de").with_attribute_statement(
            AttributeStatement::new().with_attribute(
                Attribute::single("attrName", "testValue")
                    .with_other_attribute(trust_level_qname(), "SUBSTANTIELL"),
            ),
        );
        let session = AuthenticationSession::new(Arc::new(Realm::new("test")));
        BrokeredIdentityContext::saml("user", "bundid", assertion, Box::new(session))
    }

    #[test]
    fn metadata() {
        let mapper = BundIdSessionAttributeMapper;
        assert_eq!(mapper.id(), "saml-bundid-session-attribute-idp-mapper");
        assert_eq!(mapper.compatible_providers(), &["saml"]);
        assert!(SyncMode::ALL.iter().all(|mode| mapper.supports_sync_mode(*mode)));
        assert!(mapper.as_request_updater().is_some());
    }

    #[test]
    fn every_lifecycle_event_imports() {
        let mapper = BundIdSessionAttributeMapper;
        let model = model().with_config(SESSION_ATTRIBUTE_PREFIX, "ba.");

        for event in [
            FederationEvent::Preprocess,
            FederationEvent::UpdateBrokeredUser,
            FederationEvent::ImportNewUser,
        ] {
            let mut context = context();
            mapper.on_federation_event(event, &model, &mut context).unwrap();

            let session = context.authentication_session();
            assert_eq!(session.user_session_note("ba.targetAttribute"), Some("testValue"));
            assert_eq!(
                session.user_session_note("ba.targetAttribute-verified-level"),
                Some("STORK-QAA-Level-3")
            );
        }
    }

    #[test]
    fn update_request_adds_requested_attribute() {
        let mapper = BundIdSessionAttributeMapper;
        let model = model().with_config(ATTRIBUTE_OID, "attrOid");
        let mut request = AuthnRequest::new("https://sp.example.com");

        mapper
            .as_request_updater()
            .unwrap()
            .update_request(&model, &mut request)
            .unwrap();

        assert_eq!(request.extensions.as_ref().unwrap().len(), 1);
        let extension = AuthenticationRequest::read_existing(&request).unwrap().unwrap();
        assert_eq!(extension.requested_attributes[0].name, "attrOid");
        assert!(!extension.requested_attributes[0].required);
    }
}
