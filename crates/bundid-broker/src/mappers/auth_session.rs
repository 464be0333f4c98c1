//! Auth session attribute importer.

use bundid_spi::{
    BrokeredIdentityContext, ConfigProperty, FederationEvent, IdentityProviderMapper,
    IdentityProviderMapperModel, SpiResult,
};

use super::{
    AUTH_SESSION_ATTRIBUTE_IMPORTER_ID, SESSION_ATTRIBUTE, attribute_name_properties,
    name_format_property, session_attribute_property,
};
use crate::attribute::{AttributeLocator, NameMatching};
use crate::importer::source_attribute;

/// Copies an assertion attribute into an authentication flow note.
///
/// Unlike the BundID importers, names are matched exactly, the note key is
/// used as configured and no trust level is recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthSessionAttributeMapper;

impl IdentityProviderMapper for AuthSessionAttributeMapper {
    fn id(&self) -> &'static str {
        AUTH_SESSION_ATTRIBUTE_IMPORTER_ID
    }

    fn display_category(&self) -> &'static str {
        "AuthSession Attribute Importer"
    }

    fn display_type(&self) -> &'static str {
        "AuthSession Attribute Importer"
    }

    fn help_text(&self) -> &'static str {
        "Import declared saml attribute if it exists in assertion into the specified session attribute."
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        let mut properties = attribute_name_properties();
        properties.push(name_format_property());
        properties.push(session_attribute_property());
        properties
    }

    fn on_federation_event(
        &self,
        _event: FederationEvent,
        model: &IdentityProviderMapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        let Some(note) = model.get_non_empty(SESSION_ATTRIBUTE) else {
            return Ok(());
        };
        let (Some(source), Some(assertion)) = (source_attribute(model), context.assertion.as_ref())
        else {
            return Ok(());
        };

        let Some(first) = AttributeLocator::new(assertion)
            .with_matching(NameMatching::Exact)
            .first_value(source)
        else {
            return Ok(());
        };
        if first.is_ambiguous() {
            tracing::warn!(
                attribute = %source,
                values = first.total,
                "Attribute has more than one value. Discarding all but the first."
            );
        }

        context
            .authentication_session_mut()
            .set_auth_note(note, &first.value);
        Ok(())
    }
}
