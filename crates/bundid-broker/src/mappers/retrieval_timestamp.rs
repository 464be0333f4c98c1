//! Retrieval timestamp importer.

use bundid_spi::{
    BrokeredIdentityContext, ConfigProperty, FederationEvent, IdentityProviderMapper,
    IdentityProviderMapperModel, SpiResult,
};
use chrono::Utc;

use super::{RETRIEVAL_TIMESTAMP_IMPORTER_ID, SESSION_ATTRIBUTE, session_attribute_property};

/// Records when the brokered identity was received, as Unix seconds, in a
/// user session note.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetrievalTimestampAttributeMapper;

impl IdentityProviderMapper for RetrievalTimestampAttributeMapper {
    fn id(&self) -> &'static str {
        RETRIEVAL_TIMESTAMP_IMPORTER_ID
    }

    fn display_category(&self) -> &'static str {
        "Retrieval time Session Attribute Importer"
    }

    fn display_type(&self) -> &'static str {
        "Retrieval time Session Attribute Importer"
    }

    fn help_text(&self) -> &'static str {
        "Store the time the identity was retrieved from the identity provider in the specified session attribute."
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        vec![session_attribute_property()]
    }

    fn on_federation_event(
        &self,
        _event: FederationEvent,
        model: &IdentityProviderMapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> SpiResult<()> {
        if let Some(note) = model.get_non_empty(SESSION_ATTRIBUTE) {
            let now = Utc::now().timestamp().to_string();
            context
                .authentication_session_mut()
                .set_user_session_note(note, &now);
        }
        Ok(())
    }
}
