//! Session notes imported from BundID end up as token claims.

use std::collections::HashMap;

use bundid_broker::mappers::SESSION_ATTRIBUTE_IMPORTER_ID;
use bundid_broker::{BundIdProtocolMapper, ProtocolMapperModel, TokenType, builtin_mapper_registry};
use bundid_spi::{FederationEvent, Realm};
use serde_json::json;

use crate::common::{assertion, attribute_mapper, brokered_identity, session, trusted_attribute};

#[test]
fn imported_attributes_become_claims() {
    let registry = builtin_mapper_registry();
    let mut context = brokered_identity(
        assertion(vec![
            trusted_attribute("urn:oid:2.5.4.4", "Mustermann", "SUBSTANTIELL"),
            trusted_attribute("urn:oid:2.5.4.42", "Erika", "HOCH"),
        ]),
        session(Realm::new("test"), 3),
    );
    for model in [
        attribute_mapper(SESSION_ATTRIBUTE_IMPORTER_ID, "urn:oid:2.5.4.4", "urn:oid:2.5.4.4", "surname"),
        attribute_mapper(SESSION_ATTRIBUTE_IMPORTER_ID, "urn:oid:2.5.4.42", "urn:oid:2.5.4.42", "name.given"),
    ] {
        registry
            .dispatch(FederationEvent::Preprocess, &model, &mut context)
            .expect("import should succeed");
    }

    let mut claims = HashMap::new();
    let mapped = BundIdProtocolMapper.transform(
        TokenType::IdToken,
        &mut claims,
        &ProtocolMapperModel::new("bundid claims"),
        context.authentication_session().user_session_notes(),
    );

    assert_eq!(mapped, 4);
    assert_eq!(claims["surname"], json!("Mustermann"));
    assert_eq!(claims["surname-verified-level"], json!("STORK-QAA-Level-3"));
    assert_eq!(
        claims["name"],
        json!({"given": "Erika", "given-verified-level": "STORK-QAA-Level-4"})
    );
}
