//! Importing BundID assertions into the authentication session.

use bundid_broker::builtin_mapper_registry;
use bundid_broker::mappers::{
    ATTRIBUTE_FRIENDLY_NAME, AUTH_SESSION_ATTRIBUTE_IMPORTER_ID, RETRIEVAL_TIMESTAMP_IMPORTER_ID,
    SESSION_ATTRIBUTE, SESSION_ATTRIBUTE_EXCLUDE_FROM_AUTOMAPPER,
    SESSION_ATTRIBUTE_IMPORTER_ID, SESSION_ATTRIBUTE_MULTI_VALUE_POLICY, SESSION_ATTRIBUTE_PREFIX,
    SESSION_EMAIL_IMPORTER_ID,
};
use bundid_saml::Attribute;
use bundid_spi::{FederationEvent, IdentityProviderMapperModel, Realm, SpiError};

use crate::common::{
    IDP_ALIAS, assertion, attribute_mapper, brokered_identity, init_tracing, session,
    trusted_attribute,
};

fn import_mapper() -> IdentityProviderMapperModel {
    attribute_mapper(SESSION_ATTRIBUTE_IMPORTER_ID, "attrName", "attrOid", "targetAttribute")
}

#[test]
fn imports_value_and_trust_level() {
    init_tracing();
    let registry = builtin_mapper_registry();
    let mut context = brokered_identity(
        assertion(vec![trusted_attribute("ATTRNAME", "testValue", "SUBSTANTIELL")]),
        session(Realm::new("test"), 3),
    );

    registry
        .dispatch(FederationEvent::Preprocess, &import_mapper(), &mut context)
        .expect("import should succeed");

    let session = context.authentication_session();
    assert_eq!(
        session.user_session_note("ba.bundid_prop_targetAttribute"),
        Some("testValue")
    );
    assert_eq!(
        session.user_session_note("ba.bundid_prop_targetAttribute-verified-level"),
        Some("STORK-QAA-Level-3")
    );
}

#[test]
fn custom_prefix_replaces_default() {
    init_tracing();
    let registry = builtin_mapper_registry();
    let model = import_mapper().with_config(SESSION_ATTRIBUTE_PREFIX, "ba.");
    let mut context = brokered_identity(
        assertion(vec![trusted_attribute("attrName", "testValue", "SUBSTANTIELL")]),
        session(Realm::new("test"), 3),
    );

    registry
        .dispatch(FederationEvent::UpdateBrokeredUser, &model, &mut context)
        .expect("import should succeed");

    let notes = context.authentication_session().user_session_notes();
    assert_eq!(notes.get("ba.targetAttribute").map(String::as_str), Some("testValue"));
    assert_eq!(
        notes.get("ba.targetAttribute-verified-level").map(String::as_str),
        Some("STORK-QAA-Level-3")
    );
    assert!(!notes.contains_key("ba.bundid_prop_targetAttribute"));
}

#[test]
fn excluded_attributes_use_short_prefix() {
    let registry = builtin_mapper_registry();
    let model = import_mapper().with_config(SESSION_ATTRIBUTE_EXCLUDE_FROM_AUTOMAPPER, "true");
    let mut context = brokered_identity(
        assertion(vec![Attribute::single("attrName", "testValue")]),
        session(Realm::new("test"), 1),
    );

    registry
        .dispatch(FederationEvent::ImportNewUser, &model, &mut context)
        .expect("import should succeed");

    let notes = context.authentication_session().user_session_notes();
    assert_eq!(notes.get("ba.targetAttribute").map(String::as_str), Some("testValue"));
    assert!(!notes.contains_key("ba.targetAttribute-verified-level"));
}

#[test]
fn every_lifecycle_event_imports() {
    let registry = builtin_mapper_registry();

    for event in [
        FederationEvent::Preprocess,
        FederationEvent::UpdateBrokeredUser,
        FederationEvent::ImportNewUser,
    ] {
        let mut context = brokered_identity(
            assertion(vec![trusted_attribute("attrName", "v", "HOCH")]),
            session(Realm::new("test"), 4),
        );
        registry
            .dispatch(event, &import_mapper(), &mut context)
            .expect("import should succeed");
        assert_eq!(
            context
                .authentication_session()
                .user_session_note("ba.bundid_prop_targetAttribute-verified-level"),
            Some("STORK-QAA-Level-4"),
            "event {event}"
        );
    }
}

#[test]
fn matches_friendly_name_and_ignores_unknown_trust_level() {
    let registry = builtin_mapper_registry();
    let model = IdentityProviderMapperModel::new("surname", IDP_ALIAS, SESSION_ATTRIBUTE_IMPORTER_ID)
        .with_config(ATTRIBUTE_FRIENDLY_NAME, "surname")
        .with_config(SESSION_ATTRIBUTE, "surname");
    let mut context = brokered_identity(
        assertion(vec![
            trusted_attribute("urn:oid:2.5.4.4", "Mustermann", "SEHR_HOCH").with_friendly_name("Surname"),
        ]),
        session(Realm::new("test"), 2),
    );

    registry
        .dispatch(FederationEvent::Preprocess, &model, &mut context)
        .expect("import should succeed");

    let notes = context.authentication_session().user_session_notes();
    assert_eq!(notes.get("ba.bundid_prop_surname").map(String::as_str), Some("Mustermann"));
    assert!(!notes.contains_key("ba.bundid_prop_surname-verified-level"));
}

#[test]
fn multiple_values_keep_first_by_default() {
    let registry = builtin_mapper_registry();
    let mut context = brokered_identity(
        assertion(vec![Attribute::multi(
            "attrName",
            vec!["first".to_string(), "second".to_string()],
        )]),
        session(Realm::new("test"), 2),
    );

    registry
        .dispatch(FederationEvent::Preprocess, &import_mapper(), &mut context)
        .expect("import should succeed");

    assert_eq!(
        context
            .authentication_session()
            .user_session_note("ba.bundid_prop_targetAttribute"),
        Some("first")
    );
}

#[test]
fn multiple_values_can_be_rejected() {
    let registry = builtin_mapper_registry();
    let model = import_mapper().with_config(SESSION_ATTRIBUTE_MULTI_VALUE_POLICY, "fail");
    let mut context = brokered_identity(
        assertion(vec![Attribute::multi(
            "attrName",
            vec!["first".to_string(), "second".to_string()],
        )]),
        session(Realm::new("test"), 2),
    );

    let err = registry
        .dispatch(FederationEvent::Preprocess, &model, &mut context)
        .expect_err("import should fail");

    assert!(matches!(err, SpiError::Mapper(_)));
    assert!(
        context
            .authentication_session()
            .user_session_notes()
            .is_empty()
    );
}

#[test]
fn email_variant_sets_identity_email() {
    let registry = builtin_mapper_registry();
    let model = attribute_mapper(
        SESSION_EMAIL_IMPORTER_ID,
        "urn:oid:0.9.2342.19200300.100.1.3",
        "urn:oid:0.9.2342.19200300.100.1.3",
        "email",
    );
    let mut context = brokered_identity(
        assertion(vec![trusted_attribute(
            "urn:oid:0.9.2342.19200300.100.1.3",
            "erika@example.org",
            "NORMAL",
        )]),
        session(Realm::new("test"), 2),
    );

    registry
        .dispatch(FederationEvent::ImportNewUser, &model, &mut context)
        .expect("import should succeed");

    assert_eq!(context.email.as_deref(), Some("erika@example.org"));
    assert_eq!(
        context
            .authentication_session()
            .user_session_note("ba.bundid_prop_email-verified-level"),
        Some("STORK-QAA-Level-2")
    );
}

#[test]
fn auth_session_and_timestamp_mappers() {
    let registry = builtin_mapper_registry();
    let auth_note = IdentityProviderMapperModel::new("bpk", IDP_ALIAS, AUTH_SESSION_ATTRIBUTE_IMPORTER_ID)
        .with_config(bundid_broker::mappers::ATTRIBUTE_NAME, "bPK2")
        .with_config(SESSION_ATTRIBUTE, "bpk2");
    let timestamp =
        IdentityProviderMapperModel::new("retrieved", IDP_ALIAS, RETRIEVAL_TIMESTAMP_IMPORTER_ID)
            .with_config(SESSION_ATTRIBUTE, "ba.bundid_prop_retrieved");
    let mut context = brokered_identity(
        assertion(vec![
            Attribute::single("bPK2", "ABC123"),
            Attribute::single("bpk2", "lowercase"),
        ]),
        session(Realm::new("test"), 2),
    );

    registry
        .dispatch(FederationEvent::Preprocess, &auth_note, &mut context)
        .expect("auth note import should succeed");
    registry
        .dispatch(FederationEvent::Preprocess, &timestamp, &mut context)
        .expect("timestamp should be written");

    let session = context.authentication_session();
    assert_eq!(session.auth_note("bpk2"), Some("ABC123"));
    let retrieved: i64 = session
        .user_session_note("ba.bundid_prop_retrieved")
        .expect("timestamp note")
        .parse()
        .expect("timestamp should be numeric");
    assert!(retrieved > 1_600_000_000);
}

#[test]
fn unknown_mapper_type_is_reported() {
    let registry = builtin_mapper_registry();
    let model = IdentityProviderMapperModel::new("x", IDP_ALIAS, "hardcoded-attribute-idp-mapper");
    let mut context = brokered_identity(assertion(Vec::new()), session(Realm::new("test"), 1));

    let err = registry
        .dispatch(FederationEvent::Preprocess, &model, &mut context)
        .expect_err("unknown type");
    assert!(matches!(err, SpiError::ProviderNotFound(_)));
}
