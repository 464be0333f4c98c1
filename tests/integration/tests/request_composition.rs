//! Outgoing login request composition.

use bundid_broker::config::{
    ACTIVE_FOR_IDP, MINIMUM_STORK_LEVEL, ONLINE_SERVICE_ID, ORGANIZATION_DISPLAY_NAME,
};
use bundid_broker::contributor::contribute;
use bundid_broker::mappers::{
    AUTH_SESSION_ATTRIBUTE_IMPORTER_ID, SESSION_ATTRIBUTE_IMPORTER_ID, SESSION_EMAIL_IMPORTER_ID,
};
use bundid_broker::preprocessor::PROVIDER_ID;
use bundid_broker::{
    AuthenticationRequest, BundIdAuthenticationPreprocessor, PreprocessorConfig,
    builtin_mapper_registry,
};
use bundid_saml::{AuthnContextComparison, AuthnRequest};
use bundid_spi::{
    EnvScope, IdentityProviderMapperModel, Realm, SAML_AUTHENTICATION_PREPROCESSOR_SPI,
    SamlAuthenticationPreprocessor,
};

use crate::common::{
    ACS_URL, IDP_ALIAS, attribute_mapper, init_tracing, login_request, preprocessor, session,
};

fn bundid_realm() -> Realm {
    Realm::new("test")
        .with_mapper(attribute_mapper(
            SESSION_ATTRIBUTE_IMPORTER_ID,
            "urn:oid:2.5.4.4",
            "urn:oid:2.5.4.4",
            "surname",
        ))
        .with_mapper(attribute_mapper(
            SESSION_EMAIL_IMPORTER_ID,
            "urn:oid:0.9.2342.19200300.100.1.3",
            "urn:oid:0.9.2342.19200300.100.1.3",
            "email",
        ))
        .with_mapper(attribute_mapper(
            AUTH_SESSION_ATTRIBUTE_IMPORTER_ID,
            "urn:oid:2.5.4.42",
            "urn:oid:2.5.4.42",
            "givenName",
        ))
}

#[test]
fn requests_stork_level_for_bundid() {
    init_tracing();
    let processor = preprocessor(PreprocessorConfig::default().with_active_for_idp(IDP_ALIAS));

    let request = processor
        .before_sending_login_request(login_request(), &session(Realm::new("test"), 4))
        .expect("request should be updated");

    let context = request
        .requested_authn_context
        .expect("authn context should be requested");
    assert_eq!(context.comparison, AuthnContextComparison::Minimum);
    assert_eq!(context.authn_context_class_refs, vec!["STORK-QAA-Level-4".to_string()]);
}

#[test]
fn leaves_other_providers_alone() {
    init_tracing();
    let processor = preprocessor(PreprocessorConfig::default().with_active_for_idp("other-provider"));

    let request = processor
        .before_sending_login_request(login_request(), &session(bundid_realm(), 4))
        .expect("request should pass through");

    assert!(request.requested_authn_context.is_none());
    assert!(request.extensions.is_none());
}

#[test]
fn contributions_accumulate_in_one_extension() {
    let mut request = AuthnRequest::new("issuer");

    contribute(&mut request, "attrOid", false).expect("first contribution");
    contribute(&mut request, "attrOid2", true).expect("second contribution");

    let extensions = request.extensions.as_ref().expect("extensions should exist");
    assert_eq!(extensions.len(), 1);
    let extension = AuthenticationRequest::read_existing(&request)
        .expect("extension should parse")
        .expect("extension should exist");
    let names: Vec<_> = extension
        .requested_attributes
        .iter()
        .map(|a| (a.name.as_str(), a.required))
        .collect();
    assert_eq!(names, vec![("attrOid", false), ("attrOid2", true)]);
}

#[test]
fn composes_full_extension_from_mappers_and_config() {
    init_tracing();
    let config = PreprocessorConfig::default()
        .with_online_service_id("svc-4711")
        .with_organization_display_name("Bundesagentur für Arbeit");
    let processor = preprocessor(config);

    let request = processor
        .before_sending_login_request(login_request(), &session(bundid_realm(), 2))
        .expect("request should be updated");

    let extensions = request.extensions.as_ref().expect("extensions should exist");
    assert_eq!(extensions.len(), 1);
    assert_eq!(
        extensions.elements().next(),
        Some(concat!(
            r#"<AuthenticationRequest xmlns="https://www.akdb.de/request/2018/09" Version="2">"#,
            r#"<RequestedAttributes>"#,
            r#"<RequestedAttribute Name="urn:oid:2.5.4.4" RequiredAttribute="true"/>"#,
            r#"<RequestedAttribute Name="urn:oid:0.9.2342.19200300.100.1.3" RequiredAttribute="true"/>"#,
            r#"</RequestedAttributes>"#,
            r#"<DisplayInformation><Version>"#,
            r#"<OnlineServiceId xmlns="https://www.akdb.de/request/2018/09/classic-ui/v1">svc-4711</OnlineServiceId>"#,
            r#"<OrganizationDisplayName xmlns="https://www.akdb.de/request/2018/09/classic-ui/v1">Bundesagentur für Arbeit</OrganizationDisplayName>"#,
            r#"</Version></DisplayInformation>"#,
            r#"</AuthenticationRequest>"#
        ))
    );
    assert_eq!(
        request
            .requested_authn_context
            .expect("authn context should be requested")
            .authn_context_class_refs,
        vec!["STORK-QAA-Level-2".to_string()]
    );
}

#[test]
fn second_pass_does_not_duplicate_extension() {
    init_tracing();
    let processor = preprocessor(PreprocessorConfig::default().with_online_service_id("svc-4711"));
    let auth_session = session(Realm::new("test"), 3);

    let once = processor
        .before_sending_login_request(login_request(), &auth_session)
        .expect("first pass");
    let twice = processor
        .before_sending_login_request(once.clone(), &auth_session)
        .expect("second pass");

    assert_eq!(twice.extensions.as_ref().map(|e| e.len()), Some(1));
    assert_eq!(
        AuthenticationRequest::read_existing(&once).expect("parse"),
        AuthenticationRequest::read_existing(&twice).expect("parse")
    );
}

#[test]
fn reads_configuration_from_environment() {
    let vars = [
        (
            "KC_SPI_SAML_AUTHENTICATION_PREPROCESSOR_BUNDID_PROTOCOL_ACTIVE_FOR_IDP",
            "bundid-test",
        ),
        (
            "KC_SPI_SAML_AUTHENTICATION_PREPROCESSOR_BUNDID_PROTOCOL_MINIMUM_STORK_LEVEL",
            "3",
        ),
        (
            "KC_SPI_SAML_AUTHENTICATION_PREPROCESSOR_BUNDID_PROTOCOL_ORGANIZATION_DISPLAY_NAME",
            "Agentur",
        ),
        ("KC_SPI_OTHER_ACTIVE_FOR_IDP", "ignored"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()));
    let scope = EnvScope::from_vars(SAML_AUTHENTICATION_PREPROCESSOR_SPI, PROVIDER_ID, vars);

    let processor = BundIdAuthenticationPreprocessor::from_scope(
        &scope,
        std::sync::Arc::new(builtin_mapper_registry()),
    );

    let config = processor.config();
    assert_eq!(config.active_for_idp, "bundid-test");
    assert_eq!(config.minimum_stork_level, Some(3));
    assert_eq!(config.organization_display_name.as_deref(), Some("Agentur"));
    assert_eq!(config.online_service_id, None);
    assert!(scope.variable_name(ONLINE_SERVICE_ID).ends_with("_ONLINE_SERVICE_ID"));
    assert!(scope.variable_name(ACTIVE_FOR_IDP).ends_with("_ACTIVE_FOR_IDP"));
    assert!(scope.variable_name(ORGANIZATION_DISPLAY_NAME).ends_with("_ORGANIZATION_DISPLAY_NAME"));
    assert!(scope.variable_name(MINIMUM_STORK_LEVEL).ends_with("_MINIMUM_STORK_LEVEL"));
}

#[test]
fn mappers_of_other_providers_are_not_asked() {
    init_tracing();
    let realm = Realm::new("test").with_mapper(
        IdentityProviderMapperModel::new("muk surname", "muk", SESSION_ATTRIBUTE_IMPORTER_ID)
            .with_config(bundid_broker::mappers::ATTRIBUTE_OID, "urn:oid:2.5.4.4"),
    );
    let processor = preprocessor(PreprocessorConfig::default());

    let request = processor
        .before_sending_login_request(
            AuthnRequest::new("issuer").with_acs_url(ACS_URL),
            &session(realm, 1),
        )
        .expect("request should be updated");

    assert!(request.requested_authn_context.is_some());
    assert!(request.extensions.is_none());
}
