//! Common test utilities and fixtures.

use std::sync::Arc;

use bundid_broker::mappers::{ATTRIBUTE_NAME, ATTRIBUTE_OID, ATTRIBUTE_REQUIRED, SESSION_ATTRIBUTE};
use bundid_broker::trust_level::trust_level_qname;
use bundid_broker::{BundIdAuthenticationPreprocessor, PreprocessorConfig, builtin_mapper_registry};
use bundid_saml::{Assertion, Attribute, AttributeStatement, AuthnRequest};
use bundid_spi::{
    AuthenticationSession, BrokeredIdentityContext, IdentityProviderMapperModel, Realm,
};

/// Alias of the BundID identity provider.
pub const IDP_ALIAS: &str = "bundid";

/// Assertion consumer service URL of the BundID identity provider.
pub const ACS_URL: &str = "http://localhost:8081/realms/test/broker/bundid/endpoint";

/// Initializes tracing once for all tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bundid_broker=trace,bundid_spi=debug")
        .with_test_writer()
        .try_init();
}

/// Builds a mapper instance that requests and imports one attribute.
pub fn attribute_mapper(
    mapper_type: &str,
    name: &str,
    oid: &str,
    destination: &str,
) -> IdentityProviderMapperModel {
    IdentityProviderMapperModel::new(format!("{destination} importer"), IDP_ALIAS, mapper_type)
        .with_config(ATTRIBUTE_NAME, name)
        .with_config(ATTRIBUTE_OID, oid)
        .with_config(ATTRIBUTE_REQUIRED, "true")
        .with_config(SESSION_ATTRIBUTE, destination)
}

/// Creates a preprocessor backed by the built-in mapper registry.
pub fn preprocessor(config: PreprocessorConfig) -> BundIdAuthenticationPreprocessor {
    BundIdAuthenticationPreprocessor::new(config, Arc::new(builtin_mapper_registry()))
}

/// Creates an authentication session in `realm`.
pub fn session(realm: Realm, requested_level: i32) -> AuthenticationSession {
    AuthenticationSession::new(Arc::new(realm))
        .with_requested_level_of_authentication(requested_level)
}

/// Creates an outgoing login request addressed back to the BundID endpoint.
pub fn login_request() -> AuthnRequest {
    AuthnRequest::new("http://localhost:8081/realms/test").with_acs_url(ACS_URL)
}

/// Creates an attribute annotated with a BundID trust level.
pub fn trusted_attribute(name: &str, value: &str, trust_level: &str) -> Attribute {
    Attribute::single(name, value).with_other_attribute(trust_level_qname(), trust_level)
}

/// Wraps attributes into an assertion issued by BundID.
pub fn assertion(attributes: Vec<Attribute>) -> Assertion {
    let statement = attributes
        .into_iter()
        .fold(AttributeStatement::new(), AttributeStatement::with_attribute);
    Assertion::new("https://id.bund.de/idp").with_attribute_statement(statement)
}

/// Creates the brokered identity for an assertion.
pub fn brokered_identity(assertion: Assertion, session: AuthenticationSession) -> BrokeredIdentityContext {
    BrokeredIdentityContext::saml("bpk2-0001", IDP_ALIAS, assertion, Box::new(session))
}
