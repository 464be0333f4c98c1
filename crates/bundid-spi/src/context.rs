//! Brokered identity context.

use bundid_saml::Assertion;

use crate::session::AuthenticationSessionModel;

/// The identity established by an external identity provider.
///
/// Built by the broker from a validated assertion and handed to each
/// configured mapper.
#[derive(Debug)]
pub struct BrokeredIdentityContext {
    /// Identifier of the user at the identity provider.
    pub id: String,

    /// Alias of the identity provider that authenticated the user.
    pub identity_provider_alias: String,

    /// E-mail address of the brokered user.
    pub email: Option<String>,

    /// The validated assertion, if the provider speaks SAML.
    pub assertion: Option<Assertion>,

    /// The authentication session of the login attempt.
    pub authentication_session: Box<dyn AuthenticationSessionModel>,
}

impl BrokeredIdentityContext {
    /// Creates a context without an assertion.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        identity_provider_alias: impl Into<String>,
        authentication_session: Box<dyn AuthenticationSessionModel>,
    ) -> Self {
        Self {
            id: id.into(),
            identity_provider_alias: identity_provider_alias.into(),
            email: None,
            assertion: None,
            authentication_session,
        }
    }

    /// Creates a context for a SAML login.
    #[must_use]
    pub fn saml(
        id: impl Into<String>,
        identity_provider_alias: impl Into<String>,
        assertion: Assertion,
        authentication_session: Box<dyn AuthenticationSessionModel>,
    ) -> Self {
        Self {
            assertion: Some(assertion),
            ..Self::new(id, identity_provider_alias, authentication_session)
        }
    }

    /// Returns the authentication session.
    #[must_use]
    pub fn authentication_session(&self) -> &dyn AuthenticationSessionModel {
        self.authentication_session.as_ref()
    }

    /// Returns the authentication session for modification.
    pub fn authentication_session_mut(&mut self) -> &mut dyn AuthenticationSessionModel {
        self.authentication_session.as_mut()
    }
}
