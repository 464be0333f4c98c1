//! SAML authentication preprocessor SPI.

use bundid_saml::AuthnRequest;

use crate::error::SpiResult;
use crate::session::AuthenticationSessionModel;

/// Name of the preprocessor SPI, used for configuration lookup.
pub const SAML_AUTHENTICATION_PREPROCESSOR_SPI: &str = "saml-authentication-preprocessor";

/// Hook that sees every SAML `AuthnRequest` before the broker sends it.
pub trait SamlAuthenticationPreprocessor: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &'static str;

    /// Returns the request to send, possibly modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be prepared. The login attempt
    /// fails.
    fn before_sending_login_request(
        &self,
        request: AuthnRequest,
        _auth_session: &dyn AuthenticationSessionModel,
    ) -> SpiResult<AuthnRequest> {
        Ok(request)
    }
}
