//! SAML AuthnRequest types.
//!
//! The outgoing authentication request as the host broker exposes it to
//! preprocessors: identity, response endpoint, requested authentication
//! context and the extensions block. Everything else on the wire is owned
//! by the host.

use serde::{Deserialize, Serialize};

use super::Extensions;

/// Outgoing SAML authentication request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthnRequest {
    /// Request ID.
    pub id: String,

    /// Entity ID of the broker issuing the request.
    pub issuer: String,

    /// Endpoint the identity provider posts its response to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_consumer_service_url: Option<String>,

    /// Requested authentication context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_authn_context: Option<RequestedAuthnContext>,

    /// SAML extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}

impl AuthnRequest {
    /// Creates a request with a random ID.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            id: format!("_id{}", uuid::Uuid::new_v4()),
            issuer: issuer.into(),
            assertion_consumer_service_url: None,
            requested_authn_context: None,
            extensions: None,
        }
    }

    /// Sets the assertion consumer service URL.
    #[must_use]
    pub fn with_acs_url(mut self, url: impl Into<String>) -> Self {
        self.assertion_consumer_service_url = Some(url.into());
        self
    }

    /// Returns the extensions container, creating an empty one if absent.
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        self.extensions.get_or_insert_with(Extensions::new)
    }
}

/// Requested authentication context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedAuthnContext {
    /// How the identity provider compares its context to the listed ones.
    #[serde(default)]
    pub comparison: AuthnContextComparison,

    /// Acceptable authentication context class references.
    #[serde(default)]
    pub authn_context_class_refs: Vec<String>,
}

impl RequestedAuthnContext {
    /// Creates an empty context with exact comparison.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comparison: AuthnContextComparison::Exact,
            authn_context_class_refs: Vec::new(),
        }
    }

    /// Creates a context accepting the given class reference or anything stronger.
    #[must_use]
    pub fn minimum(class_ref: impl Into<String>) -> Self {
        Self::new()
            .with_class_ref(class_ref)
            .with_comparison(AuthnContextComparison::Minimum)
    }

    /// Adds a class reference.
    #[must_use]
    pub fn with_class_ref(mut self, class_ref: impl Into<String>) -> Self {
        self.authn_context_class_refs.push(class_ref.into());
        self
    }

    /// Sets the comparison method.
    #[must_use]
    pub const fn with_comparison(mut self, comparison: AuthnContextComparison) -> Self {
        self.comparison = comparison;
        self
    }
}

/// Authentication context comparison methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthnContextComparison {
    /// Exact match required.
    #[default]
    Exact,
    /// Match must be at least as strong.
    Minimum,
}

impl AuthnContextComparison {
    /// Returns the `Comparison` attribute value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Minimum => "minimum",
        }
    }
}
