//! Requesting attributes from BundID.
//!
//! Each configured attribute mapper asks BundID for its attribute by adding
//! a `RequestedAttribute` entry to the request's extension element.
//! Contributions are read-modify-write cycles on the same element and must
//! run one after another.

use bundid_saml::AuthnRequest;
use bundid_spi::IdentityProviderMapperModel;

use crate::error::BrokerResult;
use crate::extension::AuthenticationRequest;
use crate::mappers::{ATTRIBUTE_OID, ATTRIBUTE_REQUIRED};

/// Appends a `RequestedAttribute` for `oid` to the request's extension.
///
/// Does nothing for an empty OID.
///
/// # Errors
///
/// Propagates failures to read or write the extension element.
pub fn contribute(request: &mut AuthnRequest, oid: &str, required: bool) -> BrokerResult<()> {
    if oid.is_empty() {
        return Ok(());
    }
    AuthenticationRequest::modify(request, |extension| {
        extension.add_requested_attribute(oid, required);
    })
}

/// Appends the `RequestedAttribute` configured on a mapper instance.
///
/// # Errors
///
/// See [`contribute`].
pub fn contribute_from_model(
    model: &IdentityProviderMapperModel,
    request: &mut AuthnRequest,
) -> BrokerResult<()> {
    let Some(oid) = model.get(ATTRIBUTE_OID) else {
        return Ok(());
    };
    let required = model.get_bool(ATTRIBUTE_REQUIRED);
    tracing::trace!(mapper = %model.name, oid = %oid, required, "Requesting attribute");
    contribute(request, oid, required)
}
