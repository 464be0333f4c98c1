//! Reading and replacing the extension element on an `AuthnRequest`.

use bundid_saml::{AuthnRequest, root_element_name};

use super::ROOT_ELEMENT;
use super::model::AuthenticationRequest;
use crate::error::{BrokerError, BrokerResult};

impl AuthenticationRequest {
    /// Reads the extension element from a request.
    ///
    /// Returns `None` if the request has no extensions or none of them is an
    /// `AuthenticationRequest` element. Only the first matching element is
    /// read.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::ExtensionDeserialization`] if an extension
    /// element cannot be parsed.
    pub fn read_existing(request: &AuthnRequest) -> BrokerResult<Option<Self>> {
        let Some(extensions) = request.extensions.as_ref() else {
            return Ok(None);
        };

        for element in extensions.elements() {
            let name = root_element_name(element)
                .map_err(|e| BrokerError::ExtensionDeserialization(e.to_string()))?;
            if name.local_part == ROOT_ELEMENT {
                return Self::from_xml(element).map(Some);
            }
        }
        Ok(None)
    }

    /// Writes this element into the request.
    ///
    /// Creates the extensions container if needed and replaces everything in
    /// it with this element, so repeated calls leave exactly one element.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::ExtensionSerialization`] if the element cannot
    /// be written. The request is left unchanged in that case.
    pub fn add_or_update(&self, request: &mut AuthnRequest) -> BrokerResult<()> {
        let xml = self.to_xml()?;

        let extensions = request.extensions_mut();
        let removed = extensions.remove_all();
        extensions.add_extension(xml);

        tracing::debug!(
            request_id = %request.id,
            replaced = removed.len(),
            requested_attributes = self.requested_attributes.len(),
            "Updated BundID extension"
        );
        Ok(())
    }

    /// Reads the current element (or starts an empty one), applies `update`
    /// and writes the result back.
    ///
    /// # Errors
    ///
    /// Propagates read and write failures.
    pub fn modify<F>(request: &mut AuthnRequest, update: F) -> BrokerResult<()>
    where
        F: FnOnce(&mut Self),
    {
        let mut extension = Self::read_existing(request)?.unwrap_or_default();
        update(&mut extension);
        extension.add_or_update(request)
    }
}
