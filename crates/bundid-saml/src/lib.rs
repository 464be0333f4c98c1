//! SAML 2.0 message types for the BundID broker extensions.
//!
//! This crate provides the slice of the SAML 2.0 object model that the host
//! broker hands to its extensions:
//!
//! - **AuthnRequest** - The outgoing authentication request, including the
//!   requested authentication context and the generic `Extensions` container
//! - **Assertion** - A parsed, already validated assertion with its attribute
//!   statements and namespaced attribute annotations
//! - **QName** - Namespace-qualified names for XML attributes and elements
//!
//! # Architecture
//!
//! - [`types`] - Core SAML types and data structures
//! - [`error`] - Error types for SAML operations
//!
//! Signature handling, bindings and transport belong to the host broker and
//! are not part of this crate.
//!
//! # SAML Specifications
//!
//! - [SAML 2.0 Core](https://docs.oasis-open.org/security/saml/v2.0/saml-core-2.0-os.pdf)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{SamlError, SamlResult};
pub use types::*;
