//! SAML 2.0 types and data structures.
//!
//! This module contains the request and assertion types the broker
//! extensions read and mutate.

mod assertion;
mod authn_request;
mod constants;
mod extensions;
mod qname;

pub use assertion::*;
pub use authn_request::*;
pub use constants::*;
pub use extensions::*;
pub use qname::*;
