//! End-to-end integration tests.
//!
//! These tests run the BundID extensions the way the broker does: the
//! preprocessor composes an outgoing login request from the configured
//! mappers, and the mappers import the returned assertion into the session.

mod common;
mod assertion_import;
mod request_composition;
mod token_claims;
