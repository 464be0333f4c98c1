//! Authentication session model.
//!
//! Temporary sessions used during the authentication flow, before
//! a full user session is established.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::realm::RealmModel;

/// Client note carrying the level of authentication requested by the client.
pub const REQUESTED_LEVEL_OF_AUTHENTICATION: &str = "requested-level-of-authentication";

/// Level of authentication value meaning "no level requested".
pub const NO_LOA: i32 = -1;

/// Mutable view of the authentication session of one login attempt.
pub trait AuthenticationSessionModel: Send + Sync + Debug {
    /// Returns the realm of the login.
    fn realm(&self) -> &dyn RealmModel;

    /// Gets a note that is copied into the user session on success.
    fn user_session_note(&self, name: &str) -> Option<&str>;

    /// Sets a user session note.
    fn set_user_session_note(&mut self, name: &str, value: &str);

    /// Returns all user session notes.
    fn user_session_notes(&self) -> &HashMap<String, String>;

    /// Gets a note scoped to the authentication flow.
    fn auth_note(&self, name: &str) -> Option<&str>;

    /// Sets an authentication flow note.
    fn set_auth_note(&mut self, name: &str, value: &str);

    /// Gets a client note.
    fn client_note(&self, name: &str) -> Option<&str>;

    /// Returns the level of authentication requested by the client, or
    /// [`NO_LOA`] if none was requested.
    fn requested_level_of_authentication(&self) -> i32 {
        self.client_note(REQUESTED_LEVEL_OF_AUTHENTICATION)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(NO_LOA)
    }
}

/// An in-memory authentication session.
///
/// ## Notes
///
/// - `notes` - Authentication flow notes, discarded with the session
/// - `client_notes` - Protocol parameters passed by the client
/// - `user_session_notes` - Copied to the user session on success
#[derive(Debug, Clone)]
pub struct AuthenticationSession {
    /// Unique session identifier (also used as tab ID in browser).
    pub id: Uuid,
    /// Realm of the login.
    pub realm: Arc<dyn RealmModel>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Session notes (key-value pairs for passing data between authenticators).
    pub notes: HashMap<String, String>,
    /// Client notes.
    pub client_notes: HashMap<String, String>,
    /// User session notes (will be copied to the user session on success).
    pub user_session_notes: HashMap<String, String>,
}

impl AuthenticationSession {
    /// Creates a new authentication session.
    #[must_use]
    pub fn new(realm: Arc<dyn RealmModel>) -> Self {
        Self {
            id: Uuid::now_v7(),
            realm,
            created_at: Utc::now(),
            notes: HashMap::new(),
            client_notes: HashMap::new(),
            user_session_notes: HashMap::new(),
        }
    }

    /// Sets a client note.
    #[must_use]
    pub fn with_client_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.client_notes.insert(key.into(), value.into());
        self
    }

    /// Sets the requested level of authentication.
    #[must_use]
    pub fn with_requested_level_of_authentication(self, level: i32) -> Self {
        self.with_client_note(REQUESTED_LEVEL_OF_AUTHENTICATION, level.to_string())
    }

    /// Removes an authentication flow note.
    pub fn remove_auth_note(&mut self, key: &str) -> Option<String> {
        self.notes.remove(key)
    }
}

impl AuthenticationSessionModel for AuthenticationSession {
    fn realm(&self) -> &dyn RealmModel {
        self.realm.as_ref()
    }

    fn user_session_note(&self, name: &str) -> Option<&str> {
        self.user_session_notes.get(name).map(String::as_str)
    }

    fn set_user_session_note(&mut self, name: &str, value: &str) {
        self.user_session_notes.insert(name.to_string(), value.to_string());
    }

    fn user_session_notes(&self) -> &HashMap<String, String> {
        &self.user_session_notes
    }

    fn auth_note(&self, name: &str) -> Option<&str> {
        self.notes.get(name).map(String::as_str)
    }

    fn set_auth_note(&mut self, name: &str, value: &str) {
        self.notes.insert(name.to_string(), value.to_string());
    }

    fn client_note(&self, name: &str) -> Option<&str> {
        self.client_notes.get(name).map(String::as_str)
    }
}
