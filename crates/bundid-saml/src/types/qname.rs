//! Namespace-qualified XML names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A namespace-qualified name.
///
/// Equality and hashing consider the namespace URI and local part only; the
/// prefix is a serialization hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QName {
    /// Namespace URI (empty for no namespace).
    pub namespace_uri: String,

    /// Local part of the name.
    pub local_part: String,

    /// Preferred prefix when serializing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl QName {
    /// Creates a qualified name without a preferred prefix.
    #[must_use]
    pub fn new(namespace_uri: impl Into<String>, local_part: impl Into<String>) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            local_part: local_part.into(),
            prefix: None,
        }
    }

    /// Creates a qualified name with a preferred prefix.
    #[must_use]
    pub fn with_prefix(
        namespace_uri: impl Into<String>,
        local_part: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new(namespace_uri, local_part)
        }
    }

    /// Checks whether this name has the given namespace and local part.
    #[must_use]
    pub fn matches(&self, namespace_uri: &str, local_part: &str) -> bool {
        self.namespace_uri == namespace_uri && self.local_part == local_part
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace_uri == other.namespace_uri && self.local_part == other.local_part
    }
}

impl Eq for QName {}

impl std::hash::Hash for QName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.namespace_uri.hash(state);
        self.local_part.hash(state);
    }
}

/// Formats in Clark notation: `{namespace}local`.
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_uri.is_empty() {
            f.write_str(&self.local_part)
        } else {
            write!(f, "{{{}}}{}", self.namespace_uri, self.local_part)
        }
    }
}
