//! SAML Assertion types.
//!
//! Assertions contain statements about a subject made by an issuer. The
//! broker hands its extensions a parsed, already validated assertion; these
//! types model the parts the extensions read.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AttributeNameFormat, QName};

/// SAML Assertion.
///
/// A package of information that supplies one or more statements made
/// by a SAML authority (the issuer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertion {
    /// Unique identifier for this assertion.
    pub id: String,

    /// Version of the SAML protocol (always "2.0").
    #[serde(default = "default_version")]
    pub version: String,

    /// Timestamp when this assertion was issued.
    pub issue_instant: DateTime<Utc>,

    /// The entity ID of the identity provider that issued this assertion.
    pub issuer: String,

    /// Attribute statements, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_statements: Vec<AttributeStatement>,
}

fn default_version() -> String {
    "2.0".to_string()
}

impl Assertion {
    /// Creates a new assertion.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            id: format!("_id{}", uuid::Uuid::new_v4()),
            version: "2.0".to_string(),
            issue_instant: Utc::now(),
            issuer: issuer.into(),
            attribute_statements: Vec::new(),
        }
    }

    /// Creates a new assertion with a custom ID.
    #[must_use]
    pub fn with_id(id: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::new(issuer)
        }
    }

    /// Adds an attribute statement.
    #[must_use]
    pub fn with_attribute_statement(mut self, statement: AttributeStatement) -> Self {
        self.attribute_statements.push(statement);
        self
    }

    /// Iterates over every attribute of every statement in document order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attribute_statements
            .iter()
            .flat_map(|statement| statement.attributes.iter())
    }
}

/// Attribute statement.
///
/// Contains attributes about the subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeStatement {
    /// List of attributes.
    pub attributes: Vec<Attribute>,
}

impl AttributeStatement {
    /// Creates a new empty attribute statement.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }
}

/// A single `AttributeValue` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Textual content of the value.
    Text(String),
    /// A value explicitly marked `xsi:nil="true"`.
    Nil,
}

impl AttributeValue {
    /// Returns the textual content, or `None` for a nil value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Nil => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// SAML Attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute name (typically a URI or OID).
    pub name: String,

    /// The format of the attribute name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_format: Option<String>,

    /// A human-readable name for the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    /// The attribute values, in document order.
    pub values: Vec<AttributeValue>,

    /// Attributes from foreign namespaces carried on the `Attribute` element.
    #[serde(skip)]
    pub other_attributes: HashMap<QName, String>,
}

impl Attribute {
    /// Creates a new attribute without values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_format: None,
            friendly_name: None,
            values: Vec::new(),
            other_attributes: HashMap::new(),
        }
    }

    /// Creates a new attribute with a single value.
    #[must_use]
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name).with_value(value.into())
    }

    /// Creates a new attribute with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            values: values.into_iter().map(AttributeValue::Text).collect(),
            ..Self::new(name)
        }
    }

    /// Appends a value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<AttributeValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Sets the friendly name.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Sets the name format.
    #[must_use]
    pub fn with_format(mut self, format: AttributeNameFormat) -> Self {
        self.name_format = Some(format.uri().to_string());
        self
    }

    /// Adds a foreign-namespace attribute.
    #[must_use]
    pub fn with_other_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.other_attributes.insert(name, value.into());
        self
    }

    /// Returns a foreign-namespace attribute value.
    #[must_use]
    pub fn other_attribute(&self, name: &QName) -> Option<&str> {
        self.other_attributes.get(name).map(String::as_str)
    }
}
