//! SAML `Extensions` container.
//!
//! The container holds opaque, already serialized XML elements. Protocol
//! extensions own the content of their elements; the container only tracks
//! their order and exposes the qualified name of each root element.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use serde::{Deserialize, Serialize};

use super::QName;
use crate::error::{SamlError, SamlResult};

/// SAML extensions container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extensions {
    /// Raw extension elements, in document order.
    #[serde(default)]
    pub content: Vec<String>,
}

impl Extensions {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: Vec::new(),
        }
    }

    /// Appends an extension element.
    pub fn add_extension(&mut self, element: impl Into<String>) {
        self.content.push(element.into());
    }

    /// Removes and returns every extension element.
    pub fn remove_all(&mut self) -> Vec<String> {
        std::mem::take(&mut self.content)
    }

    /// Returns the number of extension elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns whether the container has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Iterates over the raw extension elements.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.content.iter().map(String::as_str)
    }
}

/// Returns the namespace-resolved name of the root element of an XML fragment.
///
/// # Errors
///
/// Returns [`SamlError::XmlParse`] for malformed XML and
/// [`SamlError::MissingElement`] if the fragment contains no element.
pub fn root_element_name(xml: &str) -> SamlResult<QName> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        let (namespace, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let namespace_uri = match namespace {
                    ResolveResult::Bound(Namespace(uri)) => std::str::from_utf8(uri)?.to_string(),
                    _ => String::new(),
                };
                let local_part = std::str::from_utf8(e.local_name().as_ref())?.to_string();
                return Ok(QName::new(namespace_uri, local_part));
            }
            Event::Eof => {
                return Err(SamlError::MissingElement("extension root element".to_string()));
            }
            _ => {}
        }
    }
}
