//! In-memory model of the BundID extension element.

use serde::{Deserialize, Serialize};

/// Version attribute written on every extension element.
pub const EXTENSION_VERSION: &str = "2";

/// The `AuthenticationRequest` extension element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationRequest {
    /// Extension format version.
    pub version: String,

    /// Attributes requested from BundID, in contribution order.
    #[serde(default)]
    pub requested_attributes: Vec<RequestedAttribute>,

    /// Display information for the BundID login page.
    #[serde(default)]
    pub display_information: DisplayInformation,
}

impl Default for AuthenticationRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthenticationRequest {
    /// Creates an empty extension element.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: EXTENSION_VERSION.to_string(),
            requested_attributes: Vec::new(),
            display_information: DisplayInformation::default(),
        }
    }

    /// Appends a requested attribute.
    pub fn add_requested_attribute(&mut self, name: impl Into<String>, required: bool) {
        self.requested_attributes.push(RequestedAttribute {
            name: name.into(),
            required,
        });
    }

    /// Appends a requested attribute.
    #[must_use]
    pub fn with_requested_attribute(mut self, name: impl Into<String>, required: bool) -> Self {
        self.add_requested_attribute(name, required);
        self
    }

    /// Replaces the display information.
    pub fn set_display_information(&mut self, display_information: DisplayInformation) {
        self.display_information = display_information;
    }
}

/// A `RequestedAttribute` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedAttribute {
    /// Attribute OID.
    pub name: String,

    /// Whether BundID must deliver the attribute.
    pub required: bool,
}

/// The `DisplayInformation` element.
///
/// The element is always written; its `Version` child only when display
/// values were attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInformation {
    /// Display values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<DisplayInformationVersion>,
}

impl DisplayInformation {
    /// Builds display information from optional values. Blank values are
    /// left out.
    #[must_use]
    pub fn new(online_service_id: Option<&str>, organization_display_name: Option<&str>) -> Self {
        let non_blank = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            version: Some(DisplayInformationVersion {
                online_service_id: non_blank(online_service_id),
                organization_display_name: non_blank(organization_display_name),
            }),
        }
    }
}

/// The `DisplayInformation/Version` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInformationVersion {
    /// Identifier of the online service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_service_id: Option<String>,

    /// Organization name shown to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_display_name: Option<String>,
}
