//! XML reading and writing of the extension element.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use quick_xml::writer::Writer;

use super::model::{AuthenticationRequest, DisplayInformationVersion, RequestedAttribute};
use super::{AKDB_NAMESPACE, CLASSIC_UI_NAMESPACE, ROOT_ELEMENT};
use crate::error::{BrokerError, BrokerResult};

const REQUESTED_ATTRIBUTES: &str = "RequestedAttributes";
const REQUESTED_ATTRIBUTE: &str = "RequestedAttribute";
const DISPLAY_INFORMATION: &str = "DisplayInformation";
const VERSION: &str = "Version";
const ONLINE_SERVICE_ID: &str = "OnlineServiceId";
const ORGANIZATION_DISPLAY_NAME: &str = "OrganizationDisplayName";

impl AuthenticationRequest {
    /// Serializes the element.
    ///
    /// Attribute values and text are XML-escaped; OIDs and display values are
    /// otherwise written as given.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::ExtensionSerialization`] if writing fails.
    pub fn to_xml(&self) -> BrokerResult<String> {
        let mut writer = Writer::new(Vec::new());

        let root = BytesStart::new(ROOT_ELEMENT)
            .with_attributes([("xmlns", AKDB_NAMESPACE), ("Version", self.version.as_str())]);
        write(&mut writer, Event::Start(root))?;

        if self.requested_attributes.is_empty() {
            write(&mut writer, Event::Empty(BytesStart::new(REQUESTED_ATTRIBUTES)))?;
        } else {
            write(&mut writer, Event::Start(BytesStart::new(REQUESTED_ATTRIBUTES)))?;
            for attribute in &self.requested_attributes {
                let required = if attribute.required { "true" } else { "false" };
                let element = BytesStart::new(REQUESTED_ATTRIBUTE)
                    .with_attributes([("Name", attribute.name.as_str()), ("RequiredAttribute", required)]);
                write(&mut writer, Event::Empty(element))?;
            }
            write(&mut writer, Event::End(BytesEnd::new(REQUESTED_ATTRIBUTES)))?;
        }

        match &self.display_information.version {
            None => write(&mut writer, Event::Empty(BytesStart::new(DISPLAY_INFORMATION)))?,
            Some(version) => {
                write(&mut writer, Event::Start(BytesStart::new(DISPLAY_INFORMATION)))?;
                write_display_version(&mut writer, version)?;
                write(&mut writer, Event::End(BytesEnd::new(DISPLAY_INFORMATION)))?;
            }
        }

        write(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| BrokerError::ExtensionSerialization(e.to_string()))
    }

    /// Parses an extension element.
    ///
    /// Unknown child elements are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::ExtensionDeserialization`] for malformed XML or
    /// a root element other than `AuthenticationRequest` in the BundID
    /// namespace.
    pub fn from_xml(xml: &str) -> BrokerResult<Self> {
        let mut reader = NsReader::from_str(xml);

        let mut request: Option<Self> = None;
        let mut path: Vec<String> = Vec::new();

        loop {
            let (namespace, event) = reader.read_resolved_event().map_err(malformed)?;
            match event {
                Event::Start(ref e) => {
                    let local = local_name(e)?;
                    open_element(&mut request, &namespace, &local, e, &path)?;
                    path.push(local);
                }
                Event::Empty(ref e) => {
                    let local = local_name(e)?;
                    open_element(&mut request, &namespace, &local, e, &path)?;
                }
                Event::Text(ref t) => {
                    let text = t.unescape().map_err(malformed)?;
                    append_text(&mut request, &path, &text);
                }
                Event::CData(ref t) => {
                    let text = std::str::from_utf8(t).map_err(malformed)?;
                    append_text(&mut request, &path, text);
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        request.ok_or_else(|| malformed("no AuthenticationRequest element"))
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> BrokerResult<()> {
    writer
        .write_event(event)
        .map_err(|e| BrokerError::ExtensionSerialization(e.to_string()))
}

fn write_display_version(
    writer: &mut Writer<Vec<u8>>,
    version: &DisplayInformationVersion,
) -> BrokerResult<()> {
    let values = [
        (ONLINE_SERVICE_ID, version.online_service_id.as_deref()),
        (ORGANIZATION_DISPLAY_NAME, version.organization_display_name.as_deref()),
    ];
    if values.iter().all(|(_, value)| value.is_none()) {
        return write(writer, Event::Empty(BytesStart::new(VERSION)));
    }

    write(writer, Event::Start(BytesStart::new(VERSION)))?;
    for (name, value) in values {
        if let Some(value) = value {
            let element = BytesStart::new(name).with_attributes([("xmlns", CLASSIC_UI_NAMESPACE)]);
            write(writer, Event::Start(element))?;
            write(writer, Event::Text(BytesText::new(value)))?;
            write(writer, Event::End(BytesEnd::new(name)))?;
        }
    }
    write(writer, Event::End(BytesEnd::new(VERSION)))
}

fn malformed(err: impl std::fmt::Display) -> BrokerError {
    BrokerError::ExtensionDeserialization(err.to_string())
}

fn local_name(e: &BytesStart<'_>) -> BrokerResult<String> {
    std::str::from_utf8(e.local_name().as_ref())
        .map(str::to_string)
        .map_err(malformed)
}

/// Reads an unprefixed attribute.
fn attribute_value(e: &BytesStart<'_>, name: &[u8]) -> BrokerResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value().map_err(malformed)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parses an `xs:boolean`.
fn parse_boolean(value: &str) -> BrokerResult<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(malformed(format!("invalid RequiredAttribute value '{other}'"))),
    }
}

fn open_element(
    request: &mut Option<AuthenticationRequest>,
    namespace: &ResolveResult<'_>,
    local: &str,
    e: &BytesStart<'_>,
    path: &[String],
) -> BrokerResult<()> {
    let Some(current) = request.as_mut() else {
        let in_vendor_namespace = matches!(
            namespace,
            ResolveResult::Bound(Namespace(ns)) if *ns == AKDB_NAMESPACE.as_bytes()
        );
        if local != ROOT_ELEMENT || !in_vendor_namespace {
            return Err(malformed(format!("unexpected root element '{local}'")));
        }
        let mut root = AuthenticationRequest::new();
        if let Some(version) = attribute_value(e, b"Version")? {
            root.version = version;
        }
        *request = Some(root);
        return Ok(());
    };

    match (path.last().map(String::as_str), local) {
        (Some(REQUESTED_ATTRIBUTES), REQUESTED_ATTRIBUTE) => {
            let name = attribute_value(e, b"Name")?
                .ok_or_else(|| malformed("RequestedAttribute without Name"))?;
            let required = attribute_value(e, b"RequiredAttribute")?
                .map_or(Ok(false), |v| parse_boolean(&v))?;
            current
                .requested_attributes
                .push(RequestedAttribute { name, required });
        }
        (Some(DISPLAY_INFORMATION), VERSION) => {
            current.display_information.version = Some(DisplayInformationVersion::default());
        }
        (Some(VERSION), ONLINE_SERVICE_ID | ORGANIZATION_DISPLAY_NAME) => {
            if let Some(field) = display_field(current, local) {
                field.get_or_insert_with(String::new);
            }
        }
        _ => {}
    }
    Ok(())
}

fn append_text(request: &mut Option<AuthenticationRequest>, path: &[String], text: &str) {
    let [.., parent, element] = path else {
        return;
    };
    if parent != VERSION {
        return;
    }
    if let Some(current) = request.as_mut()
        && let Some(field) = display_field(current, element)
    {
        field.get_or_insert_with(String::new).push_str(text);
    }
}

fn display_field<'a>(
    request: &'a mut AuthenticationRequest,
    element: &str,
) -> Option<&'a mut Option<String>> {
    let version = request.display_information.version.as_mut()?;
    match element {
        ONLINE_SERVICE_ID => Some(&mut version.online_service_id),
        ORGANIZATION_DISPLAY_NAME => Some(&mut version.organization_display_name),
        _ => None,
    }
}
