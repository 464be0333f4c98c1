//! BundID `AuthenticationRequest` SAML extension.
//!
//! BundID reads its service-specific request parameters from a single
//! vendor element inside the `samlp:Extensions` of the `AuthnRequest`:
//!
//! ```xml
//! <AuthenticationRequest xmlns="https://www.akdb.de/request/2018/09" Version="2">
//!   <RequestedAttributes>
//!     <RequestedAttribute Name="urn:oid:2.5.4.42" RequiredAttribute="true"/>
//!   </RequestedAttributes>
//!   <DisplayInformation>
//!     <Version>
//!       <OnlineServiceId xmlns="https://www.akdb.de/request/2018/09/classic-ui/v1">svc</OnlineServiceId>
//!       <OrganizationDisplayName xmlns="https://www.akdb.de/request/2018/09/classic-ui/v1">Org</OrganizationDisplayName>
//!     </Version>
//!   </DisplayInformation>
//! </AuthenticationRequest>
//! ```
//!
//! Several mappers contribute to the element while one request is built.
//! Every contribution reads the current element with
//! [`AuthenticationRequest::read_existing`], changes it in memory and writes
//! it back with [`AuthenticationRequest::add_or_update`], which replaces the
//! whole extension content. The request therefore never carries more than
//! one vendor element.

mod codec;
mod document;
mod model;

pub use model::{
    AuthenticationRequest, DisplayInformation, DisplayInformationVersion, RequestedAttribute,
    EXTENSION_VERSION,
};

/// Namespace of the BundID request extension.
pub const AKDB_NAMESPACE: &str = "https://www.akdb.de/request/2018/09";

/// Namespace of the display information values.
pub const CLASSIC_UI_NAMESPACE: &str = "https://www.akdb.de/request/2018/09/classic-ui/v1";

/// Local name of the extension root element.
pub const ROOT_ELEMENT: &str = "AuthenticationRequest";
