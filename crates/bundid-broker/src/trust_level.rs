//! BundID trust levels.
//!
//! BundID grades every login with one of four STORK QAA levels. The same
//! level shows up in three spellings:
//!
//! | Level | Vendor code     | Authn context class reference |
//! |-------|-----------------|-------------------------------|
//! | 1     | `UNTERGEORDNET` | `STORK-QAA-Level-1`           |
//! | 2     | `NORMAL`        | `STORK-QAA-Level-2`           |
//! | 3     | `SUBSTANTIELL`  | `STORK-QAA-Level-3`           |
//! | 4     | `HOCH`          | `STORK-QAA-Level-4`           |

use std::fmt;

use bundid_saml::QName;
use serde::{Deserialize, Serialize};

use crate::extension::AKDB_NAMESPACE;

/// Local name of the trust level annotation on assertion attributes.
pub const TRUST_LEVEL_LOCAL_NAME: &str = "TrustLevel";

/// Returns the name of the trust level annotation BundID puts on each
/// attribute of an assertion.
#[must_use]
pub fn trust_level_qname() -> QName {
    QName::with_prefix(AKDB_NAMESPACE, TRUST_LEVEL_LOCAL_NAME, "akdb")
}

/// STORK QAA authentication level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AuthnLevel {
    /// `STORK-QAA-Level-1`.
    #[serde(rename = "STORK-QAA-Level-1")]
    Stork1,
    /// `STORK-QAA-Level-2`.
    #[serde(rename = "STORK-QAA-Level-2")]
    Stork2,
    /// `STORK-QAA-Level-3`.
    #[serde(rename = "STORK-QAA-Level-3")]
    Stork3,
    /// `STORK-QAA-Level-4`.
    #[serde(rename = "STORK-QAA-Level-4")]
    Stork4,
}

impl AuthnLevel {
    /// All levels, lowest first.
    pub const ALL: [Self; 4] = [Self::Stork1, Self::Stork2, Self::Stork3, Self::Stork4];

    /// Returns the numeric level (1 to 4).
    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::Stork1 => 1,
            Self::Stork2 => 2,
            Self::Stork3 => 3,
            Self::Stork4 => 4,
        }
    }

    /// Returns the authn context class reference.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Stork1 => "STORK-QAA-Level-1",
            Self::Stork2 => "STORK-QAA-Level-2",
            Self::Stork3 => "STORK-QAA-Level-3",
            Self::Stork4 => "STORK-QAA-Level-4",
        }
    }

    /// Returns the BundID trust level code.
    #[must_use]
    pub const fn vendor_code(self) -> &'static str {
        match self {
            Self::Stork1 => "UNTERGEORDNET",
            Self::Stork2 => "NORMAL",
            Self::Stork3 => "SUBSTANTIELL",
            Self::Stork4 => "HOCH",
        }
    }

    /// Looks up a level by its BundID trust level code.
    ///
    /// The match is exact. Unknown codes yield `None`, meaning no trust
    /// level information is available.
    #[must_use]
    pub fn from_vendor_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.vendor_code() == code)
    }

    /// Resolves a requested level of authentication.
    ///
    /// Levels above 4 resolve to [`AuthnLevel::Stork4`]; anything without an
    /// exact match below that resolves to [`AuthnLevel::Stork1`].
    #[must_use]
    pub fn from_level_of_authentication(loa: i32) -> Self {
        if loa > Self::Stork4.level() {
            return Self::Stork4;
        }
        Self::ALL
            .into_iter()
            .find(|level| level.level() == loa)
            .unwrap_or(Self::Stork1)
    }
}

impl fmt::Display for AuthnLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}
