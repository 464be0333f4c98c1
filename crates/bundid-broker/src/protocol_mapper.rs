//! Token mapper for BundID session notes.
//!
//! Every user session note written by the BundID session attribute importer
//! (key prefix `ba.bundid_prop_`) becomes a token claim named after the key
//! without that prefix. Dotted claim names nest:
//!
//! | Session note | Claim |
//! |--------------|-------|
//! | `ba.bundid_prop_surname` | `surname` |
//! | `ba.bundid_prop_address.city` | `{"address": {"city": ...}}` |
//!
//! Notes imported with the automapper exclusion (`ba.` prefix) are not
//! copied.

use std::collections::HashMap;

use bundid_spi::ConfigProperty;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::importer::BUNDID_SESSION_ATTRIBUTE_PREFIX;

/// Mapper type id.
pub const PROTOCOL_MAPPER_ID: &str = "oidc-bundid-sessionnote-mapper";

/// Config key of the claim JSON type.
pub const JSON_TYPE: &str = "jsonType.label";
/// Config key enabling the claims in access tokens.
pub const ACCESS_TOKEN_CLAIM: &str = "access.token.claim";
/// Config key enabling the claims in ID tokens.
pub const ID_TOKEN_CLAIM: &str = "id.token.claim";
/// Config key enabling the claims in userinfo responses.
pub const USERINFO_TOKEN_CLAIM: &str = "userinfo.token.claim";
/// Config key enabling the claims in introspection responses.
pub const INTROSPECTION_TOKEN_CLAIM: &str = "introspection.token.claim";
/// Config key enabling the claims in the token endpoint response.
pub const ACCESS_TOKEN_RESPONSE_CLAIM: &str = "access.tokenResponse.claim";

/// Token type a claim is mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token.
    AccessToken,
    /// ID token.
    IdToken,
    /// `UserInfo` response.
    UserInfo,
    /// Token introspection response.
    Introspection,
    /// Token endpoint response.
    AccessTokenResponse,
}

/// Claim value type for JSON serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimValueType {
    /// String value.
    #[default]
    String,
    /// Integer (long) value.
    Long,
    /// Integer value.
    Int,
    /// Boolean value.
    Boolean,
    /// JSON object or array.
    Json,
}

impl ClaimValueType {
    /// Parses a `jsonType.label` value, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "string" => Some(Self::String),
            "long" => Some(Self::Long),
            "int" => Some(Self::Int),
            "boolean" => Some(Self::Boolean),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Converts a string to a JSON value of this type.
    ///
    /// Values that do not parse as the type stay strings.
    #[must_use]
    pub fn convert(self, value: &str) -> Value {
        match self {
            Self::String => Value::String(value.to_string()),
            Self::Long | Self::Int => value
                .parse::<i64>()
                .map_or_else(|_| Value::String(value.to_string()), |n| Value::Number(n.into())),
            Self::Boolean => value
                .parse::<bool>()
                .map_or_else(|_| Value::String(value.to_string()), Value::Bool),
            Self::Json => {
                serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
            }
        }
    }
}

/// Configuration of one protocol mapper instance on a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolMapperModel {
    /// Unique identifier for this mapper instance.
    pub id: Uuid,

    /// Mapper name (user-defined).
    pub name: String,

    /// Protocol mapper type ID.
    pub mapper_type: String,

    /// Configuration key-value pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl ProtocolMapperModel {
    /// Creates a mapper instance of the BundID session note type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            mapper_type: PROTOCOL_MAPPER_ID.to_string(),
            config: HashMap::new(),
        }
    }

    /// Sets a configuration value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a configuration value as a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.config.get(key).and_then(|v| v.parse().ok())
    }

    /// Gets the JSON type for claim values.
    #[must_use]
    pub fn json_type(&self) -> ClaimValueType {
        self.config
            .get(JSON_TYPE)
            .and_then(|v| ClaimValueType::parse(v))
            .unwrap_or_default()
    }

    /// Checks if claims are added to the given token type.
    ///
    /// The token endpoint response is opt-in, all other types are opt-out.
    #[must_use]
    pub fn includes(&self, token_type: TokenType) -> bool {
        match token_type {
            TokenType::AccessToken => self.get_bool(ACCESS_TOKEN_CLAIM).unwrap_or(true),
            TokenType::IdToken => self.get_bool(ID_TOKEN_CLAIM).unwrap_or(true),
            TokenType::UserInfo => self.get_bool(USERINFO_TOKEN_CLAIM).unwrap_or(true),
            TokenType::Introspection => self.get_bool(INTROSPECTION_TOKEN_CLAIM).unwrap_or(true),
            TokenType::AccessTokenResponse => {
                self.get_bool(ACCESS_TOKEN_RESPONSE_CLAIM).unwrap_or(false)
            }
        }
    }
}

/// Maps all BundID user session notes to token claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundIdProtocolMapper;

impl BundIdProtocolMapper {
    /// Returns the mapper type id.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        PROTOCOL_MAPPER_ID
    }

    /// Returns the display name.
    #[must_use]
    pub const fn display_type(&self) -> &'static str {
        "BundID User Session Notes"
    }

    /// Returns the admin UI category.
    #[must_use]
    pub const fn display_category(&self) -> &'static str {
        "Token mapper"
    }

    /// Returns the help text.
    #[must_use]
    pub const fn help_text(&self) -> &'static str {
        "Map all BundID user session notes to token claims."
    }

    /// Returns the recognized configuration keys.
    #[must_use]
    pub fn config_properties(&self) -> Vec<ConfigProperty> {
        vec![
            ConfigProperty::list(
                JSON_TYPE,
                "Claim JSON Type",
                vec![
                    "String".to_string(),
                    "long".to_string(),
                    "int".to_string(),
                    "boolean".to_string(),
                    "JSON".to_string(),
                ],
            )
            .with_default("String"),
            ConfigProperty::boolean(ID_TOKEN_CLAIM, "Add to ID token").with_default("true"),
            ConfigProperty::boolean(ACCESS_TOKEN_CLAIM, "Add to access token")
                .with_default("true"),
            ConfigProperty::boolean(USERINFO_TOKEN_CLAIM, "Add to userinfo")
                .with_default("true"),
            ConfigProperty::boolean(INTROSPECTION_TOKEN_CLAIM, "Add to introspection")
                .with_default("true"),
            ConfigProperty::boolean(ACCESS_TOKEN_RESPONSE_CLAIM, "Add to access token response")
                .with_default("false"),
        ]
    }

    /// Copies BundID session notes into `claims`.
    ///
    /// Notes are applied in key order, so a nested claim always wins over a
    /// plain claim of the same top-level name. Returns the number of claims
    /// written.
    pub fn transform(
        &self,
        token_type: TokenType,
        claims: &mut HashMap<String, Value>,
        model: &ProtocolMapperModel,
        user_session_notes: &HashMap<String, String>,
    ) -> usize {
        if !model.includes(token_type) {
            return 0;
        }

        let mut notes: Vec<(&str, &str)> = user_session_notes
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(BUNDID_SESSION_ATTRIBUTE_PREFIX)
                    .filter(|claim| !claim.is_empty())
                    .map(|claim| (claim, value.as_str()))
            })
            .collect();
        notes.sort_unstable_by_key(|(claim, _)| *claim);

        let json_type = model.json_type();
        for (claim, value) in &notes {
            set_claim_nested(claims, claim, json_type.convert(value));
        }

        tracing::trace!(
            mapper = %model.name,
            token_type = ?token_type,
            claims = notes.len(),
            "Mapped BundID session notes"
        );
        notes.len()
    }
}

/// Sets a claim value, supporting nested paths (e.g., `"address.country"`).
fn set_claim_nested(claims: &mut HashMap<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            claims.insert(path.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = claims
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(obj) = entry {
                set_in_object(obj, rest, value);
            }
        }
    }
}

fn set_in_object(obj: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            obj.insert(path.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_in_object(nested, rest, value);
            }
        }
    }
}
