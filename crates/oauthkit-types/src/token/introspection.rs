//! Token introspection responses (RFC 7662 §2.2)
//!
//! `active` is the discriminator. An inactive token carries no other
//! information, so [`IntrospectionResponse::Inactive`] always encodes as
//! `{"active":false}` whatever else the server sent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::authorization::AuthorizationDetail;
use crate::resolve::ResolveError;
use crate::scope::Scope;
use crate::token::TokenType;

/// Audience (can be string or array)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// Single audience
    Single(String),
    /// Multiple audiences
    Multiple(Vec<String>),
}

impl Audience {
    /// Check if the audience contains a specific value
    pub fn contains(&self, expected: &str) -> bool {
        match self {
            Self::Single(s) => s == expected,
            Self::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Metadata about an active token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionDetails {
    /// Scope(s) associated with the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// Client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Username (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Token type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,

    /// Authorization details bound to the token (RFC 9396)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_details: Option<Vec<AuthorizationDetail>>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration timestamp (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,

    /// Issued at timestamp (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// JWT ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Not before timestamp (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,

    /// Subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub additional_fields: HashMap<String, Value>,
}

/// An introspection response
#[derive(Debug, Clone, PartialEq)]
pub enum IntrospectionResponse {
    /// Expired, revoked, unknown, or otherwise unusable
    Inactive,
    /// Currently usable
    Active(Box<IntrospectionDetails>),
}

impl IntrospectionResponse {
    /// Whether the token is active
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Details of an active token
    pub fn details(&self) -> Option<&IntrospectionDetails> {
        match self {
            Self::Active(details) => Some(&**details),
            Self::Inactive => None,
        }
    }

    /// Decode an introspection response, dispatching on `active`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Resolve`] when `active` is missing or not a
    /// boolean, and a JSON error when an active response has malformed members.
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        let active = value
            .get("active")
            .and_then(Value::as_bool)
            .ok_or(ResolveError::MissingTag {
                type_name: "IntrospectionResponse",
                field: "active",
            })?;

        if !active {
            return Ok(Self::Inactive);
        }

        let mut members: Map<String, Value> = value.as_object().cloned().unwrap_or_default();
        members.remove("active");
        let details = serde_json::from_value(Value::Object(members))?;
        Ok(Self::Active(Box::new(details)))
    }
}

#[derive(Serialize)]
struct IntrospectionWire<'a> {
    active: bool,
    #[serde(flatten)]
    details: Option<&'a IntrospectionDetails>,
}

impl Serialize for IntrospectionResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        IntrospectionWire {
            active: self.is_active(),
            details: self.details(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IntrospectionResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inactive_drops_other_members() {
        let response: IntrospectionResponse =
            serde_json::from_value(json!({"active": false, "sub": "ignored"})).unwrap();
        assert_eq!(response, IntrospectionResponse::Inactive);
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"active": false}));
    }

    #[test]
    fn test_active_response() {
        let response: IntrospectionResponse = serde_json::from_value(json!({
            "active": true,
            "scope": "read write",
            "client_id": "l238j323ds-23ij4",
            "token_type": "bearer",
            "aud": ["https://api.example.com", "https://other.example.com"],
            "exp": 1419356238,
            "sub": "Z5O3upPC88QrAjx00dis",
            "ext": "kept"
        }))
        .unwrap();

        let details = response.details().unwrap();
        assert_eq!(details.token_type, Some(TokenType::Bearer));
        assert!(details.aud.as_ref().unwrap().contains("https://other.example.com"));
        assert_eq!(details.additional_fields.get("ext"), Some(&json!("kept")));
        assert!(!details.additional_fields.contains_key("active"));

        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded["active"], json!(true));
        assert_eq!(encoded["token_type"], json!("Bearer"));
        assert_eq!(encoded["ext"], json!("kept"));
    }

    #[test]
    fn test_active_flag_is_required() {
        assert!(serde_json::from_value::<IntrospectionResponse>(json!({"sub": "x"})).is_err());
        assert!(serde_json::from_value::<IntrospectionResponse>(json!({"active": "true"})).is_err());
    }

    #[test]
    fn test_single_audience() {
        let aud: Audience = serde_json::from_value(json!("https://api.example.com")).unwrap();
        assert!(aud.contains("https://api.example.com"));
        assert!(!aud.contains("https://other.example.com"));
    }
}
