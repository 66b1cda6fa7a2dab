//! Client authentication parameters sent in a request body
//!
//! [`ClientCredentials`] is resolved by trying, in order, a JWT bearer client
//! assertion (RFC 7523 §2.2), a `client_secret_post` secret, and a bare
//! `client_id` for public clients. The first variant whose required fields decode
//! wins; members a variant does not use are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::client_id::ClientId;
use crate::constants::CLIENT_ASSERTION_TYPE_JWT_BEARER;
use crate::jwt::SignedJwt;
use crate::macros::literal_marker;
use crate::resolve::{Candidate, ResolveError, resolve_ordered};

literal_marker! {
    /// `client_assertion_type=urn:ietf:params:oauth:client-assertion-type:jwt-bearer`
    JwtBearerAssertionType => CLIENT_ASSERTION_TYPE_JWT_BEARER;
}

/// `private_key_jwt` / `client_secret_jwt` authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentialsJwtBearer {
    /// Client identifier
    pub client_id: ClientId,
    /// Always the JWT bearer assertion type
    pub client_assertion_type: JwtBearerAssertionType,
    /// Signed client assertion
    pub client_assertion: SignedJwt,
}

impl ClientCredentialsJwtBearer {
    /// Build credentials from a client ID and signed assertion
    pub fn new(client_id: ClientId, client_assertion: SignedJwt) -> Self {
        Self {
            client_id,
            client_assertion_type: JwtBearerAssertionType,
            client_assertion,
        }
    }
}

/// `client_secret_post` authentication
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentialsSecretPost {
    /// Client identifier
    pub client_id: ClientId,
    /// Client secret
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentialsSecretPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsSecretPost")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Public client identification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentialsNone {
    /// Client identifier
    pub client_id: ClientId,
}

/// Client authentication carried in a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClientCredentials {
    /// Client assertion
    JwtBearer(ClientCredentialsJwtBearer),
    /// Client secret
    SecretPost(ClientCredentialsSecretPost),
    /// Public client
    None(ClientCredentialsNone),
}

impl ClientCredentials {
    const CANDIDATES: &'static [Candidate<Value, ClientCredentials>] = &[
        Candidate {
            name: "jwt_bearer",
            attempt: |value| {
                serde_json::from_value(value.clone())
                    .ok()
                    .map(ClientCredentials::JwtBearer)
            },
        },
        Candidate {
            name: "secret_post",
            attempt: |value| {
                serde_json::from_value(value.clone())
                    .ok()
                    .map(ClientCredentials::SecretPost)
            },
        },
        Candidate {
            name: "none",
            attempt: |value| {
                serde_json::from_value(value.clone())
                    .ok()
                    .map(ClientCredentials::None)
            },
        },
    ];

    /// Resolve client credentials from a JSON object
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] when no variant accepts the object.
    pub fn from_value(value: &Value) -> Result<Self, ResolveError> {
        resolve_ordered("ClientCredentials", value, Self::CANDIDATES)
    }

    /// The client identifier, whichever variant carries it
    pub fn client_id(&self) -> &ClientId {
        match self {
            Self::JwtBearer(c) => &c.client_id,
            Self::SecretPost(c) => &c.client_id,
            Self::None(c) => &c.client_id,
        }
    }
}

impl<'de> Deserialize<'de> for ClientCredentials {
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
    use crate::error::ValidationError;
    use serde_json::json;

    #[test]
    fn test_jwt_bearer_wins_first() {
        let value = json!({
            "client_id": "client",
            "client_assertion_type": CLIENT_ASSERTION_TYPE_JWT_BEARER,
            "client_assertion": "aa.bb.cc",
            "client_secret": "ignored"
        });
        let credentials = ClientCredentials::from_value(&value).unwrap();
        assert!(matches!(credentials, ClientCredentials::JwtBearer(_)));
        assert_eq!(credentials.client_id().as_str(), "client");
    }

    #[test]
    fn test_assertion_type_is_required_to_match() {
        let err = serde_json::from_value::<ClientCredentialsJwtBearer>(json!({
            "client_id": "client",
            "client_assertion_type": "urn:example:other",
            "client_assertion": "aa.bb.cc"
        }))
        .unwrap_err();
        assert!(err.to_string().contains(CLIENT_ASSERTION_TYPE_JWT_BEARER));

        assert_eq!(
            JwtBearerAssertionType::check("urn:example:other"),
            Err(ValidationError::IncorrectValue {
                expected: CLIENT_ASSERTION_TYPE_JWT_BEARER,
                found: "urn:example:other".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_assertion_falls_through_in_order() {
        let with_secret = json!({
            "client_id": "client",
            "client_secret": "s3cret",
            "client_assertion": "garbage"
        });
        assert!(matches!(
            ClientCredentials::from_value(&with_secret).unwrap(),
            ClientCredentials::SecretPost(_)
        ));

        let without_secret = json!({
            "client_id": "client",
            "client_assertion_type": CLIENT_ASSERTION_TYPE_JWT_BEARER,
            "client_assertion": "not-a-jwt"
        });
        assert!(matches!(
            ClientCredentials::from_value(&without_secret).unwrap(),
            ClientCredentials::None(_)
        ));

        assert!(matches!(
            ClientCredentials::from_value(&json!({"client_assertion": "aa.bb.cc"})),
            Err(ResolveError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_secret_post_and_public_client() {
        let secret = ClientCredentials::from_value(&json!({
            "client_id": "client",
            "client_secret": "s3cret"
        }))
        .unwrap();
        assert!(matches!(secret, ClientCredentials::SecretPost(_)));
        assert!(!format!("{:?}", secret).contains("s3cret"));

        let public = ClientCredentials::from_value(&json!({"client_id": "client"})).unwrap();
        assert!(matches!(public, ClientCredentials::None(_)));

        assert!(ClientCredentials::from_value(&json!({"client_secret": "s"})).is_err());
    }

    #[test]
    fn test_encode_emits_assertion_type() {
        let credentials = ClientCredentials::JwtBearer(ClientCredentialsJwtBearer::new(
            ClientId::new("client").unwrap(),
            SignedJwt::new("aa.bb.cc").unwrap(),
        ));
        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({
                "client_id": "client",
                "client_assertion_type": CLIENT_ASSERTION_TYPE_JWT_BEARER,
                "client_assertion": "aa.bb.cc"
            })
        );
    }
}
