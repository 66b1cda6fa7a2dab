//! Token endpoint requests (RFC 6749 §4)
//!
//! The `grant_type` field alone decides which request shape applies; an
//! unrecognised grant type is rejected rather than guessed at. Each request
//! struct pins its own `grant_type` with a literal marker, so decoding a request
//! struct directly also refuses a mismatched grant type.
//!
//! ```rust
//! use oauthkit_types::token::TokenRequest;
//! use oauthkit_types::grant::GrantType;
//! use serde_json::json;
//!
//! let request = TokenRequest::from_value(&json!({
//!     "grant_type": "refresh_token",
//!     "refresh_token": "tGzv3JOkF0XG5Qx2TlKWIA"
//! }))
//! .unwrap();
//! assert_eq!(request.grant_type(), GrantType::RefreshToken);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::client_id::ClientId;
use crate::error::Result;
use crate::grant::{
    AuthorizationCodeGrant, ClientCredentialsGrant, GrantType, PasswordGrant, RefreshTokenGrant,
};
use crate::pkce::CodeVerifier;
use crate::redirect_uri::RedirectUri;
use crate::resolve::{ResolveError, tag_field};
use crate::scope::Scope;
use crate::token::RefreshToken;
use crate::uri::WebUri;

/// `grant_type=authorization_code`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationCodeTokenRequest {
    /// Literal `authorization_code`
    pub grant_type: AuthorizationCodeGrant,
    /// Authorization code from the authorization response
    pub code: String,
    /// Redirect URI used in the authorization request
    pub redirect_uri: RedirectUri,
    /// PKCE code verifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<CodeVerifier>,
    /// Client identifier, for clients not authenticating by other means
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// Target resource (RFC 8707)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<WebUri>,
}

/// `grant_type=refresh_token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenTokenRequest {
    /// Literal `refresh_token`
    pub grant_type: RefreshTokenGrant,
    /// Refresh token to exchange
    pub refresh_token: RefreshToken,
    /// Narrower scope to request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// Client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// Target resource (RFC 8707)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<WebUri>,
}

/// `grant_type=password`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordTokenRequest {
    /// Literal `password`
    pub grant_type: PasswordGrant,
    /// Resource owner username
    pub username: String,
    /// Resource owner password
    pub password: String,
    /// Requested scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// Client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
}

impl fmt::Debug for PasswordTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordTokenRequest")
            .field("grant_type", &self.grant_type)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// `grant_type=client_credentials`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentialsTokenRequest {
    /// Literal `client_credentials`
    pub grant_type: ClientCredentialsGrant,
    /// Requested scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// Target resource (RFC 8707)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<WebUri>,
}

/// A token request of any supported grant type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenRequest {
    /// Authorization code exchange
    AuthorizationCode(AuthorizationCodeTokenRequest),
    /// Refresh
    RefreshToken(RefreshTokenTokenRequest),
    /// Resource owner password credentials
    Password(PasswordTokenRequest),
    /// Client credentials
    ClientCredentials(ClientCredentialsTokenRequest),
}

impl TokenRequest {
    /// Decode a token request, dispatching on `grant_type`
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingTag`] or [`ResolveError::UnknownTag`] for a
    /// missing or unsupported grant type, and a JSON error when the body does not
    /// match the grant's request shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        let tag = tag_field("TokenRequest", value, "grant_type")?;
        let request = match tag.parse::<GrantType>() {
            Ok(GrantType::AuthorizationCode) => {
                Self::AuthorizationCode(serde_json::from_value(value.clone())?)
            }
            Ok(GrantType::RefreshToken) => Self::RefreshToken(serde_json::from_value(value.clone())?),
            Ok(GrantType::Password) => Self::Password(serde_json::from_value(value.clone())?),
            Ok(GrantType::ClientCredentials) => {
                Self::ClientCredentials(serde_json::from_value(value.clone())?)
            }
            _ => {
                debug!(grant_type = tag, "Unsupported token request grant type");
                return Err(ResolveError::UnknownTag {
                    type_name: "TokenRequest",
                    tag: tag.to_string(),
                }
                .into());
            }
        };
        Ok(request)
    }

    /// The request's grant type
    pub fn grant_type(&self) -> GrantType {
        match self {
            Self::AuthorizationCode(_) => GrantType::AuthorizationCode,
            Self::RefreshToken(_) => GrantType::RefreshToken,
            Self::Password(_) => GrantType::Password,
            Self::ClientCredentials(_) => GrantType::ClientCredentials,
        }
    }
}

impl<'de> Deserialize<'de> for TokenRequest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
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
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_authorization_code_request() {
        let request = TokenRequest::from_value(&json!({
            "grant_type": "authorization_code",
            "code": "SplxlOBeZQQYbYS6WxSbIA",
            "redirect_uri": "http://127.0.0.1/callback",
            "code_verifier": "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"
        }))
        .unwrap();

        let TokenRequest::AuthorizationCode(inner) = &request else {
            panic!("expected authorization code request, got {:?}", request);
        };
        assert!(matches!(inner.redirect_uri, RedirectUri::LoopbackIp(_)));
        assert!(inner.code_verifier.is_some());
        assert_eq!(request.grant_type(), GrantType::AuthorizationCode);
    }

    #[test]
    fn test_encode_reemits_grant_type() {
        let request = TokenRequest::from_value(&json!({
            "grant_type": "client_credentials",
            "scope": "read"
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"grant_type": "client_credentials", "scope": "read"})
        );
    }

    #[test]
    fn test_unknown_and_missing_grant_type() {
        let err = TokenRequest::from_value(&json!({"grant_type": "implicit"})).unwrap_err();
        assert!(matches!(
            err,
            Error::Resolve(ResolveError::UnknownTag { ref tag, .. }) if tag.as_str() == "implicit"
        ));

        let err = TokenRequest::from_value(&json!({"code": "x"})).unwrap_err();
        assert!(matches!(err, Error::Resolve(ResolveError::MissingTag { .. })));
    }

    #[test]
    fn test_variant_fields_are_validated() {
        let err = TokenRequest::from_value(&json!({
            "grant_type": "authorization_code",
            "code": "abc",
            "redirect_uri": "http://example.com/cb"
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        assert!(TokenRequest::from_value(&json!({
            "grant_type": "refresh_token",
            "refresh_token": ""
        }))
        .is_err());
    }

    #[test]
    fn test_direct_decode_rejects_other_grant_type() {
        let err = serde_json::from_value::<PasswordTokenRequest>(json!({
            "grant_type": "client_credentials",
            "username": "alice",
            "password": "pw"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Expected 'password'"));
    }

    #[test]
    fn test_password_is_redacted() {
        let request: TokenRequest = serde_json::from_value(json!({
            "grant_type": "password",
            "username": "alice",
            "password": "hunter2"
        }))
        .unwrap();
        let debug = format!("{:?}", request);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
