//! # Tokens
//!
//! Token values and the token endpoint envelopes that carry them:
//!
//! - [`request`]: `grant_type`-tagged token requests
//! - [`response`]: successful token responses (RFC 6749 §5.1)
//! - [`identification`]: the `token` + `token_type_hint` pair sent to revocation
//!   and introspection endpoints
//! - [`introspection`]: introspection responses (RFC 7662 §2.2)
//!
//! Token strings are bearer credentials. Their `Debug` output is redacted so
//! that they never reach logs through a `{:?}`.

pub mod identification;
pub mod introspection;
pub mod request;
pub mod response;

pub use identification::{Token, TokenIdentification, TokenTypeHint};
pub use introspection::{Audience, IntrospectionDetails, IntrospectionResponse};
pub use request::{
    AuthorizationCodeTokenRequest, ClientCredentialsTokenRequest, PasswordTokenRequest,
    RefreshTokenTokenRequest, TokenRequest,
};
pub use response::TokenResponse;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::macros::impl_validated_string;

/// Token value errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Empty token string
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// Unknown `token_type`
    #[error("Unsupported token type '{0}'")]
    UnsupportedType(String),
}

/// An access token
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    /// Accept any non-empty access token
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Empty`] for an empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TokenError::Empty("Access token"));
        }
        Ok(Self(raw))
    }
}

/// A refresh token
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Accept any non-empty refresh token
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Empty`] for an empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TokenError::Empty("Refresh token"));
        }
        Ok(Self(raw))
    }
}

impl_validated_string! {
    AccessToken.0 => TokenError,
    RefreshToken.0 => TokenError,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// `token_type` values
///
/// Parsing is case-insensitive (RFC 6749 §5.1); encoding always uses the
/// registered spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Sender-constrained token (RFC 9449)
    DPoP,
    /// Bearer token (RFC 6750)
    Bearer,
}

impl TokenType {
    /// Registered spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DPoP => "DPoP",
            Self::Bearer => "Bearer",
        }
    }

    /// Parse ignoring case, returning `None` for unknown types
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dpop" => Ok(Self::DPoP),
            "bearer" => Ok(Self::Bearer),
            _ => Err(TokenError::UnsupportedType(s.to_string())),
        }
    }
}

impl Serialize for TokenType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TokenType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_must_not_be_empty() {
        assert!(AccessToken::new("2YotnFZFEjr1zCsicMWpAA").is_ok());
        assert_eq!(AccessToken::new(""), Err(TokenError::Empty("Access token")));
        assert_eq!(RefreshToken::new(""), Err(TokenError::Empty("Refresh token")));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = RefreshToken::new("tGzv3JOkF0XG5Qx2TlKWIA").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("tGzv3"));
        assert_eq!(debug, r#"RefreshToken("[REDACTED]")"#);
        assert_eq!(token.as_str(), "tGzv3JOkF0XG5Qx2TlKWIA");
    }

    #[test]
    fn test_token_type_is_case_insensitive() {
        assert_eq!(TokenType::parse("bearer"), Some(TokenType::Bearer));
        assert_eq!(TokenType::parse("DPOP"), Some(TokenType::DPoP));
        assert_eq!(TokenType::parse("mac"), None);

        let parsed: TokenType = serde_json::from_str(r#""BEARER""#).unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""Bearer""#);
    }
}
