//! Token identification for revocation (RFC 7009) and introspection (RFC 7662)

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::macros::wire_enum;
use crate::resolve::{Candidate, ResolveError, resolve_ordered};
use crate::token::{AccessToken, RefreshToken};

wire_enum! {
    /// `token_type_hint` values
    pub enum TokenTypeHint {
        /// Access token
        AccessToken => "access_token",
        /// Refresh token
        RefreshToken => "refresh_token",
    }
}

/// A token whose kind is not known from the value alone
///
/// Both token kinds accept any non-empty string, so resolution always yields
/// [`Token::AccessToken`]; use [`TokenIdentification::token_type_hint`] to learn
/// what the client claims it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Token {
    /// Access token
    AccessToken(AccessToken),
    /// Refresh token
    RefreshToken(RefreshToken),
}

impl Token {
    const CANDIDATES: &'static [Candidate<str, Token>] = &[
        Candidate {
            name: "access_token",
            attempt: |raw| AccessToken::new(raw).ok().map(Token::AccessToken),
        },
        Candidate {
            name: "refresh_token",
            attempt: |raw| RefreshToken::new(raw).ok().map(Token::RefreshToken),
        },
    ];

    /// Resolve a raw token
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] for an empty string.
    pub fn resolve(raw: &str) -> Result<Self, ResolveError> {
        resolve_ordered("Token", raw, Self::CANDIDATES)
    }

    /// The token string
    pub fn as_str(&self) -> &str {
        match self {
            Self::AccessToken(token) => token.as_str(),
            Self::RefreshToken(token) => token.as_str(),
        }
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::resolve(&raw).map_err(serde::de::Error::custom)
    }
}

/// The body of a revocation or introspection request
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIdentification {
    /// The token being revoked or introspected
    pub token: Token,
    /// What the client says the token is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type_hint: Option<TokenTypeHint>,
}

impl fmt::Debug for TokenIdentification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIdentification")
            .field("token", &"[REDACTED]")
            .field("token_type_hint", &self.token_type_hint)
            .finish()
    }
}
