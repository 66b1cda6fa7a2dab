//! PKCE (RFC 7636) code verifiers and challenge methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{CODE_VERIFIER_MAX_LENGTH, CODE_VERIFIER_MIN_LENGTH};
use crate::macros::impl_validated_string;

/// Code verifier errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PkceError {
    /// Outside 43..=128 characters
    #[error("Code verifier must be between 43 and 128 characters, got {0}")]
    InvalidLength(usize),

    /// Outside the unreserved character set
    #[error("Code verifier contains invalid character {0:?}")]
    InvalidCharacter(char),

    /// Unknown `code_challenge_method`
    #[error("Unsupported code challenge method: {0}")]
    UnsupportedMethod(String),
}

/// A PKCE code verifier: 43 to 128 characters of `[A-Za-z0-9-._~]`
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeVerifier(String);

impl CodeVerifier {
    /// Validate a code verifier
    ///
    /// # Errors
    ///
    /// Returns [`PkceError::InvalidLength`] or [`PkceError::InvalidCharacter`].
    pub fn new(raw: impl Into<String>) -> Result<Self, PkceError> {
        let raw = raw.into();

        let length = raw.chars().count();
        if !(CODE_VERIFIER_MIN_LENGTH..=CODE_VERIFIER_MAX_LENGTH).contains(&length) {
            return Err(PkceError::InvalidLength(length));
        }

        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')))
        {
            return Err(PkceError::InvalidCharacter(c));
        }

        Ok(Self(raw))
    }
}

impl_validated_string!(CodeVerifier.0 => PkceError);

impl fmt::Debug for CodeVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CodeVerifier").field(&"[REDACTED]").finish()
    }
}

/// `code_challenge_method` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CodeChallengeMethod {
    /// SHA-256 of the verifier, base64url encoded
    #[default]
    S256,
    /// The verifier itself
    #[serde(rename = "plain")]
    Plain,
}

impl CodeChallengeMethod {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S256 => "S256",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for CodeChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeChallengeMethod {
    type Err = PkceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S256" => Ok(Self::S256),
            "plain" => Ok(Self::Plain),
            other => Err(PkceError::UnsupportedMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_verifier_length_bounds() {
        assert_eq!(CodeVerifier::new("a".repeat(42)), Err(PkceError::InvalidLength(42)));
        assert!(CodeVerifier::new("a".repeat(43)).is_ok());
        assert!(CodeVerifier::new("a".repeat(128)).is_ok());
        assert_eq!(
            CodeVerifier::new("a".repeat(129)),
            Err(PkceError::InvalidLength(129))
        );
    }

    #[test]
    fn test_code_verifier_charset() {
        let valid = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk~.";
        assert!(CodeVerifier::new(valid).is_ok());

        let invalid = format!("{}+", "a".repeat(50));
        assert_eq!(CodeVerifier::new(invalid), Err(PkceError::InvalidCharacter('+')));
    }

    #[test]
    fn test_code_verifier_serde() {
        let verifier = "x".repeat(43);
        let json = serde_json::to_string(&verifier).unwrap();
        let parsed: CodeVerifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_str(), verifier);

        assert!(serde_json::from_str::<CodeVerifier>(r#""short""#).is_err());
    }

    #[test]
    fn test_challenge_method_names() {
        assert_eq!("S256".parse(), Ok(CodeChallengeMethod::S256));
        assert_eq!("plain".parse(), Ok(CodeChallengeMethod::Plain));
        assert!("s256".parse::<CodeChallengeMethod>().is_err());
        assert_eq!(
            serde_json::to_string(&CodeChallengeMethod::Plain).unwrap(),
            r#""plain""#
        );
    }
}
