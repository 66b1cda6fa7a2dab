//! JWT envelope shape checks
//!
//! These types check that a string *looks like* a compact JWT: base64url
//! segments separated by dots. Nothing here decodes a segment or verifies a
//! signature; callers that need either hand the raw string to a JOSE library.
//!
//! - [`SignedJwt`]: `header.payload.signature` (three segments)
//! - [`UnsignedJwt`]: `header.payload` (two segments)
//! - [`Jwt`]: either, resolved signed-first

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

use crate::macros::impl_validated_string;
use crate::resolve::{Candidate, ResolveError, resolve_ordered};

/// Number of segments in a signed compact JWT
pub const SIGNED_JWT_SEGMENTS: usize = 3;

/// Number of segments in an unsigned compact JWT
pub const UNSIGNED_JWT_SEGMENTS: usize = 2;

/// JWT shape errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Character outside base64url, '.' and '='
    #[error("JWT contains invalid character {0:?}")]
    InvalidCharacter(char),

    /// Wrong number of dot-separated segments
    #[error("JWT must have {expected} segments, found {found}")]
    WrongSegmentCount { expected: usize, found: usize },

    /// Two adjacent dots, or a leading/trailing dot
    #[error("JWT contains an empty segment")]
    EmptySegment,
}

fn is_jwt_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=' | '.')
}

/// Check the compact serialization shape of a JWT
///
/// # Errors
///
/// Returns [`JwtError`] describing the first problem found.
pub fn check_jwt_shape(raw: &str, segments: usize) -> Result<(), JwtError> {
    if let Some(c) = raw.chars().find(|c| !is_jwt_char(*c)) {
        return Err(JwtError::InvalidCharacter(c));
    }

    let found = raw.split('.').count();
    if found != segments {
        return Err(JwtError::WrongSegmentCount {
            expected: segments,
            found,
        });
    }

    if raw.split('.').any(str::is_empty) {
        return Err(JwtError::EmptySegment);
    }

    Ok(())
}

/// Whether `raw` has the compact shape of a JWT with `segments` segments
pub fn is_valid_jwt_shape(raw: &str, segments: usize) -> bool {
    check_jwt_shape(raw, segments).is_ok()
}

/// A compact JWT with a signature segment
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignedJwt(String);

impl SignedJwt {
    /// Validate a signed JWT's shape
    ///
    /// # Errors
    ///
    /// Returns [`JwtError`] if the string is not three non-empty base64url segments.
    pub fn new(raw: impl Into<String>) -> Result<Self, JwtError> {
        let raw = raw.into();
        check_jwt_shape(&raw, SIGNED_JWT_SEGMENTS)?;
        Ok(Self(raw))
    }
}

/// A compact JWT without a signature segment
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnsignedJwt(String);

impl UnsignedJwt {
    /// Validate an unsigned JWT's shape
    ///
    /// # Errors
    ///
    /// Returns [`JwtError`] if the string is not two non-empty base64url segments.
    pub fn new(raw: impl Into<String>) -> Result<Self, JwtError> {
        let raw = raw.into();
        check_jwt_shape(&raw, UNSIGNED_JWT_SEGMENTS)?;
        Ok(Self(raw))
    }
}

impl_validated_string! {
    SignedJwt.0 => JwtError,
    UnsignedJwt.0 => JwtError,
}

// JWTs are bearer material; keep them out of logs.
impl fmt::Debug for SignedJwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignedJwt").field(&"[REDACTED]").finish()
    }
}

impl fmt::Debug for UnsignedJwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnsignedJwt").field(&"[REDACTED]").finish()
    }
}

/// A signed or unsigned compact JWT
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Jwt {
    /// Three segments
    Signed(SignedJwt),
    /// Two segments
    Unsigned(UnsignedJwt),
}

impl Jwt {
    const CANDIDATES: &'static [Candidate<str, Jwt>] = &[
        Candidate {
            name: "signed",
            attempt: |raw| SignedJwt::new(raw).ok().map(Jwt::Signed),
        },
        Candidate {
            name: "unsigned",
            attempt: |raw| UnsignedJwt::new(raw).ok().map(Jwt::Unsigned),
        },
    ];

    /// Resolve a raw string as a signed JWT, then as an unsigned one
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] if neither shape fits.
    pub fn resolve(raw: &str) -> Result<Self, ResolveError> {
        resolve_ordered("Jwt", raw, Self::CANDIDATES)
    }

    /// The raw compact serialization
    pub fn as_str(&self) -> &str {
        match self {
            Self::Signed(jwt) => jwt.as_str(),
            Self::Unsigned(jwt) => jwt.as_str(),
        }
    }

    /// Whether a signature segment is present
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }
}

impl<'de> Deserialize<'de> for Jwt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::resolve(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_jwt_shape() {
        assert!(SignedJwt::new("aa.bb.cc").is_ok());
        assert!(SignedJwt::new("eyJhbGciOiJFUzI1NiJ9.eyJzdWIiOiIxIn0.c2ln").is_ok());
        assert!(SignedJwt::new("a-_=.b.c").is_ok());

        assert_eq!(
            SignedJwt::new("aa.bb"),
            Err(JwtError::WrongSegmentCount {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(SignedJwt::new("aa..cc"), Err(JwtError::EmptySegment));
        assert_eq!(SignedJwt::new("aa.bb.cc+"), Err(JwtError::InvalidCharacter('+')));
    }

    #[test]
    fn test_unsigned_jwt_shape() {
        assert!(UnsignedJwt::new("aa.bb").is_ok());
        assert!(UnsignedJwt::new("aa.bb.cc").is_err());
        assert_eq!(UnsignedJwt::new("aa."), Err(JwtError::EmptySegment));
        assert_eq!(
            UnsignedJwt::new(""),
            Err(JwtError::WrongSegmentCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_jwt_resolution_order() {
        assert!(Jwt::resolve("aa.bb.cc").unwrap().is_signed());
        assert!(!Jwt::resolve("aa.bb").unwrap().is_signed());
        assert!(matches!(
            Jwt::resolve("not a jwt"),
            Err(ResolveError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_jwt_serde() {
        let jwt: Jwt = serde_json::from_str(r#""aa.bb""#).unwrap();
        assert_eq!(jwt.as_str(), "aa.bb");
        assert_eq!(serde_json::to_string(&jwt).unwrap(), r#""aa.bb""#);
        assert!(serde_json::from_str::<Jwt>(r#""aa""#).is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let jwt = SignedJwt::new("secret.token.value").unwrap();
        let debug = format!("{:?}", jwt);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
