//! OAuth 2.0 scope values (RFC 6749 §3.3)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::macros::impl_validated_string;

// scope-token = 1*( %x21 / %x23-5B / %x5D-7E ), joined by single spaces
static SCOPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\x21\x23-\x5B\x5D-\x7E]+(?: [\x21\x23-\x5B\x5D-\x7E]+)*$")
        .expect("Invalid scope regex pattern")
});

/// Scope errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// Empty, badly spaced, or containing a character outside the scope-token set
    #[error("Invalid scope '{0}': expected space-separated printable ASCII tokens without '\"' or '\\'")]
    Invalid(String),
}

/// A space-separated list of scope tokens
///
/// ```rust
/// use oauthkit_types::Scope;
///
/// let scope = Scope::new("atproto transition:generic").unwrap();
/// assert!(scope.contains("atproto"));
/// assert_eq!(scope.tokens().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(String);

impl Scope {
    /// Validate a scope string
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Invalid`] when the string is empty, has leading,
    /// trailing or doubled spaces, or contains `"`, `\`, or a character outside
    /// printable ASCII.
    pub fn new(raw: impl Into<String>) -> Result<Self, ScopeError> {
        let raw = raw.into();
        if SCOPE_REGEX.is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(ScopeError::Invalid(raw))
        }
    }

    /// Join tokens with single spaces and validate the result
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Invalid`] when there are no tokens or a token is invalid.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, ScopeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tokens
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(joined)
    }

    /// Individual scope tokens, in order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }

    /// Whether `token` is one of the scope tokens
    pub fn contains(&self, token: &str) -> bool {
        self.tokens().any(|t| t == token)
    }
}

impl_validated_string!(Scope.0 => ScopeError);
