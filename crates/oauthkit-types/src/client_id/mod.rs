//! # Client Identifiers
//!
//! Three forms of `client_id` are recognised:
//!
//! - [`ClientIdDiscoverable`]: an HTTPS URL pointing at the client's metadata
//!   document
//! - [`ClientIdLoopback`]: `http://localhost[?scope=..&redirect_uri=..]` for
//!   native development clients
//! - [`ClientId`]: any other non-empty opaque identifier issued by the server
//!
//! [`ClientIdKind::classify`] tries them in that order.
//!
//! ```rust
//! use oauthkit_types::client_id::ClientIdKind;
//!
//! let kind = ClientIdKind::classify("https://app.example.com/client-metadata.json").unwrap();
//! assert!(matches!(kind, ClientIdKind::Discoverable(_)));
//!
//! let kind = ClientIdKind::classify("s6BhdRkqt3").unwrap();
//! assert!(matches!(kind, ClientIdKind::Opaque(_)));
//! ```

pub mod discoverable;
pub mod loopback;

pub use discoverable::{ClientIdDiscoverable, ClientIdDiscoverableError};
pub use loopback::{ClientIdLoopback, ClientIdLoopbackError, LoopbackClientParams};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::macros::impl_validated_string;
use crate::resolve::{Candidate, ResolveError, resolve_ordered};

/// Opaque client ID errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientIdError {
    /// Empty string
    #[error("Client ID must not be empty")]
    Empty,

    /// Character outside VSCHAR (0x20-0x7E)
    #[error("Client ID contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// An opaque client identifier (RFC 6749 Appendix A.1)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Validate a client ID
    ///
    /// # Errors
    ///
    /// Returns [`ClientIdError::Empty`] or [`ClientIdError::InvalidCharacter`].
    pub fn new(raw: impl Into<String>) -> Result<Self, ClientIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ClientIdError::Empty);
        }
        if let Some(c) = raw.chars().find(|c| !(' '..='~').contains(c)) {
            return Err(ClientIdError::InvalidCharacter(c));
        }
        Ok(Self(raw))
    }
}

impl_validated_string!(ClientId.0 => ClientIdError);

/// A client ID classified by form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClientIdKind {
    /// Metadata document URL
    Discoverable(ClientIdDiscoverable),
    /// `http://localhost` development client
    Loopback(ClientIdLoopback),
    /// Server-issued identifier
    Opaque(ClientId),
}

impl ClientIdKind {
    const CANDIDATES: &'static [Candidate<str, ClientIdKind>] = &[
        Candidate {
            name: "discoverable",
            attempt: |raw| ClientIdDiscoverable::new(raw).ok().map(ClientIdKind::Discoverable),
        },
        Candidate {
            name: "loopback",
            attempt: |raw| ClientIdLoopback::new(raw).ok().map(ClientIdKind::Loopback),
        },
        Candidate {
            name: "opaque",
            attempt: |raw| ClientId::new(raw).ok().map(ClientIdKind::Opaque),
        },
    ];

    /// Classify a raw client ID
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] when the value is not even a valid
    /// opaque client ID.
    pub fn classify(raw: &str) -> Result<Self, ResolveError> {
        resolve_ordered("ClientId", raw, Self::CANDIDATES)
    }

    /// The client ID as supplied
    pub fn as_str(&self) -> &str {
        match self {
            Self::Discoverable(id) => id.as_str(),
            Self::Loopback(id) => id.as_str(),
            Self::Opaque(id) => id.as_str(),
        }
    }
}

impl<'de> Deserialize<'de> for ClientIdKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::classify(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_client_id() {
        assert!(ClientId::new("s6BhdRkqt3").is_ok());
        assert!(ClientId::new("my client").is_ok());
        assert!(ClientId::new("a").is_ok());

        assert_eq!(ClientId::new(""), Err(ClientIdError::Empty));
        assert_eq!(ClientId::new("tab\there"), Err(ClientIdError::InvalidCharacter('\t')));
        assert_eq!(ClientId::new("café"), Err(ClientIdError::InvalidCharacter('é')));
    }

    #[test]
    fn test_classification_order() {
        assert!(matches!(
            ClientIdKind::classify("https://app.example.com/client.json"),
            Ok(ClientIdKind::Discoverable(_))
        ));
        assert!(matches!(
            ClientIdKind::classify("http://localhost?scope=atproto"),
            Ok(ClientIdKind::Loopback(_))
        ));
        // A bad loopback client ID is still a valid opaque one
        assert!(matches!(
            ClientIdKind::classify("http://localhost?scope=a&scope=b"),
            Ok(ClientIdKind::Opaque(_))
        ));
        assert!(matches!(
            ClientIdKind::classify(""),
            Err(ResolveError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_kind_serde() {
        let kind: ClientIdKind = serde_json::from_str(r#""http://localhost""#).unwrap();
        assert!(matches!(kind, ClientIdKind::Loopback(_)));
        assert_eq!(kind.as_str(), "http://localhost");
        assert_eq!(serde_json::to_string(&kind).unwrap(), r#""http://localhost""#);
    }
}
