//! # Redirect URIs
//!
//! A `redirect_uri` is resolved against the families below, in order. The first
//! family that accepts the value decides the variant, so a value such as
//! `http://127.0.0.1/cb` is always [`RedirectUri::LoopbackIp`] and never
//! [`RedirectUri::Loopback`].
//!
//! 1. [`LoopbackIpRedirectUri`]: `http://127.0.0.1` or `http://[::1]`
//!    (RFC 8252 §7.3; `localhost` is refused for this variant)
//! 2. [`LoopbackRedirectUri`]: any `http://` loopback host
//! 3. [`PrivateUseUri`]: reverse-DNS custom scheme (RFC 8252 §7.1)
//! 4. An `https://` [`WebUri`] (RFC 8252 §7.2 claimed HTTPS scheme)

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::resolve::{Candidate, resolve_ordered};
use crate::uri::{LoopbackRedirectUri, PrivateUseUri, UriError, WebUri};

/// Redirect URI errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectUriError {
    /// `http://localhost` where a loopback IP literal is required
    #[error("Loopback redirect URIs must use '127.0.0.1' or '[::1]' instead of 'localhost'")]
    LocalhostDetected,

    /// Failed the underlying URI rules
    #[error(transparent)]
    Uri(#[from] UriError),

    /// Matches no redirect URI family
    #[error("Redirect URI matches no supported protocol (loopback, private-use or https)")]
    NoValidProtocol,
}

/// An `http://` redirect URI on a loopback IP literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoopbackIpRedirectUri(LoopbackRedirectUri);

impl LoopbackIpRedirectUri {
    /// Validate a loopback IP redirect URI
    ///
    /// # Errors
    ///
    /// Returns [`RedirectUriError::LocalhostDetected`] for `http://localhost`,
    /// otherwise the [`UriError`] from [`LoopbackRedirectUri::new`].
    pub fn new(raw: impl Into<String>) -> Result<Self, RedirectUriError> {
        let uri = LoopbackRedirectUri::new(raw)?;
        if !uri.is_ip_loopback() {
            return Err(RedirectUriError::LocalhostDetected);
        }
        Ok(Self(uri))
    }

    /// The underlying loopback redirect URI
    pub fn as_loopback(&self) -> &LoopbackRedirectUri {
        &self.0
    }
}

impl AsRef<str> for LoopbackIpRedirectUri {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for LoopbackIpRedirectUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<LoopbackIpRedirectUri> for String {
    fn from(value: LoopbackIpRedirectUri) -> Self {
        value.0.into()
    }
}

impl TryFrom<String> for LoopbackIpRedirectUri {
    type Error = RedirectUriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A redirect URI of any supported family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RedirectUri {
    /// `http://127.0.0.1` or `http://[::1]`
    LoopbackIp(LoopbackIpRedirectUri),
    /// `http://localhost`
    Loopback(LoopbackRedirectUri),
    /// Reverse-DNS custom scheme
    PrivateUse(PrivateUseUri),
    /// `https://`
    Https(WebUri),
}

impl RedirectUri {
    const CANDIDATES: &'static [Candidate<str, RedirectUri>] = &[
        Candidate {
            name: "loopback-ip",
            attempt: |raw| LoopbackIpRedirectUri::new(raw).ok().map(RedirectUri::LoopbackIp),
        },
        Candidate {
            name: "loopback",
            attempt: |raw| LoopbackRedirectUri::new(raw).ok().map(RedirectUri::Loopback),
        },
        Candidate {
            name: "private-use",
            attempt: |raw| PrivateUseUri::new(raw).ok().map(RedirectUri::PrivateUse),
        },
        Candidate {
            name: "https",
            attempt: |raw| {
                WebUri::new(raw)
                    .ok()
                    .filter(WebUri::is_https)
                    .map(RedirectUri::Https)
            },
        },
    ];

    /// Resolve a raw redirect URI
    ///
    /// # Errors
    ///
    /// Returns [`RedirectUriError::NoValidProtocol`] when no family accepts it.
    pub fn new(raw: impl Into<String>) -> Result<Self, RedirectUriError> {
        let raw = raw.into();
        resolve_ordered("RedirectUri", raw.as_str(), Self::CANDIDATES)
            .map_err(|_| RedirectUriError::NoValidProtocol)
    }

    /// The redirect URI as supplied
    pub fn as_str(&self) -> &str {
        match self {
            Self::LoopbackIp(uri) => uri.as_ref(),
            Self::Loopback(uri) => uri.as_str(),
            Self::PrivateUse(uri) => uri.as_str(),
            Self::Https(uri) => uri.as_str(),
        }
    }

    /// Whether this is an `http://` loopback redirect (either loopback variant)
    pub fn is_loopback(&self) -> bool {
        matches!(self, Self::LoopbackIp(_) | Self::Loopback(_))
    }
}

impl std::fmt::Display for RedirectUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RedirectUri {
    type Err = RedirectUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for RedirectUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl From<LoopbackRedirectUri> for RedirectUri {
    fn from(uri: LoopbackRedirectUri) -> Self {
        match LoopbackIpRedirectUri::new(uri.as_str()) {
            Ok(ip) => Self::LoopbackIp(ip),
            Err(_) => Self::Loopback(uri),
        }
    }
}
