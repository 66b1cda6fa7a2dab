//! # URI Validators
//!
//! Shape rules for the URI families used by OAuth 2.0 for native apps
//! (RFC 8252) and by authorization server metadata (RFC 8414).
//!
//! | Type | Accepts |
//! |------|---------|
//! | [`WebUri`] | `https://` with a dotted, non-`.local` host (or an IP literal), or `http://` on a loopback host |
//! | [`LoopbackRedirectUri`] | `http://` on `localhost`, `127.0.0.1` or `[::1]` |
//! | [`PrivateUseUri`] | reverse-DNS custom scheme with no authority, e.g. `com.example.app:/callback` |
//! | [`DangerousUri`] | anything with a scheme; used to flag values that must not be followed blindly |
//!
//! URL component parsing is delegated to the [`url`] crate. Host comparisons use the
//! host exactly as written in the input (see [`crate::lexical::authority_host`]), since
//! the parser would otherwise normalize case and IPv6 notation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::lexical::{LOOPBACK_IP_HOSTS, authority_host, is_ip_literal, is_loopback_host};
use crate::macros::impl_validated_string;

/// URI shape errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    /// Expected an `http://` (or, where allowed, `https://`) URI
    #[error("URI must start with 'http://' or 'https://'")]
    NoHttpProtocol,

    /// Expected an `https://` URI
    #[error("URI must start with 'https://'")]
    NoHttpsProtocol,

    /// No host between the scheme and the path
    #[error("URI must contain a hostname")]
    NoUriHostname,

    /// `http://` URI whose host is not a loopback host
    #[error("URI host must be 'localhost', '127.0.0.1' or '[::1]'")]
    InvalidLoopbackUri,

    /// Host is a single label
    #[error("URI host must contain at least two segments")]
    LessThanTwoSegments,

    /// Host is in the `.local` multicast DNS zone
    #[error("URI host must not end with '.local'")]
    EndsInLocal,

    /// Private-use scheme is not in reverse-DNS form
    #[error("URI scheme must be a reverse domain name containing a '.'")]
    NoValidProtocol,

    /// Private-use URI has no '.' or no ':'
    #[error("URI must contain both a '.' and a ':'")]
    MissingDotOrColon,

    /// First '.' appears after the scheme separator
    #[error("URI must contain a '.' before the first ':'")]
    DotAfterColon,

    /// Rejected by the URL parser
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Private-use URI carries an authority
    #[error("Private-use URIs must not have a hostname (use a single '/' after the scheme)")]
    ContainsHostname,

    /// Input has no recognisable scheme
    #[error("Value is not a URI with a scheme")]
    NotAUri,
}

fn parse_url(raw: &str) -> Result<Url, UriError> {
    Url::parse(raw).map_err(|e| UriError::InvalidUrl(e.to_string()))
}

/// Validate the `https://` branch of [`WebUri`]
///
/// The host must be present. Unless it is an IP literal it must contain a `.`
/// and must not end in `.local`.
///
/// # Errors
///
/// Returns [`UriError`] naming the first rule the input breaks.
pub fn validate_https_uri(raw: &str) -> Result<Url, UriError> {
    if !raw.starts_with("https://") {
        return Err(UriError::NoHttpsProtocol);
    }

    let host = authority_host(raw).ok_or(UriError::NoUriHostname)?;
    let url = parse_url(raw)?;

    if !is_ip_literal(host) {
        if !host.contains('.') {
            return Err(UriError::LessThanTwoSegments);
        }
        if host.to_ascii_lowercase().ends_with(".local") {
            return Err(UriError::EndsInLocal);
        }
    }

    Ok(url)
}

/// An `http://` URI on a loopback host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoopbackRedirectUri(String);

impl LoopbackRedirectUri {
    /// Validate a loopback redirect URI
    ///
    /// # Errors
    ///
    /// - [`UriError::NoHttpProtocol`] when the scheme is not `http://`
    /// - [`UriError::InvalidLoopbackUri`] when the host is not a loopback host
    /// - [`UriError::InvalidUrl`] when the URL parser rejects the string
    pub fn new(raw: impl Into<String>) -> Result<Self, UriError> {
        let raw = raw.into();
        Self::check(&raw)?;
        Ok(Self(raw))
    }

    fn check(raw: &str) -> Result<Url, UriError> {
        if !raw.starts_with("http://") {
            return Err(UriError::NoHttpProtocol);
        }
        match authority_host(raw) {
            Some(host) if is_loopback_host(host) => parse_url(raw),
            _ => Err(UriError::InvalidLoopbackUri),
        }
    }

    /// The host as written (`localhost`, `127.0.0.1` or `[::1]`)
    pub fn host(&self) -> &str {
        authority_host(&self.0).unwrap_or_default()
    }

    /// Whether the host is a loopback IP literal rather than `localhost`
    pub fn is_ip_loopback(&self) -> bool {
        LOOPBACK_IP_HOSTS.contains(&self.host())
    }
}

/// A URI usable as a web endpoint
///
/// Either an `https://` URI whose host passes [`validate_https_uri`], or an
/// `http://` URI on a loopback host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebUri {
    raw: String,
    url: Url,
}

impl WebUri {
    /// Validate a web URI
    ///
    /// # Errors
    ///
    /// Returns [`UriError`] from the loopback rules for `http://` input, from
    /// [`validate_https_uri`] for `https://` input, and
    /// [`UriError::NoHttpProtocol`] for any other scheme.
    pub fn new(raw: impl Into<String>) -> Result<Self, UriError> {
        let raw = raw.into();
        let url = if raw.starts_with("http://") {
            LoopbackRedirectUri::check(&raw)?
        } else if raw.starts_with("https://") {
            validate_https_uri(&raw)?
        } else {
            return Err(UriError::NoHttpProtocol);
        };
        Ok(Self { raw, url })
    }

    /// Parsed URL components
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether this is an `https://` URI
    pub fn is_https(&self) -> bool {
        self.raw.starts_with("https://")
    }

    /// Whether this is an `http://` loopback URI
    pub fn is_loopback(&self) -> bool {
        !self.is_https()
    }
}

/// A private-use URI scheme redirect (RFC 8252 §7.1)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrivateUseUri(String);

impl PrivateUseUri {
    /// Validate a private-use URI
    ///
    /// # Errors
    ///
    /// Returns [`UriError::MissingDotOrColon`], [`UriError::DotAfterColon`],
    /// [`UriError::InvalidUrl`], [`UriError::NoValidProtocol`] or
    /// [`UriError::ContainsHostname`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UriError> {
        let raw = raw.into();

        let (Some(dot), Some(colon)) = (raw.find('.'), raw.find(':')) else {
            return Err(UriError::MissingDotOrColon);
        };
        if dot > colon {
            return Err(UriError::DotAfterColon);
        }

        let url = parse_url(&raw)?;
        if !url.scheme().contains('.') {
            return Err(UriError::NoValidProtocol);
        }
        if url.host().is_some() {
            return Err(UriError::ContainsHostname);
        }

        Ok(Self(raw))
    }

    /// The reverse-DNS scheme, without the trailing ':'
    pub fn scheme(&self) -> &str {
        self.0.split_once(':').map(|(scheme, _)| scheme).unwrap_or_default()
    }
}

/// A string that carries a URI scheme
///
/// This is a coarse heuristic for spotting values such as `javascript:` links in
/// metadata documents. A value that fails this check is "not a URI", which is not
/// the same as "safe to follow".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DangerousUri(String);

impl DangerousUri {
    /// Accept any string that contains ':' and parses with a scheme
    ///
    /// # Errors
    ///
    /// Returns [`UriError::NotAUri`] otherwise.
    pub fn new(raw: impl Into<String>) -> Result<Self, UriError> {
        let raw = raw.into();
        if !raw.contains(':') {
            return Err(UriError::NotAUri);
        }
        match Url::parse(&raw) {
            Ok(url) if !url.scheme().is_empty() => Ok(Self(raw)),
            _ => Err(UriError::NotAUri),
        }
    }
}

impl_validated_string! {
    LoopbackRedirectUri.0 => UriError,
    WebUri.raw => UriError,
    PrivateUseUri.0 => UriError,
    DangerousUri.0 => UriError,
}
