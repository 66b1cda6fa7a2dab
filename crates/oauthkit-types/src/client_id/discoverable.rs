//! Discoverable client IDs: an HTTPS URL where the client publishes its metadata

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{Host, Url};

use crate::macros::impl_validated_string;
use crate::uri::{UriError, validate_https_uri};

/// Discoverable client ID errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientIdDiscoverableError {
    /// Not an `https://` URL
    #[error("Discoverable client ID must use https")]
    NotHttps,

    /// Failed the https URI rules
    #[error(transparent)]
    Uri(#[from] UriError),

    /// Userinfo present
    #[error("Discoverable client ID must not contain a username or password")]
    CredentialsDetected,

    /// Fragment present
    #[error("Discoverable client ID must not contain a fragment")]
    ContainsFragment,

    /// Path is the bare root
    #[error("Discoverable client ID must have a path to the metadata document")]
    EndsInTrailingSlash,

    /// Host is an IP address
    #[error("Discoverable client ID host must not be an IP address")]
    ContainsIpAddress,

    /// Path changes once normalized by the URL parser
    #[error("Discoverable client ID path is not in canonical form: expected '{expected}', found '{found}'")]
    IncorrectCanonicalForm { expected: String, found: String },
}

// The path as written: from the end of the authority up to '?' or '#'.
fn raw_path(raw: &str) -> &str {
    let after_scheme = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let Some(start) = after_scheme.find(['/', '?', '#']) else {
        return "";
    };
    let path = &after_scheme[start..];
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn decoded(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// A client ID that is the URL of the client's metadata document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientIdDiscoverable {
    raw: String,
    url: Url,
}

impl ClientIdDiscoverable {
    /// Validate a discoverable client ID
    ///
    /// # Errors
    ///
    /// Returns [`ClientIdDiscoverableError`] naming the first failed rule.
    pub fn new(raw: impl Into<String>) -> Result<Self, ClientIdDiscoverableError> {
        let raw = raw.into();
        let url = Self::check(&raw)?;
        Ok(Self { raw, url })
    }

    fn check(raw: &str) -> Result<Url, ClientIdDiscoverableError> {
        if !raw.starts_with("https://") {
            return Err(ClientIdDiscoverableError::NotHttps);
        }
        let url = validate_https_uri(raw)?;

        if !url.username().is_empty() || url.password().is_some() {
            return Err(ClientIdDiscoverableError::CredentialsDetected);
        }
        if url.fragment().is_some() {
            return Err(ClientIdDiscoverableError::ContainsFragment);
        }
        if url.path() == "/" {
            return Err(ClientIdDiscoverableError::EndsInTrailingSlash);
        }
        if matches!(url.host(), Some(Host::Ipv4(_) | Host::Ipv6(_))) {
            return Err(ClientIdDiscoverableError::ContainsIpAddress);
        }

        let expected = decoded(url.path());
        let found = decoded(raw_path(raw));
        if expected != found {
            return Err(ClientIdDiscoverableError::IncorrectCanonicalForm { expected, found });
        }

        Ok(url)
    }

    /// Whether `raw` is a valid discoverable client ID
    pub fn is_discoverable(raw: &str) -> bool {
        Self::check(raw).is_ok()
    }

    /// Parsed metadata document URL
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl_validated_string!(ClientIdDiscoverable.raw => ClientIdDiscoverableError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_discoverable_client_ids() {
        let client_id = ClientIdDiscoverable::new("https://app.example.com/client-metadata.json").unwrap();
        assert_eq!(client_id.url().path(), "/client-metadata.json");
        assert!(ClientIdDiscoverable::is_discoverable(
            "https://app.example.com/oauth/client%2Djson?v=2"
        ));
    }

    #[test]
    fn test_scheme_and_host_rules() {
        assert_eq!(
            ClientIdDiscoverable::new("http://app.example.com/client.json"),
            Err(ClientIdDiscoverableError::NotHttps)
        );
        assert_eq!(
            ClientIdDiscoverable::new("https://app/client.json"),
            Err(ClientIdDiscoverableError::Uri(UriError::LessThanTwoSegments))
        );
        assert_eq!(
            ClientIdDiscoverable::new("https://192.168.1.5/client.json"),
            Err(ClientIdDiscoverableError::ContainsIpAddress)
        );
        assert_eq!(
            ClientIdDiscoverable::new("https://[2001:db8::1]/client.json"),
            Err(ClientIdDiscoverableError::ContainsIpAddress)
        );
    }

    #[test]
    fn test_component_rules() {
        assert_eq!(
            ClientIdDiscoverable::new("https://user@app.example.com/client.json"),
            Err(ClientIdDiscoverableError::CredentialsDetected)
        );
        assert_eq!(
            ClientIdDiscoverable::new("https://app.example.com/client.json#x"),
            Err(ClientIdDiscoverableError::ContainsFragment)
        );
        assert_eq!(
            ClientIdDiscoverable::new("https://app.example.com/"),
            Err(ClientIdDiscoverableError::EndsInTrailingSlash)
        );
        assert_eq!(
            ClientIdDiscoverable::new("https://app.example.com"),
            Err(ClientIdDiscoverableError::EndsInTrailingSlash)
        );
    }

    #[test]
    fn test_dot_segments_are_not_canonical() {
        assert_eq!(
            ClientIdDiscoverable::new("https://app.example.com/a/../client.json"),
            Err(ClientIdDiscoverableError::IncorrectCanonicalForm {
                expected: "/client.json".to_string(),
                found: "/a/../client.json".to_string(),
            })
        );
    }

    #[test]
    fn test_raw_path_extraction() {
        assert_eq!(raw_path("https://a.example/x/y?q#f"), "/x/y");
        assert_eq!(raw_path("https://a.example?q"), "");
        assert_eq!(raw_path("https://a.example"), "");
    }
}
