//! Authorization server issuer identifiers (RFC 8414 §2)
//!
//! An issuer identifier is compared byte-for-byte against the `issuer` in
//! metadata documents and the `iss` authorization response parameter
//! (RFC 9207), so the only acceptable spelling is the canonical one. Validation
//! is a fixed-point check: the input must already equal the form the URL parser
//! would produce for it.
//!
//! ```rust
//! use oauthkit_types::IssuerIdentifier;
//!
//! assert!(IssuerIdentifier::new("https://auth.example.com").is_ok());
//! assert!(IssuerIdentifier::new("https://auth.example.com/").is_err());
//! assert!(IssuerIdentifier::new("https://AUTH.example.com").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::macros::impl_validated_string;
use crate::uri::{UriError, WebUri};

/// Issuer identifier errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssuerError {
    /// Not a valid web URI
    #[error(transparent)]
    Uri(#[from] UriError),

    /// Ends with '/'
    #[error("Issuer URL must not end with a slash")]
    EndsWithSlash,

    /// Userinfo present
    #[error("Issuer URL must not contain a username or password")]
    CredentialsDetected,

    /// Query or fragment present
    #[error("Issuer URL must not contain a query or fragment")]
    QueryOrFragmentDetected,

    /// Differs from the canonical spelling
    #[error("Issuer URL is not in canonical form: expected '{expected}', found '{found}'")]
    NotInCanonicalForm { expected: String, found: String },
}

/// The canonical spelling of a parsed URL: `scheme://host[:port]` for a root
/// path, the parser's serialization otherwise
pub(crate) fn canonical_form(url: &Url) -> String {
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        let mut canonical = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
        if let Some(port) = url.port() {
            canonical.push_str(&format!(":{port}"));
        }
        canonical
    } else {
        url.as_str().to_string()
    }
}

/// A validated issuer identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssuerIdentifier {
    raw: String,
    url: Url,
}

impl IssuerIdentifier {
    /// Validate an issuer identifier
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError`] naming the first failed rule, in this order: web
    /// URI shape, trailing slash, userinfo, query/fragment, canonical form.
    pub fn new(raw: impl Into<String>) -> Result<Self, IssuerError> {
        let raw = raw.into();
        let web = WebUri::new(raw.as_str())?;

        if raw.ends_with('/') {
            return Err(IssuerError::EndsWithSlash);
        }

        let url = web.url().clone();
        if !url.username().is_empty() || url.password().is_some() {
            return Err(IssuerError::CredentialsDetected);
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(IssuerError::QueryOrFragmentDetected);
        }

        let expected = canonical_form(&url);
        if expected != raw {
            return Err(IssuerError::NotInCanonicalForm {
                expected,
                found: raw,
            });
        }

        Ok(Self { raw, url })
    }

    /// Parsed URL components
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether `other` spells exactly this issuer
    pub fn matches(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl_validated_string!(IssuerIdentifier.raw => IssuerError);
