//! Loopback client IDs for native apps without a published metadata document
//!
//! A loopback client ID is `http://localhost`, optionally followed by `/` and a
//! query that may only carry `scope` (at most once) and `redirect_uri` (any number
//! of times). The query is where a development client declares what it would
//! otherwise publish in its metadata document.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::constants::LOOPBACK_CLIENT_ID_PREFIX;
use crate::macros::impl_validated_string;
use crate::scope::{Scope, ScopeError};
use crate::uri::LoopbackRedirectUri;

/// Loopback client ID errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientIdLoopbackError {
    /// Does not start with `http://localhost`
    #[error("Loopback client ID must start with '{expected}'")]
    InvalidPrefix { expected: &'static str },

    /// A '#' follows the prefix
    #[error("Loopback client ID must not contain a fragment")]
    ContainsFragment,

    /// Something other than an optional '/' and a query follows the prefix
    #[error("Loopback client ID must not contain a path, port or host suffix")]
    ContainsPath,

    /// Query key other than `scope` or `redirect_uri`
    #[error("Invalid loopback client ID query parameter '{name}'")]
    InvalidQueryParameter { name: String },

    /// `scope` given more than once
    #[error("Loopback client ID must not contain more than one 'scope' parameter")]
    MultipleScopeParameters,

    /// Query value is not valid UTF-8 once percent-decoded
    #[error("Loopback client ID query is not valid percent-encoded UTF-8")]
    InvalidEncoding,

    /// The `scope` value is malformed
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// Values declared in a loopback client ID's query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopbackClientParams {
    /// The single `scope` parameter, if present
    pub scope: Option<Scope>,
    /// Every `redirect_uri` that is a valid loopback redirect URI, if any survived
    pub redirect_uris: Option<Vec<LoopbackRedirectUri>>,
}

impl LoopbackClientParams {
    /// Whether neither field carries a value
    pub fn is_empty(&self) -> bool {
        self.scope.is_none() && self.redirect_uris.is_none()
    }
}

fn decode_component(raw: &str) -> Result<String, ClientIdLoopbackError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ClientIdLoopbackError::InvalidEncoding)
}

/// A validated loopback client ID and the parameters it declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientIdLoopback {
    raw: String,
    params: LoopbackClientParams,
}

impl ClientIdLoopback {
    /// Validate a loopback client ID and keep its parsed parameters
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientIdLoopbackError`] found by [`Self::parse`].
    pub fn new(raw: impl Into<String>) -> Result<Self, ClientIdLoopbackError> {
        let raw = raw.into();
        let params = Self::parse(&raw)?;
        Ok(Self { raw, params })
    }

    /// Parse the query of a loopback client ID
    ///
    /// Redirect URIs that are not valid loopback redirect URIs are skipped
    /// rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ClientIdLoopbackError`] for a wrong prefix, a fragment, a path,
    /// an unknown query key, a repeated `scope`, or a malformed scope value.
    pub fn parse(raw: &str) -> Result<LoopbackClientParams, ClientIdLoopbackError> {
        let rest = raw
            .strip_prefix(LOOPBACK_CLIENT_ID_PREFIX)
            .ok_or(ClientIdLoopbackError::InvalidPrefix {
                expected: LOOPBACK_CLIENT_ID_PREFIX,
            })?;

        if rest.contains('#') {
            return Err(ClientIdLoopbackError::ContainsFragment);
        }

        let rest = rest.strip_prefix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Ok(LoopbackClientParams::default());
        }
        let query = rest
            .strip_prefix('?')
            .ok_or(ClientIdLoopbackError::ContainsPath)?;

        let mut pairs = Vec::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (decode_component(key)?, Some(decode_component(value)?)),
                None => (decode_component(pair)?, None),
            };
            if key != "scope" && key != "redirect_uri" {
                return Err(ClientIdLoopbackError::InvalidQueryParameter { name: key });
            }
            pairs.push((key, value));
        }

        let mut scopes = pairs.iter().filter(|(key, _)| key == "scope");
        let scope_value = scopes.next().map(|(_, value)| value);
        if scopes.next().is_some() {
            return Err(ClientIdLoopbackError::MultipleScopeParameters);
        }
        let scope = match scope_value {
            Some(Some(value)) => Some(Scope::new(value.as_str())?),
            _ => None,
        };

        let redirect_uris: Vec<LoopbackRedirectUri> = pairs
            .iter()
            .filter(|(key, _)| key == "redirect_uri")
            .filter_map(|(_, value)| value.as_deref())
            .filter_map(|value| match LoopbackRedirectUri::new(value) {
                Ok(uri) => Some(uri),
                Err(e) => {
                    debug!(redirect_uri = value, error = %e, "Dropping invalid loopback redirect URI");
                    None
                }
            })
            .collect();

        Ok(LoopbackClientParams {
            scope,
            redirect_uris: (!redirect_uris.is_empty()).then_some(redirect_uris),
        })
    }

    /// Whether `raw` parses and declares a scope or at least one redirect URI
    pub fn is_loopback_client_id(raw: &str) -> bool {
        Self::parse(raw).is_ok_and(|params| !params.is_empty())
    }

    /// Parsed parameters
    pub fn params(&self) -> &LoopbackClientParams {
        &self.params
    }

    /// Declared scope, if any
    pub fn scope(&self) -> Option<&Scope> {
        self.params.scope.as_ref()
    }

    /// Declared redirect URIs; empty when none survived validation
    pub fn redirect_uris(&self) -> &[LoopbackRedirectUri] {
        self.params.redirect_uris.as_deref().unwrap_or_default()
    }
}

impl_validated_string!(ClientIdLoopback.raw => ClientIdLoopbackError);
