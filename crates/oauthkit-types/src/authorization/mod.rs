//! # Authorization Requests
//!
//! An authorization request reaches the server in one of three shapes:
//!
//! | Shape | Carried as | Type |
//! |---|---|---|
//! | Plain parameters | `response_type`, `client_id`, ... | [`AuthorizationRequestParameters`] |
//! | Request object (RFC 9101) | `request=<JWT>` | [`AuthorizationRequestJar`] |
//! | Request reference (RFC 9126) | `request_uri=urn:...` | [`AuthorizationRequestUri`] |
//!
//! [`AuthorizationRequestQuery`] resolves the authorization endpoint query against
//! all three in that order. [`AuthorizationRequestPar`] does the same for a
//! pushed request body, where a `request_uri` makes no sense.

pub mod error;
pub mod par;

pub use error::{AuthorizationErrorCode, AuthorizationErrorResponse};
pub use par::ParResponse;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::client_id::ClientId;
use crate::grant::{ResponseMode, ResponseType};
use crate::jwt::Jwt;
use crate::macros::impl_validated_string;
use crate::pkce::{CodeChallengeMethod, CodeVerifier, PkceError};
use crate::redirect_uri::RedirectUri;
use crate::resolve::{Candidate, ResolveError, resolve_ordered};
use crate::scope::Scope;
use crate::uri::{DangerousUri, UriError};

/// Authorization request parameter errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationRequestError {
    /// `code_challenge_method` without `code_challenge`
    #[error("code_challenge_method requires a code_challenge")]
    MissingCodeChallenge,

    /// `code_challenge` outside the PKCE alphabet or length
    #[error("Invalid code_challenge: {0}")]
    InvalidCodeChallenge(PkceError),
}

/// Fine-grained authorization request (RFC 9396 §2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDetail {
    /// Authorization details type identifier
    #[serde(rename = "type")]
    pub detail_type: String,

    /// Resource locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,

    /// Actions to be taken at the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,

    /// Kinds of data requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatypes: Option<Vec<String>>,

    /// Specific resource identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Privilege levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privileges: Option<Vec<String>>,
}

impl AuthorizationDetail {
    /// A detail of the given type with no further constraints
    pub fn new(detail_type: impl Into<String>) -> Self {
        Self {
            detail_type: detail_type.into(),
            locations: None,
            actions: None,
            datatypes: None,
            identifier: None,
            privileges: None,
        }
    }
}

/// A reference to a pushed authorization request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequestUri(String);

impl RequestUri {
    /// Accept any absolute URI, typically `urn:ietf:params:oauth:request_uri:<ref>`
    ///
    /// # Errors
    ///
    /// Returns [`UriError::NotAUri`] when the value carries no scheme.
    pub fn new(raw: impl Into<String>) -> Result<Self, UriError> {
        let uri = DangerousUri::new(raw)?;
        Ok(Self(uri.into()))
    }
}

impl_validated_string!(RequestUri.0 => UriError);

/// Authorization request as individual parameters (RFC 6749 §4.1.1, OIDC Core §3.1.2.1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequestParameters {
    /// Requested response type
    pub response_type: ResponseType,

    /// Client identifier
    pub client_id: ClientId,

    /// Where to send the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<RedirectUri>,

    /// Requested scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// Opaque client state echoed in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// PKCE challenge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_challenge: Option<String>,

    /// PKCE challenge method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_challenge_method: Option<CodeChallengeMethod>,

    /// How the response is delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mode: Option<ResponseMode>,

    /// ID token replay protection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Hint about the account to log in with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_hint: Option<String>,

    /// Space-separated `none`, `login`, `consent`, `select_account`, `create`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// DPoP key thumbprint to bind the code to (RFC 9449 §10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpop_jkt: Option<String>,

    /// Fine-grained authorization (RFC 9396)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_details: Option<Vec<AuthorizationDetail>>,

    /// Extension parameters
    #[serde(flatten)]
    pub additional_fields: HashMap<String, Value>,
}

impl AuthorizationRequestParameters {
    /// Minimal request for `response_type` and `client_id`
    pub fn new(response_type: ResponseType, client_id: ClientId) -> Self {
        Self {
            response_type,
            client_id,
            redirect_uri: None,
            scope: None,
            state: None,
            code_challenge: None,
            code_challenge_method: None,
            response_mode: None,
            nonce: None,
            login_hint: None,
            prompt: None,
            dpop_jkt: None,
            authorization_details: None,
            additional_fields: HashMap::new(),
        }
    }

    /// Check PKCE parameter consistency
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationRequestError`] when a challenge method is given
    /// without a challenge or the challenge is malformed.
    pub fn validate(&self) -> Result<(), AuthorizationRequestError> {
        match (&self.code_challenge, &self.code_challenge_method) {
            (None, Some(_)) => Err(AuthorizationRequestError::MissingCodeChallenge),
            // The challenge shares the verifier's alphabet and length bounds
            (Some(challenge), _) => CodeVerifier::new(challenge.as_str())
                .map(|_| ())
                .map_err(AuthorizationRequestError::InvalidCodeChallenge),
            (None, None) => Ok(()),
        }
    }

    /// The effective challenge method; `plain` when a challenge has no method (RFC 7636 §4.3)
    pub fn effective_challenge_method(&self) -> Option<CodeChallengeMethod> {
        self.code_challenge
            .as_ref()
            .map(|_| self.code_challenge_method.unwrap_or(CodeChallengeMethod::Plain))
    }
}

/// Authorization request passed by value as a request object (RFC 9101)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequestJar {
    /// Client identifier, duplicated outside the request object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,

    /// The request object
    pub request: Jwt,
}

/// Authorization request passed by reference (RFC 9126 §4)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequestUri {
    /// Client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,

    /// Reference returned by the PAR endpoint
    pub request_uri: RequestUri,
}

fn parameters(value: &Value) -> Option<AuthorizationRequestParameters> {
    serde_json::from_value::<AuthorizationRequestParameters>(value.clone())
        .ok()
        .filter(|params| params.validate().is_ok())
}

/// An authorization endpoint request in any of its three shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthorizationRequestQuery {
    /// Plain parameters
    Parameters(Box<AuthorizationRequestParameters>),
    /// Request object
    Jar(AuthorizationRequestJar),
    /// Request reference
    Uri(AuthorizationRequestUri),
}

impl AuthorizationRequestQuery {
    const CANDIDATES: &'static [Candidate<Value, AuthorizationRequestQuery>] = &[
        Candidate {
            name: "parameters",
            attempt: |value| parameters(value).map(|p| AuthorizationRequestQuery::Parameters(Box::new(p))),
        },
        Candidate {
            name: "jar",
            attempt: |value| serde_json::from_value(value.clone()).ok().map(AuthorizationRequestQuery::Jar),
        },
        Candidate {
            name: "request_uri",
            attempt: |value| serde_json::from_value(value.clone()).ok().map(AuthorizationRequestQuery::Uri),
        },
    ];

    /// Resolve a decoded query object
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] when no shape accepts the object.
    pub fn from_value(value: &Value) -> Result<Self, ResolveError> {
        resolve_ordered("AuthorizationRequestQuery", value, Self::CANDIDATES)
    }

    /// Resolve a raw `application/x-www-form-urlencoded` query string
    ///
    /// `authorization_details` is JSON-decoded; every other parameter stays a
    /// string. A parameter given twice keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] when no shape accepts the parameters.
    pub fn from_query_string(query: &str) -> Result<Self, ResolveError> {
        Self::from_value(&query_to_value(query))
    }
}

fn query_to_value(query: &str) -> Value {
    let mut members = Map::new();
    for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        let value = if key == "authorization_details" {
            serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value.into_owned()))
        } else {
            Value::String(value.into_owned())
        };
        members.insert(key.into_owned(), value);
    }
    Value::Object(members)
}

impl<'de> Deserialize<'de> for AuthorizationRequestQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A pushed authorization request body (RFC 9126 §2.1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthorizationRequestPar {
    /// Plain parameters
    Parameters(Box<AuthorizationRequestParameters>),
    /// Request object
    Jar(AuthorizationRequestJar),
}

impl AuthorizationRequestPar {
    const CANDIDATES: &'static [Candidate<Value, AuthorizationRequestPar>] = &[
        Candidate {
            name: "parameters",
            attempt: |value| parameters(value).map(|p| AuthorizationRequestPar::Parameters(Box::new(p))),
        },
        Candidate {
            name: "jar",
            attempt: |value| serde_json::from_value(value.clone()).ok().map(AuthorizationRequestPar::Jar),
        },
    ];

    /// Resolve a decoded PAR body
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] when neither shape accepts the object.
    pub fn from_value(value: &Value) -> Result<Self, ResolveError> {
        resolve_ordered("AuthorizationRequestPar", value, Self::CANDIDATES)
    }
}

impl<'de> Deserialize<'de> for AuthorizationRequestPar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
