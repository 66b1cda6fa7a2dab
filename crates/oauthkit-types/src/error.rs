//! Crate-level error type
//!
//! Every validator family has its own error enum next to the type it guards.
//! [`Error`] gathers them for callers that validate several kinds of value in one
//! place and only need to propagate the failure.

use thiserror::Error;

use crate::authorization::AuthorizationRequestError;
use crate::client_id::{ClientIdDiscoverableError, ClientIdError, ClientIdLoopbackError};
use crate::issuer::IssuerError;
use crate::jwt::JwtError;
use crate::metadata::{
    AuthorizationServerMetadataError, ClientMetadataError, ProtectedResourceMetadataError,
};
use crate::pkce::PkceError;
use crate::redirect_uri::RedirectUriError;
use crate::resolve::ResolveError;
use crate::scope::ScopeError;
use crate::token::TokenError;
use crate::uri::UriError;

/// Literal and closed-set value errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A fixed literal field carried a different value
    #[error("Expected '{expected}', found '{found}'")]
    IncorrectValue {
        expected: &'static str,
        found: String,
    },

    /// A value outside a closed set
    #[error("Unknown {type_name} value '{value}'")]
    UnknownValue {
        type_name: &'static str,
        value: String,
    },

    /// A required field is absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Any validation failure raised by this crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Uri(#[from] UriError),

    #[error(transparent)]
    Issuer(#[from] IssuerError),

    #[error(transparent)]
    ClientId(#[from] ClientIdError),

    #[error(transparent)]
    ClientIdLoopback(#[from] ClientIdLoopbackError),

    #[error(transparent)]
    ClientIdDiscoverable(#[from] ClientIdDiscoverableError),

    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error(transparent)]
    Jwt(#[from] JwtError),

    #[error(transparent)]
    Pkce(#[from] PkceError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    RedirectUri(#[from] RedirectUriError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    AuthorizationRequest(#[from] AuthorizationRequestError),

    #[error(transparent)]
    AuthorizationServerMetadata(#[from] AuthorizationServerMetadataError),

    #[error(transparent)]
    ProtectedResourceMetadata(#[from] ProtectedResourceMetadataError),

    #[error(transparent)]
    ClientMetadata(#[from] ClientMetadataError),

    /// A JSON document failed to decode
    #[error("Failed to decode document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
