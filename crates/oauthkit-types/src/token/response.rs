//! Successful token responses (RFC 6749 §5.1)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::authorization::AuthorizationDetail;
use crate::jwt::SignedJwt;
use crate::scope::Scope;
use crate::token::{AccessToken, RefreshToken, TokenType};

/// A successful token endpoint response
///
/// ```rust
/// use oauthkit_types::token::{TokenResponse, TokenType};
/// use serde_json::json;
///
/// let response: TokenResponse = serde_json::from_value(json!({
///     "access_token": "2YotnFZFEjr1zCsicMWpAA",
///     "token_type": "dpop",
///     "expires_in": 3600,
///     "sub": "did:plc:abc123"
/// }))
/// .unwrap();
/// assert_eq!(response.token_type, TokenType::DPoP);
/// assert!(response.additional_fields.contains_key("sub"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The issued access token
    pub access_token: AccessToken,

    /// How the access token must be presented
    pub token_type: TokenType,

    /// Granted scope, when it differs from the requested one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// Refresh token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,

    /// Access token lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,

    /// OpenID Connect ID token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<SignedJwt>,

    /// Granted authorization details (RFC 9396)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_details: Option<Vec<AuthorizationDetail>>,

    /// Extension response parameters
    #[serde(flatten)]
    pub additional_fields: HashMap<String, Value>,
}

impl TokenResponse {
    /// Whether the access token is DPoP-bound
    pub fn is_dpop_bound(&self) -> bool {
        self.token_type == TokenType::DPoP
    }
}
