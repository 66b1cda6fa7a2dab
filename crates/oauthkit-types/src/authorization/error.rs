//! Authorization endpoint error responses (RFC 6749 §4.1.2.1, OIDC Core §3.1.2.6)

use serde::{Deserialize, Serialize};

use crate::issuer::IssuerIdentifier;
use crate::macros::wire_enum;

wire_enum! {
    /// `error` codes returned to the redirect URI
    pub enum AuthorizationErrorCode {
        /// Missing, invalid or repeated parameter
        InvalidRequest => "invalid_request",
        /// Client may not use this method
        UnauthorizedClient => "unauthorized_client",
        /// Resource owner or server refused
        AccessDenied => "access_denied",
        /// Response type not supported
        UnsupportedResponseType => "unsupported_response_type",
        /// Scope invalid, unknown or malformed
        InvalidScope => "invalid_scope",
        /// Unexpected server condition
        ServerError => "server_error",
        /// Overloaded or in maintenance
        TemporarilyUnavailable => "temporarily_unavailable",
        /// `prompt=none` but interaction is needed
        InteractionRequired => "interaction_required",
        /// `prompt=none` but the user must log in
        LoginRequired => "login_required",
        /// `prompt=none` but the user must pick a session
        AccountSelectionRequired => "account_selection_required",
        /// `prompt=none` but consent is needed
        ConsentRequired => "consent_required",
        /// `request_uri` is invalid or unreachable
        InvalidRequestUri => "invalid_request_uri",
        /// `request` object is invalid
        InvalidRequestObject => "invalid_request_object",
        /// `request` parameter not supported
        RequestNotSupported => "request_not_supported",
        /// `request_uri` parameter not supported
        RequestUriNotSupported => "request_uri_not_supported",
        /// `registration` parameter not supported
        RegistrationNotSupported => "registration_not_supported",
    }
}

impl AuthorizationErrorCode {
    /// Human-readable explanation suitable for `error_description`
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "The request is missing a parameter, includes an invalid value, or is otherwise malformed",
            Self::UnauthorizedClient => "The client is not authorized to request an authorization code using this method",
            Self::AccessDenied => "The resource owner or authorization server denied the request",
            Self::UnsupportedResponseType => "The authorization server does not support obtaining an authorization code using this method",
            Self::InvalidScope => "The requested scope is invalid, unknown, or malformed",
            Self::ServerError => "The authorization server encountered an unexpected condition",
            Self::TemporarilyUnavailable => "The authorization server is temporarily unable to handle the request",
            Self::InteractionRequired => "The authorization server requires user interaction",
            Self::LoginRequired => "The authorization server requires the user to log in",
            Self::AccountSelectionRequired => "The user must select an account",
            Self::ConsentRequired => "The authorization server requires user consent",
            Self::InvalidRequestUri => "The request_uri is invalid or could not be retrieved",
            Self::InvalidRequestObject => "The request object is invalid",
            Self::RequestNotSupported => "The request parameter is not supported",
            Self::RequestUriNotSupported => "The request_uri parameter is not supported",
            Self::RegistrationNotSupported => "The registration parameter is not supported",
        }
    }

    /// Whether the code is defined by OpenID Connect rather than RFC 6749
    pub fn is_openid(&self) -> bool {
        !matches!(
            self,
            Self::InvalidRequest
                | Self::UnauthorizedClient
                | Self::AccessDenied
                | Self::UnsupportedResponseType
                | Self::InvalidScope
                | Self::ServerError
                | Self::TemporarilyUnavailable
        )
    }
}

/// Authorization error response parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationErrorResponse {
    /// Error code
    pub error: AuthorizationErrorCode,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,

    /// Page with more information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,

    /// `state` from the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Issuer identifier (RFC 9207)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<IssuerIdentifier>,
}

impl AuthorizationErrorResponse {
    /// Error response with the code's standard description
    pub fn new(error: AuthorizationErrorCode) -> Self {
        Self {
            error,
            error_description: Some(error.description().to_string()),
            error_uri: None,
            state: None,
            iss: None,
        }
    }

    /// Echo the request's `state`
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Identify the issuing server
    pub fn with_issuer(mut self, issuer: IssuerIdentifier) -> Self {
        self.iss = Some(issuer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthorizationErrorCode::ALL.len(), 16);
        assert_eq!("login_required".parse(), Ok(AuthorizationErrorCode::LoginRequired));
        assert!(AuthorizationErrorCode::ConsentRequired.is_openid());
        assert!(!AuthorizationErrorCode::AccessDenied.is_openid());
    }

    #[test]
    fn test_error_response_encoding() {
        let response = AuthorizationErrorResponse::new(AuthorizationErrorCode::AccessDenied)
            .with_state("xyz")
            .with_issuer(IssuerIdentifier::new("https://auth.example.com").unwrap());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "error": "access_denied",
                "error_description": "The resource owner or authorization server denied the request",
                "state": "xyz",
                "iss": "https://auth.example.com"
            })
        );
    }

    #[test]
    fn test_unknown_error_code_rejected() {
        assert!(
            serde_json::from_value::<AuthorizationErrorResponse>(json!({"error": "nope"})).is_err()
        );
    }
}
