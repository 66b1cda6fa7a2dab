//! # Authorization Server Metadata
//!
//! RFC 8414 metadata, including the OpenID Connect Discovery members and the
//! PAR, DPoP and client ID metadata document extensions. Decoding checks the
//! cross-field rules, so a value of this type is always internally consistent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::constants::DEFAULT_TOKEN_ENDPOINT_AUTH_METHOD;
use crate::grant::{EndpointAuthMethod, EndpointName};
use crate::issuer::IssuerIdentifier;
use crate::pkce::CodeChallengeMethod;
use crate::uri::WebUri;

/// Authorization server metadata errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationServerMetadataError {
    /// PAR is required but no PAR endpoint is advertised
    #[error("pushed_authorization_request_endpoint is required when require_pushed_authorization_requests is true")]
    PushedAuthorizationRequestEndpointRequired,

    /// `response_types_supported` lacks `code`
    #[error("response_types_supported must include 'code'")]
    ResponseTypeCodeRequired,

    /// `none` listed as a token endpoint signing algorithm
    #[error("token_endpoint_auth_signing_alg_values_supported must not include 'none'")]
    TokenEndpointAuthSigningAlgNoneNotAllowed,

    /// Issuer mismatch between the document and where it was expected
    #[error("Issuer in document ({document}) does not match expected issuer ({expected})")]
    IssuerMismatch { document: String, expected: String },
}

fn default_auth_methods() -> Vec<String> {
    vec![DEFAULT_TOKEN_ENDPOINT_AUTH_METHOD.to_string()]
}

fn auth_methods_or_default<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let methods = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(match methods {
        Some(methods) if !(methods.len() == 1 && methods[0].is_empty()) => methods,
        _ => default_auth_methods(),
    })
}

/// OAuth 2.0 Authorization Server Metadata (RFC 8414)
///
/// ## Required Fields
///
/// - `issuer`: an [`IssuerIdentifier`] in canonical form
/// - `authorization_endpoint` and `token_endpoint`: [`WebUri`]s
///
/// `token_endpoint_auth_methods_supported` falls back to
/// `["client_secret_basic"]` when absent or `[""]`.
///
/// ## Example
///
/// ```rust
/// use oauthkit_types::metadata::AuthorizationServerMetadata;
/// use serde_json::json;
///
/// let metadata: AuthorizationServerMetadata = serde_json::from_value(json!({
///     "issuer": "https://bsky.social",
///     "authorization_endpoint": "https://bsky.social/oauth/authorize",
///     "token_endpoint": "https://bsky.social/oauth/token",
///     "pushed_authorization_request_endpoint": "https://bsky.social/oauth/par",
///     "require_pushed_authorization_requests": true,
///     "response_types_supported": ["code"],
///     "dpop_signing_alg_values_supported": ["ES256"]
/// }))
/// .unwrap();
///
/// assert!(metadata.requires_par());
/// assert!(metadata.supports_dpop());
/// assert_eq!(metadata.token_endpoint_auth_methods_supported, ["client_secret_basic"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct AuthorizationServerMetadata {
    /// REQUIRED. The authorization server's issuer identifier
    pub issuer: IssuerIdentifier,

    /// REQUIRED. URL of the authorization endpoint
    pub authorization_endpoint: WebUri,

    /// REQUIRED. URL of the token endpoint
    pub token_endpoint: WebUri,

    /// Client authentication methods at the token endpoint
    #[serde(default = "default_auth_methods", deserialize_with = "auth_methods_or_default")]
    pub token_endpoint_auth_methods_supported: Vec<String>,

    /// JWS algorithms for `private_key_jwt` and `client_secret_jwt`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_endpoint_auth_signing_alg_values_supported: Option<Vec<String>>,

    /// URL of the JWK Set document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<WebUri>,

    /// Supported scope values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes_supported: Option<Vec<String>>,

    /// Supported `response_type` values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_types_supported: Option<Vec<String>>,

    /// Supported `response_mode` values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modes_supported: Option<Vec<String>>,

    /// Supported `grant_type` values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_types_supported: Option<Vec<String>>,

    /// PKCE code challenge methods (RFC 7636)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_challenge_methods_supported: Option<Vec<CodeChallengeMethod>>,

    /// Languages and scripts supported for the UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_locales_supported: Option<Vec<String>>,

    /// Supported claim names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims_supported: Option<Vec<String>>,

    /// Languages supported for claim values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims_locales_supported: Option<Vec<String>>,

    /// Whether the `claims` parameter is supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims_parameter_supported: Option<bool>,

    /// Whether the `request` parameter is supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_parameter_supported: Option<bool>,

    /// Whether the `request_uri` parameter is supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_uri_parameter_supported: Option<bool>,

    /// Whether `request_uri` values must be pre-registered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_request_uri_registration: Option<bool>,

    /// Supported subject identifier types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_types_supported: Option<Vec<String>>,

    /// JWS algorithms for ID tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token_signing_alg_values_supported: Option<Vec<String>>,

    /// Supported `display` values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_values_supported: Option<Vec<String>>,

    /// JWS algorithms for request objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_object_signing_alg_values_supported: Option<Vec<String>>,

    /// JWE `alg` values for request objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_object_encryption_alg_values_supported: Option<Vec<String>>,

    /// JWE `enc` values for request objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_object_encryption_enc_values_supported: Option<Vec<String>>,

    /// Whether authorization responses carry `iss` (RFC 9207)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_response_iss_parameter_supported: Option<bool>,

    /// Supported authorization details types (RFC 9396)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_details_types_supported: Option<Vec<String>>,

    /// URL of the revocation endpoint (RFC 7009)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revocation_endpoint: Option<WebUri>,

    /// URL of the introspection endpoint (RFC 7662)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introspection_endpoint: Option<WebUri>,

    /// URL of the PAR endpoint (RFC 9126)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushed_authorization_request_endpoint: Option<WebUri>,

    /// Whether every authorization request must be pushed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_pushed_authorization_requests: Option<bool>,

    /// URL of the UserInfo endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userinfo_endpoint: Option<WebUri>,

    /// URL of the RP-initiated logout endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_session_endpoint: Option<WebUri>,

    /// URL of the dynamic registration endpoint (RFC 7591)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_endpoint: Option<WebUri>,

    /// JWS algorithms for DPoP proofs (RFC 9449)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpop_signing_alg_values_supported: Option<Vec<String>>,

    /// Resources protected by this server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected_resources: Option<Vec<WebUri>>,

    /// Whether URL client IDs resolve to metadata documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id_metadata_document_supported: Option<bool>,

    /// Additional metadata fields
    #[serde(flatten)]
    pub additional_fields: HashMap<String, Value>,
}

impl AuthorizationServerMetadata {
    /// Start a builder with the required members
    pub fn builder(
        issuer: IssuerIdentifier,
        authorization_endpoint: WebUri,
        token_endpoint: WebUri,
    ) -> AuthorizationServerMetadataBuilder {
        AuthorizationServerMetadataBuilder::new(issuer, authorization_endpoint, token_endpoint)
    }

    /// Check the cross-field rules
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationServerMetadataError`] when PAR is required without
    /// an endpoint, `code` is not a supported response type, or `none` is listed
    /// as a token endpoint signing algorithm.
    pub fn validate(&self) -> Result<(), AuthorizationServerMetadataError> {
        if self.requires_par() && self.pushed_authorization_request_endpoint.is_none() {
            debug!(issuer = %self.issuer, "PAR required without a PAR endpoint");
            return Err(AuthorizationServerMetadataError::PushedAuthorizationRequestEndpointRequired);
        }

        if let Some(ref response_types) = self.response_types_supported
            && !response_types.iter().any(|t| t == "code")
        {
            debug!(issuer = %self.issuer, ?response_types, "no 'code' response type");
            return Err(AuthorizationServerMetadataError::ResponseTypeCodeRequired);
        }

        if let Some(ref algorithms) = self.token_endpoint_auth_signing_alg_values_supported
            && algorithms.iter().any(|a| a == "none")
        {
            debug!(issuer = %self.issuer, "'none' listed as token endpoint signing algorithm");
            return Err(AuthorizationServerMetadataError::TokenEndpointAuthSigningAlgNoneNotAllowed);
        }

        Ok(())
    }

    /// Check that the document describes the issuer it was fetched for
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationServerMetadataError::IssuerMismatch`] when
    /// `expected` is not byte-identical to the document's issuer.
    pub fn validate_issuer(&self, expected: &str) -> Result<(), AuthorizationServerMetadataError> {
        if self.issuer.matches(expected) {
            Ok(())
        } else {
            Err(AuthorizationServerMetadataError::IssuerMismatch {
                document: self.issuer.to_string(),
                expected: expected.to_string(),
            })
        }
    }

    /// Check if a specific PKCE method is supported
    pub fn supports_pkce_method(&self, method: CodeChallengeMethod) -> bool {
        self.code_challenge_methods_supported
            .as_ref()
            .map(|methods| methods.contains(&method))
            .unwrap_or(false)
    }

    /// Check if a token endpoint authentication method is supported
    pub fn supports_auth_method(&self, method: EndpointAuthMethod) -> bool {
        self.token_endpoint_auth_methods_supported
            .iter()
            .any(|m| m == method.as_str())
    }

    /// Check if DPoP-bound tokens are supported
    pub fn supports_dpop(&self) -> bool {
        self.dpop_signing_alg_values_supported
            .as_ref()
            .map(|algs| !algs.is_empty())
            .unwrap_or(false)
    }

    /// Whether authorization requests must go through the PAR endpoint
    pub fn requires_par(&self) -> bool {
        self.require_pushed_authorization_requests == Some(true)
    }

    /// URL of a client-authenticating endpoint, if advertised
    pub fn endpoint(&self, name: EndpointName) -> Option<&WebUri> {
        match name {
            EndpointName::Token => Some(&self.token_endpoint),
            EndpointName::Revocation => self.revocation_endpoint.as_ref(),
            EndpointName::Introspection => self.introspection_endpoint.as_ref(),
            EndpointName::PushedAuthorizationRequest => {
                self.pushed_authorization_request_endpoint.as_ref()
            }
        }
    }
}

impl Serialize for AuthorizationServerMetadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Self::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for AuthorizationServerMetadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let metadata = Self::deserialize(deserializer)?;
        metadata.validate().map_err(serde::de::Error::custom)?;
        Ok(metadata)
    }
}

/// Builder for [`AuthorizationServerMetadata`]
///
/// `build()` runs the same checks as decoding.
#[derive(Debug, Clone)]
pub struct AuthorizationServerMetadataBuilder {
    metadata: AuthorizationServerMetadata,
}

impl AuthorizationServerMetadataBuilder {
    /// Create a builder with the required members and nothing else advertised
    pub fn new(issuer: IssuerIdentifier, authorization_endpoint: WebUri, token_endpoint: WebUri) -> Self {
        Self {
            metadata: AuthorizationServerMetadata {
                issuer,
                authorization_endpoint,
                token_endpoint,
                token_endpoint_auth_methods_supported: default_auth_methods(),
                token_endpoint_auth_signing_alg_values_supported: None,
                jwks_uri: None,
                scopes_supported: None,
                response_types_supported: None,
                response_modes_supported: None,
                grant_types_supported: None,
                code_challenge_methods_supported: None,
                ui_locales_supported: None,
                claims_supported: None,
                claims_locales_supported: None,
                claims_parameter_supported: None,
                request_parameter_supported: None,
                request_uri_parameter_supported: None,
                require_request_uri_registration: None,
                subject_types_supported: None,
                id_token_signing_alg_values_supported: None,
                display_values_supported: None,
                request_object_signing_alg_values_supported: None,
                request_object_encryption_alg_values_supported: None,
                request_object_encryption_enc_values_supported: None,
                authorization_response_iss_parameter_supported: None,
                authorization_details_types_supported: None,
                revocation_endpoint: None,
                introspection_endpoint: None,
                pushed_authorization_request_endpoint: None,
                require_pushed_authorization_requests: None,
                userinfo_endpoint: None,
                end_session_endpoint: None,
                registration_endpoint: None,
                dpop_signing_alg_values_supported: None,
                protected_resources: None,
                client_id_metadata_document_supported: None,
                additional_fields: HashMap::new(),
            },
        }
    }

    /// Set supported scopes
    pub fn with_scopes<S: Into<String>>(mut self, scopes: impl IntoIterator<Item = S>) -> Self {
        self.metadata.scopes_supported = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Set supported response types
    pub fn with_response_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.metadata.response_types_supported = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Set supported grant types
    pub fn with_grant_types<S: Into<String>>(mut self, grants: impl IntoIterator<Item = S>) -> Self {
        self.metadata.grant_types_supported = Some(grants.into_iter().map(Into::into).collect());
        self
    }

    /// Set token endpoint authentication methods
    pub fn with_auth_methods(mut self, methods: impl IntoIterator<Item = EndpointAuthMethod>) -> Self {
        self.metadata.token_endpoint_auth_methods_supported =
            methods.into_iter().map(|m| m.as_str().to_string()).collect();
        self
    }

    /// Set token endpoint signing algorithms
    pub fn with_auth_signing_algs<S: Into<String>>(mut self, algs: impl IntoIterator<Item = S>) -> Self {
        self.metadata.token_endpoint_auth_signing_alg_values_supported =
            Some(algs.into_iter().map(Into::into).collect());
        self
    }

    /// Set PKCE challenge methods
    pub fn with_code_challenge_methods(
        mut self,
        methods: impl IntoIterator<Item = CodeChallengeMethod>,
    ) -> Self {
        self.metadata.code_challenge_methods_supported = Some(methods.into_iter().collect());
        self
    }

    /// Advertise a PAR endpoint, optionally requiring it
    pub fn with_par_endpoint(mut self, endpoint: WebUri, required: bool) -> Self {
        self.metadata.pushed_authorization_request_endpoint = Some(endpoint);
        self.metadata.require_pushed_authorization_requests = Some(required);
        self
    }

    /// Require PAR without touching the endpoint
    pub fn require_par(mut self) -> Self {
        self.metadata.require_pushed_authorization_requests = Some(true);
        self
    }

    /// Set DPoP signing algorithms
    pub fn with_dpop_algs<S: Into<String>>(mut self, algs: impl IntoIterator<Item = S>) -> Self {
        self.metadata.dpop_signing_alg_values_supported =
            Some(algs.into_iter().map(Into::into).collect());
        self
    }

    /// Set the JWK Set URL
    pub fn with_jwks_uri(mut self, uri: WebUri) -> Self {
        self.metadata.jwks_uri = Some(uri);
        self
    }

    /// Set the revocation endpoint
    pub fn with_revocation_endpoint(mut self, uri: WebUri) -> Self {
        self.metadata.revocation_endpoint = Some(uri);
        self
    }

    /// Set the introspection endpoint
    pub fn with_introspection_endpoint(mut self, uri: WebUri) -> Self {
        self.metadata.introspection_endpoint = Some(uri);
        self
    }

    /// Advertise client ID metadata document support
    pub fn with_client_id_metadata_documents(mut self, supported: bool) -> Self {
        self.metadata.client_id_metadata_document_supported = Some(supported);
        self
    }

    /// Add an extension member
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.metadata.additional_fields.insert(name.into(), value);
        self
    }

    /// Validate and return the metadata
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationServerMetadataError`] when a cross-field rule fails.
    pub fn build(self) -> Result<AuthorizationServerMetadata, AuthorizationServerMetadataError> {
        self.metadata.validate()?;
        Ok(self.metadata)
    }
}
