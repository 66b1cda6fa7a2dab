//! # Client Metadata
//!
//! Dynamic client registration metadata (RFC 7591 §2, OIDC Registration §2),
//! also used as the body of a client ID metadata document.
//!
//! ## Example
//!
//! ```json
//! {
//!   "client_id": "https://app.example.com/client-metadata.json",
//!   "client_name": "Example App",
//!   "redirect_uris": ["https://app.example.com/callback"],
//!   "grant_types": ["authorization_code", "refresh_token"],
//!   "response_types": ["code"],
//!   "scope": "atproto transition:generic",
//!   "token_endpoint_auth_method": "private_key_jwt",
//!   "token_endpoint_auth_signing_alg": "ES256",
//!   "jwks_uri": "https://app.example.com/jwks.json",
//!   "application_type": "web",
//!   "dpop_bound_access_tokens": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::client_id::{ClientId, ClientIdLoopback};
use crate::constants::{ATPROTO_LOOPBACK_REDIRECT_URIS, ATPROTO_SCOPE};
use crate::grant::{EndpointAuthMethod, GrantType, ResponseType};
use crate::macros::wire_enum;
use crate::redirect_uri::RedirectUri;
use crate::scope::Scope;
use crate::uri::{LoopbackRedirectUri, WebUri};

/// Client metadata validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientMetadataError {
    /// Missing redirect_uris
    #[error("redirect_uris is required and cannot be empty")]
    MissingRedirectUris,

    /// A signing algorithm for a client that does not authenticate
    #[error("token_endpoint_auth_signing_alg is not allowed with token_endpoint_auth_method 'none'")]
    SigningAlgWithoutAuthentication,

    /// Both inline and referenced keys
    #[error("jwks and jwks_uri are mutually exclusive")]
    ConflictingJwks,

    /// `code` response type without the matching grant
    #[error("response_types 'code' requires grant_types 'authorization_code'")]
    MissingAuthorizationCodeGrant,

    /// client_id in the document differs from where it was fetched
    #[error("client_id in document ({document}) does not match URL ({url})")]
    ClientIdMismatch { document: String, url: String },
}

wire_enum! {
    /// Kind of application (OIDC Registration §2)
    #[derive(Default)]
    pub enum ApplicationType {
        /// Browser-based or server-side client
        #[default]
        Web => "web",
        /// Installed application
        Native => "native",
    }
}

wire_enum! {
    /// Subject identifier type (OIDC Core §8)
    #[derive(Default)]
    pub enum SubjectType {
        /// Same `sub` for every client
        #[default]
        Public => "public",
        /// Distinct `sub` per sector
        Pairwise => "pairwise",
    }
}

fn default_response_types() -> Vec<ResponseType> {
    vec![ResponseType::Code]
}

fn default_grant_types() -> Vec<GrantType> {
    vec![GrantType::AuthorizationCode]
}

/// Registered client metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// Client identifier, present in metadata documents and registration responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,

    /// Allowed redirect URIs
    pub redirect_uris: Vec<RedirectUri>,

    /// Response types the client will use (default: `["code"]`)
    #[serde(default = "default_response_types")]
    pub response_types: Vec<ResponseType>,

    /// Grant types the client will use (default: `["authorization_code"]`)
    #[serde(default = "default_grant_types")]
    pub grant_types: Vec<GrantType>,

    /// Scope the client may request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// Token endpoint authentication method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_endpoint_auth_method: Option<EndpointAuthMethod>,

    /// JWS algorithm for `private_key_jwt` / `client_secret_jwt` assertions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_endpoint_auth_signing_alg: Option<String>,

    /// JWK Set URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<WebUri>,

    /// Inline JWK Set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks: Option<Value>,

    /// Kind of application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,

    /// Requested subject identifier type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<SubjectType>,

    /// JWS algorithm for UserInfo responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userinfo_signed_response_alg: Option<String>,

    /// JWE algorithm for UserInfo responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userinfo_encrypted_response_alg: Option<String>,

    /// JWS algorithm for request objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_object_signing_alg: Option<String>,

    /// JWS algorithm for ID tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token_signed_response_alg: Option<String>,

    /// JWS algorithm for JARM responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_signed_response_alg: Option<String>,

    /// JWE `alg` for JARM responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_encrypted_response_alg: Option<String>,

    /// JWE `enc` for JARM responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_encrypted_response_enc: Option<String>,

    /// Human-readable client name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    /// Client home page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_uri: Option<WebUri>,

    /// Privacy policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_uri: Option<WebUri>,

    /// Terms of service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tos_uri: Option<WebUri>,

    /// Logo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<WebUri>,

    /// Default maximum authentication age in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_max_age: Option<u64>,

    /// Whether `auth_time` is always required in ID tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_auth_time: Option<bool>,

    /// Contacts (email addresses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<String>>,

    /// Whether access tokens are bound to the client's TLS certificate (RFC 8705)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_certificate_bound_access_tokens: Option<bool>,

    /// Whether access tokens are DPoP-bound (RFC 9449)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpop_bound_access_tokens: Option<bool>,

    /// Authorization details types the client uses (RFC 9396)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_details_types: Option<Vec<String>>,

    /// Additional metadata fields
    #[serde(flatten)]
    pub additional_fields: HashMap<String, Value>,
}

impl ClientMetadata {
    /// Create client metadata with the registration defaults
    pub fn new(redirect_uris: Vec<RedirectUri>) -> Self {
        Self {
            client_id: None,
            redirect_uris,
            response_types: default_response_types(),
            grant_types: default_grant_types(),
            scope: None,
            token_endpoint_auth_method: None,
            token_endpoint_auth_signing_alg: None,
            jwks_uri: None,
            jwks: None,
            application_type: None,
            subject_type: None,
            userinfo_signed_response_alg: None,
            userinfo_encrypted_response_alg: None,
            request_object_signing_alg: None,
            id_token_signed_response_alg: None,
            authorization_signed_response_alg: None,
            authorization_encrypted_response_alg: None,
            authorization_encrypted_response_enc: None,
            client_name: None,
            client_uri: None,
            policy_uri: None,
            tos_uri: None,
            logo_uri: None,
            default_max_age: None,
            require_auth_time: None,
            contacts: None,
            tls_client_certificate_bound_access_tokens: None,
            dpop_bound_access_tokens: None,
            authorization_details_types: None,
            additional_fields: HashMap::new(),
        }
    }

    /// Native-app metadata implied by an AT Protocol loopback client ID
    ///
    /// Scope and redirect URIs come from the client ID's query, defaulting to
    /// `atproto` and the IPv4/IPv6 loopback roots. The client is public and
    /// requests DPoP-bound tokens.
    ///
    /// ```rust
    /// use oauthkit_types::metadata::{ApplicationType, ClientMetadata};
    ///
    /// let metadata = ClientMetadata::atproto_loopback("http://localhost").unwrap();
    /// assert_eq!(metadata.application_type, Some(ApplicationType::Native));
    /// assert_eq!(metadata.redirect_uris.len(), 2);
    /// assert_eq!(metadata.scope.unwrap().as_str(), "atproto");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ClientIdLoopback`] when `client_id` is not a
    /// loopback client ID and [`crate::Error::ClientId`] when it has characters
    /// outside VSCHAR.
    pub fn atproto_loopback(client_id: &str) -> crate::Result<Self> {
        let params = ClientIdLoopback::parse(client_id)?;

        let scope = match params.scope {
            Some(scope) => scope,
            None => Scope::new(ATPROTO_SCOPE)?,
        };
        let redirect_uris = match params.redirect_uris {
            Some(uris) => uris,
            None => ATPROTO_LOOPBACK_REDIRECT_URIS
                .iter()
                .map(|uri| LoopbackRedirectUri::new(*uri))
                .collect::<Result<_, _>>()?,
        };

        let mut metadata = Self::new(redirect_uris.into_iter().map(RedirectUri::from).collect());
        metadata.client_id = Some(ClientId::new(client_id)?);
        metadata.grant_types = vec![GrantType::AuthorizationCode, GrantType::RefreshToken];
        metadata.scope = Some(scope);
        metadata.token_endpoint_auth_method = Some(EndpointAuthMethod::None);
        metadata.application_type = Some(ApplicationType::Native);
        metadata.dpop_bound_access_tokens = Some(true);
        Ok(metadata)
    }

    /// Validate the client metadata
    ///
    /// # Errors
    ///
    /// Returns [`ClientMetadataError`] if validation fails
    pub fn validate(&self) -> Result<(), ClientMetadataError> {
        if self.redirect_uris.is_empty() {
            return Err(ClientMetadataError::MissingRedirectUris);
        }

        if self.is_public_client() && self.token_endpoint_auth_signing_alg.is_some() {
            debug!(client_id = ?self.client_id, "signing algorithm on a public client");
            return Err(ClientMetadataError::SigningAlgWithoutAuthentication);
        }

        if self.jwks.is_some() && self.jwks_uri.is_some() {
            return Err(ClientMetadataError::ConflictingJwks);
        }

        if self.response_types.iter().any(ResponseType::includes_code)
            && !self.grant_types.contains(&GrantType::AuthorizationCode)
        {
            debug!(client_id = ?self.client_id, grant_types = ?self.grant_types, "code response without authorization_code grant");
            return Err(ClientMetadataError::MissingAuthorizationCodeGrant);
        }

        Ok(())
    }

    /// Check that a metadata document names the URL it was fetched from
    ///
    /// # Errors
    ///
    /// Returns [`ClientMetadataError::ClientIdMismatch`] when `client_id` is
    /// absent or differs from `url`.
    pub fn validate_client_id(&self, url: &str) -> Result<(), ClientMetadataError> {
        match &self.client_id {
            Some(client_id) if client_id.as_str() == url => Ok(()),
            other => Err(ClientMetadataError::ClientIdMismatch {
                document: other.as_ref().map(ToString::to_string).unwrap_or_default(),
                url: url.to_string(),
            }),
        }
    }

    /// Check if this is a public client
    ///
    /// An absent method means `client_secret_basic` (RFC 7591 §2).
    pub fn is_public_client(&self) -> bool {
        self.token_endpoint_auth_method == Some(EndpointAuthMethod::None)
    }

    /// Effective token endpoint authentication method
    pub fn auth_method(&self) -> EndpointAuthMethod {
        self.token_endpoint_auth_method.unwrap_or_default()
    }

    /// Check if `redirect_uri` is registered, by exact string match
    pub fn is_redirect_uri_allowed(&self, redirect_uri: &str) -> bool {
        self.redirect_uris.iter().any(|uri| uri.as_str() == redirect_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn web_client() -> Value {
        json!({
            "client_id": "https://app.example.com/client-metadata.json",
            "client_name": "Example App",
            "redirect_uris": ["https://app.example.com/callback"],
            "grant_types": ["authorization_code", "refresh_token"],
            "scope": "atproto transition:generic",
            "token_endpoint_auth_method": "private_key_jwt",
            "token_endpoint_auth_signing_alg": "ES256",
            "jwks_uri": "https://app.example.com/jwks.json",
            "dpop_bound_access_tokens": true
        })
    }

    #[test]
    fn test_decode_and_validate() {
        let metadata: ClientMetadata = serde_json::from_value(web_client()).unwrap();
        assert!(metadata.validate().is_ok());
        assert_eq!(metadata.response_types, vec![ResponseType::Code]);
        assert_eq!(metadata.auth_method(), EndpointAuthMethod::PrivateKeyJwt);
        assert!(metadata.is_redirect_uri_allowed("https://app.example.com/callback"));
        assert!(!metadata.is_redirect_uri_allowed("https://app.example.com/other"));
        assert!(metadata
            .validate_client_id("https://app.example.com/client-metadata.json")
            .is_ok());
        assert!(matches!(
            metadata.validate_client_id("https://evil.example.com/client-metadata.json"),
            Err(ClientMetadataError::ClientIdMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_members_rejected() {
        let mut doc = web_client();
        doc["redirect_uris"] = json!(["javascript:alert(1)"]);
        assert!(serde_json::from_value::<ClientMetadata>(doc).is_err());

        let mut doc = web_client();
        doc["grant_types"] = json!(["magic"]);
        assert!(serde_json::from_value::<ClientMetadata>(doc).is_err());
    }

    #[test]
    fn test_validation_rules() {
        let mut metadata: ClientMetadata = serde_json::from_value(web_client()).unwrap();

        metadata.token_endpoint_auth_method = Some(EndpointAuthMethod::None);
        assert_eq!(
            metadata.validate(),
            Err(ClientMetadataError::SigningAlgWithoutAuthentication)
        );
        metadata.token_endpoint_auth_signing_alg = None;
        assert!(metadata.validate().is_ok());

        metadata.jwks = Some(json!({"keys": []}));
        assert_eq!(metadata.validate(), Err(ClientMetadataError::ConflictingJwks));
        metadata.jwks = None;

        metadata.grant_types = vec![GrantType::RefreshToken];
        assert_eq!(
            metadata.validate(),
            Err(ClientMetadataError::MissingAuthorizationCodeGrant)
        );

        metadata.redirect_uris.clear();
        assert_eq!(metadata.validate(), Err(ClientMetadataError::MissingRedirectUris));
    }

    #[test]
    fn test_atproto_loopback_defaults() {
        let metadata = ClientMetadata::atproto_loopback("http://localhost").unwrap();
        assert_eq!(
            metadata
                .redirect_uris
                .iter()
                .map(RedirectUri::as_str)
                .collect::<Vec<_>>(),
            ["http://127.0.0.1/", "http://[::1]/"]
        );
        assert!(metadata.redirect_uris.iter().all(RedirectUri::is_loopback));
        assert_eq!(
            metadata.grant_types,
            vec![GrantType::AuthorizationCode, GrantType::RefreshToken]
        );
        assert!(metadata.is_public_client());
        assert_eq!(metadata.dpop_bound_access_tokens, Some(true));
        assert!(metadata.validate().is_ok());
    }

    #[test]
    fn test_atproto_loopback_from_query() {
        let metadata = ClientMetadata::atproto_loopback(
            "http://localhost?scope=atproto%20transition%3Ageneric&redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2Fcb",
        )
        .unwrap();
        assert_eq!(metadata.scope.unwrap().as_str(), "atproto transition:generic");
        assert_eq!(metadata.redirect_uris.len(), 1);
        assert_eq!(metadata.redirect_uris[0].as_str(), "http://127.0.0.1:8080/cb");

        assert!(matches!(
            ClientMetadata::atproto_loopback("https://app.example.com"),
            Err(crate::Error::ClientIdLoopback(_))
        ));
    }
}
