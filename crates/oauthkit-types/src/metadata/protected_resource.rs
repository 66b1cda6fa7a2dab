//! Protected resource metadata (RFC 9728)

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use crate::config::ValidationOptions;
use crate::issuer::IssuerIdentifier;
use crate::macros::wire_enum;
use crate::uri::WebUri;

/// Protected resource metadata errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtectedResourceMetadataError {
    /// `resource` carries a query component
    #[error("Resource identifier must not contain a query component")]
    ContainsQuery,

    /// `resource` carries a fragment component
    #[error("Resource identifier must not contain a fragment component")]
    ContainsFragment,
}

wire_enum! {
    /// How a bearer token may be presented (RFC 6750 §2)
    pub enum BearerMethod {
        /// `Authorization` request header
        Header => "header",
        /// Form-encoded body parameter
        Body => "body",
        /// URI query parameter
        Query => "query",
    }
}

/// Protected resource metadata document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ProtectedResourceMetadata {
    /// REQUIRED. The resource identifier
    pub resource: WebUri,

    /// Authorization servers that issue tokens for this resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_servers: Option<Vec<IssuerIdentifier>>,

    /// URL of the resource's JWK Set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<WebUri>,

    /// Scope values used in authorization requests for this resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes_supported: Option<Vec<String>>,

    /// Supported bearer token presentation methods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_methods_supported: Option<Vec<BearerMethod>>,

    /// JWS algorithms for signed resource responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_signing_alg_values_supported: Option<Vec<String>>,

    /// Human-readable documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_documentation: Option<WebUri>,

    /// Data usage policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_policy_uri: Option<WebUri>,

    /// Terms of service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_tos_uri: Option<WebUri>,

    /// Additional metadata fields
    #[serde(flatten)]
    pub additional_fields: HashMap<String, Value>,
}

impl ProtectedResourceMetadata {
    /// Metadata for `resource` with nothing else advertised
    pub fn new(resource: WebUri) -> Self {
        Self {
            resource,
            authorization_servers: None,
            jwks_uri: None,
            scopes_supported: None,
            bearer_methods_supported: None,
            resource_signing_alg_values_supported: None,
            resource_documentation: None,
            resource_policy_uri: None,
            resource_tos_uri: None,
            additional_fields: HashMap::new(),
        }
    }

    /// Add an authorization server
    pub fn with_authorization_server(mut self, issuer: IssuerIdentifier) -> Self {
        self.authorization_servers.get_or_insert_with(Vec::new).push(issuer);
        self
    }

    /// Check the resource identifier under `options`
    ///
    /// Development mode skips the check and logs a warning when it would have failed.
    ///
    /// # Errors
    ///
    /// Returns [`ProtectedResourceMetadataError`] when `resource` contains `?` or `#`
    /// in strict mode.
    pub fn validate_with(&self, options: &ValidationOptions) -> Result<(), ProtectedResourceMetadataError> {
        let resource = self.resource.as_str();
        let violation = if resource.contains('?') {
            Some(ProtectedResourceMetadataError::ContainsQuery)
        } else if resource.contains('#') {
            Some(ProtectedResourceMetadataError::ContainsFragment)
        } else {
            None
        };

        match violation {
            Some(error) if options.is_development() => {
                warn!(resource, %error, "accepting resource identifier in development mode");
                Ok(())
            }
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Strict validation
    ///
    /// # Errors
    ///
    /// See [`Self::validate_with`].
    pub fn validate(&self) -> Result<(), ProtectedResourceMetadataError> {
        self.validate_with(&ValidationOptions::strict())
    }

    /// Decode a document and validate it under `options`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] for a malformed document and
    /// [`crate::Error::ProtectedResourceMetadata`] when validation fails.
    pub fn from_value_with(value: Value, options: &ValidationOptions) -> crate::Result<Self> {
        let metadata = Self::deserialize(value)?;
        metadata.validate_with(options)?;
        Ok(metadata)
    }

    /// Whether `issuer` is listed as an authorization server
    pub fn is_authorized_by(&self, issuer: &IssuerIdentifier) -> bool {
        self.authorization_servers
            .as_ref()
            .is_some_and(|servers| servers.contains(issuer))
    }
}

impl Serialize for ProtectedResourceMetadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Self::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ProtectedResourceMetadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let metadata = Self::deserialize(deserializer)?;
        metadata.validate().map_err(serde::de::Error::custom)?;
        Ok(metadata)
    }
}
