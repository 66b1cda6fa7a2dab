//! `decode` command: decode a JSON protocol document

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use oauthkit_types::authorization::{AuthorizationRequestPar, AuthorizationRequestQuery, ParResponse};
use oauthkit_types::credentials::ClientCredentials;
use oauthkit_types::token::{IntrospectionResponse, TokenIdentification, TokenRequest, TokenResponse};
use oauthkit_types::{AuthorizationServerMetadata, ClientMetadata, ProtectedResourceMetadata, ValidationOptions};

use super::Report;
use crate::cli::args::InputArgs;

/// Document kinds accepted by `decode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    /// Token endpoint request, dispatched on `grant_type`
    TokenRequest,
    /// Client authentication parameters
    ClientCredentials,
    /// Authorization endpoint query
    AuthorizationQuery,
    /// Pushed authorization request body
    ParRequest,
    /// Revocation or introspection request
    TokenIdentification,
    /// Token endpoint response
    TokenResponse,
    /// Introspection response
    Introspection,
    /// Pushed authorization response
    ParResponse,
    /// Authorization server metadata
    ServerMetadata,
    /// Protected resource metadata
    ResourceMetadata,
    /// Client metadata
    ClientMetadata,
}

impl DocumentKind {
    /// Command-line name of the kind
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

/// Arguments for `decode`
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Kind of document
    #[arg(value_enum)]
    pub kind: DocumentKind,

    #[command(flatten)]
    pub input: InputArgs,
}

impl DecodeCommand {
    /// Read and decode the document
    ///
    /// # Errors
    ///
    /// Returns an error when the input cannot be read or is not JSON.
    pub fn execute(self, options: &ValidationOptions) -> anyhow::Result<Report> {
        let raw = self
            .input
            .read_to_string()
            .with_context(|| format!("Failed to read {}", self.input.input.display()))?;
        let value: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

        info!(kind = %self.kind.name(), "decoding document");
        Ok(decode_document(self.kind, value, options))
    }
}

fn encode<T: Serialize>(decoded: &T) -> Result<Value, String> {
    serde_json::to_value(decoded).map_err(|e| e.to_string())
}

fn decode_as<T: DeserializeOwned + Serialize>(value: Value) -> Result<Value, String> {
    let decoded: T = serde_json::from_value(value).map_err(|e| e.to_string())?;
    encode(&decoded)
}

/// Decode `value` as `kind` and re-encode it in canonical form
pub fn decode_document(kind: DocumentKind, value: Value, options: &ValidationOptions) -> Report {
    let mut variant = None;

    let result = match kind {
        DocumentKind::TokenRequest => TokenRequest::from_value(&value)
            .map_err(|e| e.to_string())
            .and_then(|request| {
                variant = Some(request.grant_type().to_string());
                encode(&request)
            }),
        DocumentKind::ClientCredentials => ClientCredentials::from_value(&value)
            .map_err(|e| e.to_string())
            .and_then(|credentials| {
                variant = Some(
                    match credentials {
                        ClientCredentials::JwtBearer(_) => "jwt-bearer",
                        ClientCredentials::SecretPost(_) => "secret-post",
                        ClientCredentials::None(_) => "none",
                    }
                    .to_string(),
                );
                encode(&credentials)
            }),
        DocumentKind::AuthorizationQuery => AuthorizationRequestQuery::from_value(&value)
            .map_err(|e| e.to_string())
            .and_then(|query| {
                variant = Some(
                    match query {
                        AuthorizationRequestQuery::Parameters(_) => "parameters",
                        AuthorizationRequestQuery::Jar(_) => "jar",
                        AuthorizationRequestQuery::Uri(_) => "request-uri",
                    }
                    .to_string(),
                );
                encode(&query)
            }),
        DocumentKind::ParRequest => AuthorizationRequestPar::from_value(&value)
            .map_err(|e| e.to_string())
            .and_then(|request| {
                variant = Some(
                    match request {
                        AuthorizationRequestPar::Parameters(_) => "parameters",
                        AuthorizationRequestPar::Jar(_) => "jar",
                    }
                    .to_string(),
                );
                encode(&request)
            }),
        DocumentKind::TokenIdentification => decode_as::<TokenIdentification>(value),
        DocumentKind::TokenResponse => decode_as::<TokenResponse>(value),
        DocumentKind::Introspection => IntrospectionResponse::from_value(&value)
            .map_err(|e| e.to_string())
            .and_then(|response| {
                variant = Some(if response.is_active() { "active" } else { "inactive" }.to_string());
                encode(&response)
            }),
        DocumentKind::ParResponse => decode_as::<ParResponse>(value),
        DocumentKind::ServerMetadata => decode_as::<AuthorizationServerMetadata>(value),
        DocumentKind::ResourceMetadata => ProtectedResourceMetadata::from_value_with(value, options)
            .map_err(|e| e.to_string())
            .and_then(|metadata| encode(&metadata)),
        DocumentKind::ClientMetadata => serde_json::from_value::<ClientMetadata>(value)
            .map_err(|e| e.to_string())
            .and_then(|metadata| {
                metadata.validate().map_err(|e| e.to_string())?;
                encode(&metadata)
            }),
    };

    match result {
        Ok(encoded) => {
            let report = Report::accepted(kind.name(), encoded);
            match variant {
                Some(variant) => report.with_variant(variant),
                None => report,
            }
        }
        Err(e) => {
            debug!(kind = %kind.name(), error = %e, "document rejected");
            Report::rejected(kind.name(), e)
        }
    }
}
