//! # oauthkit-types - OAuth 2.0 and OpenID Connect Validation
//!
//! Validated representations of the identifiers and envelopes that travel
//! between OAuth 2.0 / OpenID Connect clients and servers. Every type is built
//! through a validating constructor (`new`, `FromStr`, `TryFrom<String>` or
//! `Deserialize`), so holding a value means it passed its protocol rules.
//!
//! ## Design Principles
//!
//! - **Fail closed**: anything that does not match a known shape is rejected with a named reason
//! - **One definition per concept**: a single `ClientId`, a single `Scope`
//! - **Ordered resolution**: polymorphic values are tried against an explicit candidate table
//! - **Shape, not trust**: JWTs are checked for shape only; signatures are out of scope
//!
//! ## Architecture
//!
//! - [`lexical`] - Host classification and authority extraction
//! - [`uri`] - `WebUri`, loopback, private-use and generic URI validators
//! - [`issuer`] - Issuer identifiers in canonical form
//! - [`client_id`] - Opaque, discoverable (URL) and loopback client IDs
//! - [`scope`] - Scope strings
//! - [`jwt`] - Signed and unsigned compact JWT shapes
//! - [`pkce`] - Code verifiers and challenge methods (RFC 7636)
//! - [`resolve`] - Ordered-trial resolution shared by the polymorphic types
//! - [`redirect_uri`] - Redirect URIs (RFC 8252)
//! - [`credentials`] - Client authentication parameters
//! - [`grant`] - Grant types, response types and other registered value sets
//! - [`token`] - Token requests, responses, identification and introspection
//! - [`authorization`] - Authorization requests, PAR and error responses
//! - [`claims`] - OpenID Connect claims and UserInfo
//! - [`metadata`] - Server, resource and client metadata documents
//! - [`config`] - Strict and development validation modes
//! - [`error`] - Crate-level error aggregate
//!
//! ## Quick Start
//!
//! ```rust
//! use oauthkit_types::{IssuerIdentifier, RedirectUri, Scope};
//!
//! let issuer = IssuerIdentifier::new("https://bsky.social").unwrap();
//! assert!(IssuerIdentifier::new("https://bsky.social/").is_err());
//!
//! let scope: Scope = "atproto transition:generic".parse().unwrap();
//! assert!(scope.contains("atproto"));
//!
//! let redirect = RedirectUri::new("http://127.0.0.1:8080/callback").unwrap();
//! assert!(matches!(redirect, RedirectUri::LoopbackIp(_)));
//! # let _ = issuer;
//! ```
//!
//! ## Decoding Envelopes
//!
//! ```rust
//! use oauthkit_types::token::TokenRequest;
//! use serde_json::json;
//!
//! let request: TokenRequest = serde_json::from_value(json!({
//!     "grant_type": "refresh_token",
//!     "refresh_token": "tGzv3JOkF0XG5Qx2TlKWIA"
//! }))
//! .unwrap();
//! assert_eq!(request.grant_type().as_str(), "refresh_token");
//! ```

#![deny(unsafe_code)]

mod macros;

pub mod authorization;
pub mod claims;
pub mod client_id;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod grant;
pub mod issuer;
pub mod jwt;
pub mod lexical;
pub mod metadata;
pub mod pkce;
pub mod redirect_uri;
pub mod resolve;
pub mod scope;
pub mod token;
pub mod uri;

pub use authorization::{AuthorizationRequestPar, AuthorizationRequestQuery};
pub use client_id::{ClientId, ClientIdDiscoverable, ClientIdLoopback};
pub use config::{ValidationMode, ValidationOptions};
pub use credentials::ClientCredentials;
pub use error::{Error, Result, ValidationError};
pub use issuer::IssuerIdentifier;
pub use jwt::{Jwt, SignedJwt, UnsignedJwt};
pub use metadata::{AuthorizationServerMetadata, ClientMetadata, ProtectedResourceMetadata};
pub use pkce::{CodeChallengeMethod, CodeVerifier};
pub use redirect_uri::RedirectUri;
pub use scope::Scope;
pub use token::{AccessToken, RefreshToken, TokenRequest, TokenResponse};
pub use uri::{DangerousUri, LoopbackRedirectUri, PrivateUseUri, WebUri};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
