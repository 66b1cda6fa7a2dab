//! # Metadata Documents
//!
//! Aggregate documents whose members are validated individually on decode and
//! then checked against each other:
//!
//! - [`authorization_server`]: RFC 8414 authorization server metadata
//! - [`protected_resource`]: RFC 9728 protected resource metadata
//! - [`client`]: RFC 7591 client metadata and client ID metadata documents

pub mod authorization_server;
pub mod client;
pub mod protected_resource;

pub use authorization_server::{
    AuthorizationServerMetadata, AuthorizationServerMetadataBuilder,
    AuthorizationServerMetadataError,
};
pub use client::{ApplicationType, ClientMetadata, ClientMetadataError, SubjectType};
pub use protected_resource::{
    BearerMethod, ProtectedResourceMetadata, ProtectedResourceMetadataError,
};
