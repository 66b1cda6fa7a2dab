//! Registered OAuth 2.0 value sets
//!
//! Grant types, response types and modes, client authentication methods and
//! endpoint names, each restricted to the values this crate understands. The
//! `*Grant` markers pin the `grant_type` of a single token request variant.

use crate::macros::{literal_marker, wire_enum};

wire_enum! {
    /// `grant_type` values (RFC 6749, RFC 7523, RFC 7522)
    pub enum GrantType {
        /// Authorization code
        AuthorizationCode => "authorization_code",
        /// Implicit (deprecated by OAuth 2.1)
        Implicit => "implicit",
        /// Refresh token
        RefreshToken => "refresh_token",
        /// Resource owner password credentials
        Password => "password",
        /// Client credentials
        ClientCredentials => "client_credentials",
        /// JWT bearer assertion
        JwtBearer => "urn:ietf:params:oauth:grant-type:jwt-bearer",
        /// SAML 2.0 bearer assertion
        Saml2Bearer => "urn:ietf:params:oauth:grant-type:saml2-bearer",
    }
}

wire_enum! {
    /// `response_type` values (RFC 6749 §3.1.1, OAuth 2.0 Multiple Response Types)
    pub enum ResponseType {
        /// Authorization code
        Code => "code",
        /// Access token (implicit)
        Token => "token",
        /// No credentials issued
        None => "none",
        /// Hybrid: code, ID token and access token
        CodeIdTokenToken => "code id_token token",
        /// Hybrid: code and ID token
        CodeIdToken => "code id_token",
        /// Hybrid: code and access token
        CodeToken => "code token",
        /// ID token and access token
        IdTokenToken => "id_token token",
        /// ID token only
        IdToken => "id_token",
    }
}

impl ResponseType {
    /// Whether an authorization code is part of the response
    pub fn includes_code(&self) -> bool {
        matches!(
            self,
            Self::Code | Self::CodeIdTokenToken | Self::CodeIdToken | Self::CodeToken
        )
    }
}

wire_enum! {
    /// `response_mode` values
    pub enum ResponseMode {
        /// Query string
        Query => "query",
        /// URI fragment
        Fragment => "fragment",
        /// Auto-submitted HTML form
        FormPost => "form_post",
    }
}

wire_enum! {
    /// Client authentication methods (RFC 7591 §2, RFC 8705)
    #[derive(Default)]
    pub enum EndpointAuthMethod {
        /// HTTP Basic with client secret
        #[default]
        ClientSecretBasic => "client_secret_basic",
        /// HMAC-signed client assertion
        ClientSecretJwt => "client_secret_jwt",
        /// Client secret in the request body
        ClientSecretPost => "client_secret_post",
        /// Public client
        None => "none",
        /// Asymmetrically signed client assertion
        PrivateKeyJwt => "private_key_jwt",
        /// Mutual TLS with a self-signed certificate
        SelfSignedTlsClientAuth => "self_signed_tls_client_auth",
        /// Mutual TLS with a PKI certificate
        TlsClientAuth => "tls_client_auth",
    }
}

wire_enum! {
    /// Endpoints that authenticate clients
    pub enum EndpointName {
        /// Token endpoint
        Token => "token",
        /// Revocation endpoint (RFC 7009)
        Revocation => "revocation",
        /// Introspection endpoint (RFC 7662)
        Introspection => "introspection",
        /// Pushed authorization request endpoint (RFC 9126)
        PushedAuthorizationRequest => "pushed_authorization_request",
    }
}

literal_marker! {
    /// `grant_type=authorization_code`
    AuthorizationCodeGrant => "authorization_code";
    /// `grant_type=refresh_token`
    RefreshTokenGrant => "refresh_token";
    /// `grant_type=password`
    PasswordGrant => "password";
    /// `grant_type=client_credentials`
    ClientCredentialsGrant => "client_credentials";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_grant_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&GrantType::JwtBearer).unwrap(),
            r#""urn:ietf:params:oauth:grant-type:jwt-bearer""#
        );
        assert_eq!("refresh_token".parse(), Ok(GrantType::RefreshToken));
        assert_eq!(
            "device_code".parse::<GrantType>(),
            Err(ValidationError::UnknownValue {
                type_name: "GrantType",
                value: "device_code".to_string()
            })
        );
        assert_eq!(GrantType::ALL.len(), 7);
    }

    #[test]
    fn test_response_type_includes_code() {
        let parsed: ResponseType = serde_json::from_str(r#""code id_token""#).unwrap();
        assert_eq!(parsed, ResponseType::CodeIdToken);
        assert!(parsed.includes_code());
        assert!(!ResponseType::IdTokenToken.includes_code());
        assert_eq!(ResponseType::CodeIdTokenToken.to_string(), "code id_token token");
    }

    #[test]
    fn test_endpoint_auth_method_default() {
        assert_eq!(EndpointAuthMethod::default(), EndpointAuthMethod::ClientSecretBasic);
        assert_eq!(EndpointAuthMethod::None.as_str(), "none");
        assert_eq!("form_post".parse(), Ok(ResponseMode::FormPost));
        assert_eq!(
            EndpointName::PushedAuthorizationRequest.as_str(),
            "pushed_authorization_request"
        );
    }

    #[test]
    fn test_grant_marker_rejects_other_values() {
        let marker: AuthorizationCodeGrant = serde_json::from_str(r#""authorization_code""#).unwrap();
        assert_eq!(serde_json::to_string(&marker).unwrap(), r#""authorization_code""#);

        assert_eq!(
            PasswordGrant::check("refresh_token"),
            Err(ValidationError::IncorrectValue {
                expected: "password",
                found: "refresh_token".to_string()
            })
        );
        let err = serde_json::from_str::<RefreshTokenGrant>(r#""password""#).unwrap_err();
        assert!(err.to_string().contains("refresh_token"));
    }
}
