//! `validate` command: check a single string value

use clap::{Args, ValueEnum};
use serde_json::Value;
use tracing::debug;

use oauthkit_types::client_id::ClientIdKind;
use oauthkit_types::{
    ClientId, ClientIdDiscoverable, ClientIdLoopback, CodeVerifier, DangerousUri, IssuerIdentifier, Jwt,
    LoopbackRedirectUri, PrivateUseUri, RedirectUri, Scope, SignedJwt, UnsignedJwt, WebUri,
};

use super::Report;

/// String value kinds accepted by `validate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StringKind {
    /// `http(s)://` URI with a public or loopback host
    WebUri,
    /// `http://localhost` URI
    LoopbackUri,
    /// Reverse-DNS custom-scheme URI
    PrivateUseUri,
    /// Any URI except `javascript:`, `data:` and `vbscript:`
    DangerousUri,
    /// Authorization server issuer identifier
    Issuer,
    /// Client ID, classified as discoverable, loopback or opaque
    ClientId,
    /// Client ID metadata document URL
    DiscoverableClientId,
    /// `http://localhost` development client ID
    LoopbackClientId,
    /// Space-separated scope string
    Scope,
    /// Three-segment compact JWT
    SignedJwt,
    /// Two-segment compact JWT
    UnsignedJwt,
    /// Signed or unsigned compact JWT
    Jwt,
    /// PKCE code verifier
    CodeVerifier,
    /// Redirect URI of any supported family
    RedirectUri,
}

impl StringKind {
    /// Command-line name of the kind
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

/// Arguments for `validate`
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Kind of value
    #[arg(value_enum)]
    pub kind: StringKind,

    /// Value to check
    pub value: String,
}

impl ValidateCommand {
    /// Run the check
    pub fn execute(self) -> Report {
        validate_string(self.kind, &self.value)
    }
}

fn string_report<T: AsRef<str>, E: ToString>(kind: StringKind, result: Result<T, E>) -> Report {
    match result {
        Ok(value) => Report::accepted(kind.name(), Value::String(value.as_ref().to_string())),
        Err(e) => Report::rejected(kind.name(), e),
    }
}

/// Check `value` as `kind`
pub fn validate_string(kind: StringKind, value: &str) -> Report {
    debug!(kind = %kind.name(), len = value.len(), "validating");

    match kind {
        StringKind::WebUri => string_report(kind, WebUri::new(value).map(|u| u.to_string())),
        StringKind::LoopbackUri => string_report(kind, LoopbackRedirectUri::new(value)),
        StringKind::PrivateUseUri => string_report(kind, PrivateUseUri::new(value)),
        StringKind::DangerousUri => string_report(kind, DangerousUri::new(value)),
        StringKind::Issuer => string_report(kind, IssuerIdentifier::new(value).map(|i| i.to_string())),
        StringKind::ClientId => match ClientIdKind::classify(value) {
            Ok(id) => {
                let variant = match &id {
                    ClientIdKind::Discoverable(_) => "discoverable",
                    ClientIdKind::Loopback(_) => "loopback",
                    ClientIdKind::Opaque(_) => "opaque",
                };
                Report::accepted(kind.name(), Value::String(id.as_str().to_string())).with_variant(variant)
            }
            // Report the opaque rule, which is what every other form narrows
            Err(_) => string_report(kind, ClientId::new(value)),
        },
        StringKind::DiscoverableClientId => {
            string_report(kind, ClientIdDiscoverable::new(value).map(|id| id.as_str().to_string()))
        }
        StringKind::LoopbackClientId => {
            string_report(kind, ClientIdLoopback::new(value).map(|id| id.as_str().to_string()))
        }
        StringKind::Scope => string_report(kind, Scope::new(value)),
        StringKind::SignedJwt => string_report(kind, SignedJwt::new(value)),
        StringKind::UnsignedJwt => string_report(kind, UnsignedJwt::new(value)),
        StringKind::Jwt => match Jwt::resolve(value) {
            Ok(jwt) => {
                let variant = if jwt.is_signed() { "signed" } else { "unsigned" };
                Report::accepted(kind.name(), Value::String(jwt.as_str().to_string())).with_variant(variant)
            }
            Err(e) => Report::rejected(kind.name(), e),
        },
        StringKind::CodeVerifier => string_report(kind, CodeVerifier::new(value)),
        StringKind::RedirectUri => match RedirectUri::new(value) {
            Ok(uri) => {
                let variant = match &uri {
                    RedirectUri::LoopbackIp(_) => "loopback-ip",
                    RedirectUri::Loopback(_) => "loopback",
                    RedirectUri::PrivateUse(_) => "private-use",
                    RedirectUri::Https(_) => "https",
                };
                Report::accepted(kind.name(), Value::String(uri.as_str().to_string())).with_variant(variant)
            }
            Err(e) => Report::rejected(kind.name(), e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_names() {
        assert_eq!(StringKind::WebUri.name(), "web-uri");
        assert_eq!(StringKind::LoopbackClientId.name(), "loopback-client-id");
    }

    #[test]
    fn test_issuer() {
        let report = validate_string(StringKind::Issuer, "https://auth.example.com");
        assert!(report.valid);
        assert_eq!(report.value, Some(Value::String("https://auth.example.com".to_string())));

        let report = validate_string(StringKind::Issuer, "https://auth.example.com/");
        assert!(!report.valid);
        assert!(report.error.is_some());
    }

    #[test]
    fn test_redirect_uri_variants() {
        let report = validate_string(StringKind::RedirectUri, "http://127.0.0.1:8080/cb");
        assert_eq!(report.variant.as_deref(), Some("loopback-ip"));

        let report = validate_string(StringKind::RedirectUri, "http://localhost/cb");
        assert_eq!(report.variant.as_deref(), Some("loopback"));

        let report = validate_string(StringKind::RedirectUri, "com.example.app:/callback");
        assert_eq!(report.variant.as_deref(), Some("private-use"));

        let report = validate_string(StringKind::RedirectUri, "https://app.example.com/cb");
        assert_eq!(report.variant.as_deref(), Some("https"));

        assert!(!validate_string(StringKind::RedirectUri, "ftp://example.com").valid);
    }

    #[test]
    fn test_client_id_classification() {
        let report = validate_string(StringKind::ClientId, "s6BhdRkqt3");
        assert_eq!(report.variant.as_deref(), Some("opaque"));

        let report = validate_string(StringKind::ClientId, "http://localhost");
        assert_eq!(report.variant.as_deref(), Some("loopback"));

        assert!(!validate_string(StringKind::ClientId, "").valid);
    }

    #[test]
    fn test_jwt_variants() {
        assert_eq!(validate_string(StringKind::Jwt, "a.b.c").variant.as_deref(), Some("signed"));
        assert_eq!(validate_string(StringKind::Jwt, "a.b").variant.as_deref(), Some("unsigned"));
        assert!(!validate_string(StringKind::Jwt, "a").valid);
        assert!(!validate_string(StringKind::SignedJwt, "a.b").valid);
    }

    #[test]
    fn test_code_verifier_and_scope() {
        assert!(validate_string(StringKind::CodeVerifier, &"a".repeat(43)).valid);
        assert!(!validate_string(StringKind::CodeVerifier, "short").valid);
        assert!(validate_string(StringKind::Scope, "openid profile").valid);
        assert!(!validate_string(StringKind::Scope, "bad\"scope").valid);
    }
}
