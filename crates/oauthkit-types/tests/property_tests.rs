//! Property-based tests for the oauthkit validators
//!
//! Uses proptest to verify invariants of:
//! - Code verifier length and alphabet bounds
//! - Scope token composition
//! - JWT segment counting
//! - URI and issuer canonical forms
//! - Ordered resolution of redirect URIs

use oauthkit_types::client_id::ClientIdLoopback;
use oauthkit_types::uri::UriError;
use oauthkit_types::{
    ClientId, CodeVerifier, IssuerIdentifier, Jwt, RedirectUri, Scope, SignedJwt, UnsignedJwt,
    WebUri,
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

const VERIFIER_ALPHABET: &str = "[A-Za-z0-9._~-]";

fn verifier_strategy(min: usize, max: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("{VERIFIER_ALPHABET}{{{min},{max}}}"))
        .expect("valid verifier pattern")
}

/// Scope tokens: NQCHAR without space, double quote or backslash
fn scope_token_strategy() -> impl Strategy<Value = String> {
    "[!#-\\[\\]-~]{1,12}"
}

fn segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,24}"
}

/// Registrable-looking https hosts
fn host_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,10}", prop::sample::select(vec!["com", "org", "net", "social"]))
        .prop_map(|(label, tld)| format!("{label}.{tld}"))
}

// =============================================================================
// PKCE
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every verifier of 43..=128 unreserved characters is accepted
    #[test]
    fn prop_code_verifier_accepts_valid_lengths(raw in verifier_strategy(43, 128)) {
        let verifier = CodeVerifier::new(raw.clone()).unwrap();
        prop_assert_eq!(verifier.as_str(), raw.as_str());
    }

    /// Property: too short or too long verifiers are rejected
    #[test]
    fn prop_code_verifier_rejects_bad_lengths(
        short in verifier_strategy(0, 42),
        long in verifier_strategy(129, 200),
    ) {
        prop_assert!(CodeVerifier::new(short).is_err());
        prop_assert!(CodeVerifier::new(long).is_err());
    }
}

// =============================================================================
// SCOPE AND CLIENT ID
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: tokens joined by single spaces form a scope that splits back into them
    #[test]
    fn prop_scope_tokens_round_trip(tokens in prop::collection::vec(scope_token_strategy(), 1..6)) {
        let scope = Scope::from_tokens(tokens.iter().map(String::as_str)).unwrap();
        prop_assert_eq!(scope.tokens().collect::<Vec<_>>(), tokens.iter().map(String::as_str).collect::<Vec<_>>());
        for token in &tokens {
            prop_assert!(scope.contains(token));
        }
    }

    /// Property: a double quote anywhere invalidates a scope
    #[test]
    fn prop_scope_rejects_quote(prefix in scope_token_strategy(), suffix in scope_token_strategy()) {
        let quoted = format!("{prefix}\"{suffix}");
        prop_assert!(Scope::new(quoted).is_err());
    }

    /// Property: any non-empty VSCHAR string is an opaque client ID
    #[test]
    fn prop_client_id_accepts_vschar(raw in "[ -~]{1,64}") {
        prop_assert!(ClientId::new(raw).is_ok());
    }

    /// Property: a percent-encoded scope survives the loopback client ID query
    #[test]
    fn prop_loopback_client_id_scope(tokens in prop::collection::vec(scope_token_strategy(), 1..4)) {
        let scope = tokens.join(" ");
        let raw = format!("http://localhost?scope={}", utf8_percent_encode(&scope, NON_ALPHANUMERIC));
        let params = ClientIdLoopback::parse(&raw).unwrap();
        prop_assert_eq!(params.scope.as_ref().map(Scope::as_str), Some(scope.as_str()));
        prop_assert!(ClientIdLoopback::is_loopback_client_id(&raw));
    }
}

// =============================================================================
// JWT SHAPE
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: three segments are signed, two are unsigned, never both
    #[test]
    fn prop_jwt_segment_count(a in segment_strategy(), b in segment_strategy(), c in segment_strategy()) {
        let signed = format!("{a}.{b}.{c}");
        let unsigned = format!("{a}.{b}");

        prop_assert!(SignedJwt::new(signed.as_str()).is_ok());
        prop_assert!(UnsignedJwt::new(signed.as_str()).is_err());
        prop_assert!(UnsignedJwt::new(unsigned.as_str()).is_ok());
        prop_assert!(SignedJwt::new(unsigned.as_str()).is_err());

        prop_assert!(Jwt::resolve(&signed).unwrap().is_signed());
        prop_assert!(!Jwt::resolve(&unsigned).unwrap().is_signed());
    }

    /// Property: an empty segment is never a JWT
    #[test]
    fn prop_jwt_rejects_empty_segment(a in segment_strategy(), b in segment_strategy()) {
        let empty_middle = format!("{a}..{b}");
        prop_assert!(SignedJwt::new(empty_middle).is_err());
        let empty_trailing = format!("{a}.");
        prop_assert!(Jwt::resolve(&empty_trailing).is_err());
    }
}

// =============================================================================
// URIS AND ISSUERS
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: a valid WebUri round-trips through JSON unchanged
    #[test]
    fn prop_web_uri_json_round_trip(host in host_strategy(), path in "[a-z0-9/]{0,16}") {
        let raw = format!("https://{host}/{path}");
        let uri = WebUri::new(raw.as_str()).unwrap();
        let encoded = serde_json::to_string(&uri).unwrap();
        let decoded: WebUri = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded.as_str(), raw.as_str());
        prop_assert_eq!(decoded, uri);
    }

    /// Property: `.local` hosts are never web URIs
    #[test]
    fn prop_web_uri_rejects_local(label in "[a-z][a-z0-9]{0,10}") {
        prop_assert_eq!(
            WebUri::new(format!("https://{label}.local/")),
            Err(UriError::EndsInLocal)
        );
    }

    /// Property: issuers are accepted bare and rejected with a trailing slash
    #[test]
    fn prop_issuer_trailing_slash(host in host_strategy(), port in prop::option::of(1024u16..65535)) {
        let bare = match port {
            Some(port) => format!("https://{host}:{port}"),
            None => format!("https://{host}"),
        };
        prop_assert!(IssuerIdentifier::new(bare.as_str()).is_ok());
        let trailing_slash = format!("{bare}/");
        prop_assert!(IssuerIdentifier::new(trailing_slash).is_err());
    }

    /// Property: loopback IP redirects resolve to the first matching variant
    #[test]
    fn prop_redirect_uri_first_candidate_wins(
        host in prop::sample::select(vec!["127.0.0.1", "[::1]"]),
        port in 1024u16..65535,
        path in "[a-z]{0,8}",
    ) {
        let raw = format!("http://{host}:{port}/{path}");
        let uri = RedirectUri::new(raw.as_str()).unwrap();
        prop_assert!(matches!(uri, RedirectUri::LoopbackIp(_)), "{:?}", uri);
        prop_assert_eq!(uri.as_str(), raw.as_str());
    }
}
