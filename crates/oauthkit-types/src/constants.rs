//! Protocol constants

/// `client_assertion_type` value for JWT bearer client authentication (RFC 7523 §2.2)
pub const CLIENT_ASSERTION_TYPE_JWT_BEARER: &str =
    "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

/// Prefix every loopback client ID starts with
pub const LOOPBACK_CLIENT_ID_PREFIX: &str = "http://localhost";

/// Token endpoint authentication method assumed when a server does not advertise any (RFC 8414 §2)
pub const DEFAULT_TOKEN_ENDPOINT_AUTH_METHOD: &str = "client_secret_basic";

/// Scope granted to AT Protocol loopback clients that do not request one
pub const ATPROTO_SCOPE: &str = "atproto";

/// Redirect URIs granted to AT Protocol loopback clients that do not request any
pub const ATPROTO_LOOPBACK_REDIRECT_URIS: [&str; 2] = ["http://127.0.0.1/", "http://[::1]/"];

/// Minimum PKCE code verifier length (RFC 7636 §4.1)
pub const CODE_VERIFIER_MIN_LENGTH: usize = 43;

/// Maximum PKCE code verifier length (RFC 7636 §4.1)
pub const CODE_VERIFIER_MAX_LENGTH: usize = 128;

/// Environment variable read by [`ValidationOptions::from_env`](crate::config::ValidationOptions::from_env)
pub const VALIDATION_MODE_ENV: &str = "OAUTHKIT_VALIDATION_MODE";
