//! # oauthkit-cli
//!
//! Library half of the `oauthkit` binary. Exposed so the command
//! implementations can be driven from tests without spawning a process.
//!
//! ```text
//! oauthkit validate issuer https://bsky.social
//! oauthkit validate redirect-uri http://127.0.0.1:8080/callback
//! oauthkit --format json decode server-metadata metadata.json
//! echo '{"active":false}' | oauthkit decode introspection
//! ```

pub mod cli;
