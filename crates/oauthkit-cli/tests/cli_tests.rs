//! End-to-end tests for the oauthkit command layer
//!
//! These drive parsed command lines through the command implementations
//! without spawning the binary.

use clap::Parser;
use oauthkit_cli::cli::Cli;
use oauthkit_cli::cli::commands::Report;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<Report> {
    let cli = Cli::try_parse_from(args)?;
    let options = cli.validation_options();
    cli.command.execute(&options)
}

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(format!("{name}.json"));
    std::fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_loopback_client_id() {
    let report = run(&[
        "oauthkit",
        "validate",
        "loopback-client-id",
        "http://localhost?scope=atproto&redirect_uri=http%3A%2F%2F127.0.0.1%2Fcb",
    ])
    .unwrap();
    assert!(report.valid);
}

#[test]
fn test_validate_alias() {
    let report = run(&["oauthkit", "check", "web-uri", "https://app.local/"]).unwrap();
    assert!(!report.valid);
    assert_eq!(report.kind, "web-uri");
}

// ============================================================================
// decode
// ============================================================================

#[test]
fn test_decode_server_metadata_file() {
    let temp_dir = TempDir::new().unwrap();
    let doc = json!({
        "issuer": "https://auth.example.com",
        "authorization_endpoint": "https://auth.example.com/authorize",
        "token_endpoint": "https://auth.example.com/token",
        "response_types_supported": ["code"],
        "code_challenge_methods_supported": ["S256"]
    });
    let path = write_fixture(&temp_dir, "server-metadata", &doc.to_string());

    let report = run(&["oauthkit", "decode", "server-metadata", path.to_str().unwrap()]).unwrap();

    assert!(report.valid);
    let value = report.value.unwrap();
    assert_eq!(value["issuer"], json!("https://auth.example.com"));
    assert_eq!(value["token_endpoint_auth_methods_supported"], json!(["client_secret_basic"]));
}

#[test]
fn test_decode_resource_metadata_development_mode() {
    let temp_dir = TempDir::new().unwrap();
    let doc = json!({"resource": "https://api.example.com/#frag"});
    let path = write_fixture(&temp_dir, "resource-metadata", &doc.to_string());

    let strict = run(&["oauthkit", "decode", "resource-metadata", path.to_str().unwrap()]).unwrap();
    let dev = run(&[
        "oauthkit",
        "--mode",
        "dev",
        "decode",
        "resource-metadata",
        path.to_str().unwrap(),
    ])
    .unwrap();

    assert!(!strict.valid);
    assert!(dev.valid);
}

#[test]
fn test_decode_missing_file_is_an_error() {
    let result = run(&["oauthkit", "decode", "token-response", "/nonexistent/oauthkit.json"]);
    assert!(result.is_err());
}

#[test]
fn test_decode_invalid_json_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "broken", "{not json");

    let result = run(&["oauthkit", "decode", "token-response", path.to_str().unwrap()]);

    let error = result.unwrap_err();
    assert_eq!(error.to_string(), "Input is not valid JSON");
}
