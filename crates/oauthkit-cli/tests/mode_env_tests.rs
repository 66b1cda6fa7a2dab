//! `OAUTHKIT_VALIDATION_MODE` handling in the CLI
//!
//! These tests mutate the process environment and run serially.

#![allow(unsafe_code)] // Required for set_var in Rust 2024 edition

use clap::Parser;
use oauthkit_cli::cli::Cli;
use oauthkit_types::ValidationMode;
use oauthkit_types::constants::VALIDATION_MODE_ENV;
use serial_test::serial;

fn mode_for(env: Option<&str>, args: &[&str]) -> ValidationMode {
    // SAFETY: every test touching the variable is #[serial]
    unsafe {
        match env {
            Some(value) => std::env::set_var(VALIDATION_MODE_ENV, value),
            None => std::env::remove_var(VALIDATION_MODE_ENV),
        }
    }
    let mode = Cli::try_parse_from(args).unwrap().validation_options().mode;
    unsafe {
        std::env::remove_var(VALIDATION_MODE_ENV);
    }
    mode
}

const DECODE: &[&str] = &["oauthkit", "decode", "resource-metadata", "-"];

#[test]
#[serial]
fn test_unset_variable_is_strict() {
    assert_eq!(mode_for(None, DECODE), ValidationMode::Strict);
}

#[test]
#[serial]
fn test_variable_is_case_insensitive() {
    assert_eq!(mode_for(Some("DEVELOPMENT"), DECODE), ValidationMode::Development);
    assert_eq!(mode_for(Some("dev"), DECODE), ValidationMode::Development);
}

#[test]
#[serial]
fn test_unknown_value_falls_back_to_strict() {
    assert_eq!(mode_for(Some("lenient"), DECODE), ValidationMode::Strict);
}

#[test]
#[serial]
fn test_flag_overrides_variable() {
    let args = ["oauthkit", "--mode", "strict", "decode", "resource-metadata", "-"];
    assert_eq!(mode_for(Some("development"), &args), ValidationMode::Strict);

    let args = ["oauthkit", "--mode", "development", "decode", "resource-metadata", "-"];
    assert_eq!(mode_for(Some("strict"), &args), ValidationMode::Development);
}
