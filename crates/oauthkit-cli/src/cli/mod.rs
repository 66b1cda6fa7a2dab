//! CLI module for oauthkit
//!
//! Command-line front end for the `oauthkit-types` validators. Every
//! subcommand produces a [`commands::Report`] that is rendered in the
//! selected [`output::OutputFormat`].

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

use clap::Parser;
use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use oauthkit_types::ValidationOptions;

use args::ModeArg;
use commands::Command;

/// oauthkit - validate and normalize OAuth 2.0 / OpenID Connect values
#[derive(Debug, Parser)]
#[command(
    name = "oauthkit",
    version,
    about = "Validate OAuth 2.0 and OpenID Connect identifiers and documents",
    long_about = "oauthkit checks identifiers (issuers, client IDs, redirect URIs, scopes, \
                  JWTs, PKCE verifiers) and decodes protocol documents (token requests, \
                  authorization requests, token responses, metadata) the way an \
                  authorization server would. Exit status is 0 when the input is accepted \
                  and 1 when it is rejected.",
    author
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        global = true
    )]
    pub format: output::OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Validation mode for relaxable checks
    ///
    /// Overrides `OAUTHKIT_VALIDATION_MODE`, which defaults to strict.
    #[arg(long, value_enum, global = true)]
    pub mode: Option<ModeArg>,
}

impl Cli {
    /// Execute the CLI command and return the process exit code
    ///
    /// # Errors
    ///
    /// Returns an error when input cannot be read or is not JSON. A value
    /// that is read successfully but rejected is reported, not returned as
    /// an error.
    pub fn execute(self) -> anyhow::Result<i32> {
        self.init_tracing();

        if self.no_color || !std::io::stdout().is_terminal() {
            colored::control::set_override(false);
        }

        let options = self.validation_options();
        let report = self.command.execute(&options)?;

        let formatter = output::get_formatter(self.format);
        formatter.write_report(&report)?;

        Ok(if report.valid { 0 } else { 1 })
    }

    /// Options from `OAUTHKIT_VALIDATION_MODE`, with `--mode` taking precedence
    pub fn validation_options(&self) -> ValidationOptions {
        let options = ValidationOptions::from_env();
        match self.mode {
            Some(mode) => options.with_mode(mode.into()),
            None => options,
        }
    }

    /// Initialize tracing based on verbosity
    ///
    /// `RUST_LOG` takes precedence over the `-v`/`-q` flags when set.
    fn init_tracing(&self) {
        let level = if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

        // Ignore the error from a second initialization in tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oauthkit_types::ValidationMode;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["oauthkit", "validate", "issuer", "https://auth.example.com"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["oauthkit", "-vvv", "validate", "scope", "read"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["oauthkit", "-q", "-v", "validate", "scope", "read"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_flag() {
        let cli = Cli::try_parse_from([
            "oauthkit",
            "--mode",
            "development",
            "decode",
            "resource-metadata",
            "-",
        ])
        .unwrap();
        assert_eq!(cli.mode, Some(ModeArg::Development));
        assert_eq!(cli.validation_options().mode, ValidationMode::Development);
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["oauthkit", "validate", "jwt", "a.b", "--format", "json"]).unwrap();
        assert_eq!(cli.format, output::OutputFormat::Json);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["oauthkit", "validate", "nonsense", "x"]).is_err());
    }
}
