//! Command implementations

pub mod decode;
pub mod validate;

use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;

use oauthkit_types::ValidationOptions;

pub use decode::{DecodeCommand, DocumentKind};
pub use validate::{StringKind, ValidateCommand};

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a single identifier or string value
    #[command(visible_alias = "check")]
    Validate(ValidateCommand),

    /// Decode and validate a JSON protocol document
    #[command(visible_alias = "parse")]
    Decode(DecodeCommand),
}

impl Command {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error when a document cannot be read or is not JSON.
    pub fn execute(self, options: &ValidationOptions) -> anyhow::Result<Report> {
        match self {
            Self::Validate(cmd) => Ok(cmd.execute()),
            Self::Decode(cmd) => cmd.execute(options),
        }
    }
}

/// Outcome of a validate or decode command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Kind of value that was checked
    pub kind: String,

    /// Whether the value was accepted
    pub valid: bool,

    /// Variant the value resolved to, for values with several accepted forms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Canonical form of the accepted value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Rejection reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// An accepted value
    pub fn accepted(kind: impl Into<String>, value: Value) -> Self {
        Self {
            kind: kind.into(),
            valid: true,
            variant: None,
            value: Some(value),
            error: None,
        }
    }

    /// A rejected value
    pub fn rejected(kind: impl Into<String>, error: impl ToString) -> Self {
        Self {
            kind: kind.into(),
            valid: false,
            variant: None,
            value: None,
            error: Some(error.to_string()),
        }
    }

    /// Record the resolved variant
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}
