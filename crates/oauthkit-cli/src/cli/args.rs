//! Shared argument types

use clap::{Args, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use oauthkit_types::ValidationMode;

/// Validation mode selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Enforce every check
    #[default]
    Strict,
    /// Skip relaxable checks with a warning
    #[value(alias = "dev")]
    Development,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => Self::Strict,
            ModeArg::Development => Self::Development,
        }
    }
}

/// Where a JSON document is read from
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// JSON file to read, or `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,
}

impl InputArgs {
    /// Whether input comes from stdin
    pub fn is_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    /// Read the whole input as a string
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the file or stdin cannot be read.
    pub fn read_to_string(&self) -> std::io::Result<String> {
        if self.is_stdin() {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        } else {
            std::fs::read_to_string(&self.input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_conversion() {
        assert_eq!(ValidationMode::from(ModeArg::default()), ValidationMode::Strict);
        assert_eq!(ValidationMode::from(ModeArg::Development), ValidationMode::Development);
    }

    #[test]
    fn test_stdin_marker() {
        let args = InputArgs { input: PathBuf::from("-") };
        assert!(args.is_stdin());

        let args = InputArgs { input: PathBuf::from("metadata.json") };
        assert!(!args.is_stdin());
    }
}
