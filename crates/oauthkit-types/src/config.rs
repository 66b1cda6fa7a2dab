//! Validation configuration
//!
//! Most validators have a single, fixed behavior. The exceptions are checks that
//! deployments commonly relax while developing against local servers (for
//! example the query/fragment rule on a protected resource identifier). Those
//! checks consult [`ValidationOptions`].
//!
//! ```rust
//! use oauthkit_types::config::{ValidationMode, ValidationOptions};
//!
//! let options = ValidationOptions::default();
//! assert_eq!(options.mode, ValidationMode::Strict);
//!
//! let relaxed = ValidationOptions::default().with_mode(ValidationMode::Development);
//! assert!(relaxed.is_development());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::constants::VALIDATION_MODE_ENV;

/// How strictly relaxable checks are enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Every check is enforced (default)
    #[default]
    Strict,
    /// Relaxable checks are skipped with a warning
    Development,
}

impl ValidationMode {
    /// Wire/config name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("unknown validation mode: {other}")),
        }
    }
}

/// Options consulted by validators with relaxable checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Enforcement mode
    #[serde(default)]
    pub mode: ValidationMode,
}

impl ValidationOptions {
    /// Strict options (same as `Default`)
    pub fn strict() -> Self {
        Self {
            mode: ValidationMode::Strict,
        }
    }

    /// Load options from the environment
    ///
    /// Reads `OAUTHKIT_VALIDATION_MODE` (`strict` or `development`, case-insensitive).
    /// A missing variable means strict; an unrecognised value falls back to strict
    /// and logs a warning.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(VALIDATION_MODE_ENV).ok().as_deref())
    }

    /// Options for a raw `OAUTHKIT_VALIDATION_MODE` value, `None` when unset
    pub fn from_env_value(value: Option<&str>) -> Self {
        let mode = match value {
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!(variable = VALIDATION_MODE_ENV, error = %e, "falling back to strict validation");
                ValidationMode::Strict
            }),
            None => ValidationMode::Strict,
        };
        Self { mode }
    }

    /// Set the enforcement mode
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether relaxable checks are skipped
    pub fn is_development(&self) -> bool {
        self.mode == ValidationMode::Development
    }
}
