//! Output formatting for CLI commands

mod human;
mod json;

use clap::ValueEnum;
use std::io;

use super::commands::Report;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Trait for formatting command output
pub trait OutputFormatter {
    /// Write a report to stdout
    ///
    /// # Errors
    ///
    /// Returns the I/O or serialization error from writing.
    fn write_report(&self, report: &Report) -> io::Result<()>;
}

/// Get formatter for the specified format
pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(false)),
        OutputFormat::JsonPretty => Box::new(JsonFormatter::new(true)),
    }
}
