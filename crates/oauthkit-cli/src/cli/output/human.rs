//! Human-readable output formatter

use colored::Colorize;
use std::io::{self, Write};

use super::OutputFormatter;
use crate::cli::commands::Report;

/// Human-readable formatter
#[derive(Debug, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    fn render(report: &Report, out: &mut impl Write) -> io::Result<()> {
        if report.valid {
            write!(out, "{} {}", "✓".green().bold(), report.kind.bold())?;
            if let Some(variant) = &report.variant {
                write!(out, " ({})", variant.cyan())?;
            }
            writeln!(out)?;

            match &report.value {
                Some(serde_json::Value::String(s)) => writeln!(out, "  {s}")?,
                Some(value) => {
                    let pretty = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
                    for line in pretty.lines() {
                        writeln!(out, "  {line}")?;
                    }
                }
                None => {}
            }
        } else {
            writeln!(out, "{} {}", "✗".red().bold(), report.kind.bold())?;
            if let Some(error) = &report.error {
                writeln!(out, "  {}", error.red())?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for HumanFormatter {
    fn write_report(&self, report: &Report) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        Self::render(report, &mut out)
    }
}
