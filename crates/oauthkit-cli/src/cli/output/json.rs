//! JSON output formatter

use std::io::{self, Write};

use super::OutputFormatter;
use crate::cli::commands::Report;

/// JSON formatter
#[derive(Debug)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a formatter, pretty-printing when `pretty` is set
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, report: &Report) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn write_report(&self, report: &Report) -> io::Result<()> {
        let output = self.render(report).map_err(io::Error::other)?;
        writeln!(io::stdout().lock(), "{output}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_report() {
        let report = Report::accepted("jwt", json!("a.b")).with_variant("unsigned");
        assert_eq!(
            JsonFormatter::new(false).render(&report).unwrap(),
            r#"{"kind":"jwt","valid":true,"variant":"unsigned","value":"a.b"}"#
        );
    }

    #[test]
    fn test_rejection_has_no_value() {
        let report = Report::rejected("scope", "bad");
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonFormatter::new(true).render(&report).unwrap()).unwrap();
        assert_eq!(parsed, json!({"kind": "scope", "valid": false, "error": "bad"}));
    }
}
