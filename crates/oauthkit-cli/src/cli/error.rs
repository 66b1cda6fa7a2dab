//! Error display for the CLI

use colored::Colorize;

/// Format an error with context and a suggestion
pub fn format_error(error: &anyhow::Error) -> String {
    let mut output = format!("{} {}\n", "✗".red().bold(), error.to_string().bold());

    for cause in error.chain().skip(1) {
        output.push_str(&format!("  caused by: {cause}\n"));
    }

    if let Some(suggestion) = suggestion(error) {
        output.push_str(&format!("\n{} {}\n", "Suggestion:".yellow(), suggestion));
    }

    output
}

fn suggestion(error: &anyhow::Error) -> Option<&'static str> {
    if let Some(io) = error.downcast_ref::<std::io::Error>() {
        return Some(match io.kind() {
            std::io::ErrorKind::NotFound => "Check the file path, or pass '-' to read from stdin",
            std::io::ErrorKind::PermissionDenied => "Check the file permissions",
            _ => "Check that the input can be read",
        });
    }
    if error.downcast_ref::<serde_json::Error>().is_some() {
        return Some("Documents must be a single JSON object");
    }
    None
}

/// Display error to stderr and return the exit code
///
/// Exit code 2 distinguishes an operational failure from a rejected value.
pub fn display_error(error: &anyhow::Error) -> i32 {
    eprintln!("{}", format_error(error));
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_missing_file_suggestion() {
        colored::control::set_override(false);
        let error = std::fs::read_to_string("/nonexistent/oauthkit/metadata.json")
            .context("Failed to read metadata.json")
            .unwrap_err();

        let formatted = format_error(&error);
        assert!(formatted.starts_with("✗ Failed to read metadata.json"));
        assert!(formatted.contains("caused by:"));
        assert!(formatted.contains("pass '-'"));
    }

    #[test]
    fn test_json_suggestion() {
        colored::control::set_override(false);
        let error = serde_json::from_str::<serde_json::Value>("{")
            .context("Input is not valid JSON")
            .unwrap_err();
        assert!(format_error(&error).contains("single JSON object"));
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(display_error(&anyhow::anyhow!("boom")), 2);
    }
}
