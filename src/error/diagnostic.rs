//! Diagnostic formatting for better error messages
//!
//! Renders an error with the offending source line and a caret under the
//! reported column.

use super::{SourceLocation, TodoLexError};
use colored::Colorize;

/// Diagnostic information for displaying errors with context
pub struct Diagnostic<'a> {
    error: &'a TodoLexError,
    source: Option<&'a str>,
}

impl<'a> Diagnostic<'a> {
    /// Create a new diagnostic from an error
    pub fn new(error: &'a TodoLexError) -> Self {
        Self {
            error,
            source: None,
        }
    }

    /// Create a diagnostic with source text context
    pub fn with_source(error: &'a TodoLexError, source: &'a str) -> Self {
        Self {
            error,
            source: Some(source),
        }
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        let mut output = String::new();

        let kind = self.error.kind().red().bold();
        output.push_str(&format!("{}: ", kind));
        output.push_str(&self.error.message());
        output.push('\n');

        if let Some(location) = self.error.location() {
            output.push_str(&format!("  {} {}\n", "-->".blue().bold(), location));

            if let Some(source) = self.source {
                output.push_str(&format_source_line(source, location));
            }
        }

        output
    }
}

/// The reported line followed by a caret line
fn format_source_line(source: &str, location: &SourceLocation) -> String {
    let Some(line) = location
        .line
        .checked_sub(1)
        .and_then(|idx| source.split('\n').nth(idx))
    else {
        return String::new();
    };

    let gutter = location.line.to_string();
    // Tabs keep their width so the caret lines up under them
    let padding: String = line
        .chars()
        .take(location.column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();

    format!(
        "  {} {}\n  {} {}{}\n",
        gutter.blue().bold(),
        line,
        " ".repeat(gutter.len()),
        padding,
        "^".red().bold()
    )
}

impl std::fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
