//! Error handling and diagnostics
//!
//! Scanning itself never fails; these types cover the surfaces around it:
//! reading input and reporting unrecognized characters.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for todo-lexer operations
pub type TodoLexResult<T> = Result<T, TodoLexError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Location of the first character of a file
    pub fn start(filename: Option<&str>) -> Self {
        Self::new(1, 1, filename.map(str::to_string))
    }

    /// Move past `text`
    pub fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Main error type
#[derive(Debug, Error)]
pub enum TodoLexError {
    /// Input could not be read
    #[error("IO Error: failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A character outside every token class
    #[error("Unrecognized Character: {character:?} at {location}")]
    Unrecognized {
        character: String,
        location: SourceLocation,
    },
}

impl TodoLexError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unrecognized(character: impl Into<String>, location: SourceLocation) -> Self {
        Self::Unrecognized {
            character: character.into(),
            location,
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::Io { .. } => "IO Error",
            Self::Unrecognized { .. } => "Unrecognized Character",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Io { path, source } => format!("failed to read '{}': {}", path.display(), source),
            Self::Unrecognized { character, .. } => {
                format!("character {:?} does not start any token", character)
            }
        }
    }

    /// Get the source location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Unrecognized { location, .. } => Some(location),
            Self::Io { .. } => None,
        }
    }
}
