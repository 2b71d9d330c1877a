//! # todo-lexer
//!
//! A lexical scanner for a small markup used to write todo entries with
//! dates, statuses, tags and currency amounts:
//!
//! ```text
//! #today [x] pay rent 850€ @bank
//! ```
//!
//! ## Architecture
//!
//! - `lexer`: character sources with one slot of pushback, the token
//!   definitions and the `Scanner`
//! - `error`: error types and colored diagnostics
//!
//! Tokens are lossless: concatenating every lexeme up to end-of-stream
//! reproduces the input.

pub mod error;
pub mod lexer;

// Re-export commonly used types
pub use error::{Diagnostic, SourceLocation, TodoLexError, TodoLexResult};
pub use lexer::{Scanner, Token, TokenType};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan `source` into every token before end-of-stream
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::from_chars(source.chars()).tokens().collect()
}

/// Scan `source` and reject the first unrecognized character
///
/// # Arguments
///
/// * `source` - The todo text to scan
/// * `filename` - Optional filename for error reporting
pub fn check(source: &str, filename: Option<&str>) -> TodoLexResult<Vec<Token>> {
    let tokens = tokenize(source);
    let mut location = SourceLocation::start(filename);

    for token in &tokens {
        if token.token_type == TokenType::Illegal {
            return Err(TodoLexError::unrecognized(token.lexeme.clone(), location));
        }
        location.advance(&token.lexeme);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let source = "[ ] 03.11. Zahnarzt (10:30) ~1h\n[x] Miete 850€ §3";
        let rebuilt: String = tokenize(source).into_iter().map(|t| t.lexeme).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_check_accepts_known_characters() {
        let tokens = check("#work [x] report, 50% done", None).unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Hashtag);
    }

    #[test]
    fn test_check_columns_after_invalid_utf8() {
        // A surrogate encoding decodes to a single replacement character
        let source = lexer::reader::decode_utf8(b"ok \xED\xA0\x80 x");
        let err = check(&source, None).unwrap_err();
        assert_eq!(err.location(), Some(&SourceLocation::new(1, 4, None)));

        let tokens = tokenize(&source);
        assert_eq!(tokens[2], Token::new(TokenType::Illegal, "\u{FFFD}"));
        assert_eq!(tokens[4], Token::new(TokenType::Ident, "x"));
    }

    #[test]
    fn test_check_reports_location() {
        let err = check("[ ] ok\n[x] done!", Some("todo.txt")).unwrap_err();
        match err {
            TodoLexError::Unrecognized { character, location } => {
                assert_eq!(character, "!");
                assert_eq!(location, SourceLocation::new(2, 9, Some("todo.txt".to_string())));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
