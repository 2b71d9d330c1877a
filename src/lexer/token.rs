//! Token definitions for the todo markup
//!
//! This module defines all token types produced by the scanner.

use std::fmt;

/// Character carried by the end-of-stream token
pub const EOF_CHAR: char = '\0';

/// A token in the todo markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: impl Into<String>) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
        }
    }

    /// Create a single-character token
    pub fn single(token_type: TokenType, ch: char) -> Self {
        Self::new(token_type, ch.to_string())
    }

    /// The end-of-stream token
    pub fn eof() -> Self {
        Self::single(TokenType::Eof, EOF_CHAR)
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.token_type, self.lexeme)
    }
}

/// Token types in the todo markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Special
    Illegal,
    Eof,
    Whitespace,

    // Literals (todo text and dates)
    Ident,

    // Status markers
    StatusOpen,  // [
    StatusClose, // ]

    // Misc
    Slash,        // /
    Semicolon,    // ;
    Colon,        // :
    Asterisk,     // *
    Comma,        // ,
    Dot,          // .
    Hashtag,      // #
    Bracket,      // ( )
    CurrencySign, // $ € £ ¥
    Paragraph,    // §
    Ampersand,    // &
    Equals,       // =
    Tilde,        // ~
    At,           // @
    Percent,      // %
    Dash,         // -
    Underscore,   // _
}

impl TokenType {
    /// Look up the single-character token class of `ch`
    ///
    /// Whitespace, letters, digits and anything outside the symbol table
    /// have no single-character class and return `None`.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(Self::StatusOpen),
            ']' => Some(Self::StatusClose),
            '/' => Some(Self::Slash),
            ';' => Some(Self::Semicolon),
            ':' => Some(Self::Colon),
            '*' => Some(Self::Asterisk),
            ',' => Some(Self::Comma),
            '.' => Some(Self::Dot),
            '#' => Some(Self::Hashtag),
            '(' | ')' => Some(Self::Bracket),
            '$' | '€' | '£' | '¥' => Some(Self::CurrencySign),
            '§' => Some(Self::Paragraph),
            '&' => Some(Self::Ampersand),
            '=' => Some(Self::Equals),
            '~' => Some(Self::Tilde),
            '@' => Some(Self::At),
            '%' => Some(Self::Percent),
            '-' => Some(Self::Dash),
            '_' => Some(Self::Underscore),
            _ => None,
        }
    }

    /// Stable upper-case name of the token type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Whitespace => "WS",
            Self::Ident => "IDENT",
            Self::StatusOpen => "STATUS_OPEN",
            Self::StatusClose => "STATUS_CLOSE",
            Self::Slash => "SLASH",
            Self::Semicolon => "SEMICOLON",
            Self::Colon => "COLON",
            Self::Asterisk => "ASTERISK",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Hashtag => "HASHTAG",
            Self::Bracket => "BRACKET",
            Self::CurrencySign => "CURRENCY_SIGN",
            Self::Paragraph => "PARAGRAPH",
            Self::Ampersand => "AMPERSAND",
            Self::Equals => "EQUALS",
            Self::Tilde => "TILDE",
            Self::At => "AT",
            Self::Percent => "PERCENT",
            Self::Dash => "DASH",
            Self::Underscore => "UNDERSCORE",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
