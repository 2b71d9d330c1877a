//! Scanner implementation for the todo markup
//!
//! This module implements lexical analysis, converting a character stream
//! into tokens one `scan` call at a time.

use std::io::{self, BufReader, Read};

use tracing::trace;

use super::reader::{char_source, CharSource, PushbackReader, Utf8Reader};
use super::token::{Token, TokenType};

/// Scanner over a stream of characters
///
/// Holds nothing but the stream position and one character of pushback.
pub struct Scanner<I> {
    reader: PushbackReader<I>,
}

impl<R: Read> Scanner<Utf8Reader<BufReader<R>>> {
    /// Create a scanner over a UTF-8 byte stream
    pub fn new(reader: R) -> Self {
        Self::from_source(Utf8Reader::new(BufReader::new(reader)))
    }
}

impl<C: Iterator<Item = char>> Scanner<CharSource<C>> {
    /// Create a scanner over an in-memory character sequence
    pub fn from_chars(chars: C) -> Self {
        Self::from_source(char_source(chars))
    }
}

impl<I> Scanner<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    /// Create a scanner over any fallible character source
    pub fn from_source(source: I) -> Self {
        Self {
            reader: PushbackReader::new(source),
        }
    }

    /// Scan the next token
    ///
    /// Once the stream is exhausted every call returns an `Eof` token.
    pub fn scan(&mut self) -> Token {
        let token = match self.reader.read() {
            None => Token::eof(),
            Some(ch) if is_whitespace(ch) => {
                self.reader.unread();
                self.scan_whitespace()
            }
            Some(ch) if is_letter(ch) || is_digit(ch) => {
                self.reader.unread();
                self.scan_ident()
            }
            Some(ch) => Token::single(TokenType::from_char(ch).unwrap_or(TokenType::Illegal), ch),
        };

        trace!(token_type = %token.token_type, lexeme = ?token.lexeme, "scanned token");
        token
    }

    /// Iterate over the remaining tokens, stopping at end-of-stream
    pub fn tokens(&mut self) -> Tokens<'_, I> {
        Tokens { scanner: self }
    }

    /// Scan a maximal run of whitespace
    fn scan_whitespace(&mut self) -> Token {
        self.scan_run(TokenType::Whitespace, is_whitespace)
    }

    /// Scan a maximal run of letters and digits
    fn scan_ident(&mut self) -> Token {
        self.scan_run(TokenType::Ident, |ch| is_letter(ch) || is_digit(ch))
    }

    /// Accumulate characters while `belongs` holds
    ///
    /// The caller has pushed back a character that belongs to the run, so
    /// the lexeme is never empty. The first character outside the run is
    /// left for the next `scan`.
    fn scan_run(&mut self, token_type: TokenType, belongs: fn(char) -> bool) -> Token {
        let mut lexeme = String::new();
        while let Some(ch) = self.reader.read_if(belongs) {
            lexeme.push(ch);
        }
        Token::new(token_type, lexeme)
    }
}

/// Tokens of a `Scanner` up to, but not including, the first `Eof`
pub struct Tokens<'a, I> {
    scanner: &'a mut Scanner<I>,
}

impl<I> Iterator for Tokens<'_, I>
where
    I: Iterator<Item = io::Result<char>>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.scanner.scan();
        (!token.is_eof()).then_some(token)
    }
}

pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}

/// ASCII letters plus the German umlauts and sharp s
pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, 'ä' | 'Ä' | 'ö' | 'Ö' | 'ü' | 'Ü' | 'ß')
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Read;

    fn scan_all(source: &str) -> Vec<Token> {
        Scanner::from_chars(source.chars()).tokens().collect()
    }

    fn tok(token_type: TokenType, lexeme: &str) -> Token {
        Token::new(token_type, lexeme)
    }

    #[test]
    fn test_empty_source() {
        let mut scanner = Scanner::from_chars("".chars());
        assert_eq!(scanner.scan(), Token::eof());
    }

    #[test]
    fn test_single_character_tokens() {
        let cases = [
            ("[", TokenType::StatusOpen),
            ("]", TokenType::StatusClose),
            ("#", TokenType::Hashtag),
            ("(", TokenType::Bracket),
            (")", TokenType::Bracket),
            ("$", TokenType::CurrencySign),
            ("€", TokenType::CurrencySign),
            ("~", TokenType::Tilde),
            ("-", TokenType::Dash),
        ];
        for (source, expected) in cases {
            let mut scanner = Scanner::from_chars(source.chars());
            assert_eq!(scanner.scan(), tok(expected, source));
            assert!(scanner.scan().is_eof());
        }
    }

    #[test]
    fn test_symbol_table() {
        let tokens = scan_all("/;:*,.§&=@%_£¥");
        let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            types,
            vec![
                TokenType::Slash,
                TokenType::Semicolon,
                TokenType::Colon,
                TokenType::Asterisk,
                TokenType::Comma,
                TokenType::Dot,
                TokenType::Paragraph,
                TokenType::Ampersand,
                TokenType::Equals,
                TokenType::At,
                TokenType::Percent,
                TokenType::Underscore,
                TokenType::CurrencySign,
                TokenType::CurrencySign,
            ]
        );
    }

    #[test]
    fn test_end_to_end_todo_line() {
        assert_eq!(
            scan_all("#today [x] 5€ ä_b"),
            vec![
                tok(TokenType::Hashtag, "#"),
                tok(TokenType::Ident, "today"),
                tok(TokenType::Whitespace, " "),
                tok(TokenType::StatusOpen, "["),
                tok(TokenType::Ident, "x"),
                tok(TokenType::StatusClose, "]"),
                tok(TokenType::Whitespace, " "),
                tok(TokenType::Ident, "5"),
                tok(TokenType::CurrencySign, "€"),
                tok(TokenType::Whitespace, " "),
                tok(TokenType::Ident, "ä"),
                tok(TokenType::Underscore, "_"),
                tok(TokenType::Ident, "b"),
            ]
        );
    }

    #[test]
    fn test_whitespace_run() {
        assert_eq!(
            scan_all("a \t\n b"),
            vec![
                tok(TokenType::Ident, "a"),
                tok(TokenType::Whitespace, " \t\n "),
                tok(TokenType::Ident, "b"),
            ]
        );
    }

    #[test]
    fn test_carriage_return_is_illegal() {
        assert_eq!(
            scan_all("a\r\nb"),
            vec![
                tok(TokenType::Ident, "a"),
                tok(TokenType::Illegal, "\r"),
                tok(TokenType::Whitespace, "\n"),
                tok(TokenType::Ident, "b"),
            ]
        );
    }

    #[test]
    fn test_ident_mixes_letters_digits_and_umlauts() {
        assert_eq!(
            scan_all("Größe 2024 12abc ÄÖÜäöüß"),
            vec![
                tok(TokenType::Ident, "Größe"),
                tok(TokenType::Whitespace, " "),
                tok(TokenType::Ident, "2024"),
                tok(TokenType::Whitespace, " "),
                tok(TokenType::Ident, "12abc"),
                tok(TokenType::Whitespace, " "),
                tok(TokenType::Ident, "ÄÖÜäöüß"),
            ]
        );
    }

    #[test]
    fn test_date_splits_on_punctuation() {
        assert_eq!(
            scan_all("24.12.2025"),
            vec![
                tok(TokenType::Ident, "24"),
                tok(TokenType::Dot, "."),
                tok(TokenType::Ident, "12"),
                tok(TokenType::Dot, "."),
                tok(TokenType::Ident, "2025"),
            ]
        );
    }

    #[test]
    fn test_unrecognized_characters() {
        assert_eq!(
            scan_all("é!{\0"),
            vec![
                tok(TokenType::Illegal, "é"),
                tok(TokenType::Illegal, "!"),
                tok(TokenType::Illegal, "{"),
                tok(TokenType::Illegal, "\0"),
            ]
        );
    }

    #[test]
    fn test_idempotent_termination() {
        let mut scanner = Scanner::from_chars("x".chars());
        assert_eq!(scanner.scan(), tok(TokenType::Ident, "x"));
        for _ in 0..5 {
            assert_eq!(scanner.scan(), Token::eof());
        }
    }

    #[test]
    fn test_iterator_stops_at_eof() {
        let mut scanner = Scanner::from_chars("a b".chars());
        assert_eq!(scanner.tokens().count(), 3);
        assert_eq!(scanner.tokens().next(), None);
        assert!(scanner.scan().is_eof());
    }

    #[test]
    fn test_scan_byte_stream() {
        let source = "[ ] Miete 850€ @bank".as_bytes();
        let tokens: Vec<Token> = Scanner::new(source).tokens().collect();
        assert_eq!(tokens, scan_all("[ ] Miete 850€ @bank"));
    }

    #[test]
    fn test_scan_byte_stream_with_invalid_utf8() {
        let tokens: Vec<Token> = Scanner::new(&b"ab\xFFcd"[..]).tokens().collect();
        assert_eq!(
            tokens,
            vec![
                tok(TokenType::Ident, "ab"),
                tok(TokenType::Illegal, "\u{FFFD}"),
                tok(TokenType::Ident, "cd"),
            ]
        );
    }

    /// Hands out `data`, then fails every read
    struct FailingAfter {
        data: &'static [u8],
    }

    impl Read for FailingAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection lost"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_error_ends_identifier_run() {
        let mut scanner = Scanner::new(FailingAfter { data: b"abc" });
        assert_eq!(scanner.scan(), tok(TokenType::Ident, "abc"));
        assert_eq!(scanner.scan(), Token::eof());
        assert_eq!(scanner.scan(), Token::eof());
    }

    #[test]
    fn test_read_error_ends_whitespace_run() {
        let tokens: Vec<Token> = Scanner::new(FailingAfter { data: b"[x] \t" }).tokens().collect();
        assert_eq!(
            tokens,
            vec![
                tok(TokenType::StatusOpen, "["),
                tok(TokenType::Ident, "x"),
                tok(TokenType::StatusClose, "]"),
                tok(TokenType::Whitespace, " \t"),
            ]
        );
    }

    fn todo_text() -> impl Strategy<Value = String> {
        prop_oneof![
            "[ \t\na-zA-Z0-9äöüÄÖÜß#\\[\\]()$€£¥§&=@%_~.,;:*/-]{0,64}",
            any::<String>(),
        ]
    }

    proptest! {
        #[test]
        fn lexemes_reconstruct_input(source in todo_text()) {
            let rebuilt: String = scan_all(&source).iter().map(|t| t.lexeme.as_str()).collect();
            prop_assert_eq!(rebuilt, source);
        }

        #[test]
        fn scanning_terminates_in_eof(source in todo_text()) {
            let mut scanner = Scanner::from_chars(source.chars());
            let limit = source.chars().count();
            let mut emitted = 0;
            while !scanner.scan().is_eof() {
                emitted += 1;
                prop_assert!(emitted <= limit);
            }
            prop_assert!(scanner.scan().is_eof());
            prop_assert!(scanner.scan().is_eof());
        }

        #[test]
        fn runs_are_maximal(source in todo_text()) {
            let tokens = scan_all(&source);
            for pair in tokens.windows(2) {
                let run = matches!(pair[0].token_type, TokenType::Whitespace | TokenType::Ident);
                prop_assert!(!(run && pair[0].token_type == pair[1].token_type));
                prop_assert!(!pair[0].lexeme.is_empty());
            }
        }
    }
}
