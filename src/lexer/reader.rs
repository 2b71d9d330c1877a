//! Character sources for the scanner
//!
//! `Utf8Reader` decodes a buffered byte stream into characters and
//! `PushbackReader` puts a single held-back character in front of any
//! character source.

use std::io::{self, BufRead};
use std::iter::Map;

use tracing::debug;

/// An in-memory character sequence adapted to the fallible source interface
pub type CharSource<I> = Map<I, fn(char) -> io::Result<char>>;

/// Adapt an infallible character iterator into a `PushbackReader` source
pub fn char_source<I: Iterator<Item = char>>(chars: I) -> CharSource<I> {
    chars.map(Ok::<char, io::Error> as fn(char) -> io::Result<char>)
}

/// Decodes UTF-8 from a buffered reader, one character at a time
///
/// Ill-formed sequences decode to U+FFFD; the bytes of the broken prefix
/// are consumed and decoding resumes at the first byte that could not
/// belong to it.
pub struct Utf8Reader<R> {
    inner: R,
}

impl<R: BufRead> Utf8Reader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.peek_byte()? else {
            return Ok(None);
        };
        self.inner.consume(1);

        let width = utf8_width(first);
        match width {
            0 => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            1 => return Ok(Some(char::from(first))),
            _ => {}
        }

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.peek_byte()? {
                Some(b) if is_continuation(b) => {
                    self.inner.consume(1);
                    *slot = b;
                }
                _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            }
        }

        let ch = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Some(ch))
    }
}

impl<R: BufRead> Iterator for Utf8Reader<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_char().transpose()
    }
}

/// Decode a complete byte buffer the same way `Utf8Reader` streams it
pub fn decode_utf8(bytes: &[u8]) -> String {
    // Reading from a slice cannot fail
    Utf8Reader::new(bytes).filter_map(Result::ok).collect()
}

/// Encoded length announced by a leading byte, 0 if it cannot start a character
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// A character source with one slot of pushback
///
/// Read errors from the source are treated as end-of-stream. Once the end
/// has been observed the reader stays exhausted.
pub struct PushbackReader<I> {
    source: I,
    /// Most recently read character, eligible for `unread`
    last: Option<char>,
    /// Character pushed back by `unread`, returned by the next `read`
    held: Option<char>,
    exhausted: bool,
}

impl<I> PushbackReader<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            last: None,
            held: None,
            exhausted: false,
        }
    }

    /// Read the next character, or `None` at end-of-stream
    pub fn read(&mut self) -> Option<char> {
        let ch = match self.held.take() {
            Some(ch) => Some(ch),
            None => self.read_source(),
        };
        self.last = ch;
        ch
    }

    /// Push the most recently read character back
    ///
    /// Only the last read character can be pushed back, and only once.
    /// End-of-stream is never pushed back. Outside the crate, pushback is
    /// only reachable through `read_if`.
    pub(crate) fn unread(&mut self) {
        debug_assert!(
            self.held.is_none(),
            "unread called twice without an intervening read"
        );
        if let Some(ch) = self.last.take() {
            self.held = Some(ch);
        }
    }

    /// Read the next character if it satisfies `pred`, otherwise leave it
    /// for the next read
    pub fn read_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
        let ch = self.read()?;
        if pred(ch) {
            Some(ch)
        } else {
            self.unread();
            None
        }
    }

    fn read_source(&mut self) -> Option<char> {
        if self.exhausted {
            return None;
        }
        match self.source.next() {
            Some(Ok(ch)) => Some(ch),
            Some(Err(err)) => {
                debug!(%err, "read failed, treating as end of stream");
                self.exhausted = true;
                None
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}
