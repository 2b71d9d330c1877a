//! Lexical analysis module
//!
//! This module handles tokenization of todo entries.

pub mod reader;
pub mod scanner;
pub mod token;

pub use reader::{PushbackReader, Utf8Reader};
pub use scanner::{Scanner, Tokens};
pub use token::{Token, TokenType};
