//! psc-lex - Lexical analyzer for PatternScript.
//!
//! Transforms source text into a finite sequence of [`Token`]s ending with
//! [`TokenKind::Eof`], or fails with the first [`LexError`] encountered.
//!
//! Scanning is single-pass and greedy: two-character operators (`==`, `!=`,
//! `<=`, `>=`, `..`) are preferred over their one-character prefixes.
//! Whitespace (space, tab, newline, carriage return) separates tokens and is
//! otherwise discarded; the language has no comments.
//!
//! # Examples
//!
//! ```
//! use psc_lex::{tokenize, TokenKind};
//!
//! let tokens = tokenize("x = 4:").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Ident, TokenKind::Assign, TokenKind::Number,
//!      TokenKind::Colon, TokenKind::Eof],
//! );
//! ```

mod cursor;
mod error;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Tokenize an entire source string.
///
/// The returned vector always ends with an `Eof` token. Returns the first
/// lexical error encountered, if any.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
