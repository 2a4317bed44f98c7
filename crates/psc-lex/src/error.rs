//! Lexical error types.

use psc_util::{Diagnostic, Span, Stage};
use thiserror::Error;

/// An error produced during lexical analysis.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("illegal character '{ch}'")]
    IllegalCharacter { ch: char, span: Span },

    /// A string literal that reaches a newline or the end of input before
    /// its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    /// A decimal literal that does not fit in a 64-bit signed integer.
    #[error("integer literal '{text}' is too large")]
    NumberTooLarge { text: String, span: Span },
}

impl LexError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            LexError::IllegalCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::NumberTooLarge { span, .. } => *span,
        }
    }

    /// Stable kind name for the diagnostic surface.
    pub fn kind(&self) -> &'static str {
        match self {
            LexError::IllegalCharacter { .. } => "IllegalCharacter",
            LexError::UnterminatedString { .. } => "UnterminatedString",
            LexError::NumberTooLarge { .. } => "NumberTooLarge",
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic::new(Stage::Lex, err.kind(), err.to_string(), Some(err.span()))
    }
}
