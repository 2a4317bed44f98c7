//! Parse error types.

use psc_lex::TokenKind;
use psc_util::{Diagnostic, Span, Stage};
use thiserror::Error;

/// An error produced during parsing. Carries the expected token kind(s)
/// and the actual token where applicable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The parser needed one construct and found another token.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// Description of what was expected, e.g. "`=`" or "an expression".
        expected: String,
        found: TokenKind,
        span: Span,
    },

    /// A statement is missing its terminating `:`.
    #[error("expected `:` to terminate the statement, found {found}")]
    MissingTerminator { found: TokenKind, span: Span },

    /// A `choose` block reached `}` without a `default` case.
    #[error("`choose` requires a `default` case as its final arm")]
    MissingDefault { span: Span },

    /// A case label that is not a number or string literal.
    #[error("case labels must be number or string literals, found {found}")]
    InvalidCaseLiteral { found: TokenKind, span: Span },
}

impl ParseError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::MissingTerminator { span, .. }
            | ParseError::MissingDefault { span }
            | ParseError::InvalidCaseLiteral { span, .. } => *span,
        }
    }

    /// Stable kind name for the diagnostic surface.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "UnexpectedToken",
            ParseError::MissingTerminator { .. } => "MissingTerminator",
            ParseError::MissingDefault { .. } => "MissingDefault",
            ParseError::InvalidCaseLiteral { .. } => "InvalidCaseLiteral",
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic::new(Stage::Parse, err.kind(), err.to_string(), Some(err.span()))
    }
}
