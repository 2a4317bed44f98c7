//! Diagnostic reporting.
//!
//! Every error the pipeline can produce is surfaced to the caller as a
//! single [`Diagnostic`]: the stage it came from, an optional source
//! position, a stable kind name and a human-readable message. The first
//! error in any stage aborts the pipeline, so there is never more than one
//! diagnostic per invocation.
//!
//! Each stage crate defines its own `thiserror` error enum and converts it
//! into a `Diagnostic` at the driver boundary; this module only defines the
//! common surface.

use std::fmt;

use crate::span::Span;

/// The pipeline stage a diagnostic originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Lexical analysis.
    Lex,
    /// Parsing.
    Parse,
    /// Semantic analysis.
    Semantic,
    /// TAC interpretation.
    Runtime,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lex => write!(f, "lex"),
            Stage::Parse => write!(f, "parse"),
            Stage::Semantic => write!(f, "semantic"),
            Stage::Runtime => write!(f, "runtime"),
        }
    }
}

/// A stage-tagged error with an optional source position.
///
/// Rendered as `<stage> error at <line>:<col>: <message>`, or without the
/// position clause when no position is known (runtime errors carry none).
///
/// # Examples
///
/// ```
/// use psc_util::{Diagnostic, Span, Stage};
///
/// let diag = Diagnostic::new(
///     Stage::Lex,
///     "IllegalCharacter",
///     "illegal character '@'",
///     Some(Span::new(4, 5, 1, 5)),
/// );
/// assert_eq!(diag.to_string(), "lex error at 1:5: illegal character '@'");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stage that produced the error.
    pub stage: Stage,
    /// Stable kind name, e.g. `"UndefinedVariable"`.
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Position of the error, if known. `(line, column)`, 1-based.
    pub position: Option<(u32, u32)>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    ///
    /// A `Some(span)` whose line is 0 (e.g. [`Span::DUMMY`]) is treated as
    /// an unknown position.
    pub fn new(
        stage: Stage,
        kind: &'static str,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        let position = span
            .filter(|s| s.line > 0)
            .map(|s| (s.line, s.column));
        Self {
            stage,
            kind,
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some((line, column)) => {
                write!(f, "{} error at {}:{}: {}", self.stage, line, column, self.message)
            }
            None => write!(f, "{} error: {}", self.stage, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
