//! Semantic error types.

use psc_util::{Diagnostic, Span, Stage};
use thiserror::Error;

use crate::types::Type;

/// An error produced during semantic analysis.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SemError {
    /// A variable read that is unbound in every visible scope.
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String, span: Span },

    /// Assignment whose right-hand side type differs from the variable's
    /// established type.
    #[error("type mismatch for `{name}`: expected {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: Type,
        found: Type,
        span: Span,
    },

    /// An operator applied to operand types outside its typing table.
    #[error("invalid operand types for `{op}`: {lhs} and {rhs}")]
    InvalidOperandTypes {
        op: &'static str,
        lhs: Type,
        rhs: Type,
        span: Span,
    },

    /// A case label whose type differs from the scrutinee's type.
    #[error("case label type mismatch: expected {expected}, got {found}")]
    CaseTypeMismatch {
        expected: Type,
        found: Type,
        span: Span,
    },

    /// A string repetition with a statically known negative count.
    #[error("cannot repeat a string a negative number of times ({count})")]
    NegativeRepeat { count: i64, span: Span },

    /// Assignment to a loop variable inside its own body; the increment is
    /// implicit and owned by the loop.
    #[error("cannot assign to loop variable `{name}` inside its body")]
    LoopVariableAssignment { name: String, span: Span },

    /// A loop bound that is not `int`. Reported under the `TypeMismatch`
    /// kind.
    #[error("loop {which} bound must be int, got {found}")]
    LoopBoundType {
        which: &'static str,
        found: Type,
        span: Span,
    },

    /// A `check` condition that is not `int`. Reported under the
    /// `TypeMismatch` kind.
    #[error("`check` condition must be int, got {found}")]
    CheckCondType { found: Type, span: Span },
}

impl SemError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            SemError::UndefinedVariable { span, .. }
            | SemError::TypeMismatch { span, .. }
            | SemError::InvalidOperandTypes { span, .. }
            | SemError::CaseTypeMismatch { span, .. }
            | SemError::NegativeRepeat { span, .. }
            | SemError::LoopVariableAssignment { span, .. }
            | SemError::LoopBoundType { span, .. }
            | SemError::CheckCondType { span, .. } => *span,
        }
    }

    /// Stable kind name for the diagnostic surface.
    pub fn kind(&self) -> &'static str {
        match self {
            SemError::UndefinedVariable { .. } => "UndefinedVariable",
            SemError::TypeMismatch { .. }
            | SemError::LoopBoundType { .. }
            | SemError::CheckCondType { .. } => "TypeMismatch",
            SemError::InvalidOperandTypes { .. } => "InvalidOperandTypes",
            SemError::CaseTypeMismatch { .. } => "CaseTypeMismatch",
            SemError::NegativeRepeat { .. } => "NegativeRepeat",
            SemError::LoopVariableAssignment { .. } => "LoopVariableAssignment",
        }
    }
}

impl From<SemError> for Diagnostic {
    fn from(err: SemError) -> Self {
        Diagnostic::new(Stage::Semantic, err.kind(), err.to_string(), Some(err.span()))
    }
}
