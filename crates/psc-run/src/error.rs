//! Runtime error types.

use psc_tac::Label;
use psc_util::{Diagnostic, Stage};
use thiserror::Error;

/// An error raised while executing TAC.
///
/// A correct pipeline never produces `TypeError` or `MissingLabel`:
/// temporaries are assigned before use and every jump target exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// `%` with a zero right-hand side.
    #[error("modulo by zero")]
    DivideByZero,

    /// String repetition with a negative count computed at runtime.
    #[error("cannot repeat a string a negative number of times ({count})")]
    NegativeRepeat { count: i64 },

    /// An operand with a type the instruction is not defined on, or a read
    /// of a never-assigned slot.
    #[error("type error at runtime: {0}")]
    TypeError(String),

    /// A jump to a label that does not exist in the program.
    #[error("jump to unknown label {0}")]
    MissingLabel(Label),
}

impl RuntimeError {
    /// Stable kind name for the diagnostic surface.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::DivideByZero => "DivideByZero",
            RuntimeError::NegativeRepeat { .. } => "NegativeRepeat",
            RuntimeError::TypeError(_) => "TypeErrorAtRuntime",
            RuntimeError::MissingLabel(_) => "MissingLabel",
        }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(err: RuntimeError) -> Self {
        // TAC carries no source positions; runtime diagnostics have none.
        Diagnostic::new(Stage::Runtime, err.kind(), err.to_string(), None)
    }
}
