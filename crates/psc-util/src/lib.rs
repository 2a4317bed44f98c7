//! psc-util - Shared infrastructure for the PatternScript compiler.
//!
//! This crate holds the types every pipeline stage needs:
//!
//! - [`Span`] - source location tracking (byte range plus line/column)
//! - [`Diagnostic`] and [`Stage`] - the stage-tagged error surface of the
//!   whole compiler
//! - [`Value`] - the runtime value representation and the shared operator
//!   semantics (stitch coercion, string repetition, wrapping arithmetic)
//!
//! The operator semantics live here rather than in the interpreter so that
//! the TAC optimizer's constant folder and the interpreter agree bit-for-bit
//! on every result.

pub mod diagnostic;
pub mod span;
pub mod value;

pub use diagnostic::{Diagnostic, Stage};
pub use span::Span;
pub use value::Value;
