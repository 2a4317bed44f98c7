//! psc-sem - Semantic analysis for PatternScript.
//!
//! A single traversal over the AST that:
//!
//! - attaches a resolved [`Type`] to every expression (the typed [`hir`]),
//! - maintains the scoped symbol table (program scope plus one scope per
//!   active `loop` body),
//! - resolves the overloaded `*` into multiplication or string repetition,
//! - rejects statically known negative repeat counts.
//!
//! The first error aborts the walk; scopes are unwound on every exit path.
//!
//! # Examples
//!
//! ```
//! use psc_sem::{analyze, SemError};
//!
//! let tokens = psc_lex::tokenize("display \"a\" < \"b\":").unwrap();
//! let ast = psc_par::parse(tokens).unwrap();
//! let err = analyze(ast).unwrap_err();
//! assert!(matches!(err, SemError::InvalidOperandTypes { .. }));
//! ```

mod analysis;
mod error;
pub mod hir;
pub mod scope;
mod types;

pub use analysis::analyze;
pub use error::SemError;
pub use types::Type;
