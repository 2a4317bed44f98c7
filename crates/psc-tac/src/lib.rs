//! psc-tac - Three-address code for PatternScript.
//!
//! Lowers the typed HIR into a flat [`tac::Instr`] list and optionally
//! optimizes it. Temporaries are numbered from zero per program and
//! assigned exactly once at generation time; the optimizer may delete
//! instructions but never renumbers temporaries or prunes labels, so every
//! jump target keeps resolving.
//!
//! # Examples
//!
//! ```
//! use psc_tac::{lower_program, optimize};
//!
//! let tokens = psc_lex::tokenize("display 2 + 3:").unwrap();
//! let hir = psc_sem::analyze(psc_par::parse(tokens).unwrap()).unwrap();
//! let mut tac = lower_program(&hir);
//! optimize(&mut tac);
//! assert_eq!(psc_tac::tac::render(&tac), "    t0 = 5\n    display t0\n");
//! ```

mod lower;
mod optimize;
pub mod tac;

pub use lower::lower_program;
pub use optimize::optimize;
pub use tac::{BinOp, Instr, Label, Operand};
