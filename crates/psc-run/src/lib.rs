//! psc-run - TAC interpreter for PatternScript.
//!
//! Executes the instruction list produced by `psc-tac` against a runtime
//! value store. Output is buffered as an ordered list of lines; `give`
//! halts execution immediately and its value is recorded, not printed.
//! Output produced before a runtime error stays available on the
//! [`Interpreter`].
//!
//! # Examples
//!
//! ```
//! use psc_run::execute;
//!
//! let tokens = psc_lex::tokenize("display \"*\" * 3:").unwrap();
//! let hir = psc_sem::analyze(psc_par::parse(tokens).unwrap()).unwrap();
//! let tac = psc_tac::lower_program(&hir);
//! let out = execute(&tac).unwrap();
//! assert_eq!(out.lines, ["***"]);
//! ```

mod error;
mod interp;

pub use error::RuntimeError;
pub use interp::{execute, Interpreter, RunOutput};
