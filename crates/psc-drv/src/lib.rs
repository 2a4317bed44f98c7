//! psc-drv - Pipeline orchestration for PatternScript.
//!
//! Runs the stages in order - lex, parse, analyze, lower, optimize,
//! interpret - converting the first stage error into a [`Diagnostic`].
//! This is the core entry point; the `psc` binary is a thin wrapper that
//! reads a file and streams the result to stdout/stderr.
//!
//! # Examples
//!
//! ```
//! use psc_drv::compile_and_run;
//!
//! let out = compile_and_run("x = 4: y = x * 5: display y:").unwrap();
//! assert_eq!(out.lines, ["20"]);
//!
//! let err = compile_and_run("display \"a\" < \"b\":").unwrap_err();
//! assert_eq!(err.kind, "InvalidOperandTypes");
//! ```

use psc_tac::Instr;
use psc_util::Diagnostic;

pub use psc_run::{Interpreter, RunOutput};
pub use psc_util::{Stage, Value};

/// Compile a source string to optimized TAC.
pub fn compile(source: &str) -> Result<Vec<Instr>, Diagnostic> {
    let mut program = compile_unoptimized(source)?;
    let before = program.len();
    psc_tac::optimize(&mut program);
    tracing::debug!(before, after = program.len(), "optimized TAC");
    Ok(program)
}

/// Compile a source string to TAC without running the optimizer.
pub fn compile_unoptimized(source: &str) -> Result<Vec<Instr>, Diagnostic> {
    let tokens = psc_lex::tokenize(source).map_err(Diagnostic::from)?;
    tracing::debug!(tokens = tokens.len(), "lexed");

    let ast = psc_par::parse(tokens).map_err(Diagnostic::from)?;
    tracing::debug!(statements = ast.len(), "parsed");

    let hir = psc_sem::analyze(ast).map_err(Diagnostic::from)?;
    tracing::debug!("semantic analysis complete");

    let program = psc_tac::lower_program(&hir);
    tracing::debug!(instructions = program.len(), "lowered to TAC");
    Ok(program)
}

/// Compile and execute a source string.
///
/// Returns the ordered output lines and the optional `give` value, or the
/// first diagnostic from any stage. Use [`Interpreter`] directly to keep
/// partial output across a runtime error.
pub fn compile_and_run(source: &str) -> Result<RunOutput, Diagnostic> {
    let program = compile(source)?;
    psc_run::execute(&program).map_err(Diagnostic::from)
}
