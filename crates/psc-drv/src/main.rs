//! psc - The PatternScript command-line driver.
//!
//! Reads a `.ps` source file, runs the pipeline and streams interpreter
//! output to stdout, one line per output entry. A diagnostic goes to
//! stderr as a single `<stage> error at <line>:<col>: <message>` line.
//!
//! Exit codes: 0 on success, 1 on any diagnostic, 2 on I/O or usage
//! errors.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// PatternScript compiler and interpreter.
#[derive(Parser, Debug)]
#[command(name = "psc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a PatternScript program", long_about = None)]
struct Cli {
    /// Path to the source file (conventionally `.ps`).
    file: PathBuf,

    /// Dump an intermediate artifact instead of running.
    #[arg(long, value_enum)]
    emit: Option<EmitMode>,

    /// Skip the TAC optimizer.
    #[arg(long)]
    no_opt: bool,
}

/// Which intermediate artifact to dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EmitMode {
    /// The token stream.
    Tokens,
    /// The abstract syntax tree.
    Ast,
    /// The (optimized, unless --no-opt) three-address code.
    Tac,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_env("PSC_LOG")
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("cannot read {}", cli.file.display()))?;

    match cli.emit {
        Some(EmitMode::Tokens) => return emit_tokens(&source),
        Some(EmitMode::Ast) => return emit_ast(&source),
        Some(EmitMode::Tac) => return emit_tac(&source, !cli.no_opt),
        None => {}
    }

    let program = match compile(&source, !cli.no_opt) {
        Ok(program) => program,
        Err(diag) => return Ok(report(diag)),
    };

    // Run via the interpreter directly so that output produced before a
    // runtime error is still printed.
    let mut interp = psc_drv::Interpreter::new(&program);
    let result = interp.run();
    for line in interp.output() {
        println!("{}", line);
    }

    match result {
        Ok(()) => {
            if let Some(value) = interp.give_value() {
                tracing::debug!(%value, "program gave a value");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(err.into())),
    }
}

fn compile(
    source: &str,
    optimize: bool,
) -> Result<Vec<psc_tac::Instr>, psc_util::Diagnostic> {
    if optimize {
        psc_drv::compile(source)
    } else {
        psc_drv::compile_unoptimized(source)
    }
}

fn report(diag: psc_util::Diagnostic) -> ExitCode {
    eprintln!("{}", diag);
    ExitCode::from(1)
}

fn emit_tokens(source: &str) -> anyhow::Result<ExitCode> {
    match psc_lex::tokenize(source) {
        Ok(tokens) => {
            for token in tokens {
                println!(
                    "{}:{}\t{:?}\t{:?}",
                    token.line(),
                    token.column(),
                    token.kind,
                    token.lexeme,
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(err.into())),
    }
}

fn emit_ast(source: &str) -> anyhow::Result<ExitCode> {
    let tokens = match psc_lex::tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => return Ok(report(err.into())),
    };
    match psc_par::parse(tokens) {
        Ok(program) => {
            println!("{:#?}", program);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(err.into())),
    }
}

fn emit_tac(source: &str, optimize: bool) -> anyhow::Result<ExitCode> {
    match compile(source, optimize) {
        Ok(program) => {
            print!("{}", psc_tac::tac::render(&program));
            Ok(ExitCode::SUCCESS)
        }
        Err(diag) => Ok(report(diag)),
    }
}
