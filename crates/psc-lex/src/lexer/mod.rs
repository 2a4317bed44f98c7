//! Lexer implementation, organized into focused components:
//! - `core` - the `Lexer` struct, dispatch, whitespace and identifiers
//! - `literal` - number and string literals
//! - `operator` - one- and two-character operators

mod core;
mod literal;
mod operator;

pub use self::core::Lexer;
