//! psc-par - Recursive-descent parser for PatternScript.
//!
//! Consumes the token sequence produced by `psc-lex` and builds the
//! [`ast`] described by the grammar:
//!
//! ```text
//! program        -> stmt_list
//! stmt_list      -> stmt*                      (until `}` or end of input)
//! stmt           -> IDENT `=` expr `:`
//!                 | `display` expr `:`
//!                 | `give` expr `:`
//!                 | `loop` IDENT `in` expr `..` expr `{` stmt_list `}`
//!                 | `check` expr `{` stmt_list `}` `else` `{` stmt_list `}`
//!                 | `choose` expr `{` case* default_case `}`
//! case           -> (NUMBER | STRING) `:` case_body
//! default_case   -> `default` `:` case_body
//!
//! expr           -> additive (rel_op additive)?        non-associative
//! additive       -> mult ((`+` | `-` | `~`) mult)*     left
//! mult           -> factor ((`*` | `%`) factor)*       left
//! factor         -> NUMBER | `-` NUMBER | STRING | IDENT | `(` expr `)`
//! ```
//!
//! The grammar is LL(1) except for the leading `-` of a negative number
//! literal, which needs one extra token of lookahead.
//!
//! # Examples
//!
//! ```
//! use psc_lex::tokenize;
//! use psc_par::{parse, ast::Stmt};
//!
//! let program = parse(tokenize("display 1 + 2:").unwrap()).unwrap();
//! assert!(matches!(program[0], Stmt::Display { .. }));
//! ```

pub mod ast;
mod error;
mod expr;
mod stmt;

pub use error::ParseError;

use psc_lex::{Token, TokenKind};
use psc_util::Span;

use ast::Program;

/// Parse a token sequence into a program.
///
/// The token vector must end with an `Eof` token, as produced by
/// [`psc_lex::tokenize`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive-descent parser over a token buffer.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser from a token sequence ending with `Eof`.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::Eof),
        ));
        Self { tokens, pos: 0 }
    }

    /// Parse a complete program: statements until end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let program = self.parse_stmt_list()?;
        // A stray `}` (or anything else) at top level is an error.
        self.expect(TokenKind::Eof, "a statement")?;
        Ok(program)
    }

    /// Parse statements until the next token is `}` or end of input.
    pub(crate) fn parse_stmt_list(&mut self) -> Result<Vec<ast::Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !matches!(self.kind(), TokenKind::RBrace | TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    // ── Token buffer helpers ──────────────────────────────────────────

    /// The current token.
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Kind of the current token.
    pub(crate) fn kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Kind of the token after the current one (`Eof` at the end).
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Span of the current token.
    pub(crate) fn span(&self) -> Span {
        self.current().span
    }

    /// Consume and return the current token. The final `Eof` is never
    /// consumed, so `current()` stays valid.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with `UnexpectedToken`.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        expected: &str,
    ) -> Result<Token, ParseError> {
        if self.kind() == kind {
            Ok(self.advance())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.kind(),
                span: self.span(),
            })
        }
    }

    /// Consume the `:` that terminates a simple statement, or fail with
    /// `MissingTerminator`.
    pub(crate) fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Colon) {
            Ok(())
        } else {
            Err(ParseError::MissingTerminator {
                found: self.kind(),
                span: self.span(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(psc_lex::tokenize(source).unwrap())
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(parse_source("").unwrap(), Vec::new());
    }

    #[test]
    fn test_statement_sequence() {
        let program = parse_source("x = 4: y = x * 5: display y:").unwrap();
        assert_eq!(program.len(), 3);
        assert!(matches!(program[0], Stmt::Assign { .. }));
        assert!(matches!(program[2], Stmt::Display { .. }));
    }

    #[test]
    fn test_stray_rbrace_at_top_level() {
        let err = parse_source("display 1: }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
