//! Expression parsing: a three-level precedence climb.
//!
//! Relational operators are non-associative (at most one comparison per
//! expression); additive (`+`, `-`, `~`) and multiplicative (`*`, `%`)
//! operators are left-associative.

use psc_lex::{Token, TokenKind};

use crate::ast::{BinOp, Expr};
use crate::{ParseError, Parser};

impl Parser {
    /// Entry point: `additive (rel_op additive)?`.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;

        if let Some(op) = relational_op(self.kind()) {
            self.advance();
            let right = self.parse_additive()?;
            let span = left.span().merge(right.span());
            return Ok(Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }

        Ok(left)
    }

    /// `mult ((+|-|~) mult)*`, left-associative.
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = additive_op(self.kind()) {
            self.advance();
            let right = self.parse_multiplicative()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// `factor ((*|%) factor)*`, left-associative.
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        while let Some(op) = multiplicative_op(self.kind()) {
            self.advance();
            let right = self.parse_factor()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// `NUMBER | - NUMBER | STRING | IDENT | ( expr )`.
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Number => {
                let token = self.advance();
                Ok(Expr::Num {
                    value: number_value(&token),
                    span: token.span,
                })
            }
            TokenKind::Minus if self.peek_kind() == TokenKind::Number => {
                let minus = self.advance();
                let token = self.advance();
                Ok(Expr::Num {
                    value: -number_value(&token),
                    span: minus.span.merge(token.span),
                })
            }
            TokenKind::Str => {
                let token = self.advance();
                Ok(Expr::Str {
                    value: token.lexeme,
                    span: token.span,
                })
            }
            TokenKind::Ident => {
                let token = self.advance();
                Ok(Expr::Var {
                    name: token.lexeme,
                    span: token.span,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            found => Err(ParseError::UnexpectedToken {
                expected: "an expression".to_string(),
                found,
                span: self.span(),
            }),
        }
    }
}

fn relational_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::EqEq => Some(BinOp::Eq),
        TokenKind::NotEq => Some(BinOp::Ne),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::LtEq => Some(BinOp::Le),
        TokenKind::GtEq => Some(BinOp::Ge),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        TokenKind::Tilde => Some(BinOp::Stitch),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Star => Some(BinOp::Star),
        TokenKind::Percent => Some(BinOp::Mod),
        _ => None,
    }
}

/// Parse the digit string of a `Number` token.
fn number_value(token: &Token) -> i64 {
    token
        .lexeme
        .parse()
        .expect("digit strings are validated by the lexer")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_single_expr(source: &str) -> Expr {
        // Wrap in a display statement to reuse the full pipeline.
        let program =
            crate::parse(psc_lex::tokenize(&format!("display {}:", source)).unwrap()).unwrap();
        match program.into_iter().next().unwrap() {
            crate::ast::Stmt::Display { value, .. } => value,
            other => panic!("expected display statement, got {:?}", other),
        }
    }

    fn expr_err(source: &str) -> ParseError {
        crate::parse(psc_lex::tokenize(&format!("display {}:", source)).unwrap()).unwrap_err()
    }

    fn binary_op(expr: &Expr) -> BinOp {
        match expr {
            Expr::Binary { op, .. } => *op,
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_star_over_plus() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        let expr = parse_single_expr("1 + 2 * 3");
        assert_eq!(binary_op(&expr), BinOp::Add);
        if let Expr::Binary { right, .. } = &expr {
            assert_eq!(binary_op(right), BinOp::Star);
        }
    }

    #[test]
    fn test_left_associativity() {
        // 10 - 2 - 3 parses as (10 - 2) - 3
        let expr = parse_single_expr("10 - 2 - 3");
        assert_eq!(binary_op(&expr), BinOp::Sub);
        if let Expr::Binary { left, right, .. } = &expr {
            assert_eq!(binary_op(left), BinOp::Sub);
            assert!(matches!(**right, Expr::Num { value: 3, .. }));
        }
    }

    #[test]
    fn test_stitch_is_additive_level() {
        // Stitch and plus share the additive level, left to right:
        // "x" ~ 1 + 2 parses as ("x" ~ 1) + 2.
        let expr = parse_single_expr("\"x\" ~ 1 + 2");
        assert_eq!(binary_op(&expr), BinOp::Add);
        if let Expr::Binary { left, .. } = &expr {
            assert_eq!(binary_op(left), BinOp::Stitch);
        }
    }

    #[test]
    fn test_relational_binds_loosest() {
        // a + 1 < b * 2 parses as (a + 1) < (b * 2)
        let expr = parse_single_expr("a + 1 < b * 2");
        assert_eq!(binary_op(&expr), BinOp::Lt);
        if let Expr::Binary { left, right, .. } = &expr {
            assert_eq!(binary_op(left), BinOp::Add);
            assert_eq!(binary_op(right), BinOp::Star);
        }
    }

    #[test]
    fn test_relational_non_associative() {
        // A second comparison cannot follow: `1 < 2 < 3` fails at the
        // second `<`.
        let err = expr_err("1 < 2 < 3");
        assert!(matches!(err, ParseError::MissingTerminator { .. }));
    }

    #[test]
    fn test_parenthesized_grouping() {
        // (1 + 2) * 3
        let expr = parse_single_expr("(1 + 2) * 3");
        assert_eq!(binary_op(&expr), BinOp::Star);
        if let Expr::Binary { left, .. } = &expr {
            assert_eq!(binary_op(left), BinOp::Add);
        }
    }

    #[test]
    fn test_negative_number_literal() {
        assert!(matches!(
            parse_single_expr("-2"),
            Expr::Num { value: -2, .. },
        ));
        // In infix position `-` is subtraction.
        let expr = parse_single_expr("5 - 2");
        assert_eq!(binary_op(&expr), BinOp::Sub);
    }

    #[test]
    fn test_repeat_with_negative_literal() {
        let expr = parse_single_expr("\"hi\" * -2");
        assert_eq!(binary_op(&expr), BinOp::Star);
        if let Expr::Binary { right, .. } = &expr {
            assert!(matches!(**right, Expr::Num { value: -2, .. }));
        }
    }

    #[test]
    fn test_minus_without_number_is_error() {
        let err = expr_err("- x");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unclosed_paren() {
        let err = expr_err("(1 + 2");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { found: TokenKind::Colon, .. },
        ));
    }

    #[test]
    fn test_missing_operand() {
        let err = expr_err("1 +");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
