//! Statement parsing.
//!
//! Each statement form dispatches on the lookahead token. Simple statements
//! (`assign`, `display`, `give`) require a terminating `:`; block
//! constructs (`loop`, `check`, `choose`) are delimited by braces.

use psc_lex::TokenKind;
use psc_util::Span;

use crate::ast::{CaseArm, CaseLit, Stmt};
use crate::{ParseError, Parser};

impl Parser {
    /// Parse a single statement, dispatching on the lookahead token.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.kind() {
            TokenKind::Ident => self.parse_assign(),
            TokenKind::Display => self.parse_display(),
            TokenKind::Give => self.parse_give(),
            TokenKind::Loop => self.parse_loop(),
            TokenKind::Check => self.parse_check(),
            TokenKind::Choose => self.parse_choose(),
            found => Err(ParseError::UnexpectedToken {
                expected: "a statement".to_string(),
                found,
                span: self.span(),
            }),
        }
    }

    /// `IDENT = expr :`
    fn parse_assign(&mut self) -> Result<Stmt, ParseError> {
        let name_token = self.advance();
        self.expect(TokenKind::Assign, "`=`")?;
        let value = self.parse_expr()?;
        self.expect_terminator()?;

        let span = name_token.span.merge(value.span());
        Ok(Stmt::Assign {
            name: name_token.lexeme,
            value,
            span,
        })
    }

    /// `display expr :`
    fn parse_display(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance();
        let value = self.parse_expr()?;
        self.expect_terminator()?;

        let span = keyword.span.merge(value.span());
        Ok(Stmt::Display { value, span })
    }

    /// `give expr :`
    fn parse_give(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance();
        let value = self.parse_expr()?;
        self.expect_terminator()?;

        let span = keyword.span.merge(value.span());
        Ok(Stmt::Give { value, span })
    }

    /// `loop IDENT in expr .. expr { stmt_list }`
    fn parse_loop(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance();
        let var_token = self.expect(TokenKind::Ident, "a loop variable name")?;
        self.expect(TokenKind::In, "`in`")?;
        let start = self.parse_expr()?;
        self.expect(TokenKind::DotDot, "`..`")?;
        let end = self.parse_expr()?;
        let (body, body_span) = self.parse_block()?;

        Ok(Stmt::Loop {
            var: var_token.lexeme,
            start,
            end,
            body,
            span: keyword.span.merge(body_span),
        })
    }

    /// `check expr { stmt_list } else { stmt_list }` - the else branch is
    /// mandatory.
    fn parse_check(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance();
        let cond = self.parse_expr()?;
        let (then_body, _) = self.parse_block()?;
        self.expect(TokenKind::Else, "`else`")?;
        let (else_body, else_span) = self.parse_block()?;

        Ok(Stmt::Check {
            cond,
            then_body,
            else_body,
            span: keyword.span.merge(else_span),
        })
    }

    /// `choose expr { case* default : case_body }` - the default arm is
    /// mandatory and must appear last.
    fn parse_choose(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance();
        let scrutinee = self.parse_expr()?;
        self.expect(TokenKind::LBrace, "`{`")?;

        let mut cases = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Number | TokenKind::Str => {
                    let lit_token = self.advance();
                    let lit = match lit_token.kind {
                        TokenKind::Number => CaseLit::Int(
                            lit_token
                                .lexeme
                                .parse()
                                .expect("digit strings are validated by the lexer"),
                        ),
                        _ => CaseLit::Str(lit_token.lexeme),
                    };
                    self.expect(TokenKind::Colon, "`:` after the case label")?;
                    let body = self.parse_case_body()?;
                    cases.push(CaseArm {
                        lit,
                        body,
                        span: lit_token.span,
                    });
                }
                TokenKind::Default => break,
                TokenKind::RBrace | TokenKind::Eof => {
                    return Err(ParseError::MissingDefault { span: self.span() });
                }
                found => {
                    return Err(ParseError::InvalidCaseLiteral {
                        found,
                        span: self.span(),
                    });
                }
            }
        }

        self.advance(); // `default`
        self.expect(TokenKind::Colon, "`:` after `default`")?;
        let default_body = self.parse_case_body()?;
        // Anything between the default body and `}` would be a case after
        // the default, which the grammar forbids.
        let rbrace = self.expect(TokenKind::RBrace, "`}`")?;

        Ok(Stmt::Choose {
            scrutinee,
            cases,
            default_body,
            span: keyword.span.merge(rbrace.span),
        })
    }

    /// `{ stmt_list }`; returns the statements and the span of the braces.
    fn parse_block(&mut self) -> Result<(Vec<Stmt>, Span), ParseError> {
        let lbrace = self.expect(TokenKind::LBrace, "`{`")?;
        let stmts = self.parse_stmt_list()?;
        let rbrace = self.expect(TokenKind::RBrace, "`}`")?;
        Ok((stmts, lbrace.span.merge(rbrace.span)))
    }

    /// Statements of one `choose` arm: everything up to the next case
    /// label, `default`, or `}`.
    fn parse_case_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !matches!(
            self.kind(),
            TokenKind::Number
                | TokenKind::Str
                | TokenKind::Default
                | TokenKind::RBrace
                | TokenKind::Eof,
        ) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Program};

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        crate::parse(psc_lex::tokenize(source).unwrap())
    }

    #[test]
    fn test_assign() {
        let program = parse_source("x = 4:").unwrap();
        match &program[0] {
            Stmt::Assign { name, value, .. } => {
                assert_eq!(name, "x");
                assert!(matches!(value, Expr::Num { value: 4, .. }));
            }
            other => panic!("expected assign, got {:?}", other),
        }
    }

    #[test]
    fn test_assign_requires_equals() {
        let err = parse_source("x 4:").unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "`=`"),
        );
    }

    #[test]
    fn test_missing_terminator() {
        let err = parse_source("display 1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingTerminator { found: TokenKind::Eof, .. },
        ));
    }

    #[test]
    fn test_give() {
        let program = parse_source("give 1 + 2:").unwrap();
        assert!(matches!(program[0], Stmt::Give { .. }));
    }

    #[test]
    fn test_loop() {
        let program = parse_source("loop i in 1..3 { display i: }").unwrap();
        match &program[0] {
            Stmt::Loop { var, body, .. } => {
                assert_eq!(var, "i");
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_loop_requires_range() {
        let err = parse_source("loop i in 1 { }").unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "`..`"),
        );
    }

    #[test]
    fn test_check_with_else() {
        let program =
            parse_source("check x > 5 { display 1: } else { display 2: }").unwrap();
        match &program[0] {
            Stmt::Check {
                then_body,
                else_body,
                ..
            } => {
                assert_eq!(then_body.len(), 1);
                assert_eq!(else_body.len(), 1);
            }
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_check_else_is_mandatory() {
        let err = parse_source("check x > 5 { display 1: }").unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "`else`"),
        );
    }

    #[test]
    fn test_choose() {
        let program = parse_source(
            "choose day { 1: display \"Mon\": 2: display \"Tue\": default: display \"?\": }",
        )
        .unwrap();
        match &program[0] {
            Stmt::Choose {
                cases,
                default_body,
                ..
            } => {
                assert_eq!(cases.len(), 2);
                assert_eq!(cases[0].lit, CaseLit::Int(1));
                assert_eq!(default_body.len(), 1);
            }
            other => panic!("expected choose, got {:?}", other),
        }
    }

    #[test]
    fn test_choose_string_cases() {
        let program = parse_source(
            "choose tag { \"a\": display 1: default: display 0: }",
        )
        .unwrap();
        match &program[0] {
            Stmt::Choose { cases, .. } => {
                assert_eq!(cases[0].lit, CaseLit::Str("a".to_string()));
            }
            other => panic!("expected choose, got {:?}", other),
        }
    }

    #[test]
    fn test_choose_default_is_mandatory() {
        let err = parse_source("choose day { 1: display \"Mon\": }").unwrap_err();
        assert!(matches!(err, ParseError::MissingDefault { .. }));
    }

    #[test]
    fn test_choose_rejects_identifier_label() {
        let err =
            parse_source("choose day { mon: display 1: default: display 0: }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidCaseLiteral { found: TokenKind::Ident, .. },
        ));
    }

    #[test]
    fn test_choose_rejects_case_after_default() {
        let err = parse_source(
            "choose day { default: display 0: 1: display 1: }",
        )
        .unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "`}`"),
        );
    }

    #[test]
    fn test_case_body_may_hold_blocks() {
        let program = parse_source(
            "choose n { 1: loop i in 1..2 { display i: } display \"done\": \
             default: display 0: }",
        )
        .unwrap();
        match &program[0] {
            Stmt::Choose { cases, .. } => assert_eq!(cases[0].body.len(), 2),
            other => panic!("expected choose, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_blocks() {
        let program = parse_source(
            "loop i in 1..2 { check i == 1 { display \"one\": } else { display \"two\": } }",
        )
        .unwrap();
        match &program[0] {
            Stmt::Loop { body, .. } => assert!(matches!(body[0], Stmt::Check { .. })),
            other => panic!("expected loop, got {:?}", other),
        }
    }
}
