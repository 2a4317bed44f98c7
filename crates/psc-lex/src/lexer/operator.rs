//! Operator lexing.
//!
//! The recognizer is greedy: two-character operators are preferred over
//! their single-character prefixes.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.raw_token(TokenKind::EqEq)
        } else {
            self.raw_token(TokenKind::Assign)
        }
    }

    /// Lexes `!=`. A bare `!` is not a token in PatternScript.
    pub(crate) fn lex_bang(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Ok(self.raw_token(TokenKind::NotEq))
        } else {
            Err(LexError::IllegalCharacter {
                ch: '!',
                span: self.token_span(),
            })
        }
    }

    /// Lexes `<` or `<=`.
    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.raw_token(TokenKind::LtEq)
        } else {
            self.raw_token(TokenKind::Lt)
        }
    }

    /// Lexes `>` or `>=`.
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.raw_token(TokenKind::GtEq)
        } else {
            self.raw_token(TokenKind::Gt)
        }
    }

    /// Lexes `..`. A bare `.` is not a token in PatternScript.
    pub(crate) fn lex_dot(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        if self.cursor.match_char('.') {
            Ok(self.raw_token(TokenKind::DotDot))
        } else {
            Err(LexError::IllegalCharacter {
                ch: '.',
                span: self.token_span(),
            })
        }
    }
}
