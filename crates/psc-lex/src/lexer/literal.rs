//! Number and string literal lexing.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a decimal integer literal: `[0-9]+`.
    ///
    /// The token keeps the digit string as its lexeme; the value must fit
    /// in an `i64`.
    pub(crate) fn lex_number(&mut self) -> Result<Token, LexError> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        if text.parse::<i64>().is_err() {
            return Err(LexError::NumberTooLarge {
                text: text.to_string(),
                span: self.token_span(),
            });
        }

        Ok(self.raw_token(TokenKind::Number))
    }

    /// Lexes a string literal.
    ///
    /// The lexeme is the interior of the literal with quotes stripped.
    /// `\"` and `\\` are the only recognized escapes; any other backslash
    /// sequence is kept literally. A raw newline or the end of input inside
    /// the literal is an error.
    pub(crate) fn lex_string(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString {
                    span: self.token_span(),
                });
            }

            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => {
                    return Err(LexError::UnterminatedString {
                        span: self.token_span(),
                    });
                }
                '\\' => {
                    self.cursor.advance();
                    match self.cursor.current_char() {
                        '"' => {
                            content.push('"');
                            self.cursor.advance();
                        }
                        '\\' => {
                            content.push('\\');
                            self.cursor.advance();
                        }
                        // Not a recognized escape: keep the backslash and
                        // let the loop handle the next character normally.
                        _ => content.push('\\'),
                    }
                }
                c => {
                    content.push(c);
                    self.cursor.advance();
                }
            }
        }

        Ok(Token::new(TokenKind::Str, content, self.token_span()))
    }
}
