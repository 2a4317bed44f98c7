//! Core lexer: token dispatch, whitespace handling, identifiers.

use psc_util::Span;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// The PatternScript lexer.
///
/// Wraps a [`Cursor`] and produces tokens on demand. Scanning stops at the
/// first error; the caller receives it verbatim.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,

    /// Byte offset where the current token starts.
    pub(crate) token_start: usize,
    /// Line where the current token starts (1-based).
    token_start_line: u32,
    /// Column where the current token starts (1-based).
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Tokenize the whole source, ending with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, "", self.token_span()));
        }

        match self.cursor.current_char() {
            '{' => Ok(self.single_char_token(TokenKind::LBrace)),
            '}' => Ok(self.single_char_token(TokenKind::RBrace)),
            '(' => Ok(self.single_char_token(TokenKind::LParen)),
            ')' => Ok(self.single_char_token(TokenKind::RParen)),
            ':' => Ok(self.single_char_token(TokenKind::Colon)),
            '+' => Ok(self.single_char_token(TokenKind::Plus)),
            '-' => Ok(self.single_char_token(TokenKind::Minus)),
            '*' => Ok(self.single_char_token(TokenKind::Star)),
            '%' => Ok(self.single_char_token(TokenKind::Percent)),
            '~' => Ok(self.single_char_token(TokenKind::Tilde)),
            '=' => Ok(self.lex_equals()),
            '!' => self.lex_bang(),
            '<' => Ok(self.lex_less()),
            '>' => Ok(self.lex_greater()),
            '.' => self.lex_dot(),
            '"' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => Ok(self.lex_identifier()),
            c => {
                self.cursor.advance();
                Err(LexError::IllegalCharacter {
                    ch: c,
                    span: self.token_span(),
                })
            }
        }
    }

    /// Lexes an identifier or keyword: `[A-Za-z_][A-Za-z0-9_]*`.
    fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind = TokenKind::keyword_from_str(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, self.token_span())
    }

    /// Skips the separator whitespace set: space, tab, newline, carriage
    /// return. Anything else is left for token dispatch.
    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t' | '\n' | '\r') {
            self.cursor.advance();
        }
    }

    /// Span of the token currently being lexed.
    pub(crate) fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Consume one character and produce a token of the given kind.
    pub(crate) fn single_char_token(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.raw_token(kind)
    }

    /// Produce a token whose lexeme is the raw slice from the token start.
    pub(crate) fn raw_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.cursor.slice_from(self.token_start),
            self.token_span(),
        )
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), [TokenKind::Eof]);
        assert_eq!(kinds("   \t\r\n"), [TokenKind::Eof]);
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            kinds("loop check else choose default display give in total"),
            [
                TokenKind::Loop,
                TokenKind::Check,
                TokenKind::Else,
                TokenKind::Choose,
                TokenKind::Default,
                TokenKind::Display,
                TokenKind::Give,
                TokenKind::In,
                TokenKind::Ident,
                TokenKind::Eof,
            ],
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(kinds("Loop LOOP"), [TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_ident_with_digits_and_underscores() {
        let tokens = Lexer::new("_x9 row_2").tokenize().unwrap();
        assert_eq!(tokens[0].lexeme, "_x9");
        assert_eq!(tokens[1].lexeme, "row_2");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
    }

    #[test]
    fn test_assignment_statement() {
        assert_eq!(
            kinds("x = 4:"),
            [
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Colon,
                TokenKind::Eof,
            ],
        );
    }

    #[test]
    fn test_illegal_character() {
        let err = Lexer::new("x = @:").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::IllegalCharacter {
                ch: '@',
                span: Span::new(4, 5, 1, 5),
            },
        );
    }

    #[test]
    fn test_token_positions() {
        let tokens = Lexer::new("x =\n  4:").tokenize().unwrap();
        assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1)); // x
        assert_eq!((tokens[1].line(), tokens[1].column()), (1, 3)); // =
        assert_eq!((tokens[2].line(), tokens[2].column()), (2, 3)); // 4
        assert_eq!((tokens[3].line(), tokens[3].column()), (2, 4)); // :
    }
}
