// teenyc - a tiny BASIC to C transpiler
// Copyright (C) 2026  The teenyc authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Lexer module for the teenyc transpiler.
//!
//! This module tokenizes Teeny BASIC source code into a stream of tokens.
//! It handles:
//! - Keywords (all-uppercase) and identifiers
//! - Number literals (digits with an optional fractional part)
//! - String literals (no escape sequences)
//! - Operators, including the two-character comparisons
//! - Comments (from # to end of line)
//!
//! Newlines are tokens, not whitespace: they terminate statements.

mod tokens;

pub use tokens::{Token, TokenKind};

use crate::error::{CompileError, ErrorCode, Result, Span};

/// The lexer state for tokenizing source code.
///
/// The input is padded with one trailing newline so the final statement and
/// any trailing comment always end in a newline token; the scanner never has
/// to special-case end of file mid-line.
pub struct Lexer {
    /// The source code being tokenized, with the padding newline appended.
    source: String,
    /// Current byte position in the source.
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code.
    pub fn new(source: &str) -> Self {
        let mut padded = String::with_capacity(source.len() + 1);
        padded.push_str(source);
        padded.push('\n');
        Self {
            source: padded,
            position: 0,
        }
    }

    /// Peek at the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Advance to the next character and return it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Create a span from start position to current position.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.position)
    }

    /// Get the next token from the source.
    ///
    /// Once the input is exhausted this returns an end-of-file token and
    /// keeps returning it on every further call.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        if self.peek() == Some('#') {
            self.skip_comment();
        }

        let start = self.position;
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Token::new(
                    "",
                    TokenKind::Eof,
                    Span::new(self.position, self.position),
                ));
            }
        };

        // Newline (significant, terminates statements)
        if c == '\n' {
            self.advance();
            return Ok(Token::new("\n", TokenKind::Newline, self.span_from(start)));
        }

        // String literal
        if c == '"' {
            return self.scan_string();
        }

        // Number literal
        if c.is_ascii_digit() {
            return self.scan_number();
        }

        // Identifiers and keywords
        if c.is_ascii_alphabetic() {
            return Ok(self.scan_identifier());
        }

        // Operators
        self.scan_operator()
    }

    /// Skip spaces, tabs, and carriage returns (not newlines).
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip a comment (from # up to, not including, the end of the line).
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Scan a string literal. The token text excludes the quotes.
    ///
    /// There are no escape sequences; carriage return, newline, tab,
    /// backslash, and `%` are forbidden inside a string because the text is
    /// pasted verbatim into a C `printf` format string. The padding newline
    /// guarantees an unterminated string fails here rather than scanning
    /// forever.
    fn scan_string(&mut self) -> Result<Token> {
        let start = self.position;
        self.advance(); // consume opening "
        let content_start = self.position;

        loop {
            match self.peek() {
                Some('"') => {
                    let text = self.source[content_start..self.position].to_string();
                    self.advance(); // consume closing "
                    return Ok(Token::new(text, TokenKind::String, self.span_from(start)));
                }
                None | Some('\n') => {
                    return Err(CompileError::new(
                        ErrorCode::IllegalStringCharacter,
                        "String literal must not contain a newline",
                        self.span_from(start),
                    )
                    .with_hint("Close the string with '\"' before the end of the line"));
                }
                Some(c @ ('\r' | '\t' | '\\' | '%')) => {
                    let what = match c {
                        '\r' => "a carriage return",
                        '\t' => "a tab",
                        '\\' => "a backslash",
                        _ => "a '%'",
                    };
                    return Err(CompileError::new(
                        ErrorCode::IllegalStringCharacter,
                        format!("String literal must not contain {}", what),
                        self.span_from(start),
                    ));
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a number literal: digits, optionally a `.` and more digits.
    fn scan_number(&mut self) -> Result<Token> {
        let start = self.position;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') {
            self.advance();
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(CompileError::new(
                    ErrorCode::MalformedNumber,
                    "Number is missing digits after the decimal point",
                    self.span_from(start),
                )
                .with_hint("Write at least one digit after '.', e.g. '1.0'"));
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = self.source[start..self.position].to_string();
        Ok(Token::new(text, TokenKind::Number, self.span_from(start)))
    }

    /// Scan an identifier or keyword: a letter followed by letters/digits.
    fn scan_identifier(&mut self) -> Token {
        let start = self.position;

        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.advance();
        }

        let text = &self.source[start..self.position];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Ident);
        Token::new(text, kind, self.span_from(start))
    }

    /// Scan an operator, disambiguating the two-character comparisons with
    /// one character of lookahead.
    fn scan_operator(&mut self) -> Result<Token> {
        let start = self.position;
        // The dispatcher peeked a character, so advance cannot fail here.
        let c = self.advance().unwrap_or('\0');

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::BangEqual
                } else {
                    return Err(CompileError::new(
                        ErrorCode::MissingEqualAfterBang,
                        "Expected '!=', found a lone '!'",
                        self.span_from(start),
                    )
                    .with_hint("Negation of a comparison is written '!='"));
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            _ => {
                return Err(CompileError::new(
                    ErrorCode::UnknownCharacter,
                    format!("Unknown character '{}'", c),
                    self.span_from(start),
                ));
            }
        };

        let text = self.source[start..self.position].to_string();
        Ok(Token::new(text, kind, self.span_from(start)))
    }
}

/// Tokenize source code into a vector of tokens.
///
/// The end-of-file token is not included. Because the lexer pads its input,
/// the last token of any non-empty result is a newline.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        if token.is(TokenKind::Eof) {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    // ========================================
    // Basic Token Tests
    // ========================================

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(
            kinds("+ - * /"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("== != < > <= >="),
            vec![
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_two_char_operators_are_single_tokens() {
        for op in ["==", "!=", "<=", ">="] {
            let tokens = tokenize(op).unwrap();
            assert_eq!(tokens.len(), 2, "{} should lex as one token", op);
            assert_eq!(tokens[0].text, op);
            assert_eq!(tokens[1].kind, TokenKind::Newline);
        }
    }

    #[test]
    fn test_equal_versus_equal_equal() {
        assert_eq!(
            kinds("= == ="),
            vec![
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Equal,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_lone_bang_is_error() {
        let err = tokenize("!").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingEqualAfterBang);
    }

    #[test]
    fn test_bang_in_expression_position_is_error() {
        let err = tokenize("IF 1 ! 2 THEN").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingEqualAfterBang);
    }

    // ========================================
    // Keywords and Identifiers
    // ========================================

    #[test]
    fn test_all_keywords() {
        assert_eq!(
            kinds("LABEL GOTO PRINT INPUT LET IF THEN ENDIF WHILE REPEAT ENDWHILE"),
            vec![
                TokenKind::Label,
                TokenKind::Goto,
                TokenKind::Print,
                TokenKind::Input,
                TokenKind::Let,
                TokenKind::If,
                TokenKind::Then,
                TokenKind::EndIf,
                TokenKind::While,
                TokenKind::Repeat,
                TokenKind::EndWhile,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_lowercase_keyword_is_identifier() {
        let tokens = tokenize("print").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "print");
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = tokenize("PRINTER").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "PRINTER");
    }

    #[test]
    fn test_identifier_with_digits() {
        let tokens = tokenize("foo123").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "foo123");
    }

    #[test]
    fn test_underscore_is_not_an_identifier_character() {
        // Identifiers are letters then letters/digits only.
        let err = tokenize("a_b").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCharacter);
    }

    // ========================================
    // Numbers
    // ========================================

    #[test]
    fn test_integer_literals() {
        let tokens = tokenize("0 9 123").unwrap();
        assert_eq!(tokens[0].text, "0");
        assert_eq!(tokens[1].text, "9");
        assert_eq!(tokens[2].text, "123");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_decimal_literals() {
        let tokens = tokenize("1.5 0.25 123.456").unwrap();
        assert_eq!(tokens[0].text, "1.5");
        assert_eq!(tokens[1].text, "0.25");
        assert_eq!(tokens[2].text, "123.456");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_trailing_dot_is_error() {
        let err = tokenize("1.").unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedNumber);
    }

    #[test]
    fn test_dot_then_operator_is_error() {
        let err = tokenize("3.+1").unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedNumber);
    }

    #[test]
    fn test_leading_dot_is_unknown_character() {
        // Numbers must start with a digit; '.5' is not a literal.
        let err = tokenize(".5").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCharacter);
    }

    #[test]
    fn test_number_then_letters_is_two_tokens() {
        let tokens = tokenize("123abc").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "123");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "abc");
    }

    // ========================================
    // Strings
    // ========================================

    #[test]
    fn test_string_literal() {
        let tokens = tokenize("\"hello\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "hello");
    }

    #[test]
    fn test_string_keeps_interior_spaces() {
        let tokens = tokenize("\" a  b \"").unwrap();
        assert_eq!(tokens[0].text, " a  b ");
    }

    #[test]
    fn test_empty_string() {
        let tokens = tokenize("\"\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "");
    }

    #[test]
    fn test_string_with_tab_is_error() {
        let err = tokenize("\"a\tb\"").unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalStringCharacter);
    }

    #[test]
    fn test_string_with_backslash_is_error() {
        let err = tokenize("\"a\\nb\"").unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalStringCharacter);
    }

    #[test]
    fn test_string_with_percent_is_error() {
        let err = tokenize("\"100%\"").unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalStringCharacter);
    }

    #[test]
    fn test_string_with_newline_is_error() {
        let err = tokenize("\"a\nb\"").unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalStringCharacter);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        // The padding newline stops the scan.
        let err = tokenize("\"abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalStringCharacter);
    }

    // ========================================
    // Whitespace, Comments, Newlines
    // ========================================

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(
            kinds(" \t\r PRINT"),
            vec![TokenKind::Print, TokenKind::Newline]
        );
    }

    #[test]
    fn test_newlines_are_tokens() {
        assert_eq!(
            kinds("PRINT 1\n\nPRINT 2"),
            vec![
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_comment_is_skipped_up_to_newline() {
        assert_eq!(
            kinds("# a comment\nPRINT 1"),
            vec![
                TokenKind::Newline,
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_trailing_comment_after_statement() {
        assert_eq!(
            kinds("PRINT 1 # trailing"),
            vec![TokenKind::Print, TokenKind::Number, TokenKind::Newline]
        );
    }

    #[test]
    fn test_comment_at_end_of_file_terminates() {
        // No newline after the comment in the input; the padding provides it.
        assert_eq!(kinds("# only a comment"), vec![TokenKind::Newline]);
    }

    #[test]
    fn test_empty_source_is_single_padded_newline() {
        assert_eq!(kinds(""), vec![TokenKind::Newline]);
    }

    // ========================================
    // End of File
    // ========================================

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("+");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Plus);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        }
    }

    // ========================================
    // Spans
    // ========================================

    #[test]
    fn test_spans_cover_lexemes() {
        let tokens = tokenize("LET x = 42").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3)); // LET
        assert_eq!(tokens[1].span, Span::new(4, 5)); // x
        assert_eq!(tokens[2].span, Span::new(6, 7)); // =
        assert_eq!(tokens[3].span, Span::new(8, 10)); // 42
    }

    #[test]
    fn test_string_span_includes_quotes() {
        let tokens = tokenize("\"hi\"").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[0].text, "hi");
    }

    #[test]
    fn test_two_char_operator_span() {
        let tokens = tokenize("a >= b").unwrap();
        assert_eq!(tokens[1].span, Span::new(2, 4));
    }

    // ========================================
    // Small Programs
    // ========================================

    #[test]
    fn test_statement_token_sequence() {
        assert_eq!(
            kinds("LET a = 1 + 2"),
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Equal,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_loop_token_sequence() {
        assert_eq!(
            kinds("WHILE x < 10 REPEAT\nENDWHILE"),
            vec![
                TokenKind::While,
                TokenKind::Ident,
                TokenKind::Less,
                TokenKind::Number,
                TokenKind::Repeat,
                TokenKind::Newline,
                TokenKind::EndWhile,
                TokenKind::Newline,
            ]
        );
    }
}
