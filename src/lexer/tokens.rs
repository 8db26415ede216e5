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

//! Token definitions for the Teeny BASIC language.

use crate::error::Span;

/// The kind of a token, as a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input. The lexer keeps returning this once the source is
    /// exhausted.
    Eof,
    /// End of line. Newlines terminate statements and are never skipped
    /// as whitespace.
    Newline,

    // Literals
    /// Number literal: digits with an optional fractional part.
    Number,
    /// Identifier (variable or label name).
    Ident,
    /// String literal (the token text excludes the quotes).
    String,

    // Keywords
    /// `LABEL` - declare a jump target.
    Label,
    /// `GOTO` - unconditional jump.
    Goto,
    /// `PRINT` - print a string or a numeric expression.
    Print,
    /// `INPUT` - read a number from standard input.
    Input,
    /// `LET` - declare/assign a variable.
    Let,
    /// `IF` - conditional block opener.
    If,
    /// `THEN` - ends an IF condition.
    Then,
    /// `ENDIF` - closes an IF block.
    EndIf,
    /// `WHILE` - loop block opener.
    While,
    /// `REPEAT` - ends a WHILE condition.
    Repeat,
    /// `ENDWHILE` - closes a WHILE block.
    EndWhile,

    // Operators
    /// `=` - assignment.
    Equal,
    /// `+` - addition.
    Plus,
    /// `-` - subtraction.
    Minus,
    /// `*` - multiplication.
    Star,
    /// `/` - division.
    Slash,
    /// `==` - equal.
    EqualEqual,
    /// `!=` - not equal.
    BangEqual,
    /// `<` - less than.
    Less,
    /// `<=` - less or equal.
    LessEqual,
    /// `>` - greater than.
    Greater,
    /// `>=` - greater or equal.
    GreaterEqual,
}

impl TokenKind {
    /// Look up a reserved word. Keywords are all-uppercase; anything else
    /// (including lowercase spellings like `print`) is an identifier.
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "LABEL" => Some(TokenKind::Label),
            "GOTO" => Some(TokenKind::Goto),
            "PRINT" => Some(TokenKind::Print),
            "INPUT" => Some(TokenKind::Input),
            "LET" => Some(TokenKind::Let),
            "IF" => Some(TokenKind::If),
            "THEN" => Some(TokenKind::Then),
            "ENDIF" => Some(TokenKind::EndIf),
            "WHILE" => Some(TokenKind::While),
            "REPEAT" => Some(TokenKind::Repeat),
            "ENDWHILE" => Some(TokenKind::EndWhile),
            _ => None,
        }
    }

    /// Check if this kind is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Label
                | TokenKind::Goto
                | TokenKind::Print
                | TokenKind::Input
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::Then
                | TokenKind::EndIf
                | TokenKind::While
                | TokenKind::Repeat
                | TokenKind::EndWhile
        )
    }

    /// Check if this kind is a comparison operator.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::EqualEqual
                | TokenKind::BangEqual
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
        )
    }

    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Newline => "newline",
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::String => "string",
            TokenKind::Label => "'LABEL'",
            TokenKind::Goto => "'GOTO'",
            TokenKind::Print => "'PRINT'",
            TokenKind::Input => "'INPUT'",
            TokenKind::Let => "'LET'",
            TokenKind::If => "'IF'",
            TokenKind::Then => "'THEN'",
            TokenKind::EndIf => "'ENDIF'",
            TokenKind::While => "'WHILE'",
            TokenKind::Repeat => "'REPEAT'",
            TokenKind::EndWhile => "'ENDWHILE'",
            TokenKind::Equal => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::EqualEqual => "'=='",
            TokenKind::BangEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A token: the literal lexeme, its kind, and where it came from.
///
/// For identifiers, numbers, and strings `text` holds the lexeme (strings
/// without their quotes); for fixed punctuation and keywords it equals the
/// canonical spelling. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The literal lexeme.
    pub text: String,
    /// The token kind.
    pub kind: TokenKind,
    /// The source span the token was scanned from.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(text: impl Into<String>, kind: TokenKind, span: Span) -> Self {
        Self {
            text: text.into(),
            kind,
            span,
        }
    }

    /// Check the token's kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "\"{}\"", self.text),
            TokenKind::Eof | TokenKind::Newline => write!(f, "{}", self.kind.name()),
            _ => write!(f, "{}", self.text),
        }
    }
}
