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

//! Parser module for the teenyc transpiler.
//!
//! A recursive-descent parser that drives the emitter directly: there is no
//! AST stage. Each grammar production is a method; as a construct is
//! recognized its C translation is appended to the emitter, sub-expressions
//! as fragments, statements as whole lines.
//!
//! ```text
//! program    ::= NEWLINE* statement* EOF
//! statement  ::= "PRINT" (STRING | expression) nl
//!              | "IF" comparison "THEN" nl statement* "ENDIF" nl
//!              | "WHILE" comparison "REPEAT" nl statement* "ENDWHILE" nl
//!              | "LABEL" IDENT nl
//!              | "GOTO" IDENT nl
//!              | "LET" IDENT "=" expression nl
//!              | "INPUT" IDENT nl
//! comparison ::= expression compOp expression (compOp expression)*
//! expression ::= term (("+" | "-") term)*
//! term       ::= unary (("*" | "/") unary)*
//! unary      ::= ("+" | "-")? primary
//! primary    ::= NUMBER | IDENT
//! nl         ::= NEWLINE+
//! ```
//!
//! The first error unwinds the whole parse as an `Err`; nothing is consumed
//! or emitted after it. Block bodies also stop at end of file, so a missing
//! `ENDIF`/`ENDWHILE` fails instead of looping.

use std::collections::HashSet;

use crate::emitter::Emitter;
use crate::error::{CompileError, ErrorCode, Result, Span};
use crate::lexer::{Lexer, Token, TokenKind};

/// The parser state for one compilation.
///
/// Owns the token pipeline (current + lookahead pulled on demand from the
/// lexer), the emitter, and the symbol and label tables. Built fresh per
/// `compile` call and consumed by [`Parser::program`].
pub struct Parser {
    lexer: Lexer,
    emitter: Emitter,
    /// The token being matched.
    cur_token: Token,
    /// One token of lookahead, kept filled by `advance`.
    peek_token: Token,
    /// Variables declared so far via LET or INPUT. Declaration order shows
    /// up in the header because declarations are emitted at first sight.
    symbols: HashSet<String>,
    /// Labels declared via LABEL.
    labels_declared: HashSet<String>,
    /// Labels referenced via GOTO, with the span of their first reference,
    /// in source order. Checked against `labels_declared` after the whole
    /// program has been parsed; forward references are legal.
    labels_gotoed: Vec<(String, Span)>,
}

impl Parser {
    /// Create a parser over the given lexer, priming the two-token pipeline.
    pub fn new(mut lexer: Lexer) -> Result<Self> {
        let cur_token = lexer.next_token()?;
        let peek_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            emitter: Emitter::new(),
            cur_token,
            peek_token,
            symbols: HashSet::new(),
            labels_declared: HashSet::new(),
            labels_gotoed: Vec::new(),
        })
    }

    // ========================================
    // Token Pipeline
    // ========================================

    /// Move to the next token. Idempotent at end of file because the lexer
    /// keeps handing out the end-of-file token.
    fn advance(&mut self) -> Result<()> {
        let next = self.lexer.next_token()?;
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
        Ok(())
    }

    /// Check the current token's kind without consuming it.
    fn check(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    /// Consume the current token if it has the expected kind, or fail.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            let token = self.cur_token.clone();
            self.advance()?;
            Ok(token)
        } else {
            Err(self.expected(kind))
        }
    }

    /// Create an error at the current token.
    fn error(&self, code: ErrorCode, message: impl Into<String>) -> CompileError {
        CompileError::new(code, message, self.cur_token.span.clone())
    }

    /// Create an expected-token error at the current token.
    fn expected(&self, kind: TokenKind) -> CompileError {
        self.error(
            ErrorCode::ExpectedToken,
            format!(
                "Expected {}, found {}",
                kind.name(),
                self.cur_token.kind.name()
            ),
        )
    }

    // ========================================
    // Productions
    // ========================================

    /// program ::= NEWLINE* statement* EOF
    ///
    /// Consumes the parser and returns the generated C text.
    pub fn program(mut self) -> Result<String> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void){");

        // Blank lines before the first statement.
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }

        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        // Labels may be declared after the GOTO that names them, so target
        // checking waits until the whole program has been read.
        for (name, span) in &self.labels_gotoed {
            if !self.labels_declared.contains(name) {
                return Err(CompileError::new(
                    ErrorCode::UndefinedLabel,
                    format!("GOTO to undeclared label '{}'", name),
                    span.clone(),
                ));
            }
        }

        Ok(self.emitter.finalize())
    }

    /// statement ::= one of the seven statement forms, each ending in nl.
    fn statement(&mut self) -> Result<()> {
        match self.cur_token.kind {
            TokenKind::Print => self.print_statement()?,
            TokenKind::If => self.if_statement()?,
            TokenKind::While => self.while_statement()?,
            TokenKind::Label => self.label_statement()?,
            TokenKind::Goto => self.goto_statement()?,
            TokenKind::Let => self.let_statement()?,
            TokenKind::Input => self.input_statement()?,
            _ => {
                return Err(self.error(
                    ErrorCode::InvalidStatement,
                    format!(
                        "Invalid statement starting with {}",
                        self.cur_token.kind.name()
                    ),
                ));
            }
        }
        self.nl()
    }

    /// "PRINT" (STRING | expression)
    fn print_statement(&mut self) -> Result<()> {
        self.advance()?; // PRINT

        if self.check(TokenKind::String) {
            // The string text goes into the printf format verbatim; the
            // lexer already rejected characters that would break it.
            self.emitter
                .emit_line(&format!("printf(\"{}\\n\");", self.cur_token.text));
            self.advance()?;
        } else {
            self.emitter.emit("printf(\"%.2f\\n\",(float)(");
            self.expression()?;
            self.emitter.emit_line("));");
        }
        Ok(())
    }

    /// "IF" comparison "THEN" nl statement* "ENDIF"
    fn if_statement(&mut self) -> Result<()> {
        self.advance()?; // IF
        self.emitter.emit("if(");
        self.comparison()?;

        self.expect(TokenKind::Then)?;
        self.nl()?;
        self.emitter.emit_line("){");

        while !self.check(TokenKind::EndIf) {
            if self.check(TokenKind::Eof) {
                return Err(self.expected(TokenKind::EndIf));
            }
            self.statement()?;
        }

        self.advance()?; // ENDIF
        self.emitter.emit_line("}");
        Ok(())
    }

    /// "WHILE" comparison "REPEAT" nl statement* "ENDWHILE"
    fn while_statement(&mut self) -> Result<()> {
        self.advance()?; // WHILE
        self.emitter.emit("while(");
        self.comparison()?;

        self.expect(TokenKind::Repeat)?;
        self.nl()?;
        self.emitter.emit_line("){");

        while !self.check(TokenKind::EndWhile) {
            if self.check(TokenKind::Eof) {
                return Err(self.expected(TokenKind::EndWhile));
            }
            self.statement()?;
        }

        self.advance()?; // ENDWHILE
        self.emitter.emit_line("}");
        Ok(())
    }

    /// "LABEL" IDENT
    fn label_statement(&mut self) -> Result<()> {
        self.advance()?; // LABEL
        let name = self.expect(TokenKind::Ident)?;

        if !self.labels_declared.insert(name.text.clone()) {
            return Err(CompileError::new(
                ErrorCode::LabelAlreadyDefined,
                format!("Label '{}' already declared", name.text),
                name.span,
            ));
        }

        self.emitter.emit_line(&format!("{}:", name.text));
        Ok(())
    }

    /// "GOTO" IDENT
    fn goto_statement(&mut self) -> Result<()> {
        self.advance()?; // GOTO
        let name = self.expect(TokenKind::Ident)?;

        if !self.labels_gotoed.iter().any(|(n, _)| n == &name.text) {
            self.labels_gotoed.push((name.text.clone(), name.span));
        }

        self.emitter.emit_line(&format!("goto {};", name.text));
        Ok(())
    }

    /// "LET" IDENT "=" expression
    fn let_statement(&mut self) -> Result<()> {
        self.advance()?; // LET
        let name = self.expect(TokenKind::Ident)?;

        // The variable is live from here on, so it may appear in its own
        // right-hand side.
        self.declare_variable(&name.text);

        self.emitter.emit(&format!("{} = ", name.text));
        self.expect(TokenKind::Equal)?;
        self.expression()?;
        self.emitter.emit_line(";");
        Ok(())
    }

    /// "INPUT" IDENT
    fn input_statement(&mut self) -> Result<()> {
        self.advance()?; // INPUT
        let name = self.expect(TokenKind::Ident)?;
        self.declare_variable(&name.text);

        // Guarded read: a failed scanf zeroes the variable and flushes the
        // offending token from stdin instead of looping on it.
        self.emitter
            .emit_line(&format!("if(0 == scanf(\"%f\",&{})) {{", name.text));
        self.emitter.emit_line(&format!("{} = 0;", name.text));
        self.emitter.emit_line("scanf(\"%*s\");");
        self.emitter.emit_line("}");
        Ok(())
    }

    /// Register a variable on first sight and emit its declaration.
    fn declare_variable(&mut self, name: &str) {
        if self.symbols.insert(name.to_string()) {
            self.emitter.header_line(&format!("float {};", name));
        }
    }

    /// comparison ::= expression compOp expression (compOp expression)*
    ///
    /// At least one comparison operator is required; a bare expression is
    /// not a valid condition.
    fn comparison(&mut self) -> Result<()> {
        self.expression()?;

        if !self.cur_token.kind.is_comparison() {
            return Err(self.error(
                ErrorCode::ExpectedComparisonOperator,
                format!(
                    "Expected comparison operator, found {}",
                    self.cur_token.kind.name()
                ),
            ));
        }

        while self.cur_token.kind.is_comparison() {
            self.emitter.emit(&self.cur_token.text);
            self.advance()?;
            self.expression()?;
        }
        Ok(())
    }

    /// expression ::= term (("+" | "-") term)*
    fn expression(&mut self) -> Result<()> {
        self.term()?;

        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.emitter.emit(&self.cur_token.text);
            self.advance()?;
            self.term()?;
        }
        Ok(())
    }

    /// term ::= unary (("*" | "/") unary)*
    fn term(&mut self) -> Result<()> {
        self.unary()?;

        while self.check(TokenKind::Star) || self.check(TokenKind::Slash) {
            self.emitter.emit(&self.cur_token.text);
            self.advance()?;
            self.unary()?;
        }
        Ok(())
    }

    /// unary ::= ("+" | "-")? primary
    fn unary(&mut self) -> Result<()> {
        if self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.emitter.emit(&self.cur_token.text);
            self.advance()?;
        }
        self.primary()
    }

    /// primary ::= NUMBER | IDENT
    fn primary(&mut self) -> Result<()> {
        match self.cur_token.kind {
            TokenKind::Number => {
                self.emitter.emit(&self.cur_token.text);
                self.advance()?;
            }
            TokenKind::Ident => {
                if !self.symbols.contains(&self.cur_token.text) {
                    return Err(self
                        .error(
                            ErrorCode::UndefinedVariable,
                            format!(
                                "Variable '{}' referenced before declaration",
                                self.cur_token.text
                            ),
                        )
                        .with_hint("Declare it first with LET or INPUT"));
                }
                self.emitter.emit(&self.cur_token.text);
                self.advance()?;
            }
            _ => {
                return Err(self.error(
                    ErrorCode::UnexpectedToken,
                    format!("Unexpected {} in expression", self.cur_token.kind.name()),
                ));
            }
        }
        Ok(())
    }

    /// nl ::= NEWLINE+
    fn nl(&mut self) -> Result<()> {
        self.expect(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }
}
