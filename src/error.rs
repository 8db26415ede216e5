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

//! Error types for the teenyc transpiler.
//!
//! This module defines all error types used throughout the transpiler,
//! including lexical, syntax, and semantic errors. A compilation reports
//! the first error it hits and stops; there is no error recovery.

use std::ops::Range;
use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span from a range.
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::from_range(range)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Error codes for the transpiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E004)
    UnknownCharacter,
    MissingEqualAfterBang,
    IllegalStringCharacter,
    MalformedNumber,

    // Syntax errors (E101-E104)
    UnexpectedToken,
    ExpectedToken,
    ExpectedComparisonOperator,
    InvalidStatement,

    // Semantic errors (E201-E203)
    UndefinedVariable,
    LabelAlreadyDefined,
    UndefinedLabel,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            // Lexical errors
            ErrorCode::UnknownCharacter => "E001",
            ErrorCode::MissingEqualAfterBang => "E002",
            ErrorCode::IllegalStringCharacter => "E003",
            ErrorCode::MalformedNumber => "E004",

            // Syntax errors
            ErrorCode::UnexpectedToken => "E101",
            ErrorCode::ExpectedToken => "E102",
            ErrorCode::ExpectedComparisonOperator => "E103",
            ErrorCode::InvalidStatement => "E104",

            // Semantic errors
            ErrorCode::UndefinedVariable => "E201",
            ErrorCode::LabelAlreadyDefined => "E202",
            ErrorCode::UndefinedLabel => "E203",
        }
    }
}

/// A compile error with source location.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for transpiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    ///
    /// Offsets past the end of the source are clamped; the lexer pads its
    /// input with a trailing newline, so end-of-file errors may carry a
    /// span one byte past the caller's text.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        // Extract the line content
        let line_start = last_newline;
        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[line_start..line_end].to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_offset(source, error.span.start);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    // Error header
    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));

    // Location
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    // Source context
    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    // Underline the error span
    let underline_start = loc.column - 1;
    let underline_len = (error.span.end - error.span.start)
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start))
        .max(1);
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    // Hint if available
    if let Some(hint) = &error.hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}
