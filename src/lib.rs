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

//! teenyc Transpiler Library
//!
//! This library translates Teeny BASIC source code into C source text that
//! any C compiler can turn into an executable.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`lexer`] - Tokenization of source code
//! - [`parser`] - Recursive-descent parsing fused with code generation
//! - [`emitter`] - The two-buffer C text emitter
//! - [`runner`] - C-toolchain discovery, build/run, and file watching
//!
//! # Example
//!
//! ```
//! let source = "LET a = 0\nLET b = 1\nPRINT a + b\n";
//!
//! match teenyc::compile(source) {
//!     Ok(code) => assert!(code.starts_with("#include <stdio.h>")),
//!     Err(e) => eprintln!("Compilation error: {}", e),
//! }
//! ```

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runner;

// Re-export commonly used types
pub use error::{format_error, CompileError, ErrorCode, Result, SourceLocation, Span};
pub use lexer::{Token, TokenKind};

/// The version of the teenyc transpiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the transpiler.
pub const NAME: &str = "teenyc";

/// Compile Teeny BASIC source code to C source text.
///
/// This is the main entry point. Lexing, parsing, and emission run in a
/// single pass over the source; the first error aborts the compilation and
/// no partial output is returned.
///
/// # Arguments
///
/// * `source` - The source code to compile
///
/// # Returns
///
/// Returns the generated C program as a string, or the first error.
///
/// # Example
///
/// ```
/// match teenyc::compile("PRINT \"Hello\"") {
///     Ok(code) => print!("{}", code),
///     Err(e) => eprintln!("Compilation error: {}", e),
/// }
/// ```
pub fn compile(source: &str) -> Result<String> {
    let lexer = lexer::Lexer::new(source);
    let parser = parser::Parser::new(lexer)?;
    parser.program()
}
