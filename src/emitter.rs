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

//! Text emitter for the generated C code.
//!
//! The emitter accumulates two buffers: a *header* (the `#include`, the
//! `main` opening, and one `float` declaration per variable) and a *body*
//! (the translated statements). The parser appends to both as it recognizes
//! constructs; nothing is validated here. Uniqueness of declarations is the
//! parser's job, enforced through its symbol table before `header_line` is
//! ever called.

/// Accumulates generated C text.
#[derive(Debug, Default)]
pub struct Emitter {
    /// Header lines: include, entry point, declarations.
    header: String,
    /// Statement translations, in source order.
    body: String,
}

impl Emitter {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the header buffer.
    pub fn header_line(&mut self, line: &str) {
        self.header.push_str(line);
        self.header.push('\n');
    }

    /// Append a fragment to the body buffer, without a line break.
    ///
    /// Used for sub-expression text emitted token-by-token while a larger
    /// statement is still being recognized.
    pub fn emit(&mut self, fragment: &str) {
        self.body.push_str(fragment);
    }

    /// Append a line to the body buffer.
    pub fn emit_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    /// Concatenate header, body, and the fixed epilogue into the final
    /// C source text.
    pub fn finalize(self) -> String {
        let mut code = self.header;
        code.push_str(&self.body);
        code.push_str("return 0;\n}\n");
        code
    }
}
