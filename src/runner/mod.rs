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

//! Runner module for C toolchain integration and file watching.
//!
//! This module provides functionality to:
//! - Detect a C compiler on the system
//! - Build generated C code into a native executable
//! - Run the resulting program
//! - Watch source files for changes

mod cc;
mod watcher;

pub use cc::{check_cc_version, find_cc, run_program, CcRunner};
pub use watcher::SourceWatcher;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during runner operations.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// No C compiler was found on the system.
    #[error("C compiler not found. Install cc, gcc or clang, or specify a path with --cc")]
    CompilerNotFound,

    /// A child process failed to start.
    #[error("Failed to start process: {0}")]
    StartFailed(#[from] io::Error),

    /// The C compiler rejected the generated code.
    #[error("C compiler failed:\n{stderr}")]
    BuildFailed { stderr: String },

    /// Error watching files.
    #[error("File watch error: {0}")]
    WatchError(String),

    /// The C compiler version could not be determined.
    #[error("C compiler version check failed: {0}")]
    VersionError(String),

    /// The specified compiler path does not exist.
    #[error("C compiler path does not exist: {0}")]
    InvalidCompilerPath(PathBuf),
}
