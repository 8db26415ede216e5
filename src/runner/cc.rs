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

//! C compiler detection, building, and program execution.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::RunnerError;

/// List of C compiler binaries to search for, in order of preference.
/// `cc` is the platform default; gcc and clang are common fallbacks.
const CC_BINARIES: &[&str] = &["cc", "gcc", "clang"];

/// Find a C compiler on the system.
///
/// Searches for compiler binaries (cc, gcc, clang) in the system PATH.
/// Returns the full path to the first found binary, or `None` if not found.
///
/// # Example
///
/// ```no_run
/// use teenyc::runner::find_cc;
///
/// if let Some(cc_path) = find_cc() {
///     println!("Found C compiler: {}", cc_path.display());
/// } else {
///     println!("No C compiler found");
/// }
/// ```
pub fn find_cc() -> Option<PathBuf> {
    for binary in CC_BINARIES {
        if let Ok(path) = which::which(binary) {
            return Some(path);
        }
    }
    None
}

/// Check the C compiler version.
///
/// Runs `<cc_path> --version` and returns the identity line from the output.
///
/// # Arguments
///
/// * `cc_path` - Path to the compiler binary
///
/// # Errors
///
/// Returns `RunnerError::VersionError` if the version cannot be determined.
pub fn check_cc_version(cc_path: &Path) -> Result<String, RunnerError> {
    let output = Command::new(cc_path)
        .arg("--version")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| RunnerError::VersionError(format!("Failed to run the C compiler: {}", e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // gcc and clang report the version on stdout; some compilers use stderr
    let version_output = if !stdout.is_empty() {
        stdout.to_string()
    } else {
        stderr.to_string()
    };

    if let Some(version) = parse_cc_version(&version_output) {
        Ok(version)
    } else {
        Err(RunnerError::VersionError(
            "Could not determine C compiler version".to_string(),
        ))
    }
}

/// Parse the compiler identity from `--version` output.
///
/// The first non-empty line already names the compiler and its version,
/// e.g. `gcc (Debian 12.2.0-14) 12.2.0` or `Apple clang version 15.0.0`.
fn parse_cc_version(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// C compiler runner for turning generated C code into a native executable.
pub struct CcRunner {
    /// Path to the compiler binary.
    cc_path: PathBuf,
}

impl CcRunner {
    /// Create a new CcRunner.
    ///
    /// # Arguments
    ///
    /// * `cc_path` - Path to the compiler binary
    pub fn new(cc_path: PathBuf) -> Self {
        Self { cc_path }
    }

    /// Get the compiler binary path.
    pub fn cc_path(&self) -> &Path {
        &self.cc_path
    }

    /// Compile a C file into a native executable.
    ///
    /// Runs `<cc> -o <exe_file> <c_file>` and captures the compiler output.
    ///
    /// # Arguments
    ///
    /// * `c_file` - Path to the C source file
    /// * `exe_file` - Path for the executable to produce
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::BuildFailed` carrying the compiler's stderr if
    /// the compiler exits with a non-zero status.
    pub fn build(&self, c_file: &Path, exe_file: &Path) -> Result<(), RunnerError> {
        let output = Command::new(&self.cc_path)
            .arg("-o")
            .arg(exe_file)
            .arg(c_file)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(RunnerError::BuildFailed {
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(())
    }
}

/// Run a built executable with inherited stdio.
///
/// The program gets the terminal directly, so INPUT statements can read
/// from stdin and PRINT writes straight to stdout.
///
/// # Returns
///
/// Returns the program's exit code.
pub fn run_program(exe_file: &Path) -> Result<i32, RunnerError> {
    let status = Command::new(exe_file).status()?;

    // A program killed by a signal has no exit code
    Ok(status.code().unwrap_or(-1))
}
