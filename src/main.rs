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

//! teenyc CLI
//!
//! A tiny BASIC to C transpiler.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use teenyc::error::format_error;
use teenyc::runner::{check_cc_version, find_cc, run_program, CcRunner, SourceWatcher};

/// teenyc - a tiny BASIC to C transpiler
#[derive(Parser, Debug)]
#[command(name = "teenyc")]
#[command(author = "The teenyc authors")]
#[command(version)]
#[command(about = "A tiny BASIC to C transpiler")]
#[command(long_about = r#"
teenyc translates source files written in Teeny BASIC into portable C
source code, and can build and run the result with the system C compiler.

Example usage:
  teenyc hello.teeny
  teenyc hello.teeny -o build/hello.c

Build and run with the system C compiler:
  teenyc hello.teeny --run
  teenyc hello.teeny -r

Watch mode with recompile-on-save:
  teenyc hello.teeny --watch
  teenyc hello.teeny -w --run
"#)]
struct Cli {
    /// Source file to compile (.teeny)
    source_file: PathBuf,

    /// Output C file. Defaults to the source file name with a .c extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Build and run the compiled program
    #[arg(short, long)]
    run: bool,

    /// Watch the source file and recompile on changes
    #[arg(short, long)]
    watch: bool,

    /// Path to a C compiler binary (auto-detected if not specified)
    #[arg(long)]
    cc: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Determine the output path
    // If --run or --watch is used without -o, write to a temp file
    let (output_path, is_temp_output) = match &cli.output {
        Some(path) => (path.clone(), false),
        None if cli.run || cli.watch => {
            let source_stem = cli
                .source_file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("program");
            let temp_path = std::env::temp_dir().join(format!("{}.c", source_stem));
            (temp_path, true)
        }
        None => (cli.source_file.with_extension("c"), false),
    };

    if cli.verbose {
        println!("teenyc v{}", teenyc::VERSION);
        println!("Source: {}", cli.source_file.display());
        if is_temp_output {
            println!("Output: {} (temporary)", output_path.display());
        } else {
            println!("Output: {}", output_path.display());
        }
        println!();
    }

    // Read the source file
    let source = match std::fs::read_to_string(&cli.source_file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", cli.source_file.display(), e);
            return ExitCode::from(3);
        }
    };

    // Compile
    if cli.verbose {
        println!("Compiling...");
    }

    let filename = source_filename(&cli.source_file);

    let code = match teenyc::compile(&source) {
        Ok(code) => code,
        Err(e) => {
            eprint!("{}", format_error(&e, &source, Some(filename)));
            return ExitCode::from(1);
        }
    };

    if cli.verbose {
        println!("Generated {} bytes of C", code.len());
    }

    // Write output
    if cli.verbose {
        println!("Writing {}...", output_path.display());
    }

    if let Err(e) = std::fs::write(&output_path, &code) {
        eprintln!("Error: Cannot write {}: {}", output_path.display(), e);
        return ExitCode::from(3);
    }

    if cli.verbose {
        println!("Done!");
    } else if !is_temp_output {
        println!("Compiled {} -> {}", filename, output_path.display());
    } else {
        println!("Compiled {}", filename);
    }

    // Resolve the C compiler if we are going to build
    let runner = if cli.run {
        let cc_path = match &cli.cc {
            Some(path) => {
                if !path.exists() {
                    eprintln!("Error: C compiler path does not exist: {}", path.display());
                    return ExitCode::from(4);
                }
                path.clone()
            }
            None => match find_cc() {
                Some(path) => path,
                None => {
                    eprintln!("Error: No C compiler found.");
                    eprintln!();
                    eprintln!("Install one or specify the path with --cc:");
                    eprintln!("  macOS:   xcode-select --install");
                    eprintln!("  Ubuntu:  sudo apt install gcc");
                    eprintln!("  Manual:  --cc /path/to/cc");
                    return ExitCode::from(4);
                }
            },
        };

        if cli.verbose {
            match check_cc_version(&cc_path) {
                Ok(version) => println!("C compiler: {} ({})", cc_path.display(), version),
                Err(_) => println!("C compiler: {}", cc_path.display()),
            }
        }

        Some(CcRunner::new(cc_path))
    } else {
        None
    };

    // Watch mode: recompile on every save
    if cli.watch {
        return run_watch_loop(&cli, runner.as_ref(), &output_path);
    }

    if let Some(runner) = &runner {
        return build_and_run(runner, &output_path, cli.verbose);
    }

    ExitCode::SUCCESS
}

/// File name of the source path for diagnostics.
fn source_filename(path: &Path) -> &str {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>")
}

/// Build the generated C file and run the result.
///
/// The executable lands next to the C file. The program's exit code becomes
/// ours; failures in the toolchain itself exit with 5.
fn build_and_run(runner: &CcRunner, c_file: &Path, verbose: bool) -> ExitCode {
    let exe_file = c_file.with_extension("");

    if verbose {
        println!("Building {}...", exe_file.display());
    }

    if let Err(e) = runner.build(c_file, &exe_file) {
        eprintln!("Error: {}", e);
        return ExitCode::from(5);
    }

    if verbose {
        println!("Running {}...", exe_file.display());
        println!();
    }

    match run_program(&exe_file) {
        Ok(code) => u8::try_from(code)
            .map(ExitCode::from)
            .unwrap_or(ExitCode::from(5)),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(5)
        }
    }
}

/// Build the output C file and run it, watch-mode style: failures are
/// reported but never terminate the session. Returns false when the
/// build failed.
fn watch_build_and_run(runner: &CcRunner, output_path: &Path, verbose: bool) -> bool {
    let exe_file = output_path.with_extension("");
    if let Err(e) = runner.build(output_path, &exe_file) {
        eprintln!("Error: {}", e);
        println!("Fix errors and save to retry.");
        return false;
    }

    println!();
    match run_program(&exe_file) {
        Ok(code) if verbose => println!("Program exited with code {}", code),
        Ok(_) => {}
        Err(e) => eprintln!("Error: {}", e),
    }
    true
}

/// Run the watch loop, recompiling on every change.
fn run_watch_loop(cli: &Cli, runner: Option<&CcRunner>, output_path: &Path) -> ExitCode {
    let watcher = match SourceWatcher::new(&cli.source_file) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: Failed to create file watcher: {}", e);
            return ExitCode::from(6);
        }
    };

    // The initial compile already wrote the output file; with --run the
    // session starts with the program built and running, same as -r alone.
    if let Some(runner) = runner {
        watch_build_and_run(runner, output_path, cli.verbose);
    }

    println!();
    println!("Watching for changes... (Press Ctrl+C to stop)");

    loop {
        // Wait for file change
        if let Err(e) = watcher.wait_for_change() {
            eprintln!("Watch error: {}", e);
            continue;
        }

        println!();
        if cli.verbose {
            println!("Change detected, recompiling...");
        } else {
            println!("Recompiling...");
        }

        // Re-read the source file
        let source = match std::fs::read_to_string(&cli.source_file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Cannot read {}: {}", cli.source_file.display(), e);
                println!("Fix errors and save to retry.");
                continue;
            }
        };

        let filename = source_filename(&cli.source_file);

        // Compile
        let code = match teenyc::compile(&source) {
            Ok(code) => code,
            Err(e) => {
                eprint!("{}", format_error(&e, &source, Some(filename)));
                println!("Fix errors and save to retry.");
                continue;
            }
        };

        // Write output
        if let Err(e) = std::fs::write(output_path, &code) {
            eprintln!("Error: Cannot write {}: {}", output_path.display(), e);
            println!("Fix errors and save to retry.");
            continue;
        }

        println!("Compiled {} -> {}", filename, output_path.display());

        // Rebuild and rerun the refreshed program
        if let Some(runner) = runner {
            if !watch_build_and_run(runner, output_path, cli.verbose) {
                continue;
            }
        }

        println!("Watching for changes...");
    }
}
