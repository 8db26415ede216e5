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

//! Performance benchmarks for the teenyc compiler.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;

// ============================================================================
// Benchmark Inputs
// ============================================================================

fn load_input(name: &str) -> String {
    let path = format!("benches/inputs/{}.teeny", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load benchmark input: {}", path))
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer(c: &mut Criterion) {
    let small = load_input("small");
    let medium = load_input("medium");
    let large = load_input("large");

    let mut group = c.benchmark_group("lexer");

    // Throughput based on source code size
    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_with_input(BenchmarkId::new("tokenize", "small"), &small, |b, src| {
        b.iter(|| teenyc::lexer::tokenize(black_box(src)))
    });

    group.throughput(Throughput::Bytes(medium.len() as u64));
    group.bench_with_input(BenchmarkId::new("tokenize", "medium"), &medium, |b, src| {
        b.iter(|| teenyc::lexer::tokenize(black_box(src)))
    });

    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_with_input(BenchmarkId::new("tokenize", "large"), &large, |b, src| {
        b.iter(|| teenyc::lexer::tokenize(black_box(src)))
    });

    group.finish();
}

// ============================================================================
// End-to-End Compilation Benchmarks
// ============================================================================

// The parser emits C as it goes, so parsing and code generation are a
// single pass and only the full pipeline is worth timing.
fn bench_compile(c: &mut Criterion) {
    let small = load_input("small");
    let medium = load_input("medium");
    let large = load_input("large");

    let mut group = c.benchmark_group("compile");

    // Throughput based on lines of code
    let small_lines = small.lines().count() as u64;
    let medium_lines = medium.lines().count() as u64;
    let large_lines = large.lines().count() as u64;

    group.throughput(Throughput::Elements(small_lines));
    group.bench_with_input(BenchmarkId::new("full", "small"), &small, |b, src| {
        b.iter(|| teenyc::compile(black_box(src)))
    });

    group.throughput(Throughput::Elements(medium_lines));
    group.bench_with_input(BenchmarkId::new("full", "medium"), &medium, |b, src| {
        b.iter(|| teenyc::compile(black_box(src)))
    });

    group.throughput(Throughput::Elements(large_lines));
    group.bench_with_input(BenchmarkId::new("full", "large"), &large, |b, src| {
        b.iter(|| teenyc::compile(black_box(src)))
    });

    group.finish();
}

// ============================================================================
// Micro-Benchmarks
// ============================================================================

fn bench_micro(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro");

    // Benchmark the empty program
    let empty = "";
    group.bench_function("empty_program", |b| {
        b.iter(|| teenyc::compile(black_box(empty)))
    });

    // Benchmark hello world
    let hello = "PRINT \"HELLO\"\n";
    group.bench_function("hello_world", |b| {
        b.iter(|| teenyc::compile(black_box(hello)))
    });

    // Benchmark variable declaration
    let variable = "LET x = 42\n";
    group.bench_function("single_variable", |b| {
        b.iter(|| teenyc::compile(black_box(variable)))
    });

    // Benchmark arithmetic
    let arithmetic = "LET x = 1 + 2 * 3 - 4 / 2\n";
    group.bench_function("arithmetic_expr", |b| {
        b.iter(|| teenyc::compile(black_box(arithmetic)))
    });

    // Benchmark while loop
    let loop_code = "LET i = 0\nWHILE i < 10 REPEAT\nLET i = i + 1\nENDWHILE\n";
    group.bench_function("while_loop", |b| {
        b.iter(|| teenyc::compile(black_box(loop_code)))
    });

    // Benchmark if block
    let branch = "LET x = 5\nIF x > 3 THEN\nPRINT \"A\"\nENDIF\n";
    group.bench_function("if_block", |b| {
        b.iter(|| teenyc::compile(black_box(branch)))
    });

    // Benchmark label and goto
    let jump = "LET n = 3\nLABEL top\nLET n = n - 1\nIF n > 0 THEN\nGOTO top\nENDIF\n";
    group.bench_function("label_goto", |b| {
        b.iter(|| teenyc::compile(black_box(jump)))
    });

    // Benchmark input
    let input = "INPUT n\nPRINT n\n";
    group.bench_function("input", |b| {
        b.iter(|| teenyc::compile(black_box(input)))
    });

    group.finish();
}

// ============================================================================
// Scaling Benchmarks
// ============================================================================

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    // Test how compilation time scales with number of variables
    for count in [1, 5, 10, 20, 50].iter() {
        let mut source = String::new();
        for i in 0..*count {
            source.push_str(&format!("LET v{} = {}\n", i, i));
        }

        group.bench_with_input(BenchmarkId::new("variables", count), &source, |b, src| {
            b.iter(|| teenyc::compile(black_box(src)))
        });
    }

    // Test how compilation time scales with block nesting depth
    for depth in [1, 5, 10, 20].iter() {
        let mut source = String::new();
        for _ in 0..*depth {
            source.push_str("WHILE 1 < 2 REPEAT\n");
        }
        source.push_str("PRINT 1\n");
        for _ in 0..*depth {
            source.push_str("ENDWHILE\n");
        }

        group.bench_with_input(BenchmarkId::new("nesting", depth), &source, |b, src| {
            b.iter(|| teenyc::compile(black_box(src)))
        });
    }

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(
    benches,
    bench_lexer,
    bench_compile,
    bench_micro,
    bench_scaling,
);

criterion_main!(benches);
