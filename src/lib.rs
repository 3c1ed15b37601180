//! # geoscript
//!
//! geoscript is a small statically typed scripting language built around a
//! geometry standard library. The crate implements the full pipeline:
//! lexical analysis, recursive-descent parsing into a typed AST, and
//! tree-walking interpretation with scoped environments, runtime type
//! checks and recursion-depth guarding. Shapes and a canvas collection are
//! the language's only compound builtin types.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    error::{LexicalError, RuntimeError, SyntaxError},
    interpreter::{
        evaluator::Interpreter,
        lexer::{FilteredLexer, Lexer},
        parser::Parser,
    },
};

/// Defines the structure of parsed code.
///
/// Declares the typed AST — program, functions, blocks, statements and
/// expressions — together with the closed `Type` enumeration and the
/// `Position` attached to every node for diagnostics.
///
/// # Responsibilities
/// - Defines every AST node kind as plain data with source positions.
/// - Defines the nominal type tags used by all runtime type checks.
/// - Maps declaration-type tokens to type tags.
pub mod ast;
/// Provides the error types of the three pipeline stages.
///
/// Lexical and syntax errors are recoverable and collected; runtime errors
/// are fatal to the run. The three families are kept separate and are never
/// converted into one another.
///
/// # Responsibilities
/// - Defines the lexical, syntax and runtime error enums.
/// - Attaches positions and offending values for user-facing reports.
/// - Implements the standard error traits for all of them.
pub mod error;
/// The geometry standard library.
///
/// Shape objects (circle, square, rectangle, triangle, rhomb, trapeze,
/// polygon) and the canvas collection, exposed to the language through
/// constructor and method capability tables.
///
/// # Responsibilities
/// - Implements construction, validation and the geometric formulas.
/// - Dispatches method calls through explicit per-type tables.
/// - Provides the ordered shape collection the `for` statement iterates.
pub mod geometry;
/// Orchestrates the whole interpretation pipeline.
///
/// Ties together the lexer, parser, evaluator, environment and value model.
/// Data flows strictly lexer → parser → interpreter; the interpreter
/// invokes `parse_program` once and then walks the tree.
///
/// # Responsibilities
/// - Coordinates the pipeline stages and the flow of diagnostics.
/// - Exposes the interpreter driving execution from `main`.
pub mod interpreter;
/// General utilities.
///
/// Checked numeric conversions shared by the lexer, the cast evaluator and
/// integer division.
pub mod util;

/// The configurable limits of a run.
///
/// The lexer enforces the literal and length bounds; the interpreter
/// enforces the recursion ceiling. The host may override any of them.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum identifier length, in characters.
    pub max_identifier_length: usize,
    /// Maximum string and comment length, in characters.
    pub max_string_length:     usize,
    /// Maximum integer literal value; also bounds the fractional
    /// accumulator of decimal literals.
    pub max_int:               i64,
    /// Maximum function-call nesting depth.
    pub max_recursion_depth:   usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_identifier_length: 200,
               max_string_length:     200,
               max_int:               i64::from(i32::MAX),
               max_recursion_depth:   100, }
    }
}

/// Everything a finished run reports back to the host.
///
/// Lexical and syntax diagnostics are collected lists — many can surface in
/// one run. The runtime error is at most one: the first violation
/// terminates evaluation.
#[derive(Debug)]
pub struct RunReport {
    /// Lexical diagnostics, in source order.
    pub lexical_errors: Vec<LexicalError>,
    /// Syntax diagnostics, in source order.
    pub syntax_errors:  Vec<SyntaxError>,
    /// The terminal runtime error, if evaluation failed.
    pub runtime_error:  Option<RuntimeError>,
}

impl RunReport {
    /// Whether the run finished without any diagnostic at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lexical_errors.is_empty()
        && self.syntax_errors.is_empty()
        && self.runtime_error.is_none()
    }
}

/// Runs a source text through the whole pipeline.
///
/// Lexes, parses and interprets `source` under the given limits, writing
/// `print` output to `output`, and returns every diagnostic the run
/// produced.
///
/// # Example
/// ```
/// use geoscript::{Limits, run_program};
///
/// let mut output = Vec::new();
/// let report = run_program("def main() { print(\"WORKS\"); }", &Limits::default(), &mut output);
///
/// assert!(report.is_clean());
/// assert_eq!(output, b"WORKS\n");
/// ```
pub fn run_program<W: Write>(source: &str, limits: &Limits, output: W) -> RunReport {
    let lexer = FilteredLexer::new(Lexer::with_limits(source, limits.clone()));
    let parser = Parser::new(lexer);
    let mut interpreter = Interpreter::with_output(parser, output, limits.max_recursion_depth);

    let runtime_error = interpreter.interpret().err();
    let (lexical_errors, syntax_errors) = interpreter.take_diagnostics();

    RunReport { lexical_errors,
                syntax_errors,
                runtime_error }
}
