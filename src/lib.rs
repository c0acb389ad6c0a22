//! # sythin
//!
//! sythin is a small functional language for describing audio waveforms.
//! A program is a list of definitions; a definition of the form
//! `name = \frequency. \time. body` can be evaluated once per sample to
//! produce a signal.
//!
//! ```
//! let program = sythin::parse("main = \\f.\\t. sin(2 * pi * f * t)").unwrap();
//! assert!(sythin::validate(&program).is_empty());
//! assert_eq!(sythin::evaluable_definitions(&program), ["main"]);
//!
//! let peak = sythin::evaluate_definition(&program, "main", 440.0, 1.0 / 1760.0).unwrap();
//! assert!((peak - 1.0).abs() < 1e-12);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::parser::core::parse_program,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Term` enum and related types that represent the
/// syntactic structure of a program as a tree. The tree is built once by the
/// parser and only ever read afterwards.
///
/// # Responsibilities
/// - Defines terms, definitions, clauses and builtin operators.
/// - Attaches source lines to nodes for error reporting.
/// - Indexes top-level definitions by name.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines one error enum per phase. Lexical and syntax errors
/// carry a line and column, runtime errors carry the line of the term that
/// failed.
pub mod error;
/// Orchestrates lexing, parsing, validation and evaluation.
///
/// This module ties together the phases of the interpreter and exposes the
/// building blocks the functions at the crate root are made of.
pub mod interpreter;
/// Reloadable program slot shared between threads.
pub mod live;
/// Note names to frequencies.
pub mod pitch;
/// Sample-table rendering, sequential and multi-threaded.
pub mod render;
/// General numeric helpers.
///
/// This module provides the rounding and conversion routines shared by the
/// evaluator and the renderer.
pub mod util;

pub use interpreter::{
    evaluator::entry::{Sampler, evaluate_definition, sample},
    validator::{Diagnostic, Severity, evaluable_definitions, validate},
};

/// Name of the definition the command line renders by default.
pub const DEFAULT_DEFINITION: &str = "main";
/// Sample rate the command line renders at by default, in hertz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;
/// Name of the constant bound to π in every evaluation.
pub const PI_NAME: &str = "pi";

/// Parses a source text into a [`Program`].
///
/// # Errors
/// Returns the first lexical or syntax error, with its line and column.
///
/// # Examples
/// ```
/// use sythin::parse;
///
/// assert!(parse("main = \\f.\\t. f").is_ok());
///
/// let err = parse("main = \\f.\\t. f $ t").unwrap_err();
/// assert_eq!(err.to_string(), "<string>:1:17: unrecognized character '$'");
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let program = parse_program(source)?;
    log::debug!("parsed {} top-level items", program.statements().len());
    Ok(program)
}

/// Parses, validates and renders `seconds` of the definition `name`.
///
/// This is what the command line does once it has resolved its arguments.
/// Validation warnings are logged; validation errors refuse the program.
///
/// # Errors
/// Returns the parse error, the validation errors, or the first runtime
/// error encountered while rendering.
///
/// # Examples
/// ```
/// use sythin::run;
///
/// let samples = run("main = \\f.\\t. t", "main", 440.0, 1.0, 4, 2).unwrap();
/// assert_eq!(samples, [0.0, 0.25, 0.5, 0.75]);
///
/// assert!(run("main = 1, main = 2", "main", 440.0, 1.0, 4, 1).is_err());
/// ```
pub fn run(source: &str,
           name: &str,
           frequency: f64,
           seconds: f64,
           sample_rate: u32,
           workers: usize)
           -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let (program, _) = live::load(source)?;
    if let Some(diagnostic) = interpreter::validator::check_entry(&program, name) {
        return Err(diagnostic.message.into());
    }

    let count = util::num::sample_count(seconds, sample_rate);
    Ok(render::render_parallel(&program, name, frequency, sample_rate, count, workers)?)
}
