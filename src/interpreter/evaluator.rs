/// Core evaluation logic.
///
/// Contains the `Evaluator`, the tree walk over every term shape, identifier
/// resolution and the `EvalResult` alias.
pub mod core;

/// Application of functions to arguments.
///
/// Dispatches on the applied value: closures, unary builtins, and binary
/// builtins in their unapplied and partially applied states.
pub mod application;

/// Builtin operator arithmetic.
///
/// Implements the numeric behavior of every unary and binary builtin.
pub mod builtin;

/// Per-call binding frames.
pub mod environment;

/// Evaluation of a named definition for one `(frequency, time)` pair.
///
/// This is the entry point collaborators call at audio and plot rate, in a
/// strict form returning every error and an audio-safe form returning
/// silence instead.
pub mod entry;
