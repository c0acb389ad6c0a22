/// Parser entry points and control constructs.
///
/// Contains the program and expression entry points together with the
/// keyword-delimited constructs `case`, `if` and `let`.
pub mod core;

/// Infix operator parsing.
///
/// Handles comparison, additive and multiplicative operators and lowers each
/// of them to nested applications of the matching binary builtin.
pub mod binary;

/// Application and atom parsing.
///
/// Handles juxtaposition, literals, identifiers, builtins, parenthesized
/// expressions and lambdas.
pub mod primary;

/// Utility functions for the parser.
///
/// Provides token expectations, name parsing, comma-separated lists and error
/// construction shared by the other parser modules.
pub mod utils;

/// Top-level statement parsing.
///
/// Decides between `name = expr` definitions and bare expressions.
pub mod statement;
