/// The evaluator module walks the syntax tree and computes values.
///
/// The evaluator resolves identifiers through per-call binding frames and the
/// program's top-level definitions, applies closures and curried builtins,
/// and evaluates `case`, `if` and `let`. It never writes to the program, so
/// one parsed program can be evaluated from many threads at once.
///
/// # Responsibilities
/// - Evaluates terms to runtime values.
/// - Drives a named definition for one `(frequency, time)` pair.
/// - Reports runtime errors such as unknown identifiers or type mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a number, identifier, reserved word or punctuation, and
/// each carrying the line and column it starts at.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Folds a sign into the number it precedes where no operand comes before.
/// - Fails on characters that start no token.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// a [`crate::ast::Program`]. Infix operators are lowered to applications of
/// builtins here, so later phases only deal with single-argument application.
pub mod parser;
/// Top-level checks run after parsing.
///
/// Reports duplicate definitions, top-level expressions and other likely
/// mistakes, and lists which definitions can be evaluated.
pub mod validator;
/// The value module defines the runtime data types for evaluation.
pub mod value;
