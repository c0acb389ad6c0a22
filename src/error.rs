/// Lexical errors.
///
/// Raised by the lexer when the source text contains a character or
/// character sequence that does not start any token. Lexing stops at the
/// first such error.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// tokens: unexpected tokens, premature end of input, reserved words used as
/// names, and wrapped lexical errors.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during one evaluation call.
/// Runtime errors abort only the call that raised them; the program they ran
/// against is never modified.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
