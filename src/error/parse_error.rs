use crate::error::{LexError, lex_error::SOURCE_NAME};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer rejected the source text.
    Lexical(LexError),
    /// Found a token that does not fit the grammar at this point.
    UnexpectedToken {
        /// The token encountered.
        found:    String,
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// The source line where the input ended.
        line:     usize,
        /// The source column where the input ended.
        column:   usize,
    },
    /// A reserved word was used where a name is required, e.g. `\sin. sin`.
    ReservedName {
        /// The reserved word.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl ParseError {
    /// Moves an end-of-input error to the position where the input ended.
    ///
    /// Nested parse functions do not know where the token stream stops, so
    /// they report end of input at `0:0` and the entry point fixes it up.
    #[must_use]
    pub fn at_end_of_input(self, end_line: usize, end_column: usize) -> Self {
        match self {
            Self::UnexpectedEndOfInput { expected, .. } => {
                Self::UnexpectedEndOfInput { expected,
                                             line: end_line,
                                             column: end_column }
            },
            other => other,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        Self::Lexical(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(e) => write!(f, "{e}"),
            Self::UnexpectedToken { found,
                                    expected,
                                    line,
                                    column, } => write!(f,
                                                        "{SOURCE_NAME}:{line}:{column}: syntax error: unexpected {found}, expected {expected}"),
            Self::UnexpectedEndOfInput { expected, line, column } => write!(f,
                                                                            "{SOURCE_NAME}:{line}:{column}: syntax error: unexpected end of input, expected {expected}"),
            Self::ReservedName { name, line, column } => write!(f,
                                                                "{SOURCE_NAME}:{line}:{column}: syntax error: '{name}' is reserved and cannot be used as a name"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lexical(e) => Some(e),
            _ => None,
        }
    }
}
