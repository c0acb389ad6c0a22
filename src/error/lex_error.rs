/// Name used in place of a file name when reporting source positions.
pub const SOURCE_NAME: &str = "<string>";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing.
pub enum LexError {
    /// A character that does not start any token.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// A number whose exponent marker is not followed by digits, e.g. `3e`.
    MalformedNumber {
        /// The text that was consumed.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character,
                                        line,
                                        column, } => write!(f,
                                                            "{SOURCE_NAME}:{line}:{column}: unrecognized character '{}'",
                                                            character.escape_default()),
            Self::MalformedNumber { text, line, column } => write!(f,
                                                                   "{SOURCE_NAME}:{line}:{column}: malformed number '{text}', expected digits in exponent"),
        }
    }
}

impl std::error::Error for LexError {}
