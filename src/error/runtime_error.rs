#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during one evaluation call.
pub enum RuntimeError {
    /// A name that is neither bound in scope nor defined at top level.
    UnknownIdentifier {
        /// The name of the identifier.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A builtin, `case` or `if` received a value that is not a number.
    ExpectedNumber {
        /// The construct that required a number, e.g. `sin` or `case`.
        context: &'static str,
        /// The type of the value actually received.
        found:   &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Something other than a closure or builtin was applied to an argument.
    NotApplicable {
        /// The type of the value in function position.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// No clause of a `case` expression matched and there was no wildcard.
    NoMatchingClause {
        /// The scrutinee, after rounding.
        value: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The requested entry definition does not exist.
    UnknownDefinition {
        /// The requested name.
        name: String,
    },
    /// The requested entry definition is not `\frequency. \time. body`.
    NotEvaluable {
        /// The requested name.
        name: String,
    },
    /// The entry definition produced something other than a number.
    NonNumericResult {
        /// The type of the value produced.
        found: &'static str,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIdentifier { name, line } => {
                write!(f, "Error on line {line}: Unknown identifier '{name}'.")
            },
            Self::ExpectedNumber { context, found, line } => write!(f,
                                                                    "Error on line {line}: {context} expected <number>, found <{found}>."),
            Self::NotApplicable { found, line } => write!(f,
                                                          "Error on line {line}: Value of type <{found}> cannot be applied."),
            Self::NoMatchingClause { value, line } => write!(f,
                                                             "Error on line {line}: No matching clause in case expression for {value}."),
            Self::UnknownDefinition { name } => write!(f, "Error: Unknown definition '{name}'."),
            Self::NotEvaluable { name } => write!(f,
                                                  "Error: Definition '{name}' must have the form \\frequency. \\time. body."),
            Self::NonNumericResult { found } => write!(f,
                                                       "Error: Program must return a number, but returned <{found}>."),
        }
    }
}

impl std::error::Error for RuntimeError {}
