use std::fmt;

use crate::{
    ast::{BinaryOperator, Term, UnaryOperator},
    error::RuntimeError,
    interpreter::evaluator::{core::EvalResult, environment::Scope},
};

/// Represents a runtime value in the interpreter.
///
/// Nothing here owns heap memory. Terms are borrowed from the [`Program`]
/// being evaluated and scopes are indices into the frame arena of the
/// evaluator that produced the value, so a value is only meaningful for the
/// lifetime of that evaluator.
///
/// [`Program`]: crate::ast::Program
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'p> {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A one-parameter lambda together with the scope it was created in.
    Closure {
        /// Name bound to the argument on application.
        parameter: &'p str,
        /// The lambda body.
        body:      &'p Term,
        /// The scope free variables of `body` resolve in.
        scope:     Scope,
    },
    /// A unary builtin such as `sin`.
    Unary(UnaryOperator),
    /// A binary builtin that has not received any operand yet.
    Binary(BinaryOperator),
    /// A binary builtin applied to its first operand.
    ///
    /// The operand is kept unevaluated together with the scope it appeared
    /// in and is evaluated only when the second operand arrives. A fresh
    /// value is built by every first application and it is consumed, never
    /// updated, by the second.
    PartialBinary {
        /// The builtin awaiting its second operand.
        operator: BinaryOperator,
        /// The first operand.
        operand:  &'p Term,
        /// The scope `operand` is evaluated in.
        scope:    Scope,
    },
}

impl Value<'_> {
    /// The single runtime type tag of the value.
    ///
    /// One of `number`, `closure` or `builtin`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Closure { .. } => "closure",
            Self::Unary(_) | Self::Binary(_) | Self::PartialBinary { .. } => "builtin",
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `context`: The construct requiring a number, used in the error.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::ExpectedNumber)`: Otherwise.
    pub fn as_number(&self, context: &'static str, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::ExpectedNumber { context,
                                                        found: other.type_name(),
                                                        line }),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Closure { parameter, .. } => write!(f, "<closure \\{parameter}>"),
            Self::Unary(op) => write!(f, "<builtin {}>", op.name()),
            Self::Binary(op) => write!(f, "<builtin {}>", op.name()),
            Self::PartialBinary { operator, .. } => write!(f, "<builtin {} _>", operator.name()),
        }
    }
}
