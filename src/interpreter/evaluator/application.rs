use crate::{
    ast::Term,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtin::{apply_binary, apply_unary},
            core::{EvalResult, Evaluator},
            environment::Scope,
        },
        value::core::Value,
    },
};

impl<'p> Evaluator<'p> {
    /// Applies a function value to an argument term.
    ///
    /// - Closures evaluate the argument first (call by value), bind it to
    ///   their parameter on top of the scope they captured, and evaluate their
    ///   body there.
    /// - Unary builtins evaluate the argument and compute a number.
    /// - Binary builtins do not evaluate the argument yet; they return a new
    ///   [`Value::PartialBinary`] holding it.
    /// - Partially applied builtins evaluate their stored operand, then the
    ///   argument, and compute a number.
    ///
    /// # Parameters
    /// - `function`: The evaluated function position.
    /// - `argument`: The unevaluated argument.
    /// - `scope`: Scope of the application, in which `argument` is evaluated.
    /// - `line`: Source line of the application.
    ///
    /// # Errors
    /// Returns `NotApplicable` if `function` is a number, `ExpectedNumber` if
    /// a builtin operand is not a number, and any error raised while
    /// evaluating the operands or the closure body.
    pub fn apply(&mut self,
                 function: Value<'p>,
                 argument: &'p Term,
                 scope: Scope,
                 line: usize)
                 -> EvalResult<Value<'p>> {
        match function {
            Value::Closure { parameter,
                             body,
                             scope: captured, } => {
                let value = self.eval(argument, scope)?;
                let inner = self.bind(captured, parameter, value);
                self.eval(body, inner)
            },
            Value::Unary(op) => {
                let x = self.eval_number(argument, scope, op.name(), line)?;
                Ok(Value::Number(apply_unary(op, x)))
            },
            Value::Binary(operator) => Ok(Value::PartialBinary { operator,
                                                                 operand: argument,
                                                                 scope }),
            Value::PartialBinary { operator,
                                   operand,
                                   scope: captured, } => {
                let a = self.eval_number(operand, captured, operator.name(), line)?;
                let b = self.eval_number(argument, scope, operator.name(), line)?;
                Ok(Value::Number(apply_binary(operator, a, b)))
            },
            Value::Number(_) => Err(RuntimeError::NotApplicable { found: function.type_name(),
                                                                  line }),
        }
    }
}
