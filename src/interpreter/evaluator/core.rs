use crate::{
    PI_NAME,
    ast::{Builtin, Clause, Definition, LiteralValue, Program, Term},
    error::RuntimeError,
    interpreter::{
        evaluator::environment::{Environment, Scope},
        value::core::Value,
    },
    util::num::round_to_i64,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime state of evaluation against one program.
///
/// The program is only read. All bindings made while evaluating live in the
/// evaluator's own [`Environment`], so any number of evaluators may share a
/// `&Program` across threads without locking.
///
/// ## Usage
///
/// An `Evaluator` can be created once and reused for many calls; see
/// [`Evaluator::evaluate_definition`], which releases the frames of the
/// previous call before starting the next one.
pub struct Evaluator<'p> {
    pub(crate) program: &'p Program,
    pub(crate) env:     Environment<'p>,
    root:               Scope,
}

impl<'p> Evaluator<'p> {
    /// Creates an evaluator whose root scope binds `pi`.
    #[must_use]
    pub fn new(program: &'p Program) -> Self {
        let mut env = Environment::new();
        let root = env.bind(None, PI_NAME, Value::Number(std::f64::consts::PI));
        Self { program, env, root }
    }

    /// The scope top-level definitions are evaluated in.
    #[must_use]
    pub const fn root_scope(&self) -> Scope {
        self.root
    }

    /// Binds `name` to `value` in a new frame on top of `parent`.
    pub fn bind(&mut self, parent: Scope, name: &'p str, value: Value<'p>) -> Scope {
        self.env.bind(parent, name, value)
    }

    /// Releases every frame except the root one.
    pub(crate) fn reset(&mut self) {
        self.env.truncate(1);
    }

    /// Evaluates a term in `scope` and returns the resulting value.
    ///
    /// This is the main entry point for term evaluation. The evaluator
    /// dispatches on the term shape: literals, identifiers, applications,
    /// `case`, `if` and `let`.
    ///
    /// # Parameters
    /// - `term`: Term to evaluate, borrowed from the program.
    /// - `scope`: Innermost frame visible to `term`.
    ///
    /// # Returns
    /// The value of the term.
    pub fn eval(&mut self, term: &'p Term, scope: Scope) -> EvalResult<Value<'p>> {
        match term {
            Term::Literal { value, .. } => Ok(literal_value(value, scope)),
            Term::Identifier { name, line } => self.eval_identifier(name, *line, scope),
            Term::Application { function,
                                argument,
                                line, } => {
                let function = self.eval(function, scope)?;
                self.apply(function, argument, scope, *line)
            },
            Term::CaseOf { scrutinee,
                           clauses,
                           line, } => self.eval_case(scrutinee, clauses, *line, scope),
            Term::IfElse { condition,
                           then_branch,
                           else_branch,
                           line, } => {
                let condition = self.eval_number(condition, scope, "if", *line)?;
                if round_to_i64(condition) == 0 {
                    self.eval(else_branch, scope)
                } else {
                    self.eval(then_branch, scope)
                }
            },
            Term::LetIn { bindings, body, .. } => self.eval_let(bindings, body, scope),
        }
    }

    /// Evaluates a term that must produce a number.
    ///
    /// # Errors
    /// Returns `ExpectedNumber` naming `context` if the term evaluates to a
    /// closure or builtin.
    pub fn eval_number(&mut self,
                       term: &'p Term,
                       scope: Scope,
                       context: &'static str,
                       line: usize)
                       -> EvalResult<f64> {
        self.eval(term, scope)?.as_number(context, line)
    }

    /// Resolves an identifier.
    ///
    /// Local bindings are searched first, innermost outward. On a miss the
    /// first top-level definition with that name is evaluated again in the
    /// root scope; top-level results are never cached.
    fn eval_identifier(&mut self, name: &str, line: usize, scope: Scope) -> EvalResult<Value<'p>> {
        if let Some(value) = self.env.lookup(scope, name) {
            return Ok(value);
        }

        let program = self.program;
        match program.definition(name) {
            Some(definition) => self.eval(&definition.body, self.root),
            None => Err(RuntimeError::UnknownIdentifier { name: name.to_string(),
                                                          line }),
        }
    }

    /// Evaluates a `case` expression.
    ///
    /// Clauses are tried in order. A numeric pattern matches when it rounds
    /// to the same integer as the scrutinee; the wildcard always matches.
    fn eval_case(&mut self,
                 scrutinee: &'p Term,
                 clauses: &'p [Clause],
                 line: usize,
                 scope: Scope)
                 -> EvalResult<Value<'p>> {
        let value = round_to_i64(self.eval_number(scrutinee, scope, "case", line)?);

        for clause in clauses {
            let matched = match &clause.pattern {
                None => true,
                Some(pattern) => {
                    round_to_i64(self.eval_number(pattern, scope, "case pattern", clause.line)?) == value
                },
            };
            if matched {
                return self.eval(&clause.result, scope);
            }
        }

        Err(RuntimeError::NoMatchingClause { value, line })
    }

    /// Evaluates a `let` expression.
    ///
    /// Each binding is evaluated in the scope holding only the bindings
    /// before it, then pushed as a new frame.
    fn eval_let(&mut self, bindings: &'p [Definition], body: &'p Term, scope: Scope) -> EvalResult<Value<'p>> {
        let mut current = scope;
        for binding in bindings {
            let value = self.eval(&binding.body, current)?;
            current = self.bind(current, &binding.name, value);
        }
        self.eval(body, current)
    }
}

/// Turns a literal embedded in the tree into a runtime value.
///
/// Lambdas capture `scope`; nothing is copied out of the tree.
fn literal_value<'p>(literal: &'p LiteralValue, scope: Scope) -> Value<'p> {
    match literal {
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::Lambda { parameter, body } => Value::Closure { parameter: parameter.as_str(),
                                                                     body: &**body,
                                                                     scope },
        LiteralValue::Builtin(Builtin::Unary(op)) => Value::Unary(*op),
        LiteralValue::Builtin(Builtin::Binary(op)) => Value::Binary(*op),
    }
}

/// Evaluates a closed term against `program`.
///
/// The term sees `pi` and the program's top-level definitions. The returned
/// value must not be applied further: closures it contains refer to the
/// frames of an evaluator that no longer exists.
///
/// # Example
/// ```
/// use sythin::{
///     interpreter::{evaluator::core::evaluate, parser::core::parse_program, value::core::Value},
/// };
///
/// let program = parse_program("two = 2").unwrap();
/// let term = &program.definition("two").unwrap().body;
/// assert_eq!(evaluate(term, &program).unwrap(), Value::Number(2.0));
/// ```
pub fn evaluate<'p>(term: &'p Term, program: &'p Program) -> EvalResult<Value<'p>> {
    let mut evaluator = Evaluator::new(program);
    let root = evaluator.root_scope();
    evaluator.eval(term, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse_program;

    fn eval_main(source: &str) -> EvalResult<f64> {
        let program = parse_program(source).unwrap();
        let term = &program.definition("main").unwrap().body;
        let mut evaluator = Evaluator::new(&program);
        let root = evaluator.root_scope();
        evaluator.eval_number(term, root, "main", 0)
    }

    #[test]
    fn case_picks_first_match() {
        assert_eq!(eval_main("main = case 2 of 1 -> 10, 2 -> 20, _ -> 0 end"), Ok(20.0));
        assert_eq!(eval_main("main = case 2.6 of 3 -> 10, _ -> 0 end"), Ok(10.0));
        assert_eq!(eval_main("main = case 7 of _ -> 1, 7 -> 2 end"), Ok(1.0));
    }

    #[test]
    fn case_without_match_fails() {
        assert_eq!(eval_main("main = case 4 of 1 -> 10 end"),
                   Err(RuntimeError::NoMatchingClause { value: 4, line: 1 }));
    }

    #[test]
    fn if_rounds_condition() {
        assert_eq!(eval_main("main = if 0.4 then 1 else 2 end"), Ok(2.0));
        assert_eq!(eval_main("main = if -3 then 1 else 2 end"), Ok(1.0));
    }

    #[test]
    fn let_is_sequential_and_shadows() {
        assert_eq!(eval_main("main = let x = 1 in let x = 2 in x end end"), Ok(2.0));
        assert_eq!(eval_main("main = let a = 3, b = a * 2 in a + b end"), Ok(9.0));
        assert_eq!(eval_main("main = let a = b, b = 1 in a end"),
                   Err(RuntimeError::UnknownIdentifier { name: "b".into(),
                                                         line: 1, }));
    }

    #[test]
    fn let_binding_does_not_see_itself() {
        assert!(matches!(eval_main("main = let x = x in x end"),
                         Err(RuntimeError::UnknownIdentifier { .. })));
    }

    #[test]
    fn lambda_parameter_shadowed_by_let() {
        assert_eq!(eval_main("main = (\\x. let x = x + 1 in x end) 1"), Ok(2.0));
    }

    #[test]
    fn top_level_names_resolve_lazily() {
        assert_eq!(eval_main("main = double 21\ndouble = \\x. x * 2"), Ok(42.0));
        assert!((eval_main("main = pi").unwrap() - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn closures_capture_their_scope() {
        let source = "main = let add = \\a. \\b. a + b, inc = add 1 in let a = 100 in inc 2 end end";
        assert_eq!(eval_main(source), Ok(3.0));
    }

    #[test]
    fn unknown_identifier_reports_line() {
        assert_eq!(eval_main("\nmain =\n  missing"),
                   Err(RuntimeError::UnknownIdentifier { name: "missing".into(),
                                                         line: 3, }));
    }
}
