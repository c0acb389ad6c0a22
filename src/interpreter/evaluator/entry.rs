use crate::{
    ast::{Program, Term},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

/// Splits an entry definition body into its two parameters and inner body.
///
/// Returns `None` unless `body` is `\frequency. \time. inner`.
#[must_use]
pub fn entry_parameters(body: &Term) -> Option<(&str, &str, &Term)> {
    let (frequency, rest) = body.as_lambda()?;
    let (time, inner) = rest.as_lambda()?;
    Some((frequency, time, inner))
}

impl<'p> Evaluator<'p> {
    /// Evaluates the definition `name` for one `(frequency, time)` pair.
    ///
    /// Frames left over from an earlier call on this evaluator are released
    /// first, so a single evaluator can be driven once per sample without
    /// growing.
    ///
    /// # Errors
    /// - `UnknownDefinition` if the program has no definition called `name`.
    /// - `NotEvaluable` if it is not two nested lambdas.
    /// - `NonNumericResult` if the body produces a closure or builtin.
    /// - Any runtime error raised by the body.
    pub fn evaluate_definition(&mut self, name: &str, frequency: f64, time: f64) -> EvalResult<f64> {
        self.reset();

        let program = self.program;
        let definition = program.definition(name)
                                .ok_or_else(|| RuntimeError::UnknownDefinition { name: name.to_string() })?;
        let (frequency_name, time_name, body) =
            entry_parameters(&definition.body).ok_or_else(|| RuntimeError::NotEvaluable { name: name.to_string() })?;

        let root = self.root_scope();
        let scope = self.bind(root, frequency_name, Value::Number(frequency));
        let scope = self.bind(scope, time_name, Value::Number(time));

        match self.eval(body, scope)? {
            Value::Number(n) => Ok(n),
            other => Err(RuntimeError::NonNumericResult { found: other.type_name() }),
        }
    }
}

/// Evaluates the definition `name` of `program` for one `(frequency, time)`
/// pair.
///
/// Every binding made during the call lives in a private frame arena that is
/// released when the call returns, successfully or not. The program is only
/// read, so this may be called from any number of threads at once.
///
/// # Errors
/// See [`Evaluator::evaluate_definition`].
///
/// # Example
/// ```
/// use sythin::interpreter::{evaluator::entry::evaluate_definition, parser::core::parse_program};
///
/// let program = parse_program("main = \\f.\\t. f * t").unwrap();
/// assert_eq!(evaluate_definition(&program, "main", 440.0, 0.5).unwrap(), 220.0);
/// ```
pub fn evaluate_definition(program: &Program, name: &str, frequency: f64, time: f64) -> EvalResult<f64> {
    Evaluator::new(program).evaluate_definition(name, frequency, time)
}

/// Audio-safe form of [`evaluate_definition`].
///
/// Any error is turned into silence (`0.0`), so a faulty program never stops
/// the caller. Nothing is logged; use a [`Sampler`] to have failures
/// reported.
#[must_use]
pub fn sample(program: &Program, name: &str, frequency: f64, time: f64) -> f64 {
    evaluate_definition(program, name, frequency, time).unwrap_or(0.0)
}

/// Per-thread audio-safe evaluation with failure reporting.
///
/// Like [`sample`], every error becomes `0.0`. Each distinct error is logged
/// as a warning the first time it occurs and is remembered afterwards, so a
/// broken program costs one log record per fault rather than one per sample.
/// The evaluator's frame arena is reused between calls.
///
/// # Example
/// ```
/// use sythin::interpreter::{evaluator::entry::Sampler, parser::core::parse_program};
///
/// let program = parse_program("main = \\f.\\t. missing").unwrap();
/// let mut sampler = Sampler::new(&program);
/// for i in 0..100 {
///     assert_eq!(sampler.sample("main", 440.0, f64::from(i) / 100.0), 0.0);
/// }
/// assert_eq!(sampler.reported().len(), 1);
/// ```
pub struct Sampler<'p> {
    evaluator: Evaluator<'p>,
    reported:  Vec<RuntimeError>,
}

impl<'p> Sampler<'p> {
    /// Creates a sampler for `program` with nothing reported yet.
    #[must_use]
    pub fn new(program: &'p Program) -> Self {
        Self { evaluator: Evaluator::new(program),
               reported:  Vec::new(), }
    }

    /// Evaluates `name` at `(frequency, time)`, returning `0.0` on failure.
    pub fn sample(&mut self, name: &str, frequency: f64, time: f64) -> f64 {
        match self.evaluator.evaluate_definition(name, frequency, time) {
            Ok(value) => value,
            Err(e) => {
                if !self.reported.contains(&e) {
                    log::warn!("{name}({frequency}, {time}): {e}");
                    self.reported.push(e);
                }
                0.0
            },
        }
    }

    /// The distinct errors reported so far, in the order they first occurred.
    #[must_use]
    pub fn reported(&self) -> &[RuntimeError] {
        &self.reported
    }
}
