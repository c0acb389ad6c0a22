use std::{collections::HashMap, fmt};

use crate::{
    PI_NAME,
    ast::{LiteralValue, Program, Statement, Term},
    interpreter::evaluator::entry::entry_parameters,
};

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The program runs, but probably not as intended.
    Warning,
    /// Callers should refuse to run the program.
    Error,
}

/// A finding of [`validate`] about a parsed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Whether the finding is fatal.
    pub severity: Severity,
    /// Human readable description.
    pub message:  String,
    /// Source line the finding refers to.
    pub line:     usize,
}

impl Diagnostic {
    fn warning(message: String, line: usize) -> Self {
        Self { severity: Severity::Warning,
               message,
               line }
    }

    fn error(message: String, line: usize) -> Self {
        Self { severity: Severity::Error,
               message,
               line }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{label} on line {}: {}", self.line, self.message)
    }
}

/// Checks the top level of a program.
///
/// - A top-level expression is a warning, since it is never evaluated.
/// - A name defined more than once is an error, reported at every repeat.
/// - A top-level definition of `pi` is a warning: the builtin constant wins
///   inside every definition.
/// - A `case` clause after a wildcard is a warning, since it can never be
///   selected.
///
/// Diagnostics are returned in source order and never alter the program.
///
/// # Example
/// ```
/// use sythin::interpreter::{parser::core::parse_program, validator::{Severity, validate}};
///
/// let program = parse_program("a = 1\na = 2,\n3").unwrap();
/// let severities: Vec<_> = validate(&program).into_iter().map(|d| d.severity).collect();
/// assert_eq!(severities, [Severity::Error, Severity::Warning]);
/// ```
#[must_use]
pub fn validate(program: &Program) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut first_lines: HashMap<&str, usize> = HashMap::new();

    for statement in program.statements() {
        match statement {
            Statement::Expression { expr, line } => {
                diagnostics.push(Diagnostic::warning("expression has no effect".to_string(), *line));
                check_clauses(expr, &mut diagnostics);
            },
            Statement::Definition(def) => {
                if let Some(first) = first_lines.get(def.name.as_str()) {
                    diagnostics.push(Diagnostic::error(format!("'{}' is already defined on line {first}",
                                                               def.name),
                                                       def.line));
                } else {
                    first_lines.insert(&def.name, def.line);
                }
                if def.name == PI_NAME {
                    diagnostics.push(Diagnostic::warning(format!("'{PI_NAME}' is a builtin constant; this definition is never used"),
                                                         def.line));
                }
                check_clauses(&def.body, &mut diagnostics);
            },
        }
    }

    diagnostics
}

/// Returns `true` if any diagnostic is an error.
#[must_use]
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

/// Names of the definitions that can be driven by the evaluation entry point.
///
/// A definition qualifies when its body is two nested lambdas, frequency
/// then time, whose innermost body is not itself a lambda. Each name is
/// listed once, in order of first definition.
///
/// # Example
/// ```
/// use sythin::interpreter::{parser::core::parse_program, validator::evaluable_definitions};
///
/// let program = parse_program("a = \\f.\\t. 0\nb = 1\nc = \\f.\\t.\\x. x").unwrap();
/// assert_eq!(evaluable_definitions(&program), ["a"]);
/// ```
#[must_use]
pub fn evaluable_definitions(program: &Program) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for def in program.definitions() {
        if names.contains(&def.name.as_str()) {
            continue;
        }
        if let Some((_, _, body)) = entry_parameters(&def.body)
           && body.as_lambda().is_none()
        {
            names.push(&def.name);
        }
    }
    names
}

/// Checks that `name` exists and can be evaluated.
///
/// Collaborators that always drive one fixed definition call this once after
/// loading instead of discovering the problem on every sample.
///
/// # Returns
/// `None` if `name` is evaluable, otherwise an error diagnostic.
#[must_use]
pub fn check_entry(program: &Program, name: &str) -> Option<Diagnostic> {
    match program.definition(name) {
        None => Some(Diagnostic::error(format!("no definition named '{name}'"), 0)),
        Some(def) if !evaluable_definitions(program).contains(&name) => {
            Some(Diagnostic::error(format!("'{name}' must have the form \\frequency. \\time. body"),
                                   def.line))
        },
        Some(_) => None,
    }
}

fn check_clauses(term: &Term, diagnostics: &mut Vec<Diagnostic>) {
    match term {
        Term::Literal { value: LiteralValue::Lambda { body, .. },
                        .. } => check_clauses(body, diagnostics),
        Term::Literal { .. } | Term::Identifier { .. } => {},
        Term::Application { function, argument, .. } => {
            check_clauses(function, diagnostics);
            check_clauses(argument, diagnostics);
        },
        Term::CaseOf { scrutinee, clauses, .. } => {
            check_clauses(scrutinee, diagnostics);
            let mut wildcard_seen = false;
            for clause in clauses {
                if wildcard_seen {
                    diagnostics.push(Diagnostic::warning("clause after '_' is unreachable".to_string(),
                                                         clause.line));
                }
                wildcard_seen |= clause.pattern.is_none();
                check_clauses(&clause.result, diagnostics);
            }
        },
        Term::IfElse { condition,
                       then_branch,
                       else_branch,
                       .. } => {
            check_clauses(condition, diagnostics);
            check_clauses(then_branch, diagnostics);
            check_clauses(else_branch, diagnostics);
        },
        Term::LetIn { bindings, body, .. } => {
            for binding in bindings {
                check_clauses(&binding.body, diagnostics);
            }
            check_clauses(body, diagnostics);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse_program;

    fn diagnostics(source: &str) -> Vec<Diagnostic> {
        validate(&parse_program(source).unwrap())
    }

    #[test]
    fn clean_program_has_no_diagnostics() {
        assert!(diagnostics("main = \\f.\\t. sin(f * t)\nosc = main").is_empty());
    }

    #[test]
    fn duplicates_are_errors() {
        let found = diagnostics("a = 1\nb = 2\na = 3");
        assert_eq!(found,
                   vec![Diagnostic { severity: Severity::Error,
                                     message:  "'a' is already defined on line 1".into(),
                                     line:     3, }]);
        assert!(has_errors(&found));
    }

    #[test]
    fn expressions_are_warnings() {
        let found = diagnostics("main = 1,\n2 + 2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_string(), "warning on line 2: expression has no effect");
        assert!(!has_errors(&found));
    }

    #[test]
    fn shadowed_pi_is_reported() {
        let found = diagnostics("pi = 3");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Warning);
    }

    #[test]
    fn clauses_after_wildcard_are_unreachable() {
        let found = diagnostics("main = \\f.\\t. case t of\n _ -> 0,\n 1 -> 1\n end");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 3);
    }

    #[test]
    fn entry_checks() {
        let program = parse_program("main = \\f.\\t. 0\nk = 4").unwrap();
        assert_eq!(check_entry(&program, "main"), None);
        assert_eq!(check_entry(&program, "k").map(|d| d.line), Some(2));
        assert!(check_entry(&program, "other").is_some());
    }

    #[test]
    fn evaluable_names_are_unique() {
        let program = parse_program("a = \\f.\\t. 0\na = \\f.\\t. 1").unwrap();
        assert_eq!(evaluable_definitions(&program), ["a"]);
    }
}
