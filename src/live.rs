use std::{
    error::Error,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{
        parser::core::parse_program,
        validator::{Diagnostic, Severity, has_errors, validate},
    },
};

/// Why a source text was not installed.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The source did not lex or parse.
    Parse(ParseError),
    /// The source parsed but validation reported errors.
    Invalid(Vec<Diagnostic>),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Invalid(diagnostics) => {
                let errors: Vec<String> = diagnostics.iter()
                                                     .filter(|d| d.severity == Severity::Error)
                                                     .map(ToString::to_string)
                                                     .collect();
                write!(f, "{}", errors.join("\n"))
            },
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// Parses and validates `source`.
///
/// Warnings are logged and returned alongside the program.
///
/// # Errors
/// Returns [`LoadError::Parse`] for lexical and syntax errors and
/// [`LoadError::Invalid`] if validation reports any error.
pub fn load(source: &str) -> Result<(Program, Vec<Diagnostic>), LoadError> {
    let program = parse_program(source)?;
    let diagnostics = validate(&program);

    for diagnostic in &diagnostics {
        match diagnostic.severity {
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Error => log::error!("{diagnostic}"),
        }
    }
    if has_errors(&diagnostics) {
        return Err(LoadError::Invalid(diagnostics));
    }

    log::debug!("loaded {} definitions", program.definitions().count());
    Ok((program, diagnostics))
}

struct Installed {
    program:     Arc<Program>,
    diagnostics: Vec<Diagnostic>,
}

/// A program slot that can be replaced while other threads evaluate it.
///
/// Readers take a cheap [`Arc`] snapshot with [`LiveProgram::current`] and
/// evaluate against it without holding any lock. [`LiveProgram::reload`]
/// swaps in a new program only if it parses and validates cleanly; calls
/// already running keep the old program alive until they finish.
pub struct LiveProgram {
    slot: RwLock<Installed>,
}

impl LiveProgram {
    /// Loads the initial program.
    ///
    /// # Errors
    /// See [`load`].
    pub fn load(source: &str) -> Result<Self, LoadError> {
        let (program, diagnostics) = load(source)?;
        Ok(Self { slot: RwLock::new(Installed { program: Arc::new(program),
                                                diagnostics }) })
    }

    /// Replaces the installed program with `source`.
    ///
    /// On failure the previous program stays installed.
    ///
    /// # Errors
    /// See [`load`].
    pub fn reload(&self, source: &str) -> Result<(), LoadError> {
        let (program, diagnostics) = match load(source) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("reload refused, keeping previous program: {e}");
                return Err(e);
            },
        };

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Installed { program: Arc::new(program),
                            diagnostics };
        log::debug!("program reloaded");
        Ok(())
    }

    /// A snapshot of the installed program.
    #[must_use]
    pub fn current(&self) -> Arc<Program> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&slot.program)
    }

    /// Warnings reported for the installed program.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.diagnostics.clone()
    }
}
