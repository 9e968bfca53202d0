//! The error returned when a document cannot be converted.

use std::fmt;

use crate::error::Diagnostic;

/// Shorthand for reader steps that fail with a single diagnostic.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Every diagnostic of a rejected document, warnings included, in the order
/// they were found.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The first diagnostic with error severity.
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.severity().is_error())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(shown) = self.first_error().or(self.diagnostics.first()) else {
            return f.write_str("invalid draw.io document");
        };
        write!(f, "{shown}")?;
        match self.diagnostics.len() {
            0 | 1 => Ok(()),
            2 => write!(f, " (and 1 more diagnostic)"),
            n => write!(f, " (and {} more diagnostics)", n - 1),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::from(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
