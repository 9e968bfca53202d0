//! Accumulates the diagnostics of one document.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Gathers diagnostics so a document reports every duplicate id and numeric
/// fallback in one pass.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Fails with every collected diagnostic if any of them is an error.
    /// Otherwise each warning is logged and the document is accepted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.iter().any(|d| d.severity().is_error()) {
            return Err(ParseError::from(self.diagnostics));
        }

        for diagnostic in &self.diagnostics {
            let offset = diagnostic.labels().first().map(|label| label.span().start());
            warn!(code:? = diagnostic.code(), offset:? = offset; "{}", diagnostic.message());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_empty_collector_accepts() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_warnings_alone_are_accepted() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(
            Diagnostic::warning("cell id `a` is already defined").with_code(ErrorCode::E102),
        );
        collector.emit(Diagnostic::warning("cell has no `id` attribute and is skipped"));

        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_one_error_returns_everything() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(
            Diagnostic::warning("`x` value `ten` is not a valid number")
                .with_code(ErrorCode::E004)
                .with_label(Span::new(0..10), "in this element"),
        );
        collector.emit(Diagnostic::error("unclosed element `root`").with_code(ErrorCode::E002));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert!(err.diagnostics()[0].severity().is_warning());
        assert_eq!(err.diagnostics()[1].code(), Some(ErrorCode::E002));
    }
}
