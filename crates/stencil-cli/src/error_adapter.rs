//! Rendering of [`StencilError`] through miette.
//!
//! A parse failure can carry several diagnostics (an unclosed element plus the
//! numeric fallbacks seen before it, say). Each one becomes its own [`Report`]
//! with a snippet of the draw.io source. Every other error kind becomes a
//! single report without source.

use std::{error::Error, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use stencil::StencilError;
use stencil_parser::{Span, error::Diagnostic};

/// One renderable error or warning.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: Option<String>,
    severity: Severity,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    src: Option<&'a str>,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Report<'a> {
    fn from_diagnostic(diag: &Diagnostic, src: &'a str) -> Self {
        let severity = if diag.severity().is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let span = clamp_span(label.span(), src);
                let message = Some(label.message().to_string());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            code: diag.code().map(|code| code.to_string()),
            severity,
            help: diag.help().map(str::to_string),
            labels,
            src: Some(src),
            cause: None,
        }
    }

    fn from_error(err: &'a StencilError) -> Self {
        let (code, help) = match err {
            StencilError::Io(_) => ("stencil::io", None),
            StencilError::Parse { .. } => ("stencil::parse", None),
            StencilError::Config(_) => (
                "stencil::config",
                Some("check the file passed with --config, or stencil/config.toml"),
            ),
            StencilError::Export(_) => ("stencil::export", None),
        };

        Self {
            message: err.to_string(),
            code: Some(code.to_string()),
            severity: Severity::Error,
            help: help.map(str::to_string),
            labels: Vec::new(),
            src: None,
            cause: err.source(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Report<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'b>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

/// Splits an error into the reports the CLI prints, one per diagnostic.
pub fn to_reports(err: &StencilError) -> Vec<Report<'_>> {
    match err {
        StencilError::Parse { err: parse_err, src } if !parse_err.diagnostics().is_empty() => {
            parse_err
                .diagnostics()
                .iter()
                .map(|diag| Report::from_diagnostic(diag, src))
                .collect()
        }
        _ => vec![Report::from_error(err)],
    }
}

/// Malformed-XML positions can point one byte past the end of the input.
fn clamp_span(span: Span, src: &str) -> SourceSpan {
    let start = span.start().min(src.len());
    let end = span.end().clamp(start, src.len());
    SourceSpan::new(start.into(), end - start)
}
