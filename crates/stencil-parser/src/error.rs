//! Diagnostics produced while reading a draw.io document.
//!
//! Each problem is a [`Diagnostic`] with a severity, an [`ErrorCode`], byte
//! spans into the source and optional help. Warnings are logged and the
//! document is still converted; a single error turns the whole collection
//! into a [`ParseError`].
//!
//! ```
//! # use stencil_parser::{Span, error::{Diagnostic, ErrorCode}};
//! let diag = Diagnostic::warning("cell id `a` is already defined")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(100..120), "skipped duplicate")
//!     .with_secondary_label(Span::new(50..70), "first definition, kept");
//!
//! assert!(diag.severity().is_warning());
//! assert_eq!(diag.to_string(), "warning[E102]: cell id `a` is already defined");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
