//! Error types for Stencil operations.
//!
//! This module provides the main error type [`StencilError`] which wraps
//! the error conditions that can occur while converting a diagram.

use std::io;

use thiserror::Error;

use stencil_parser::error::ParseError;

/// The main error type for Stencil operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source
/// spans, together with the source text they point into. This is enough for
/// rich error reporting with source snippets.
#[derive(Debug, Error)]
pub enum StencilError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for StencilError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl StencilError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
