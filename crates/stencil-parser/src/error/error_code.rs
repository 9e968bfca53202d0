//! Error codes for the Stencil diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - XML well-formedness
//! - `E1xx` - Graph model structure
//! - `E2xx` - Compressed diagram payloads

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // XML Errors (E0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The reader hit a syntax error or a mismatched end tag.
    E001,

    /// Unclosed element.
    ///
    /// The document ended while an element was still open.
    E002,

    /// Invalid attribute.
    ///
    /// An attribute is malformed, or its value holds an unknown entity or a
    /// character XML does not allow.
    E003,

    /// Invalid number.
    ///
    /// A numeric attribute could not be parsed and its default was used
    /// instead. Reported as a warning.
    E004,

    // =========================================================================
    // Graph Model Errors (E1xx)
    // =========================================================================
    /// Missing graph model.
    ///
    /// The document contains no `mxGraphModel` element, either directly or
    /// inside a `<diagram>` payload.
    E100,

    /// Missing cell id.
    ///
    /// A vertex or edge cell has no `id` attribute. Reported as a warning and
    /// the cell is skipped.
    E101,

    /// Duplicate cell id.
    ///
    /// Two cells in the same graph model share an `id`. Reported as a
    /// warning; the first definition is kept.
    E102,

    // =========================================================================
    // Payload Errors (E2xx)
    // =========================================================================
    /// Invalid base64 payload.
    E200,

    /// Invalid deflate stream.
    E201,

    /// Invalid payload text.
    ///
    /// The inflated payload is not valid UTF-8 or percent-encoding.
    E202,

    /// Invalid embedded graph model.
    ///
    /// The decoded payload is not a well-formed `mxGraphModel` document.
    E203,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // XML errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            // Graph model errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            // Payload errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // XML errors
            ErrorCode::E001 => "malformed xml",
            ErrorCode::E002 => "unclosed element",
            ErrorCode::E003 => "invalid attribute",
            ErrorCode::E004 => "invalid number",
            // Graph model errors
            ErrorCode::E100 => "missing graph model",
            ErrorCode::E101 => "missing cell id",
            ErrorCode::E102 => "duplicate cell id",
            // Payload errors
            ErrorCode::E200 => "invalid base64 payload",
            ErrorCode::E201 => "invalid deflate stream",
            ErrorCode::E202 => "invalid payload text",
            ErrorCode::E203 => "invalid embedded graph model",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "unclosed element");
        assert_eq!(ErrorCode::E102.description(), "duplicate cell id");
        assert_eq!(ErrorCode::E200.description(), "invalid base64 payload");
    }
}
