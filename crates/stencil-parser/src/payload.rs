//! Decoding of compressed `<diagram>` payloads.
//!
//! draw.io stores each page either as a literal `mxGraphModel` child of
//! `<diagram>` or as text: the model serialized, percent-encoded, raw
//! deflated and finally base64 encoded. This module reverses that chain.

use std::io::Read;

use base64::{Engine, engine::general_purpose::STANDARD};
use flate2::read::DeflateDecoder;
use percent_encoding::percent_decode_str;

use crate::{
    error::{Diagnostic, ErrorCode, Result as DiagnosticResult},
    span::Span,
};

/// Decodes a compressed diagram payload into graph model XML.
///
/// Whitespace inside the payload is ignored, as pretty-printers are free to
/// wrap long base64 lines.
///
/// # Errors
///
/// Returns a diagnostic labelled at `span` when any stage of the chain
/// fails: `E200` for base64, `E201` for deflate and `E202` for text decoding.
pub(crate) fn decode(payload: &str, span: Span) -> DiagnosticResult<String> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    let deflated = STANDARD.decode(compact).map_err(|err| {
        payload_error(ErrorCode::E200, format!("diagram payload is not base64: {err}"), span)
    })?;

    let mut inflated = Vec::new();
    DeflateDecoder::new(deflated.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|err| {
            payload_error(
                ErrorCode::E201,
                format!("diagram payload is not a deflate stream: {err}"),
                span,
            )
        })?;

    let encoded = std::str::from_utf8(&inflated).map_err(|err| {
        payload_error(
            ErrorCode::E202,
            format!("inflated diagram payload is not UTF-8: {err}"),
            span,
        )
    })?;

    let decoded = percent_decode_str(encoded).decode_utf8().map_err(|err| {
        payload_error(
            ErrorCode::E202,
            format!("percent-decoded diagram payload is not UTF-8: {err}"),
            span,
        )
    })?;

    Ok(decoded.into_owned())
}

fn payload_error(code: ErrorCode, message: String, span: Span) -> Diagnostic {
    Diagnostic::error(message)
        .with_code(code)
        .with_label(span, "in this diagram")
        .with_help("re-save the file from draw.io, or disable compression under File > Properties")
}
