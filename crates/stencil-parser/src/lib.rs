//! # Stencil Parser
//!
//! Parser for draw.io diagram documents. This crate turns the text of a
//! `.drawio` file (or a bare `mxGraphModel` document) into the
//! [`stencil_core::model::Diagram`] graph the converter maps onto Visio
//! shapes.
//!
//! ## Usage
//!
//! ```
//! # use stencil_parser::{parse, ParseConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <mxGraphModel pageWidth="800" pageHeight="600">
//!           <root>
//!             <mxCell id="0"/>
//!             <mxCell id="1" parent="0"/>
//!             <mxCell id="a" value="Start" style="ellipse;" vertex="1" parent="1">
//!               <mxGeometry x="10" y="10" width="80" height="40" as="geometry"/>
//!             </mxCell>
//!           </root>
//!         </mxGraphModel>
//!     "#;
//!
//!     let diagram = parse(source, ParseConfig::default())?;
//!     assert_eq!(diagram.vertices().count(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;

mod config;
mod payload;
mod reader;
#[cfg(test)]
mod reader_tests;
mod span;

pub use config::ParseConfig;
pub use span::Span;

use log::info;

use stencil_core::model::Diagram;

use error::ParseError;

/// Parse draw.io source text into a diagram.
///
/// Cells are returned in document order. Missing geometry attributes take
/// their defaults (x=0, y=0, width=120, height=60) and missing canvas
/// dimensions take those of `config`; unusable numbers are logged as
/// warnings and replaced the same way.
///
/// # Arguments
///
/// * `source` - The full document text
/// * `config` - Fallback values used while reading
///
/// # Errors
///
/// Returns a [`ParseError`] when the text is not well-formed XML, contains
/// no `mxGraphModel`, holds a compressed diagram that cannot be decoded, or
/// has an attribute value with a character XML does not allow. Cells
/// without an id, and repeats of an id already seen, are skipped with a
/// warning.
pub fn parse(source: &str, config: ParseConfig) -> Result<Diagram, ParseError> {
    info!(bytes = source.len(); "Parsing draw.io document");
    reader::read_document(source, &config)
}
