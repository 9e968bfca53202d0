//! Export functionality for Stencil mappings.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing mapped diagrams into output formats. It is the final stage in the
//! Stencil processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! draw.io XML
//!     ↓ parse
//! Diagram (vertices, edges)
//!     ↓ map
//! Mapping (shapes, connects)
//!     ↓ export (this module)
//! Output package
//! ```
//!
//! # Available Backends
//!
//! - [`vsdx`] - Visio packages via [`vsdx::Package`] and [`vsdx::VsdxExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`StencilError::Export`] at the crate boundary.
//!
//! [`StencilError::Export`]: crate::StencilError::Export

/// VSDX export backend.
pub mod vsdx;

use std::io;

use thiserror::Error;

use stencil_core::shape::{MasterKind, ShapeId};

use crate::mapping::Mapping;

/// Abstraction for export backends.
pub trait Exporter {
    /// Exports a mapped diagram to the backend's output format.
    ///
    /// # Arguments
    ///
    /// * `mapping` - Shapes and connections to write.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the mapping refers to something the output
    /// cannot express, or if writing the output fails.
    fn export_mapping(&mut self, mapping: &Mapping) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("shape {shape} needs the `{}` master, which is not in the catalogue", kind.name_u())]
    UnknownMaster { shape: ShapeId, kind: MasterKind },

    #[error("relationship {id} in `{part}` targets `{target}`, which is not in the package")]
    DanglingRelationship {
        part: &'static str,
        id: &'static str,
        target: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
