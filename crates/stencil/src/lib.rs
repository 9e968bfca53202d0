//! Stencil - Convert draw.io diagrams into Visio (VSDX) packages.
//!
//! Parsing, mapping and packaging for draw.io documents. Vertices become
//! Rectangle, Ellipse or Rhombus shapes, edges become dynamic connectors
//! glued to the shapes they join, and the result is written as a minimal
//! single-page VSDX archive.

pub mod config;
pub mod export;
pub mod mapping;

mod error;

pub use stencil_core::{geometry, model, shape};

pub use error::StencilError;

use std::io::{Cursor, Seek, Write};

use log::{debug, info, trace};

use stencil_core::{model::Diagram, shape::MasterCatalogue};
use stencil_parser::ParseConfig;

use config::AppConfig;
use export::{
    Exporter,
    vsdx::{Package, PackageConfig, VsdxExporter},
};
use mapping::{Mapper, Mapping, StyleClassifier};

/// Builder for converting draw.io diagrams.
///
/// This provides an API for processing diagrams through the parsing,
/// mapping and packaging stages.
///
/// # Examples
///
/// ```rust
/// use stencil::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
///     <mxGraphModel>
///       <root>
///         <mxCell id="a" value="Hello" vertex="1">
///           <mxGeometry x="0" y="0" width="120" height="60" as="geometry"/>
///         </mxCell>
///       </root>
///     </mxGraphModel>
/// "#;
///
/// // With custom config
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse, map and package in separate steps
/// let diagram = builder.parse(source).expect("Failed to parse");
/// let mapping = builder.map(&diagram).expect("Failed to map");
/// let vsdx = builder.render_vsdx(&mapping).expect("Failed to render");
///
/// // Or in one go with the default config
/// let same = DiagramBuilder::default().convert(source).expect("Failed to convert");
/// assert_eq!(vsdx, same);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including page, canvas and
    ///   mapping settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse draw.io source text into a diagram.
    ///
    /// # Arguments
    ///
    /// * `source` - The full text of a `.drawio` file or a bare graph model
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Parse` for malformed XML, a missing graph
    /// model or an undecodable compressed diagram, and
    /// `StencilError::Config` for an invalid canvas configuration.
    pub fn parse(&self, source: &str) -> Result<Diagram, StencilError> {
        info!("Parsing diagram");

        let canvas = self.config.canvas().canvas().map_err(StencilError::Config)?;
        let diagram = stencil_parser::parse(source, ParseConfig::new(canvas))
            .map_err(|err| StencilError::new_parse_error(err, source))?;

        debug!(cells = diagram.cells().len(); "Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Map a diagram onto Visio shapes and connections.
    ///
    /// Cells that cannot be mapped are listed in [`Mapping::skipped`]
    /// instead of failing the conversion.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Config` for an invalid page size or style rule.
    pub fn map(&self, diagram: &Diagram) -> Result<Mapping, StencilError> {
        info!(cells = diagram.cells().len(); "Mapping diagram");

        let page = self.config.page().size().map_err(StencilError::Config)?;
        let rules = self
            .config
            .mapping()
            .style_rules()
            .map_err(StencilError::Config)?;

        Ok(Mapper::new(page, StyleClassifier::new(rules)).map(diagram))
    }

    /// Render the parts of the VSDX package for a mapping.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Export` if the mapping uses a master missing
    /// from the catalogue.
    pub fn package(&self, mapping: &Mapping) -> Result<Package, StencilError> {
        Ok(Package::build(mapping, &self.package_config()?)?)
    }

    /// Render a mapping to the bytes of a VSDX archive.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Export` if the package cannot be assembled or
    /// written.
    pub fn render_vsdx(&self, mapping: &Mapping) -> Result<Vec<u8>, StencilError> {
        let cursor = self.write_vsdx(mapping, Cursor::new(Vec::new()))?;
        let bytes = cursor.into_inner();

        info!(bytes = bytes.len(); "VSDX rendered successfully");
        Ok(bytes)
    }

    /// Write a mapping as a VSDX archive into `sink` and return the sink.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Export` if the package cannot be assembled or
    /// written.
    pub fn write_vsdx<W: Write + Seek>(
        &self,
        mapping: &Mapping,
        sink: W,
    ) -> Result<W, StencilError> {
        let mut exporter = VsdxExporter::new(sink, self.package_config()?);
        exporter.export_mapping(mapping)?;
        Ok(exporter.into_inner())
    }

    /// Convert draw.io source text straight into VSDX bytes.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Self::parse`], [`Self::map`] or
    /// [`Self::render_vsdx`].
    pub fn convert(&self, source: &str) -> Result<Vec<u8>, StencilError> {
        let diagram = self.parse(source)?;
        let mapping = self.map(&diagram)?;
        self.render_vsdx(&mapping)
    }

    fn package_config(&self) -> Result<PackageConfig, StencilError> {
        let page = self.config.page().size().map_err(StencilError::Config)?;
        Ok(PackageConfig::new(page, MasterCatalogue::standard()))
    }
}
