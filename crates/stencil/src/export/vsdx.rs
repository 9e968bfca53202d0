//! Visio (VSDX) package export.
//!
//! A VSDX file is a ZIP archive of XML parts following the Open Packaging
//! Conventions. Stencil writes the minimal set of six parts:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels                      -> visio/document.xml
//! visio/document.xml               (one page, sized from PackageConfig)
//! visio/_rels/document.xml.rels    -> pages/page1.xml, masters/masters.xml
//! visio/masters/masters.xml        (the master catalogue)
//! visio/pages/page1.xml            (shapes and connects)
//! ```
//!
//! Entries are deflated and carry a fixed timestamp, so converting the same
//! diagram twice yields identical bytes.

mod page;
mod parts;
mod xml;

pub use parts::{
    CONTENT_TYPES_PATH, DOCUMENT_PATH, DOCUMENT_RELS_PATH, MASTERS_PATH, PACKAGE_RELS_PATH,
    PAGE_PATH,
};

use std::io::{Cursor, Seek, Write};

use indexmap::IndexMap;
use log::{debug, info};
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

use stencil_core::{geometry::PageSize, shape::MasterCatalogue};

use super::{Error, Exporter};
use crate::mapping::Mapping;

/// Settings for the fixed parts of a package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageConfig {
    page: PageSize,
    masters: MasterCatalogue,
}

impl PackageConfig {
    /// Creates a package configuration.
    ///
    /// # Arguments
    ///
    /// * `page` - Page size declared in the document descriptor.
    /// * `masters` - Masters written to the catalogue and referenced by shapes.
    pub fn new(page: PageSize, masters: MasterCatalogue) -> Self {
        Self { page, masters }
    }

    pub fn page(&self) -> PageSize {
        self.page
    }

    pub fn masters(&self) -> &MasterCatalogue {
        &self.masters
    }
}

/// The parts of a package, in archive order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    parts: IndexMap<&'static str, Vec<u8>>,
}

impl Package {
    /// Renders every part of the package for `mapping`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMaster`] if a shape has no master in the
    /// catalogue, or [`Error::DanglingRelationship`] if a relationship
    /// names a part that was not rendered.
    pub fn build(mapping: &Mapping, config: &PackageConfig) -> Result<Self, Error> {
        let mut rendered = IndexMap::new();
        rendered.insert(CONTENT_TYPES_PATH, parts::CONTENT_TYPES_XML.as_bytes().to_vec());
        rendered.insert(
            PACKAGE_RELS_PATH,
            parts::relationships_xml(&parts::PACKAGE_RELATIONSHIPS)?,
        );
        rendered.insert(DOCUMENT_PATH, parts::document_xml(config.page())?);
        rendered.insert(
            DOCUMENT_RELS_PATH,
            parts::relationships_xml(&parts::DOCUMENT_RELATIONSHIPS)?,
        );
        rendered.insert(MASTERS_PATH, parts::masters_xml(config.masters())?);
        rendered.insert(PAGE_PATH, page::page_xml(mapping, config.masters())?);

        parts::validate_relationships(
            &rendered,
            &[parts::PACKAGE_RELATIONSHIPS, parts::DOCUMENT_RELATIONSHIPS],
        )?;

        debug!(parts = rendered.len(); "Package parts rendered");
        Ok(Self { parts: rendered })
    }

    /// Part paths in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parts.keys().copied()
    }

    /// Returns the content of the part at `path`.
    pub fn part(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Writes the package as a ZIP archive into `sink` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Zip`] or [`Error::Io`] if the archive cannot be
    /// written.
    pub fn write_to<W: Write + Seek>(&self, sink: W) -> Result<W, Error> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(sink);
        for (path, content) in &self.parts {
            zip.start_file(*path, options)?;
            zip.write_all(content)?;
        }
        Ok(zip.finish()?)
    }

    /// Serializes the package into one contiguous buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Zip`] if the archive cannot be written.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let cursor = self.write_to(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }
}

/// Exports mappings as VSDX archives into a sink.
#[derive(Debug)]
pub struct VsdxExporter<W> {
    sink: W,
    config: PackageConfig,
}

impl<W: Write + Seek> VsdxExporter<W> {
    pub fn new(sink: W, config: PackageConfig) -> Self {
        Self { sink, config }
    }

    /// Returns the sink, consuming the exporter.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write + Seek> Exporter for VsdxExporter<W> {
    fn export_mapping(&mut self, mapping: &Mapping) -> Result<(), Error> {
        let package = Package::build(mapping, &self.config)?;
        package.write_to(&mut self.sink)?;
        info!(
            parts = package.len(),
            shapes = mapping.shapes().len(),
            connects = mapping.connects().len();
            "VSDX package written"
        );
        Ok(())
    }
}
