//! Fixed package parts and the relationships between them.

use std::io;

use indexmap::IndexMap;

use stencil_core::{geometry::PageSize, shape::MasterCatalogue};

use super::xml::{self, XmlWriter};
use crate::export::Error;

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const PACKAGE_RELS_PATH: &str = "_rels/.rels";
pub const DOCUMENT_PATH: &str = "visio/document.xml";
pub const DOCUMENT_RELS_PATH: &str = "visio/_rels/document.xml.rels";
pub const MASTERS_PATH: &str = "visio/masters/masters.xml";
pub const PAGE_PATH: &str = "visio/pages/page1.xml";

const VISIO_NS: &str = "http://schemas.microsoft.com/visio/2010/drawing";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub(super) const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/vnd.ms-visio.xml"/>
    <Override PartName="/visio/pages/page1.xml" ContentType="application/vnd.ms-visio.page+xml"/>
    <Override PartName="/visio/masters/masters.xml" ContentType="application/vnd.ms-visio.masters+xml"/>
    <Override PartName="/visio/document.xml" ContentType="application/vnd.ms-visio.drawing.main+xml"/>
</Types>
"#;

/// An OPC relationship from one part to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Relationship {
    pub id: &'static str,
    pub rel_type: &'static str,
    /// Target path, relative to the folder of the owning part.
    pub target: &'static str,
}

/// A relationships part together with the part whose relationships it lists.
#[derive(Debug, Clone, Copy)]
pub(super) struct RelationshipSet {
    /// Path of the `.rels` part itself.
    pub path: &'static str,
    /// Folder that relationship targets are resolved against.
    pub base: &'static str,
    pub relationships: &'static [Relationship],
}

pub(super) const PACKAGE_RELATIONSHIPS: RelationshipSet = RelationshipSet {
    path: PACKAGE_RELS_PATH,
    base: "",
    relationships: &[Relationship {
        id: "rId1",
        rel_type: "http://schemas.microsoft.com/visio/2010/relationships/document",
        target: "visio/document.xml",
    }],
};

pub(super) const DOCUMENT_RELATIONSHIPS: RelationshipSet = RelationshipSet {
    path: DOCUMENT_RELS_PATH,
    base: "visio/",
    relationships: &[
        Relationship {
            id: "rId2",
            rel_type: "http://schemas.microsoft.com/visio/2010/relationships/page",
            target: "pages/page1.xml",
        },
        Relationship {
            id: "rId1",
            rel_type: "http://schemas.microsoft.com/visio/2010/relationships/masters",
            target: "masters/masters.xml",
        },
    ],
};

/// Renders a relationships part.
pub(super) fn relationships_xml(set: &RelationshipSet) -> io::Result<Vec<u8>> {
    let mut writer = xml::indented();
    xml::write_declaration(&mut writer)?;
    xml::write_start(&mut writer, "Relationships", &[("xmlns", RELATIONSHIPS_NS)])?;
    for rel in set.relationships {
        xml::write_empty(
            &mut writer,
            "Relationship",
            &[("Id", rel.id), ("Type", rel.rel_type), ("Target", rel.target)],
        )?;
    }
    xml::write_end(&mut writer, "Relationships")?;
    Ok(xml::finish(writer))
}

/// Renders the document descriptor declaring the single page.
pub(super) fn document_xml(page: PageSize) -> io::Result<Vec<u8>> {
    let mut writer = xml::indented();
    xml::write_declaration(&mut writer)?;
    xml::write_start(&mut writer, "VisioDocument", &[("xmlns", VISIO_NS)])?;
    xml::write_start(&mut writer, "Pages", &[])?;
    xml::write_start(
        &mut writer,
        "Page",
        &[("ID", "0"), ("NameU", "Page-1"), ("ViewScale", "1"), ("IsBackground", "0")],
    )?;
    xml::write_start(&mut writer, "PageSheet", &[])?;
    write_inch_cell(&mut writer, "PageWidth", page.width())?;
    write_inch_cell(&mut writer, "PageHeight", page.height())?;
    xml::write_end(&mut writer, "PageSheet")?;
    xml::write_end(&mut writer, "Page")?;
    xml::write_end(&mut writer, "Pages")?;
    xml::write_end(&mut writer, "VisioDocument")?;
    Ok(xml::finish(writer))
}

fn write_inch_cell(writer: &mut XmlWriter, name: &str, value: f64) -> io::Result<()> {
    let value = value.to_string();
    xml::write_empty(writer, "Cell", &[("N", name), ("V", value.as_str()), ("U", "IN")])
}

/// Renders the masters catalogue.
pub(super) fn masters_xml(masters: &MasterCatalogue) -> io::Result<Vec<u8>> {
    let mut writer = xml::indented();
    xml::write_declaration(&mut writer)?;
    xml::write_start(&mut writer, "Masters", &[("xmlns", VISIO_NS)])?;
    for master in masters.iter() {
        let id = master.id().to_string();
        xml::write_empty(
            &mut writer,
            "Master",
            &[
                ("ID", id.as_str()),
                ("UniqueID", master.unique_id()),
                ("NameU", master.name_u()),
            ],
        )?;
    }
    xml::write_end(&mut writer, "Masters")?;
    Ok(xml::finish(writer))
}

/// Checks that every relationship target names a part in `parts`.
///
/// # Errors
///
/// Returns [`Error::DanglingRelationship`] for the first target that
/// resolves to a missing part.
pub(super) fn validate_relationships(
    parts: &IndexMap<&'static str, Vec<u8>>,
    sets: &[RelationshipSet],
) -> Result<(), Error> {
    for set in sets {
        for rel in set.relationships {
            let resolved = format!("{}{}", set.base, rel.target);
            if !parts.contains_key(resolved.as_str()) {
                return Err(Error::DanglingRelationship {
                    part: set.path,
                    id: rel.id,
                    target: resolved,
                });
            }
        }
    }
    Ok(())
}
