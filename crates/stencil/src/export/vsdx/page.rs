//! Rendering of the page contents part.

use log::trace;

use stencil_core::shape::{ConnectRecord, MasterCatalogue, ShapeBody, ShapeRecord};

use super::xml::{self, XmlWriter};
use crate::{export::Error, mapping::Mapping};

const VISIO_NS: &str = "http://schemas.microsoft.com/visio/2010/drawing";

/// Renders the `PageContents` of a mapping.
///
/// Shapes are written in id order, followed by the connections in the order
/// they were generated.
///
/// # Errors
///
/// Returns [`Error::UnknownMaster`] if a shape's kind has no master in
/// `masters`.
pub(super) fn page_xml(mapping: &Mapping, masters: &MasterCatalogue) -> Result<Vec<u8>, Error> {
    let mut writer = xml::compact();
    xml::write_declaration(&mut writer)?;
    xml::write_start(&mut writer, "PageContents", &[("xmlns", VISIO_NS)])?;

    xml::write_start(&mut writer, "Shapes", &[])?;
    for shape in mapping.shapes() {
        write_shape(&mut writer, shape, masters)?;
    }
    xml::write_end(&mut writer, "Shapes")?;

    xml::write_start(&mut writer, "Connects", &[])?;
    for connect in mapping.connects() {
        let from_sheet = connect.from_sheet().to_string();
        let to_sheet = connect.to_sheet().to_string();
        xml::write_empty(
            &mut writer,
            "Connect",
            &[
                ("FromSheet", from_sheet.as_str()),
                ("FromCell", connect.from_end().cell_name()),
                ("ToSheet", to_sheet.as_str()),
                ("ToCell", ConnectRecord::TO_CELL),
            ],
        )?;
    }
    xml::write_end(&mut writer, "Connects")?;

    xml::write_end(&mut writer, "PageContents")?;
    Ok(xml::finish(writer))
}

fn write_shape(
    writer: &mut XmlWriter,
    shape: &ShapeRecord,
    masters: &MasterCatalogue,
) -> Result<(), Error> {
    let master = masters
        .for_kind(shape.kind())
        .ok_or(Error::UnknownMaster {
            shape: shape.id(),
            kind: shape.kind(),
        })?;
    trace!(shape = shape.id().get(), master = master.id(); "Writing shape");

    let id = shape.id().to_string();
    let master_id = master.id().to_string();
    xml::write_start(
        writer,
        "Shape",
        &[("ID", id.as_str()), ("Type", "Shape"), ("Master", master_id.as_str())],
    )?;

    match shape.body() {
        ShapeBody::Placed { placement, text } => {
            xml::write_cell(writer, "PinX", placement.pin_x())?;
            xml::write_cell(writer, "PinY", placement.pin_y())?;
            xml::write_cell(writer, "Width", placement.width())?;
            xml::write_cell(writer, "Height", placement.height())?;
            xml::write_text_element(writer, "Text", text)?;
        }
        ShapeBody::Connector { begin, end } => {
            xml::write_cell(writer, "BeginX", begin.x())?;
            xml::write_cell(writer, "BeginY", begin.y())?;
            xml::write_cell(writer, "EndX", end.x())?;
            xml::write_cell(writer, "EndY", end.y())?;
        }
    }

    xml::write_end(writer, "Shape")?;
    Ok(())
}
