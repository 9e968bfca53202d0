//! Small helpers over the `quick-xml` writer.

use std::io::{self, Cursor};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

pub(super) type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Creates a writer that indents nested elements.
pub(super) fn indented() -> XmlWriter {
    Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4)
}

/// Creates a writer that emits no whitespace between elements.
pub(super) fn compact() -> XmlWriter {
    Writer::new(Cursor::new(Vec::new()))
}

pub(super) fn finish(writer: XmlWriter) -> Vec<u8> {
    writer.into_inner().into_inner()
}

pub(super) fn write_declaration(writer: &mut XmlWriter) -> io::Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
}

pub(super) fn write_start(
    writer: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
) -> io::Result<()> {
    writer.write_event(Event::Start(element(name, attrs)))
}

pub(super) fn write_empty(
    writer: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
) -> io::Result<()> {
    writer.write_event(Event::Empty(element(name, attrs)))
}

pub(super) fn write_end(writer: &mut XmlWriter, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

/// Writes `<name>text</name>`, escaping only `&`, `<` and `>` in the text.
pub(super) fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> io::Result<()> {
    write_start(writer, name, &[])?;
    let escaped = quick_xml::escape::partial_escape(text);
    writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
    write_end(writer, name)
}

/// Writes a Visio `<Cell N=".." V=".."/>` element.
pub(super) fn write_cell(writer: &mut XmlWriter, name: &str, value: f64) -> io::Result<()> {
    let value = value.to_string();
    write_empty(writer, "Cell", &[("N", name), ("V", value.as_str())])
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    elem
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(write: impl FnOnce(&mut XmlWriter) -> io::Result<()>) -> String {
        let mut writer = compact();
        write(&mut writer).unwrap();
        String::from_utf8(finish(writer)).unwrap()
    }

    #[test]
    fn test_text_escapes_markup_only() {
        let xml = render(|w| write_text_element(w, "Text", r#"a < b & "c" > 'd'"#));
        assert_eq!(xml, r#"<Text>a &lt; b &amp; "c" &gt; 'd'</Text>"#);
    }

    #[test]
    fn test_empty_text_keeps_both_tags() {
        assert_eq!(render(|w| write_text_element(w, "Text", "")), "<Text></Text>");
    }

    #[test]
    fn test_cell_uses_shortest_float_form() {
        let xml = render(|w| {
            write_cell(w, "PinX", 0.34375)?;
            write_cell(w, "BeginX", 0.0)
        });
        assert_eq!(xml, r#"<Cell N="PinX" V="0.34375"/><Cell N="BeginX" V="0"/>"#);
    }
}
