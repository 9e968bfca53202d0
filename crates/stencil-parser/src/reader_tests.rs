//! Unit tests for the draw.io document reader.
//!
//! These tests cover each document layout draw.io produces, attribute
//! defaults, and the diagnostics raised for unusable input.

use stencil_core::{
    geometry::{Canvas, PixelRect},
    model::{Cell, Diagram},
};

use crate::{ParseConfig, error::ErrorCode, parse};

/// Helper to parse a document that is expected to be valid
fn parse_ok(source: &str) -> Diagram {
    match parse(source, ParseConfig::default()) {
        Ok(diagram) => diagram,
        Err(err) => panic!("Expected parsing to succeed, but got error: {err}"),
    }
}

/// Helper to parse a document that is expected to fail, returning its codes
fn parse_err_codes(source: &str) -> Vec<ErrorCode> {
    match parse(source, ParseConfig::default()) {
        Ok(_) => panic!("Expected parsing to fail, but it succeeded"),
        Err(err) => err.diagnostics().iter().filter_map(|d| d.code()).collect(),
    }
}

/// Wraps cells in a bare graph model with the two structural root cells
fn model(cells: &str) -> String {
    format!(
        r#"<mxGraphModel><root><mxCell id="0"/><mxCell id="1" parent="0"/>{cells}</root></mxGraphModel>"#
    )
}

#[test]
fn test_bare_model_with_vertices_and_edge() {
    let diagram = parse_ok(&model(
        r#"
        <mxCell id="a" value="A" vertex="1" parent="1">
          <mxGeometry x="10" y="20" width="30" height="40" as="geometry"/>
        </mxCell>
        <mxCell id="b" value="B" style="ellipse;whiteSpace=wrap;" vertex="1" parent="1">
          <mxGeometry x="100" y="20" width="30" height="40" as="geometry"/>
        </mxCell>
        <mxCell id="e" edge="1" source="a" target="b" parent="1">
          <mxGeometry relative="1" as="geometry"/>
        </mxCell>
        "#,
    ));

    let ids: Vec<_> = diagram.cells().iter().map(Cell::id).collect();
    assert_eq!(ids, ["a", "b", "e"]);

    let vertices: Vec<_> = diagram.vertices().collect();
    assert_eq!(vertices[0].text(), "A");
    assert_eq!(vertices[0].style(), "");
    assert_eq!(
        vertices[0].geometry(),
        Some(PixelRect::new(10.0, 20.0, 30.0, 40.0))
    );
    assert_eq!(vertices[1].style(), "ellipse;whiteSpace=wrap;");

    let edge = diagram.edges().next().expect("edge should be parsed");
    assert_eq!(edge.source(), Some("a"));
    assert_eq!(edge.target(), Some("b"));
}

#[test]
fn test_structural_cells_are_not_cells() {
    let diagram = parse_ok(&model(""));
    assert!(diagram.is_empty());
}

#[test]
fn test_missing_attributes_use_defaults() {
    let diagram = parse_ok(&model(
        r#"<mxCell id="a" vertex="1"><mxGeometry as="geometry"/></mxCell>"#,
    ));

    let vertex = diagram.vertices().next().unwrap();
    assert_eq!(vertex.geometry(), Some(PixelRect::default()));
    assert_eq!(vertex.style(), "");
    assert_eq!(vertex.text(), "");
    assert_eq!(diagram.canvas(), Canvas::default());
}

#[test]
fn test_vertex_without_geometry_element() {
    let diagram = parse_ok(&model(r#"<mxCell id="a" vertex="1"/>"#));

    let vertex = diagram.vertices().next().unwrap();
    assert_eq!(vertex.geometry(), None);
}

#[test]
fn test_canvas_is_read_from_graph_model() {
    let diagram =
        parse_ok(r#"<mxGraphModel pageWidth="850" pageHeight="1100"><root/></mxGraphModel>"#);
    assert_eq!(diagram.canvas(), Canvas::new(850.0, 1100.0).unwrap());
}

#[test]
fn test_unusable_canvas_falls_back_per_dimension() {
    let diagram =
        parse_ok(r#"<mxGraphModel pageWidth="wide" pageHeight="600"><root/></mxGraphModel>"#);
    assert_eq!(diagram.canvas(), Canvas::new(1920.0, 600.0).unwrap());

    let diagram = parse_ok(r#"<mxGraphModel pageWidth="800" pageHeight="0"/>"#);
    assert_eq!(diagram.canvas(), Canvas::new(800.0, 1080.0).unwrap());
}

#[test]
fn test_configured_default_canvas() {
    let config = ParseConfig::new(Canvas::new(640.0, 480.0).unwrap());
    let diagram = parse("<mxGraphModel><root/></mxGraphModel>", config).unwrap();
    assert_eq!(diagram.canvas(), Canvas::new(640.0, 480.0).unwrap());
}

#[test]
fn test_unusable_geometry_number_falls_back() {
    let diagram = parse_ok(&model(
        r#"<mxCell id="a" vertex="1"><mxGeometry x="ten" y="NaN" width="50" as="geometry"/></mxCell>"#,
    ));

    let geometry = diagram.vertices().next().unwrap().geometry().unwrap();
    assert_eq!(geometry, PixelRect::new(0.0, 0.0, 50.0, 60.0));
}

#[test]
fn test_entities_in_values_are_unescaped() {
    let diagram = parse_ok(&model(
        r#"<mxCell id="a" value="R&amp;D &lt;core&gt;" vertex="1"><mxGeometry as="geometry"/></mxCell>"#,
    ));
    assert_eq!(diagram.vertices().next().unwrap().text(), "R&D <core>");
}

#[test]
fn test_mxfile_with_inline_model() {
    let diagram = parse_ok(
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <mxfile host="app.diagrams.net">
          <diagram id="p1" name="Page-1">
            <mxGraphModel pageWidth="1000" pageHeight="500">
              <root>
                <mxCell id="0"/>
                <mxCell id="1" parent="0"/>
                <mxCell id="a" vertex="1" parent="1"><mxGeometry as="geometry"/></mxCell>
              </root>
            </mxGraphModel>
          </diagram>
        </mxfile>"#,
    );

    assert_eq!(diagram.canvas(), Canvas::new(1000.0, 500.0).unwrap());
    assert_eq!(diagram.vertices().count(), 1);
}

#[test]
fn test_mxfile_with_compressed_payload() {
    let diagram = parse_ok(
        r#"<mxfile><diagram id="p1" name="Page-1">
            jVFBDsIgEHwNdwrxA9aqF88m3mrYFBIQQqlSXy+6QHtp4ondmZ3dzEB4a+LJ905erABNGHX9AFclgiT8QBhrKKXpycQZ1CADMjskeEd4660NWJnYgv7uUQLHUH3cYJuy28Mj/CN4o+DZ6wkQuSnnQCA8hlln2Etr7tNI+D4rwAeIm1eb6iXlAdZA8HMaiTUFlMzFO7avJShWRuQqo6rrRwSGunrxmIpss7RLnD9u9T+8+wA=
        </diagram></mxfile>"#,
    );

    assert_eq!(diagram.canvas(), Canvas::new(1000.0, 500.0).unwrap());
    let vertex = diagram.vertices().next().expect("vertex inside payload");
    assert_eq!(vertex.id(), "z");
    assert_eq!(vertex.text(), "Zipped");
    assert_eq!(vertex.style(), "rhombus;");
    assert_eq!(
        vertex.geometry(),
        Some(PixelRect::new(100.0, 50.0, 200.0, 100.0))
    );
}

#[test]
fn test_only_first_model_is_read() {
    let diagram = parse_ok(
        r#"<mxfile>
          <diagram id="p1"><mxGraphModel><root>
            <mxCell id="first" vertex="1"><mxGeometry as="geometry"/></mxCell>
          </root></mxGraphModel></diagram>
          <diagram id="p2"><mxGraphModel><root>
            <mxCell id="second" vertex="1"><mxGeometry as="geometry"/></mxCell>
          </root></mxGraphModel></diagram>
        </mxfile>"#,
    );

    let ids: Vec<_> = diagram.vertices().map(|v| v.id()).collect();
    assert_eq!(ids, ["first"]);
}

#[test]
fn test_object_wrapper_supplies_id_and_label() {
    let diagram = parse_ok(&model(
        r#"
        <object id="svc" label="Service" owner="ops">
          <mxCell style="ellipse;" vertex="1" parent="1">
            <mxGeometry x="5" y="5" as="geometry"/>
          </mxCell>
        </object>
        <UserObject id="db" label="Database">
          <mxCell vertex="1" parent="1"><mxGeometry as="geometry"/></mxCell>
        </UserObject>
        <mxCell id="e" edge="1" source="svc" target="db" parent="1"/>
        "#,
    ));

    let vertices: Vec<_> = diagram.vertices().collect();
    assert_eq!(vertices.len(), 2);
    assert_eq!((vertices[0].id(), vertices[0].text()), ("svc", "Service"));
    assert_eq!(vertices[0].style(), "ellipse;");
    assert_eq!((vertices[1].id(), vertices[1].text()), ("db", "Database"));
}

#[test]
fn test_unclosed_element_is_reported() {
    let source = r#"<mxGraphModel><root><mxCell id="a" vertex="1"></root></mxGraphModel>"#;
    let err = parse(source, ParseConfig::default()).unwrap_err();
    assert!(!err.diagnostics().is_empty());
    assert!(err.diagnostics()[0].severity().is_error());
}

#[test]
fn test_truncated_document_is_reported() {
    let codes = parse_err_codes(r#"<mxGraphModel><root><mxCell id="a" vertex="1">"#);
    assert_eq!(codes, [ErrorCode::E002]);

    let err = parse(r#"<mxGraphModel><root>"#, ParseConfig::default()).unwrap_err();
    let label = &err.diagnostics()[0].labels()[0];
    assert_eq!(label.span().start(), 14);
}

#[test]
fn test_unterminated_tag_is_malformed() {
    let codes = parse_err_codes(r#"<mxGraphModel><root><mxCell id="a""#);
    assert_eq!(codes, [ErrorCode::E001]);
}

#[test]
fn test_missing_graph_model() {
    assert_eq!(parse_err_codes("<mxfile/>"), [ErrorCode::E100]);
    assert_eq!(parse_err_codes(""), [ErrorCode::E100]);
    assert_eq!(parse_err_codes("just some text"), [ErrorCode::E100]);
}

#[test]
fn test_duplicate_ids_keep_first_definition() {
    let diagram = parse_ok(&model(
        r#"
        <mxCell id="a" value="first" vertex="1"><mxGeometry as="geometry"/></mxCell>
        <mxCell id="a" value="second" vertex="1"><mxGeometry as="geometry"/></mxCell>
        <mxCell id="b" vertex="1"><mxGeometry as="geometry"/></mxCell>
        <mxCell id="b" edge="1" source="a" target="a"/>
        "#,
    ));

    let ids: Vec<_> = diagram.cells().iter().map(Cell::id).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(diagram.vertices().next().unwrap().text(), "first");
    assert_eq!(diagram.edges().count(), 0);
}

#[test]
fn test_cells_without_id_are_skipped() {
    let diagram = parse_ok(&model(
        r#"
        <mxCell id="a" vertex="1"><mxGeometry as="geometry"/></mxCell>
        <mxCell value="anonymous" vertex="1"><mxGeometry as="geometry"/></mxCell>
        <mxCell id="b" vertex="1"><mxGeometry x="200" as="geometry"/></mxCell>
        <mxCell edge="1" source="a" target="b"/>
        <mxCell id="e" edge="1" source="a" target="b"/>
        "#,
    ));

    let ids: Vec<_> = diagram.cells().iter().map(Cell::id).collect();
    assert_eq!(ids, ["a", "b", "e"]);
}

#[test]
fn test_forbidden_character_reference_is_rejected() {
    let codes = parse_err_codes(&model(
        r#"<mxCell id="a" value="a&#1;b" vertex="1"><mxGeometry as="geometry"/></mxCell>"#,
    ));
    assert_eq!(codes, [ErrorCode::E003]);

    let codes = parse_err_codes(&model(r#"<mxCell id="a" style="&#xFFFE;" vertex="1"/>"#));
    assert_eq!(codes, [ErrorCode::E003]);

    let source = model("<mxCell id=\"a\" value=\"\u{7}\" vertex=\"1\"/>");
    let err = parse(&source, ParseConfig::default()).unwrap_err();
    assert!(err.diagnostics()[0].message().contains("U+0007"));
}

#[test]
fn test_allowed_character_references_are_kept() {
    let diagram = parse_ok(&model(
        r#"<mxCell id="a" value="caf&#233; &#xD7FF;&#xE000;&#x1F600;" vertex="1"/>"#,
    ));
    assert_eq!(
        diagram.vertices().next().unwrap().text(),
        "caf\u{E9} \u{D7FF}\u{E000}\u{1F600}"
    );
}

#[test]
fn test_bad_payload_is_reported() {
    let codes = parse_err_codes(r#"<mxfile><diagram>%%%not-base64%%%</diagram></mxfile>"#);
    assert_eq!(codes, [ErrorCode::E200]);
}

#[test]
fn test_payload_without_model_is_reported() {
    // Decodes to `<mxGraphModel><root><mxCell id="0"/></root></mxGraphModel>`
    let valid =
        "UzV2zq1wL0osyPDNT0nNUTV2VTV2LsrPL4GwciucU3NyVI0MMlNUjV1UjYwMgFjVyA0iC2QglAI5aCYBAA==";
    let source = format!("<mxfile><diagram>{valid}</diagram></mxfile>");
    assert!(parse(&source, ParseConfig::default()).is_ok());

    // Raw deflate of the text `hello`
    let codes = parse_err_codes("<mxfile><diagram>y0jNyckHAA==</diagram></mxfile>");
    assert_eq!(codes, [ErrorCode::E203]);
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn escape_attribute(raw: &str) -> String {
        raw.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    proptest! {
        #[test]
        fn prop_vertex_text_survives_escaping(text in "[a-zA-Z0-9 &<>\"']{0,40}") {
            let source = model(&format!(
                r#"<mxCell id="a" value="{}" vertex="1"/>"#,
                escape_attribute(&text)
            ));
            let diagram = parse(&source, ParseConfig::default()).unwrap();
            prop_assert_eq!(diagram.vertices().next().unwrap().text(), text.as_str());
        }

        #[test]
        fn prop_cells_keep_document_order(count in 0usize..30) {
            let cells: String = (0..count)
                .map(|i| format!(r#"<mxCell id="v{i}" vertex="1"/>"#))
                .collect();
            let diagram = parse(&model(&cells), ParseConfig::default()).unwrap();

            let ids: Vec<String> = diagram.cells().iter().map(|c| c.id().to_string()).collect();
            let expected: Vec<String> = (0..count).map(|i| format!("v{i}")).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
