//! Streaming reader that turns draw.io XML into a [`Diagram`].
//!
//! The reader walks the document with `quick-xml` events and accepts the
//! shapes draw.io produces:
//!
//! - a bare `<mxGraphModel>` root,
//! - `<mxfile><diagram><mxGraphModel>` with the model inline,
//! - `<mxfile><diagram>PAYLOAD</diagram>` with a compressed model,
//! - cells wrapped in `<object>` / `<UserObject>` that carry the id and label.
//!
//! Only the first graph model in the document is read.

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use log::{debug, trace};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use stencil_core::{
    geometry::{Canvas, DEFAULT_VERTEX_HEIGHT, DEFAULT_VERTEX_WIDTH, PixelRect},
    model::{Cell, Diagram, Edge, Vertex},
};

use crate::{
    config::ParseConfig,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result as DiagnosticResult},
    payload,
    span::Span,
};

type Attributes = BTreeMap<String, String>;

/// Where the reader is relative to the graph model it converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelState {
    NotSeen,
    Open,
    Closed,
}

#[derive(Debug)]
struct OpenElement {
    name: String,
    span: Span,
}

/// An `<object>` or `<UserObject>` wrapping the next `mxCell`.
#[derive(Debug)]
struct Wrapper {
    id: Option<String>,
    label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Vertex,
    Edge,
    Other,
}

/// A cell whose start tag has been read but whose children have not.
#[derive(Debug)]
struct PendingCell {
    kind: CellKind,
    id: Option<String>,
    span: Span,
    style: String,
    text: String,
    source: Option<String>,
    target: Option<String>,
    geometry: Option<PixelRect>,
}

/// Text collected from a `<diagram>` that has no inline model.
#[derive(Debug)]
struct Payload {
    span: Span,
    text: String,
}

/// Parses a full draw.io document.
pub(crate) fn read_document(source: &str, config: &ParseConfig) -> Result<Diagram, ParseError> {
    let mut reader = GraphReader::new(source, config);
    if let Err(diagnostic) = reader.run() {
        reader.collector.emit(diagnostic);
    }
    reader.finish()
}

struct GraphReader<'a> {
    source: &'a str,
    config: &'a ParseConfig,
    collector: DiagnosticCollector,
    model: ModelState,
    canvas: Canvas,
    cells: Vec<Cell>,
    seen_ids: HashMap<String, Span>,
    open: Vec<OpenElement>,
    wrapper: Option<Wrapper>,
    cell: Option<PendingCell>,
    payload: Option<Payload>,
    embedded: Option<Diagram>,
}

impl<'a> GraphReader<'a> {
    fn new(source: &'a str, config: &'a ParseConfig) -> Self {
        Self {
            source,
            config,
            collector: DiagnosticCollector::new(),
            model: ModelState::NotSeen,
            canvas: config.default_canvas(),
            cells: Vec::new(),
            seen_ids: HashMap::new(),
            open: Vec::new(),
            wrapper: None,
            cell: None,
            payload: None,
            embedded: None,
        }
    }

    fn run(&mut self) -> DiagnosticResult<()> {
        let mut reader = Reader::from_str(self.source);

        loop {
            let start = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let position = reader.error_position() as usize;
                    return Err(Diagnostic::error(format!("malformed XML: {err}"))
                        .with_code(ErrorCode::E001)
                        .with_label(Span::new(position..position + 1), "error occurred here"));
                }
            };
            let span = Span::new(start..reader.buffer_position() as usize);

            match event {
                Event::Start(element) => {
                    self.open.push(OpenElement {
                        name: String::from_utf8_lossy(element.name().as_ref()).into_owned(),
                        span,
                    });
                    self.start_element(&element, span, false)?;
                }
                Event::Empty(element) => self.start_element(&element, span, true)?,
                Event::End(element) => {
                    self.open.pop();
                    self.end_element(element.local_name().as_ref())?;
                }
                Event::Text(text) => {
                    let text = text.decode().map_err(|err| invalid_text(err, span))?;
                    self.push_payload_text(&text);
                }
                Event::CData(data) => {
                    let text = data.decode().map_err(|err| invalid_text(err, span))?;
                    self.push_payload_text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = self.open.last() {
            return Err(Diagnostic::error(format!("unclosed element `{}`", element.name))
                .with_code(ErrorCode::E002)
                .with_label(element.span, "opened here but never closed")
                .with_help(format!("add a matching `</{}>`", element.name)));
        }

        Ok(())
    }

    fn finish(mut self) -> Result<Diagram, ParseError> {
        if self.model == ModelState::NotSeen {
            self.collector.emit(
                Diagnostic::error("no `mxGraphModel` element found")
                    .with_code(ErrorCode::E100)
                    .with_label(Span::new(0..self.source.len()), "in this document")
                    .with_help("the input must be a draw.io document or a bare `<mxGraphModel>`"),
            );
        }
        self.collector.finish()?;

        if let Some(diagram) = self.embedded {
            return Ok(diagram);
        }

        debug!(
            cells = self.cells.len(),
            canvas_width = self.canvas.width(),
            canvas_height = self.canvas.height();
            "Graph model read"
        );
        Ok(Diagram::new(self.canvas, self.cells))
    }

    fn start_element(
        &mut self,
        element: &BytesStart<'_>,
        span: Span,
        is_empty: bool,
    ) -> DiagnosticResult<()> {
        match element.local_name().as_ref() {
            b"mxGraphModel" if self.model == ModelState::NotSeen => {
                let attributes = read_attributes(element, span)?;
                self.canvas = self.read_canvas(&attributes, span);
                // An inline model makes any surrounding payload text irrelevant
                self.payload = None;
                self.model = if is_empty {
                    ModelState::Closed
                } else {
                    ModelState::Open
                };
            }
            b"diagram" if self.model == ModelState::NotSeen && !is_empty => {
                self.payload = Some(Payload {
                    span,
                    text: String::new(),
                });
            }
            name if self.model == ModelState::Open && is_wrapper(name) => {
                let mut attributes = read_attributes(element, span)?;
                self.wrapper = (!is_empty).then(|| Wrapper {
                    id: attributes.remove("id"),
                    label: attributes.remove("label"),
                });
            }
            b"mxCell" if self.model == ModelState::Open => {
                let cell = self.read_cell(element, span)?;
                if is_empty {
                    self.finish_cell(cell);
                } else {
                    self.cell = Some(cell);
                }
            }
            b"mxGeometry" if self.model == ModelState::Open => {
                let needs_geometry = self
                    .cell
                    .as_ref()
                    .is_some_and(|cell| cell.kind == CellKind::Vertex && cell.geometry.is_none());
                if needs_geometry {
                    let attributes = read_attributes(element, span)?;
                    let geometry = self.read_geometry(&attributes, span);
                    if let Some(cell) = self.cell.as_mut() {
                        cell.geometry = Some(geometry);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end_element(&mut self, name: &[u8]) -> DiagnosticResult<()> {
        match name {
            b"mxCell" => {
                if let Some(cell) = self.cell.take() {
                    self.finish_cell(cell);
                }
            }
            b"mxGraphModel" if self.model == ModelState::Open => {
                self.model = ModelState::Closed;
            }
            b"diagram" => {
                if let Some(payload) = self.payload.take()
                    && self.model == ModelState::NotSeen
                    && !payload.text.is_empty()
                {
                    self.read_payload(payload)?;
                }
            }
            name if is_wrapper(name) => self.wrapper = None,
            _ => {}
        }
        Ok(())
    }

    fn push_payload_text(&mut self, text: &str) {
        if let Some(payload) = self.payload.as_mut() {
            payload.text.push_str(text.trim());
        }
    }

    /// Decodes a compressed diagram and parses the model inside it.
    fn read_payload(&mut self, payload: Payload) -> DiagnosticResult<()> {
        trace!(bytes = payload.text.len(); "Decoding compressed diagram payload");
        let xml = payload::decode(&payload.text, payload.span)?;

        let diagram = read_document(&xml, self.config).map_err(|err| {
            let detail = err
                .diagnostics()
                .first()
                .map(|diagnostic| diagnostic.message().to_string())
                .unwrap_or_default();
            Diagnostic::error(format!("compressed diagram is not a valid graph model: {detail}"))
                .with_code(ErrorCode::E203)
                .with_label(payload.span, "in this diagram")
        })?;

        self.embedded = Some(diagram);
        self.model = ModelState::Closed;
        Ok(())
    }

    fn read_canvas(&mut self, attributes: &Attributes, span: Span) -> Canvas {
        let fallback = self.config.default_canvas();
        let width = self.read_dimension(attributes, "pageWidth", fallback.width(), span);
        let height = self.read_dimension(attributes, "pageHeight", fallback.height(), span);
        Canvas::new(width, height).unwrap_or(fallback)
    }

    /// Reads a canvas dimension, which must be strictly positive.
    fn read_dimension(
        &mut self,
        attributes: &Attributes,
        name: &str,
        default: f64,
        span: Span,
    ) -> f64 {
        let value = self.read_number(attributes, name, default, span);
        if value > 0.0 {
            return value;
        }
        self.collector.emit(
            Diagnostic::warning(format!("`{name}` must be positive, got {value}"))
                .with_code(ErrorCode::E004)
                .with_label(span, "declared here")
                .with_help(format!("using the default of {default}")),
        );
        default
    }

    fn read_geometry(&mut self, attributes: &Attributes, span: Span) -> PixelRect {
        PixelRect::new(
            self.read_number(attributes, "x", 0.0, span),
            self.read_number(attributes, "y", 0.0, span),
            self.read_number(attributes, "width", DEFAULT_VERTEX_WIDTH, span),
            self.read_number(attributes, "height", DEFAULT_VERTEX_HEIGHT, span),
        )
    }

    /// Reads a finite number, falling back to `default` when the attribute
    /// is absent or unusable. Unusable values are reported as warnings.
    fn read_number(
        &mut self,
        attributes: &Attributes,
        name: &str,
        default: f64,
        span: Span,
    ) -> f64 {
        let Some(raw) = attributes.get(name) else {
            return default;
        };

        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                self.collector.emit(
                    Diagnostic::warning(format!("`{name}` value `{raw}` is not a valid number"))
                        .with_code(ErrorCode::E004)
                        .with_label(span, "in this element")
                        .with_help(format!("using the default of {default}")),
                );
                default
            }
        }
    }

    fn read_cell(&mut self, element: &BytesStart<'_>, span: Span) -> DiagnosticResult<PendingCell> {
        let mut attributes = read_attributes(element, span)?;
        let wrapper = self.wrapper.take();

        let kind = if attributes.get("vertex").is_some_and(|v| v == "1") {
            CellKind::Vertex
        } else if attributes.get("edge").is_some_and(|v| v == "1") {
            CellKind::Edge
        } else {
            CellKind::Other
        };

        let (wrapper_id, wrapper_label) = wrapper
            .map(|wrapper| (wrapper.id, wrapper.label))
            .unwrap_or_default();

        Ok(PendingCell {
            kind,
            id: wrapper_id.or_else(|| attributes.remove("id")),
            span,
            style: attributes.remove("style").unwrap_or_default(),
            text: wrapper_label
                .or_else(|| attributes.remove("value"))
                .unwrap_or_default(),
            source: attributes.remove("source"),
            target: attributes.remove("target"),
            geometry: None,
        })
    }

    fn finish_cell(&mut self, cell: PendingCell) {
        if cell.kind == CellKind::Other {
            return;
        }

        let Some(id) = cell.id else {
            self.collector.emit(
                Diagnostic::warning("cell has no `id` attribute and is skipped")
                    .with_code(ErrorCode::E101)
                    .with_label(cell.span, "this cell")
                    .with_help("edges can only refer to cells that have an `id`"),
            );
            return;
        };

        match self.seen_ids.entry(id.clone()) {
            Entry::Occupied(first) => {
                self.collector.emit(
                    Diagnostic::warning(format!("cell id `{id}` is already defined"))
                        .with_code(ErrorCode::E102)
                        .with_label(cell.span, "skipped duplicate")
                        .with_secondary_label(*first.get(), "first definition, kept")
                        .with_help("give every cell a unique `id` attribute"),
                );
                return;
            }
            Entry::Vacant(slot) => {
                slot.insert(cell.span);
            }
        }

        let parsed = match cell.kind {
            CellKind::Vertex => Cell::Vertex(Vertex::new(id, cell.style, cell.geometry, cell.text)),
            CellKind::Edge => Cell::Edge(Edge::new(id, cell.source, cell.target)),
            CellKind::Other => return,
        };
        trace!(cell:? = parsed; "Cell read");
        self.cells.push(parsed);
    }
}

fn is_wrapper(name: &[u8]) -> bool {
    name == b"object" || name.eq_ignore_ascii_case(b"UserObject")
}

/// Collects the unescaped attributes of an element.
fn read_attributes(element: &BytesStart<'_>, span: Span) -> DiagnosticResult<Attributes> {
    let mut attributes = Attributes::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|err| invalid_attribute(err, span))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| invalid_attribute(err, span))?;

        // Character references can smuggle in code points XML forbids
        if let Some(c) = value.chars().find(|&c| !is_xml_char(c)) {
            let code_point = u32::from(c);
            return Err(invalid_attribute(
                format!("`{key}` contains U+{code_point:04X}, which XML does not allow"),
                span,
            ));
        }
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}

/// The `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' => true,
        c => c >= '\u{10000}',
    }
}

fn invalid_attribute(err: impl std::fmt::Display, span: Span) -> Diagnostic {
    Diagnostic::error(format!("invalid attribute: {err}"))
        .with_code(ErrorCode::E003)
        .with_label(span, "in this element")
}

fn invalid_text(err: impl std::fmt::Display, span: Span) -> Diagnostic {
    Diagnostic::error(format!("malformed XML text: {err}"))
        .with_code(ErrorCode::E001)
        .with_label(span, "in this text")
}
