//! The source graph model read from draw.io documents.
//!
//! A [`Diagram`] is the declared [`Canvas`] plus an ordered list of
//! [`Cell`]s. Cells are either a [`Vertex`] (a box with optional geometry)
//! or an [`Edge`] (a link between two cells by identifier). Document order
//! is preserved because shape identifiers on the Visio side are assigned
//! in that order.

use crate::geometry::{Canvas, PixelRect};

/// A node in the source graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: String,
    style: String,
    geometry: Option<PixelRect>,
    text: String,
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    ///
    /// * `id` - Source identifier, unique within the document.
    /// * `style` - Raw draw.io style string, possibly empty.
    /// * `geometry` - Pixel rectangle, or `None` if the cell had no geometry.
    /// * `text` - Unescaped display text.
    pub fn new(
        id: impl Into<String>,
        style: impl Into<String>,
        geometry: Option<PixelRect>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            style: style.into(),
            geometry,
            text: text.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn geometry(&self) -> Option<PixelRect> {
        self.geometry
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A link between two cells in the source graph.
///
/// Either endpoint may be missing or may name a cell that does not exist;
/// draw.io permits both.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: String,
    source: Option<String>,
    target: Option<String>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: Option<String>, target: Option<String>) -> Self {
        Self {
            id: id.into(),
            source,
            target,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

/// A single entity in the source graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Vertex(Vertex),
    Edge(Edge),
}

impl Cell {
    /// Returns the source identifier of this cell.
    pub fn id(&self) -> &str {
        match self {
            Cell::Vertex(vertex) => vertex.id(),
            Cell::Edge(edge) => edge.id(),
        }
    }
}

impl From<Vertex> for Cell {
    fn from(vertex: Vertex) -> Self {
        Cell::Vertex(vertex)
    }
}

impl From<Edge> for Cell {
    fn from(edge: Edge) -> Self {
        Cell::Edge(edge)
    }
}

/// A parsed draw.io diagram.
///
/// # Examples
///
/// ```
/// # use stencil_core::{geometry::{Canvas, PixelRect}, model::{Diagram, Edge, Vertex}};
/// let diagram = Diagram::new(
///     Canvas::default(),
///     vec![
///         Vertex::new("a", "", Some(PixelRect::default()), "A").into(),
///         Vertex::new("b", "ellipse;", Some(PixelRect::default()), "B").into(),
///         Edge::new("e", Some("a".to_string()), Some("b".to_string())).into(),
///     ],
/// );
///
/// assert_eq!(diagram.vertices().count(), 2);
/// assert_eq!(diagram.edges().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    canvas: Canvas,
    cells: Vec<Cell>,
}

impl Diagram {
    pub fn new(canvas: Canvas, cells: Vec<Cell>) -> Self {
        Self { canvas, cells }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Returns all cells in document order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over vertices in document order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Vertex(vertex) => Some(vertex),
            Cell::Edge(_) => None,
        })
    }

    /// Iterates over edges in document order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Edge(edge) => Some(edge),
            Cell::Vertex(_) => None,
        })
    }

    /// Returns `true` if the diagram has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagram {
        Diagram::new(
            Canvas::default(),
            vec![
                Edge::new("e1", Some("v1".to_string()), None).into(),
                Vertex::new("v1", "", None, "").into(),
                Vertex::new("v2", "rhombus", Some(PixelRect::default()), "two").into(),
            ],
        )
    }

    #[test]
    fn test_vertices_preserve_document_order() {
        let diagram = sample();
        let ids: Vec<_> = diagram.vertices().map(Vertex::id).collect();
        assert_eq!(ids, ["v1", "v2"]);
    }

    #[test]
    fn test_edges_skip_vertices() {
        let diagram = sample();
        let edges: Vec<_> = diagram.edges().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source(), Some("v1"));
        assert_eq!(edges[0].target(), None);
    }

    #[test]
    fn test_cell_id() {
        let diagram = sample();
        let ids: Vec<_> = diagram.cells().iter().map(Cell::id).collect();
        assert_eq!(ids, ["e1", "v1", "v2"]);
    }

    #[test]
    fn test_default_diagram_is_empty() {
        let diagram = Diagram::default();
        assert!(diagram.is_empty());
        assert_eq!(diagram.canvas(), Canvas::default());
    }
}
