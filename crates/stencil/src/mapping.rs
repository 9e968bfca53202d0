//! Mapping of a draw.io graph onto Visio shapes and connections.
//!
//! The mapper makes two passes over the cells of a [`Diagram`], both in
//! document order:
//!
//! 1. **Vertices** - every vertex with geometry becomes a placed shape with
//!    the next free [`ShapeId`]. Its master comes from the style
//!    [`StyleClassifier`] and its placement from the [`PageTransform`].
//! 2. **Edges** - every edge whose source and target both became shapes
//!    becomes a connector with the next free id, plus one [`ConnectRecord`]
//!    per endpoint.
//!
//! Cells that cannot be mapped are skipped without consuming an id. Skips
//! are never errors; they are logged and listed in [`Mapping::skipped`].

mod id_map;
mod style;

pub use id_map::IdMap;
pub use style::{StyleClassifier, StyleRule};

use std::fmt;

use log::{debug, info, warn};

use stencil_core::{
    geometry::{PageSize, PageTransform},
    model::{Diagram, Edge, Vertex},
    shape::{ConnectRecord, ConnectorEnd, ShapeId, ShapeRecord},
};

/// Why a cell produced no shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The vertex has no `mxGeometry`.
    MissingGeometry,
    /// The edge has no source, or its source is not a mapped vertex.
    UnresolvedSource,
    /// The edge has no target, or its target is not a mapped vertex.
    UnresolvedTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGeometry => write!(f, "vertex has no geometry"),
            Self::UnresolvedSource => write!(f, "edge source is not a mapped vertex"),
            Self::UnresolvedTarget => write!(f, "edge target is not a mapped vertex"),
        }
    }
}

/// A cell left out of the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    cell_id: String,
    reason: SkipReason,
}

impl Skipped {
    pub fn new(cell_id: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            cell_id: cell_id.into(),
            reason,
        }
    }

    pub fn cell_id(&self) -> &str {
        &self.cell_id
    }

    pub fn reason(&self) -> SkipReason {
        self.reason
    }
}

/// Result of mapping a diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    shapes: Vec<ShapeRecord>,
    connects: Vec<ConnectRecord>,
    ids: IdMap,
    skipped: Vec<Skipped>,
}

impl Mapping {
    /// Shapes in increasing id order: placed vertices, then connectors.
    pub fn shapes(&self) -> &[ShapeRecord] {
        &self.shapes
    }

    /// Connections in the order they were generated.
    pub fn connects(&self) -> &[ConnectRecord] {
        &self.connects
    }

    /// Shape ids assigned to vertex cells.
    pub fn ids(&self) -> &IdMap {
        &self.ids
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Maps diagrams onto a page of a fixed size.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    page: PageSize,
    classifier: StyleClassifier,
}

impl Mapper {
    /// Creates a mapper.
    ///
    /// # Arguments
    ///
    /// * `page` - Size of the target page in inches.
    /// * `classifier` - Rules choosing the master for each vertex style.
    pub fn new(page: PageSize, classifier: StyleClassifier) -> Self {
        Self { page, classifier }
    }

    /// Maps every cell of `diagram`.
    pub fn map(&self, diagram: &Diagram) -> Mapping {
        let transform = PageTransform::new(diagram.canvas(), self.page);
        let mut pass = MappingPass::new(transform, &self.classifier);

        for vertex in diagram.vertices() {
            pass.map_vertex(vertex);
        }
        let vertex_count = pass.mapping.shapes.len();
        debug!(shapes = vertex_count; "Vertex pass complete");

        for edge in diagram.edges() {
            pass.map_edge(edge);
        }

        let mapping = pass.mapping;
        info!(
            shapes = vertex_count,
            connectors = mapping.shapes.len() - vertex_count,
            connects = mapping.connects.len(),
            skipped = mapping.skipped.len();
            "Diagram mapped"
        );
        mapping
    }
}

/// State threaded through both passes.
struct MappingPass<'a> {
    transform: PageTransform,
    classifier: &'a StyleClassifier,
    next_id: ShapeId,
    mapping: Mapping,
}

impl<'a> MappingPass<'a> {
    fn new(transform: PageTransform, classifier: &'a StyleClassifier) -> Self {
        Self {
            transform,
            classifier,
            next_id: ShapeId::FIRST,
            mapping: Mapping::default(),
        }
    }

    fn allocate_id(&mut self) -> ShapeId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn skip(&mut self, cell_id: &str, reason: SkipReason) {
        warn!(cell_id = cell_id, reason:% = reason; "Skipping cell");
        self.mapping.skipped.push(Skipped::new(cell_id, reason));
    }

    fn map_vertex(&mut self, vertex: &Vertex) {
        let Some(geometry) = vertex.geometry() else {
            self.skip(vertex.id(), SkipReason::MissingGeometry);
            return;
        };

        let id = self.allocate_id();
        let kind = self.classifier.classify(vertex.style());
        let placement = self.transform.apply(geometry);

        self.mapping.ids.insert(vertex.id(), id);
        self.mapping
            .shapes
            .push(ShapeRecord::placed(id, kind, placement, vertex.text()));
    }

    fn map_edge(&mut self, edge: &Edge) {
        let Some(source) = edge.source().and_then(|id| self.mapping.ids.get(id)) else {
            self.skip(edge.id(), SkipReason::UnresolvedSource);
            return;
        };
        let Some(target) = edge.target().and_then(|id| self.mapping.ids.get(id)) else {
            self.skip(edge.id(), SkipReason::UnresolvedTarget);
            return;
        };

        let id = self.allocate_id();
        self.mapping.shapes.push(ShapeRecord::connector(id));
        self.mapping
            .connects
            .push(ConnectRecord::new(id, ConnectorEnd::Begin, source));
        self.mapping
            .connects
            .push(ConnectRecord::new(id, ConnectorEnd::End, target));
    }
}
