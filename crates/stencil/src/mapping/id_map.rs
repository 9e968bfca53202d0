//! Lookup from draw.io cell ids to assigned shape ids.

use indexmap::IndexMap;

use stencil_core::shape::ShapeId;

/// Maps vertex cell ids to the shape ids they were given.
///
/// Entries iterate in insertion order, which is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    ids: IndexMap<String, ShapeId>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the shape id of a cell.
    ///
    /// A repeated cell id replaces the earlier entry, keeping its position.
    pub(crate) fn insert(&mut self, cell_id: impl Into<String>, shape_id: ShapeId) {
        self.ids.insert(cell_id.into(), shape_id);
    }

    /// Returns the shape id assigned to `cell_id`, if any.
    pub fn get(&self, cell_id: &str) -> Option<ShapeId> {
        self.ids.get(cell_id).copied()
    }

    pub fn contains(&self, cell_id: &str) -> bool {
        self.ids.contains_key(cell_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ShapeId)> {
        self.ids.iter().map(|(cell_id, &shape_id)| (cell_id.as_str(), shape_id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
