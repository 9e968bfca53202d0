//! Target-side shape records and the master catalogue.
//!
//! This module provides the records the mapper produces and the package
//! assembler serializes:
//!
//! - [`ShapeRecord`] - A placed shape or a connector on the Visio page
//! - [`ConnectRecord`] - Glue from a connector endpoint to another shape's pin
//! - [`MasterCatalogue`] - The reusable master shapes every shape refers to

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{PagePoint, Placement};

/// The master shape a [`ShapeRecord`] is an instance of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasterKind {
    Rectangle,
    Ellipse,
    Rhombus,
    Connector,
}

impl MasterKind {
    /// Every kind, in catalogue order.
    pub const ALL: [MasterKind; 4] = [
        MasterKind::Rectangle,
        MasterKind::Ellipse,
        MasterKind::Rhombus,
        MasterKind::Connector,
    ];

    /// Returns the universal (locale independent) Visio master name.
    pub fn name_u(&self) -> &'static str {
        match self {
            MasterKind::Rectangle => "Rectangle",
            MasterKind::Ellipse => "Ellipse",
            MasterKind::Rhombus => "Rhombus",
            MasterKind::Connector => "Dynamic connector",
        }
    }
}

/// Identifier of a shape on the Visio page.
///
/// Identifiers start at 1 and are handed out in strictly increasing order
/// within one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u32);

impl ShapeId {
    /// The first identifier handed out in a conversion.
    pub const FIRST: ShapeId = ShapeId(1);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the identifier that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a shape carries besides its id and master.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeBody {
    /// A box positioned by its pin.
    Placed { placement: Placement, text: String },
    /// A connector whose route comes from its [`ConnectRecord`]s.
    Connector { begin: PagePoint, end: PagePoint },
}

/// A shape on the Visio page.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    id: ShapeId,
    kind: MasterKind,
    body: ShapeBody,
}

impl ShapeRecord {
    /// Creates a placed shape with display text.
    pub fn placed(
        id: ShapeId,
        kind: MasterKind,
        placement: Placement,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            body: ShapeBody::Placed {
                placement,
                text: text.into(),
            },
        }
    }

    /// Creates a connector shape with both endpoints at the page origin.
    pub fn connector(id: ShapeId) -> Self {
        Self {
            id,
            kind: MasterKind::Connector,
            body: ShapeBody::Connector {
                begin: PagePoint::default(),
                end: PagePoint::default(),
            },
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> MasterKind {
        self.kind
    }

    pub fn body(&self) -> &ShapeBody {
        &self.body
    }

    /// Returns the placement of a placed shape, `None` for connectors.
    pub fn placement(&self) -> Option<Placement> {
        match &self.body {
            ShapeBody::Placed { placement, .. } => Some(*placement),
            ShapeBody::Connector { .. } => None,
        }
    }

    /// Returns the display text of a placed shape, `None` for connectors.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ShapeBody::Placed { text, .. } => Some(text),
            ShapeBody::Connector { .. } => None,
        }
    }
}

/// Which end of a connector a [`ConnectRecord`] glues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorEnd {
    Begin,
    End,
}

impl ConnectorEnd {
    /// Returns the ShapeSheet cell name of this endpoint.
    pub fn cell_name(&self) -> &'static str {
        match self {
            ConnectorEnd::Begin => "BeginX",
            ConnectorEnd::End => "EndX",
        }
    }
}

/// Glue between a connector endpoint and the pin of another shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRecord {
    from_sheet: ShapeId,
    from_end: ConnectorEnd,
    to_sheet: ShapeId,
}

impl ConnectRecord {
    /// ShapeSheet cell every connector is glued to.
    pub const TO_CELL: &'static str = "PinX";

    pub fn new(from_sheet: ShapeId, from_end: ConnectorEnd, to_sheet: ShapeId) -> Self {
        Self {
            from_sheet,
            from_end,
            to_sheet,
        }
    }

    /// The connector shape.
    pub fn from_sheet(&self) -> ShapeId {
        self.from_sheet
    }

    pub fn from_end(&self) -> ConnectorEnd {
        self.from_end
    }

    /// The shape the connector endpoint is glued to.
    pub fn to_sheet(&self) -> ShapeId {
        self.to_sheet
    }
}

/// Errors raised when building a [`MasterCatalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    #[error("master id {0} is declared more than once")]
    DuplicateId(u32),

    #[error("master kind {0:?} is declared more than once")]
    DuplicateKind(MasterKind),
}

/// A reusable master shape declared in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Master {
    id: u32,
    unique_id: String,
    kind: MasterKind,
}

impl Master {
    /// Creates a master declaration.
    ///
    /// # Arguments
    ///
    /// * `id` - Package-local master id referenced from shapes.
    /// * `unique_id` - Braced GUID identifying the master across documents.
    /// * `kind` - The shape kind this master draws.
    pub fn new(id: u32, unique_id: impl Into<String>, kind: MasterKind) -> Self {
        Self {
            id,
            unique_id: unique_id.into(),
            kind,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn kind(&self) -> MasterKind {
        self.kind
    }

    pub fn name_u(&self) -> &'static str {
        self.kind.name_u()
    }
}

/// The set of masters written into a package.
///
/// Ids and unique ids are stable: [`MasterCatalogue::standard`] always
/// declares the same four masters, so consumers may rely on them across
/// conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterCatalogue {
    masters: Vec<Master>,
}

impl MasterCatalogue {
    /// Creates a catalogue, rejecting duplicate ids and duplicate kinds.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] naming the first duplicate found.
    pub fn new(masters: Vec<Master>) -> Result<Self, CatalogueError> {
        for (idx, master) in masters.iter().enumerate() {
            let earlier = &masters[..idx];
            if earlier.iter().any(|m| m.id == master.id) {
                return Err(CatalogueError::DuplicateId(master.id));
            }
            if earlier.iter().any(|m| m.kind == master.kind) {
                return Err(CatalogueError::DuplicateKind(master.kind));
            }
        }
        Ok(Self { masters })
    }

    /// The four standard masters: Rectangle, Ellipse, Rhombus and
    /// Dynamic connector, with ids 1 to 4.
    pub fn standard() -> Self {
        let masters = MasterKind::ALL
            .iter()
            .zip(1u32..)
            .map(|(&kind, id)| {
                Master::new(
                    id,
                    format!("{{00000000-0000-0000-0000-{:012}}}", id - 1),
                    kind,
                )
            })
            .collect();
        Self { masters }
    }

    /// Returns the master drawing `kind`, if declared.
    pub fn for_kind(&self, kind: MasterKind) -> Option<&Master> {
        self.masters.iter().find(|master| master.kind == kind)
    }

    /// Returns the master with the given package-local id, if declared.
    pub fn get(&self, id: u32) -> Option<&Master> {
        self.masters.iter().find(|master| master.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Master> {
        self.masters.iter()
    }

    pub fn len(&self) -> usize {
        self.masters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty()
    }
}

impl Default for MasterCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}
