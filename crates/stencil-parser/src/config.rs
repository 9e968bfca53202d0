//! Parser configuration.

use stencil_core::geometry::Canvas;

/// Settings that control how a document is read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParseConfig {
    default_canvas: Canvas,
}

impl ParseConfig {
    /// Creates a parser configuration.
    ///
    /// # Arguments
    ///
    /// * `default_canvas` - Canvas used for any dimension the graph model
    ///   does not declare, or declares with an unusable value.
    pub fn new(default_canvas: Canvas) -> Self {
        Self { default_canvas }
    }

    /// Returns the fallback canvas.
    pub fn default_canvas(&self) -> Canvas {
        self.default_canvas
    }
}
