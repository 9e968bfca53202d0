//! Geometric primitives for both sides of the conversion.
//!
//! This module provides the pixel-space types read from draw.io documents,
//! the inch-based page types written into Visio packages, and the
//! [`PageTransform`] that maps one onto the other.
//!
//! # Overview
//!
//! - [`PixelRect`] - A vertex rectangle in source pixels
//! - [`Canvas`] - The declared source canvas size in pixels
//! - [`PageSize`] - The target page size in inches
//! - [`Placement`] - A shape's pin (center) and size on the target page
//! - [`PagePoint`] - A single point on the target page
//!
//! # Coordinate Systems
//!
//! The two sides disagree on where the origin lives:
//!
//! ```text
//!   draw.io (pixels)             Visio (inches)
//!
//!   (0,0) ────────► +X           +Y
//!     │                           ▲
//!     │                           │
//!     ▼                           │
//!    +Y                         (0,0) ────────► +X
//! ```
//!
//! [`PageTransform::apply`] scales each axis independently and flips Y so
//! that a shape drawn near the top of the canvas lands near the top of the
//! page.

use thiserror::Error;

/// Canvas width used when a document does not declare one.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1920.0;

/// Canvas height used when a document does not declare one.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1080.0;

/// Vertex width used when a geometry omits it.
pub const DEFAULT_VERTEX_WIDTH: f64 = 120.0;

/// Vertex height used when a geometry omits it.
pub const DEFAULT_VERTEX_HEIGHT: f64 = 60.0;

/// Errors raised when constructing sizes that must be strictly positive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

fn ensure_positive(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}

/// A rectangle in source pixel space, origin at its top-left corner.
///
/// # Examples
///
/// ```
/// # use stencil_core::geometry::PixelRect;
/// let rect = PixelRect::new(10.0, 20.0, 100.0, 40.0);
/// assert_eq!(rect.center_x(), 60.0);
/// assert_eq!(rect.center_y(), 40.0);
///
/// // Missing draw.io geometry attributes fall back to these values
/// let rect = PixelRect::default();
/// assert_eq!((rect.width(), rect.height()), (120.0, 60.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl PixelRect {
    /// Creates a new rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the horizontal center of the rectangle.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Returns the vertical center of the rectangle.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

impl Default for PixelRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_VERTEX_WIDTH, DEFAULT_VERTEX_HEIGHT)
    }
}

/// The pixel dimensions of the source canvas.
///
/// Both dimensions are guaranteed positive and finite, which keeps every
/// division in [`PageTransform::apply`] well defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
}

impl Canvas {
    /// Creates a canvas, rejecting zero, negative and non-finite sizes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositive`] naming the offending dimension.
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            width: ensure_positive("canvas width", width)?,
            height: ensure_positive("canvas height", height)?,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// The physical size of the target page in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    width: f64,
    height: f64,
}

impl PageSize {
    /// Creates a page size, rejecting zero, negative and non-finite sizes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositive`] naming the offending dimension.
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            width: ensure_positive("page width", width)?,
            height: ensure_positive("page height", height)?,
        })
    }

    /// US letter in landscape orientation, 11 x 8.5 inches.
    pub const fn letter_landscape() -> Self {
        Self {
            width: 11.0,
            height: 8.5,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::letter_landscape()
    }
}

/// A shape's position and size on the target page, in inches.
///
/// The pin is the shape's center; Visio positions shapes by their pin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pin_x: f64,
    pin_y: f64,
    width: f64,
    height: f64,
}

impl Placement {
    pub fn new(pin_x: f64, pin_y: f64, width: f64, height: f64) -> Self {
        Self {
            pin_x,
            pin_y,
            width,
            height,
        }
    }

    pub fn pin_x(&self) -> f64 {
        self.pin_x
    }

    pub fn pin_y(&self) -> f64 {
        self.pin_y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// A point on the target page, in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PagePoint {
    x: f64,
    y: f64,
}

impl PagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Maps pixel rectangles on a [`Canvas`] onto a [`PageSize`].
///
/// # Examples
///
/// ```
/// # use stencil_core::geometry::{Canvas, PageSize, PageTransform, PixelRect};
/// let transform = PageTransform::new(Canvas::default(), PageSize::default());
/// let placement = transform.apply(PixelRect::new(0.0, 0.0, 1920.0, 1080.0));
///
/// // A rectangle covering the whole canvas covers the whole page
/// assert_eq!(placement.width(), 11.0);
/// assert_eq!(placement.height(), 8.5);
/// assert_eq!(placement.pin_x(), 5.5);
/// assert_eq!(placement.pin_y(), 4.25);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageTransform {
    canvas: Canvas,
    page: PageSize,
}

impl PageTransform {
    pub fn new(canvas: Canvas, page: PageSize) -> Self {
        Self { canvas, page }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn page(&self) -> PageSize {
        self.page
    }

    /// Transforms a pixel rectangle into a page placement.
    ///
    /// Sizes scale by the page-to-canvas ratio of their axis. The pin is the
    /// scaled center of the rectangle, with Y measured up from the bottom
    /// edge of the page.
    pub fn apply(&self, rect: PixelRect) -> Placement {
        let to_page_x = |px: f64| (px / self.canvas.width()) * self.page.width();
        let to_page_y = |px: f64| (px / self.canvas.height()) * self.page.height();

        Placement::new(
            to_page_x(rect.center_x()),
            self.page.height() - to_page_y(rect.center_y()),
            to_page_x(rect.width()),
            to_page_y(rect.height()),
        )
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn canvas_strategy() -> impl Strategy<Value = Canvas> {
        (1.0f64..5000.0, 1.0f64..5000.0).prop_map(|(w, h)| Canvas::new(w, h).unwrap())
    }

    proptest! {
        #[test]
        fn prop_rect_inside_canvas_stays_on_page(
            canvas in canvas_strategy(),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
            fw in 0.0f64..1.0,
            fh in 0.0f64..1.0,
        ) {
            let x = fx * canvas.width();
            let y = fy * canvas.height();
            let rect = PixelRect::new(
                x,
                y,
                fw * (canvas.width() - x),
                fh * (canvas.height() - y),
            );
            let placement = PageTransform::new(canvas, PageSize::default()).apply(rect);

            prop_assert!(placement.pin_x() >= -1e-9 && placement.pin_x() <= 11.0 + 1e-9);
            prop_assert!(placement.pin_y() >= -1e-9 && placement.pin_y() <= 8.5 + 1e-9);
        }

        #[test]
        fn prop_size_is_independent_of_position(
            canvas in canvas_strategy(),
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            w in 0.0f64..1000.0,
            h in 0.0f64..1000.0,
        ) {
            let transform = PageTransform::new(canvas, PageSize::default());
            let at_origin = transform.apply(PixelRect::new(0.0, 0.0, w, h));
            let moved = transform.apply(PixelRect::new(x, y, w, h));

            prop_assert!(approx_eq!(f64, at_origin.width(), moved.width(), epsilon = 1e-9));
            prop_assert!(approx_eq!(f64, at_origin.height(), moved.height(), epsilon = 1e-9));
        }
    }
}
