//! Stencil Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stencil parser,
//! mapper and package assembler. It includes:
//!
//! - **Geometry**: pixel rectangles, canvas and page sizes, and the
//!   pixel-to-page transform ([`geometry`] module)
//! - **Model**: the source graph of vertices and edges ([`model`] module)
//! - **Shapes**: target-side shape, connect and master records ([`shape`] module)

pub mod geometry;
pub mod model;
pub mod shape;
