//! Canvas core - normalized strokes and their PNG/SVG renderers
//!
//! This crate provides the stroke-to-image pipeline:
//! - [`types`] - Normalized points, colors, strokes, and export targets
//! - [`drawing`] - The authoring session and immutable export snapshots
//! - [`densify`] - Resolution-aware polyline densification
//! - [`render`] - Raster (RGBA buffer) and vector (SVG text) renderers
//!
//! Both renderers build their geometry through [`render::polyline`], so an
//! SVG rasterized at the export resolution matches the raster output.

pub mod densify;
pub mod drawing;
pub mod render;
pub mod types;

pub use densify::*;
pub use drawing::*;
pub use render::*;
pub use types::*;

pub use sketch_config::DEFAULT_MAX_GAP_PX;
