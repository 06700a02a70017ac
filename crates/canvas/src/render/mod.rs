//! Stroke renderers
//!
//! - [`raster`] - anti-aliased RGBA buffer, ready for PNG encoding
//! - [`svg`] - standalone SVG document text
//!
//! Both go through [`polyline`] for geometry: the same densification and the
//! same normalized-to-pixel scaling, so the SVG path vertices and the raster
//! polyline vertices are identical for a given stroke and resolution.

pub mod raster;
pub mod svg;

use glam::Vec2;
use thiserror::Error;

use crate::densify::densify;
use crate::types::Stroke;

pub use raster::{render_raster, render_raster_with_gap, RasterImage};
pub use svg::{render_svg, render_svg_with_gap};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Pixel-space vertices for `stroke` on a `width` x `height` target
///
/// Returns None for strokes with fewer than two points; those have no
/// segment to draw and are skipped by both renderers.
pub fn polyline(stroke: &Stroke, width: u32, height: u32, max_gap_px: f32) -> Option<Vec<Vec2>> {
    if !stroke.is_drawable() {
        return None;
    }
    let points = densify(stroke.points(), width, height, max_gap_px);
    Some(
        points
            .into_iter()
            .map(|p| p.to_pixels(width, height))
            .collect(),
    )
}
