//! Vector renderer - strokes as a standalone SVG document
//!
//! Output layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <svg xmlns=".." width="W" height="H" viewBox="0 0 W H" shape-rendering="geometricPrecision">
//!   <rect width="100%" height="100%" fill="#RRGGBB"/>        (only with a background)
//!   <path d="M x y L x y .." fill="none" stroke="#RRGGBB" .../>  (one per drawable stroke)
//! </svg>
//! ```
//!
//! Colors are written as `#RRGGBB`; alpha is not carried.

use tracing::debug;

use super::polyline;
use crate::types::{Color, Stroke};
use sketch_config::DEFAULT_MAX_GAP_PX;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Render `strokes` as an SVG document sized `width` x `height`
pub fn render_svg(strokes: &[Stroke], width: u32, height: u32, background: Option<Color>) -> String {
    render_svg_with_gap(strokes, width, height, background, DEFAULT_MAX_GAP_PX)
}

/// [`render_svg`] with an explicit densification gap
pub fn render_svg_with_gap(
    strokes: &[Stroke],
    width: u32,
    height: u32,
    background: Option<Color>,
    max_gap_px: f32,
) -> String {
    let mut svg = String::with_capacity(256 + strokes.len() * 512);
    svg.push_str(XML_DECLARATION);
    svg.push('\n');
    svg.push_str(&format!(
        r#"<svg xmlns="{SVG_NAMESPACE}" width="{width}" height="{height}" viewBox="0 0 {width} {height}" shape-rendering="geometricPrecision">"#
    ));

    if let Some(bg) = background {
        svg.push_str(&format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            bg.to_hex_rgb()
        ));
    }

    for (index, stroke) in strokes.iter().enumerate() {
        let Some(vertices) = polyline(stroke, width, height, max_gap_px) else {
            debug!("render_svg: skipping stroke {} ({} points)", index, stroke.len());
            continue;
        };

        let mut d = format!("M {} {}", vertices[0].x, vertices[0].y);
        for v in &vertices[1..] {
            d.push_str(&format!(" L {} {}", v.x, v.y));
        }

        svg.push_str(&format!(
            r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" vector-effect="non-scaling-stroke"/>"#,
            stroke.color.to_hex_rgb(),
            stroke.pixel_width(width, height)
        ));
    }

    svg.push_str("</svg>");
    svg
}
