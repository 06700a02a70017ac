//! Resolution-aware polyline densification
//!
//! Both renderers connect samples with straight segments. A stroke captured
//! at screen resolution and exported at 1024px can show visible facets, so
//! segments longer than a pixel threshold get evenly spaced points inserted
//! before rendering. The pixel distance only decides how many points to
//! insert; output stays in normalized coordinates.

use glam::Vec2;

use crate::types::Point;
use sketch_config::DEFAULT_MAX_GAP_PX;

/// Insert points so no two consecutive samples are `max_gap_px` or more
/// apart once scaled to `width` x `height`
///
/// Fewer than two points, or a gap that is not a positive finite number,
/// returns the input unchanged.
pub fn densify(points: &[Point], width: u32, height: u32, max_gap_px: f32) -> Vec<Point> {
    if points.len() < 2 || !max_gap_px.is_finite() || max_gap_px <= 0.0 {
        return points.to_vec();
    }

    let scale = Vec2::new(width as f32, height as f32);
    let mut out = Vec::with_capacity(points.len() * 2);
    out.push(points[0]);

    for pair in points.windows(2) {
        let a = Vec2::from(pair[0]);
        let b = Vec2::from(pair[1]);
        let distance_px = ((b - a) * scale).length();
        let steps = (distance_px / max_gap_px).floor() as usize;

        for s in 1..=steps {
            let t = s as f32 / (steps as f32 + 1.0);
            out.push(Point::from(a + (b - a) * t));
        }
        out.push(pair[1]);
    }

    out
}

/// [`densify`] with the default 1.5px gap
pub fn densify_default(points: &[Point], width: u32, height: u32) -> Vec<Point> {
    densify(points, width, height, DEFAULT_MAX_GAP_PX)
}
