//! Raster renderer - strokes onto an 8-bit RGBA buffer

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};
use tracing::debug;

use super::{polyline, RenderError};
use crate::types::{Color, Stroke};
use sketch_config::DEFAULT_MAX_GAP_PX;

/// Finished 8-bit straight-alpha RGBA image
///
/// Pixels are stored row-major as [r, g, b, a] and are never modified after
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA bytes, `width * height * 4` long
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn is_fully_opaque(&self) -> bool {
        self.pixels.iter().all(|p| p[3] == 255)
    }

    pub fn is_fully_transparent(&self) -> bool {
        self.pixels.iter().all(|p| p[3] == 0)
    }

    fn from_pixmap(pixmap: &Pixmap) -> Self {
        let pixels = pixmap
            .pixels()
            .iter()
            .map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            pixels,
        }
    }
}

/// Render `strokes` into a `width` x `height` image
///
/// With a background the image is filled with that color (alpha forced
/// opaque) before any stroke is drawn; without one it starts transparent.
pub fn render_raster(
    strokes: &[Stroke],
    width: u32,
    height: u32,
    background: Option<Color>,
) -> Result<RasterImage, RenderError> {
    render_raster_with_gap(strokes, width, height, background, DEFAULT_MAX_GAP_PX)
}

/// [`render_raster`] with an explicit densification gap
pub fn render_raster_with_gap(
    strokes: &[Stroke],
    width: u32,
    height: u32,
    background: Option<Color>,
    max_gap_px: f32,
) -> Result<RasterImage, RenderError> {
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;

    if let Some(bg) = background {
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
    }

    for (index, stroke) in strokes.iter().enumerate() {
        let Some(vertices) = polyline(stroke, width, height, max_gap_px) else {
            debug!("render_raster: skipping stroke {} ({} points)", index, stroke.len());
            continue;
        };

        let mut builder = PathBuilder::new();
        builder.move_to(vertices[0].x, vertices[0].y);
        for v in &vertices[1..] {
            builder.line_to(v.x, v.y);
        }
        let Some(path) = builder.finish() else {
            debug!("render_raster: stroke {} produced no path", index);
            continue;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(stroke.color.r, stroke.color.g, stroke.color.b, stroke.color.a);
        paint.anti_alias = true;

        let style = tiny_skia::Stroke {
            width: stroke.pixel_width(width, height),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        pixmap.stroke_path(&path, &paint, &style, Transform::identity(), None);
        debug!(
            "render_raster: stroke {} -> {} vertices, width={:.2}px",
            index,
            vertices.len(),
            style.width
        );
    }

    Ok(RasterImage::from_pixmap(&pixmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, StrokeStyle};

    fn horizontal(y: f32, color: Color) -> Stroke {
        Stroke::from_points(
            [Point::new(0.1, y), Point::new(0.9, y)],
            StrokeStyle {
                width_fraction: 0.05,
                color,
            },
        )
    }

    #[test]
    fn test_exact_dimensions() {
        let image = render_raster(&[], 128, 64, None).unwrap();
        assert_eq!(image.width(), 128);
        assert_eq!(image.height(), 64);
        assert_eq!(image.pixels().len(), 128 * 64);
        assert_eq!(image.as_bytes().len(), 128 * 64 * 4);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            render_raster(&[], 0, 256, None),
            Err(RenderError::InvalidDimensions { width: 0, height: 256 })
        ));
    }

    #[test]
    fn test_white_background_no_strokes() {
        let image = render_raster(&[], 256, 256, Some(Color::WHITE)).unwrap();
        assert!(image.pixels().iter().all(|p| *p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_transparent_background_no_strokes() {
        let image = render_raster(&[], 256, 256, None).unwrap();
        assert!(image.is_fully_transparent());
    }

    #[test]
    fn test_background_alpha_ignored() {
        let image = render_raster(&[], 8, 8, Some(Color::rgba(10, 20, 30, 0))).unwrap();
        assert_eq!(image.pixel(3, 3), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_degenerate_strokes_draw_nothing() {
        let strokes = vec![
            Stroke::new(StrokeStyle::default()),
            Stroke::from_points([Point::new(0.5, 0.5)], StrokeStyle::default()),
        ];
        let image = render_raster(&strokes, 64, 64, None).unwrap();
        assert!(image.is_fully_transparent());

        let image = render_raster(&strokes, 64, 64, Some(Color::WHITE)).unwrap();
        assert!(image.pixels().iter().all(|p| *p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_per_stroke_color() {
        let strokes = vec![
            horizontal(0.25, Color::rgb(255, 0, 0)),
            horizontal(0.75, Color::rgb(0, 0, 255)),
        ];
        let image = render_raster(&strokes, 100, 100, None).unwrap();
        assert_eq!(image.pixel(50, 25), Some([255, 0, 0, 255]));
        assert_eq!(image.pixel(50, 75), Some([0, 0, 255, 255]));
        assert_eq!(image.pixel(50, 50), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_later_strokes_paint_over() {
        let strokes = vec![
            horizontal(0.5, Color::rgb(255, 0, 0)),
            horizontal(0.5, Color::rgb(0, 255, 0)),
        ];
        let image = render_raster(&strokes, 100, 100, Some(Color::WHITE)).unwrap();
        assert_eq!(image.pixel(50, 50), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_round_caps_extend_past_endpoints() {
        // 5px wide at 100x100, cap radius 2.5px beyond x=10
        let image = render_raster(&[horizontal(0.5, Color::BLACK)], 100, 100, None).unwrap();
        assert_eq!(image.pixel(9, 50).map(|p| p[3]), Some(255));
        assert_eq!(image.pixel(4, 50).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_width_scales_with_resolution() {
        let stroke = horizontal(0.5, Color::BLACK);
        let covered = |size: u32| {
            let image = render_raster(std::slice::from_ref(&stroke), size, size, None).unwrap();
            (0..size)
                .filter(|y| image.pixel(size / 2, *y).is_some_and(|p| p[3] > 127))
                .count()
        };
        // 5% of 128 = 6.4px, 5% of 1024 = 51.2px
        let small = covered(128);
        let large = covered(1024);
        assert!((6..=7).contains(&small), "small={small}");
        assert!((51..=52).contains(&large), "large={large}");
    }
}
