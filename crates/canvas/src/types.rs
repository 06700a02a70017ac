use glam::Vec2;
use serde::{Deserialize, Serialize};
use sketch_config::{
    BackgroundMode, ExportSize, StrokeDefaults, DEFAULT_STROKE_COLOR, DEFAULT_WIDTH_FRACTION,
};

/// Position as a fraction of canvas width (x) and height (y), both in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalize a pointer position against the authoring canvas size
    ///
    /// Returns None while the canvas has no size yet. Positions outside the
    /// canvas are clamped onto its edge.
    pub fn from_canvas(px: f32, py: f32, canvas_width: u32, canvas_height: u32) -> Option<Self> {
        if canvas_width == 0 || canvas_height == 0 {
            return None;
        }
        Some(Self {
            x: (px / canvas_width as f32).clamp(0.0, 1.0),
            y: (py / canvas_height as f32).clamp(0.0, 1.0),
        })
    }

    /// Scale into pixel space, width and height independently
    #[inline]
    pub fn to_pixels(self, width: u32, height: u32) -> Vec2 {
        Vec2::new(self.x * width as f32, self.y * height as f32)
    }
}

impl From<Point> for Vec2 {
    fn from(point: Point) -> Self {
        Vec2::new(point.x, point.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// 8-bit straight RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha forced to 255
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    /// `#RRGGBB`, alpha dropped
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Width and color fixed when a stroke starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Fraction of min(width, height) of the render target
    pub width_fraction: f32,
    pub color: Color,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width_fraction: DEFAULT_WIDTH_FRACTION,
            color: Color::from(DEFAULT_STROKE_COLOR),
        }
    }
}

impl From<&StrokeDefaults> for StrokeStyle {
    fn from(defaults: &StrokeDefaults) -> Self {
        Self {
            width_fraction: defaults.width_fraction,
            color: Color::from(defaults.color),
        }
    }
}

/// One continuous freehand gesture in normalized coordinates
///
/// Points are append-only and kept in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
    pub width_fraction: f32,
    pub color: Color,
}

impl Stroke {
    /// Create an empty stroke with the given style
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            points: Vec::new(),
            width_fraction: style.width_fraction,
            color: style.color,
        }
    }

    /// Create a stroke from an existing point sequence
    pub fn from_points(points: impl IntoIterator<Item = Point>, style: StrokeStyle) -> Self {
        Self {
            points: points.into_iter().collect(),
            ..Self::new(style)
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// At least one segment to draw
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            width_fraction: self.width_fraction,
            color: self.color,
        }
    }

    /// Stroke width in pixels for a width x height target
    pub fn pixel_width(&self, width: u32, height: u32) -> f32 {
        self.width_fraction * width.min(height) as f32
    }
}

/// Output size and background for one export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTarget {
    pub width: u32,
    pub height: u32,
    /// Opaque fill, or None for transparent
    pub background: Option<Color>,
}

impl ExportTarget {
    pub fn new(width: u32, height: u32, background: Option<Color>) -> Self {
        Self {
            width,
            height,
            background,
        }
    }

    /// Square target from the configured size and background mode
    pub fn square(size: ExportSize, background: BackgroundMode) -> Self {
        let edge = size.pixels();
        Self::new(edge, edge, background.rgba().map(Color::from))
    }
}
