//! Authoring session for a freehand drawing
//!
//! The drawing holds committed strokes plus at most one stroke that is still
//! being drawn. Exports never read the drawing directly: they take a
//! [`DrawingSnapshot`], which shares the committed list copy-on-write so
//! later commits or clears are never visible inside an in-flight export.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Point, Stroke, StrokeStyle};

/// Gesture input from the host UI, in authoring canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanvasEvent {
    /// Pointer down / drag start
    Start { x: f32, y: f32 },
    /// Pointer drag
    Move { x: f32, y: f32 },
    /// Pointer up - commit the stroke
    End,
    /// Gesture cancelled - drop the stroke
    Cancel,
    /// Explicit clear action
    Clear,
}

/// Committed strokes plus the in-progress stroke
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    committed: Arc<Vec<Stroke>>,
    in_progress: Option<Stroke>,
    /// Style used for strokes started through [`Drawing::apply`]
    style: StrokeStyle,
    /// Authoring canvas size in pixels, used to normalize events
    canvas_size: (u32, u32),
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drawing that starts new strokes with `style`
    pub fn with_style(style: StrokeStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Record the on-screen canvas size (layout changes)
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = (width, height);
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    /// Start a stroke at `point`
    ///
    /// An unfinished in-progress stroke is discarded.
    pub fn begin_stroke(&mut self, point: Point, style: StrokeStyle) {
        if self.in_progress.is_some() {
            debug!("begin_stroke: discarding unfinished stroke");
        }
        let mut stroke = Stroke::new(style);
        stroke.push(point);
        self.in_progress = Some(stroke);
    }

    /// Append a point to the in-progress stroke
    pub fn extend_stroke(&mut self, point: Point) {
        match self.in_progress.as_mut() {
            Some(stroke) => stroke.push(point),
            None => debug!("extend_stroke: no active stroke, ignoring"),
        }
    }

    /// Commit the in-progress stroke; returns false if there was none
    pub fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.in_progress.take() else {
            return false;
        };
        debug!("end_stroke: committing stroke with {} points", stroke.len());
        Arc::make_mut(&mut self.committed).push(stroke);
        true
    }

    /// Drop the in-progress stroke without committing it
    pub fn cancel_stroke(&mut self) {
        if let Some(stroke) = self.in_progress.take() {
            debug!("cancel_stroke: dropped stroke with {} points", stroke.len());
        }
    }

    /// Remove every stroke
    pub fn clear(&mut self) {
        // Replace rather than mutate so outstanding snapshots keep their strokes
        self.committed = Arc::new(Vec::new());
        self.in_progress = None;
    }

    /// Apply a host gesture event
    ///
    /// Starts are ignored until the canvas has a size, and moves without a
    /// started stroke are ignored.
    pub fn apply(&mut self, event: CanvasEvent) {
        let (canvas_width, canvas_height) = self.canvas_size;
        match event {
            CanvasEvent::Start { x, y } => {
                match Point::from_canvas(x, y, canvas_width, canvas_height) {
                    Some(point) => self.begin_stroke(point, self.style),
                    None => debug!("apply: canvas has no size yet, ignoring start"),
                }
            }
            CanvasEvent::Move { x, y } => {
                if let Some(point) = Point::from_canvas(x, y, canvas_width, canvas_height) {
                    self.extend_stroke(point);
                }
            }
            CanvasEvent::End => {
                self.end_stroke();
            }
            CanvasEvent::Cancel => self.cancel_stroke(),
            CanvasEvent::Clear => self.clear(),
        }
    }

    /// Committed strokes in drawing order
    pub fn strokes(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    pub fn is_stroking(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn stroke_count(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.in_progress.is_none()
    }

    /// Immutable view of the committed strokes at this moment
    pub fn snapshot(&self) -> DrawingSnapshot {
        DrawingSnapshot {
            strokes: Arc::clone(&self.committed),
        }
    }
}

/// Read-only committed stroke list, shared with the drawing it came from
#[derive(Debug, Clone, Default)]
pub struct DrawingSnapshot {
    strokes: Arc<Vec<Stroke>>,
}

impl DrawingSnapshot {
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }
}

impl Deref for DrawingSnapshot {
    type Target = [Stroke];

    fn deref(&self) -> &Self::Target {
        &self.strokes
    }
}

impl From<Vec<Stroke>> for DrawingSnapshot {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self {
            strokes: Arc::new(strokes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn draw_line(drawing: &mut Drawing, from: Point, to: Point) {
        drawing.begin_stroke(from, StrokeStyle::default());
        drawing.extend_stroke(to);
        drawing.end_stroke();
    }

    #[test]
    fn test_commit_stroke() {
        let mut drawing = Drawing::new();
        drawing.begin_stroke(Point::new(0.1, 0.1), StrokeStyle::default());
        drawing.extend_stroke(Point::new(0.2, 0.2));
        drawing.extend_stroke(Point::new(0.3, 0.3));
        assert!(drawing.is_stroking());
        assert_eq!(drawing.stroke_count(), 0);

        assert!(drawing.end_stroke());
        assert!(!drawing.is_stroking());
        assert_eq!(drawing.stroke_count(), 1);
        assert_eq!(
            drawing.strokes()[0].points(),
            &[Point::new(0.1, 0.1), Point::new(0.2, 0.2), Point::new(0.3, 0.3)]
        );
    }

    #[test]
    fn test_end_without_stroke() {
        let mut drawing = Drawing::new();
        assert!(!drawing.end_stroke());
        drawing.extend_stroke(Point::new(0.5, 0.5));
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_cancel_discards() {
        let mut drawing = Drawing::new();
        drawing.begin_stroke(Point::new(0.1, 0.1), StrokeStyle::default());
        drawing.extend_stroke(Point::new(0.2, 0.2));
        drawing.cancel_stroke();
        assert!(drawing.is_empty());
        assert!(!drawing.end_stroke());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut drawing = Drawing::new();
        draw_line(&mut drawing, Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        drawing.begin_stroke(Point::new(0.5, 0.5), StrokeStyle::default());
        drawing.clear();
        assert!(drawing.is_empty());
        assert_eq!(drawing.stroke_count(), 0);
    }

    #[test]
    fn test_snapshot_isolated_from_later_edits() {
        let mut drawing = Drawing::new();
        draw_line(&mut drawing, Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let snapshot = drawing.snapshot();

        // In-progress strokes are never part of a snapshot
        drawing.begin_stroke(Point::new(0.2, 0.2), StrokeStyle::default());
        assert_eq!(drawing.snapshot().len(), 1);

        drawing.extend_stroke(Point::new(0.3, 0.3));
        drawing.end_stroke();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(drawing.stroke_count(), 2);

        drawing.clear();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].points()[1], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_snapshot_is_send_to_worker() {
        let mut drawing = Drawing::new();
        draw_line(&mut drawing, Point::new(0.0, 0.0), Point::new(0.5, 0.5));
        let snapshot = drawing.snapshot();
        let count = std::thread::spawn(move || snapshot.len()).join().unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_apply_events() {
        let red = StrokeStyle {
            width_fraction: 0.05,
            color: Color::rgb(255, 0, 0),
        };
        let mut drawing = Drawing::with_style(red);

        // No canvas size yet: start is ignored, and so are the moves after it
        drawing.apply(CanvasEvent::Start { x: 10.0, y: 10.0 });
        drawing.apply(CanvasEvent::Move { x: 20.0, y: 20.0 });
        drawing.apply(CanvasEvent::End);
        assert!(drawing.is_empty());

        drawing.set_canvas_size(200, 100);
        drawing.apply(CanvasEvent::Start { x: 20.0, y: 10.0 });
        drawing.apply(CanvasEvent::Move { x: 100.0, y: 50.0 });
        drawing.apply(CanvasEvent::End);
        assert_eq!(drawing.stroke_count(), 1);
        let stroke = &drawing.strokes()[0];
        assert_eq!(stroke.style(), red);
        assert_eq!(stroke.points(), &[Point::new(0.1, 0.1), Point::new(0.5, 0.5)]);

        drawing.apply(CanvasEvent::Start { x: 0.0, y: 0.0 });
        drawing.apply(CanvasEvent::Cancel);
        assert_eq!(drawing.stroke_count(), 1);

        drawing.apply(CanvasEvent::Clear);
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_event_json() {
        let events: Vec<CanvasEvent> = serde_json::from_str(
            r#"[{"type":"start","x":1.0,"y":2.0},{"type":"move","x":3.0,"y":4.0},{"type":"end"}]"#,
        )
        .unwrap();
        assert_eq!(events[0], CanvasEvent::Start { x: 1.0, y: 2.0 });
        assert_eq!(events[2], CanvasEvent::End);
    }
}
