//! Recorded gesture input
//!
//! A gesture file stands in for the interactive canvas: it records the
//! on-screen canvas size and the pointer events the UI delivered.

use std::path::Path;

use anyhow::Context;
use canvas::{CanvasEvent, Drawing, StrokeStyle};
use serde::Deserialize;
use tracing::debug;

/// On-screen canvas size the events were captured against
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GestureRecording {
    pub canvas: CanvasSize,
    pub events: Vec<CanvasEvent>,
}

impl GestureRecording {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid gesture recording")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read gestures from {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Feed every event through a fresh drawing
    ///
    /// A stroke still in progress at the end of the recording is not
    /// committed, the same as a gesture the UI never finished.
    pub fn replay(&self, style: StrokeStyle) -> Drawing {
        let mut drawing = Drawing::with_style(style);
        drawing.set_canvas_size(self.canvas.width, self.canvas.height);
        for event in &self.events {
            drawing.apply(*event);
        }
        debug!(
            "Replayed {} events into {} strokes",
            self.events.len(),
            drawing.stroke_count()
        );
        drawing
    }
}
