//! Render + write jobs
//!
//! An export renders an immutable [`DrawingSnapshot`] and hands the result to
//! an [`ExportWriter`]. The async entry points run the whole job on tokio's
//! blocking pool so rendering and file I/O never run on the caller's thread.
//! Jobs are not cancellable and are never retried.

use std::sync::Arc;

use canvas::{render_raster_with_gap, render_svg_with_gap, DrawingSnapshot, ExportTarget, Stroke};
use chrono::Local;
use sketch_config::{ExportConfig, DEFAULT_MAX_GAP_PX};
use tracing::{info, warn};

use crate::naming::{suggested_file_name, ExportFormat};
use crate::writer::ExportWriter;
use crate::ExportError;

/// Runs exports against a shared writer
pub struct Exporter<W> {
    writer: Arc<W>,
    max_gap_px: f32,
}

impl<W> Clone for Exporter<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            max_gap_px: self.max_gap_px,
        }
    }
}

impl<W: ExportWriter + 'static> Exporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(writer),
            max_gap_px: DEFAULT_MAX_GAP_PX,
        }
    }

    /// Use the densification gap from `config`
    pub fn with_config(writer: W, config: &ExportConfig) -> Self {
        Self {
            writer: Arc::new(writer),
            max_gap_px: config.max_gap_px,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Render and store a PNG on the calling thread
    pub fn export_png_blocking(
        &self,
        snapshot: &DrawingSnapshot,
        target: ExportTarget,
    ) -> Result<W::Handle, ExportError> {
        png_job(self.writer.as_ref(), snapshot, target, self.max_gap_px)
    }

    /// Render and store an SVG on the calling thread; returns the file name
    pub fn export_svg_blocking(
        &self,
        snapshot: &DrawingSnapshot,
        target: ExportTarget,
    ) -> Result<String, ExportError> {
        svg_job(self.writer.as_ref(), snapshot, target, self.max_gap_px)
    }

    /// Render and store a PNG on the blocking pool
    pub async fn export_png(
        &self,
        snapshot: DrawingSnapshot,
        target: ExportTarget,
    ) -> Result<W::Handle, ExportError> {
        let writer = Arc::clone(&self.writer);
        let max_gap_px = self.max_gap_px;
        tokio::task::spawn_blocking(move || png_job(writer.as_ref(), &snapshot, target, max_gap_px))
            .await
            .map_err(|e| ExportError::Worker(e.to_string()))?
    }

    /// Render and store an SVG on the blocking pool; returns the file name
    pub async fn export_svg(
        &self,
        snapshot: DrawingSnapshot,
        target: ExportTarget,
    ) -> Result<String, ExportError> {
        let writer = Arc::clone(&self.writer);
        let max_gap_px = self.max_gap_px;
        tokio::task::spawn_blocking(move || svg_job(writer.as_ref(), &snapshot, target, max_gap_px))
            .await
            .map_err(|e| ExportError::Worker(e.to_string()))?
    }

    /// [`Exporter::export_png`], with failure reduced to None
    pub async fn try_export_png(
        &self,
        snapshot: DrawingSnapshot,
        target: ExportTarget,
    ) -> Option<W::Handle> {
        match self.export_png(snapshot, target).await {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("PNG export failed: {}", err);
                None
            }
        }
    }

    /// [`Exporter::export_svg`], with failure reduced to false
    pub async fn try_export_svg(&self, snapshot: DrawingSnapshot, target: ExportTarget) -> bool {
        match self.export_svg(snapshot, target).await {
            Ok(_) => true,
            Err(err) => {
                warn!("SVG export failed: {}", err);
                false
            }
        }
    }
}

fn png_job<W: ExportWriter>(
    writer: &W,
    strokes: &[Stroke],
    target: ExportTarget,
    max_gap_px: f32,
) -> Result<W::Handle, ExportError> {
    let image = render_raster_with_gap(
        strokes,
        target.width,
        target.height,
        target.background,
        max_gap_px,
    )?;
    let file_name = suggested_file_name(target.width, ExportFormat::Png, Local::now().naive_local());
    let handle = writer.save_raster(&image, &file_name)?;
    info!(
        "Exported {} strokes to {} ({}x{})",
        strokes.len(),
        file_name,
        target.width,
        target.height
    );
    Ok(handle)
}

fn svg_job<W: ExportWriter>(
    writer: &W,
    strokes: &[Stroke],
    target: ExportTarget,
    max_gap_px: f32,
) -> Result<String, ExportError> {
    let svg = render_svg_with_gap(
        strokes,
        target.width,
        target.height,
        target.background,
        max_gap_px,
    );
    let file_name = suggested_file_name(target.width, ExportFormat::Svg, Local::now().naive_local());
    writer.save_vector(&svg, &file_name)?;
    info!(
        "Exported {} strokes to {} ({}x{})",
        strokes.len(),
        file_name,
        target.width,
        target.height
    );
    Ok(file_name)
}
