//! Export pipeline for canvas drawings
//!
//! - [`writer`] - the storage boundary ([`ExportWriter`]) and a directory-backed writer
//! - [`png`] - lossless PNG encoding of rendered images
//! - [`naming`] - suggested file names and formats
//! - [`exporter`] - render + write jobs on a snapshot, off the caller's thread

pub mod exporter;
pub mod naming;
pub mod png;
pub mod writer;

use std::path::PathBuf;

use canvas::RenderError;
use thiserror::Error;

pub use exporter::Exporter;
pub use naming::{suggested_file_name, ExportFormat};
pub use png::encode_png;
pub use writer::{DirectoryWriter, ExportWriter};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Export worker failed: {0}")]
    Worker(String),
}
