//! Storage boundary for finished exports
//!
//! [`ExportWriter`] hides where bytes end up (media store, downloads folder,
//! in-memory for tests). [`DirectoryWriter`] is the filesystem version: PNGs
//! go to a pictures directory and SVGs to a downloads directory.
//!
//! Every write lands in a hidden `.<name>.partial` file first and is renamed
//! into place once complete. On failure the partial file is removed, so a
//! failed export never leaves a truncated image behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use canvas::RasterImage;
use sketch_config::ExportConfig;
use tracing::{debug, warn};

use crate::png::encode_png;
use crate::ExportError;

/// Persists finished export artifacts
///
/// Each call is attempted once; callers decide whether to retry.
pub trait ExportWriter: Send + Sync {
    /// Identifies a stored raster image (a path, a content URI, ...)
    type Handle: Send + 'static;

    /// Encode and store a raster image as PNG
    fn save_raster(&self, image: &RasterImage, file_name: &str) -> Result<Self::Handle, ExportError>;

    /// Store SVG document text as UTF-8
    fn save_vector(&self, svg: &str, file_name: &str) -> Result<(), ExportError>;
}

/// Writes exports into two directories on the local filesystem
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    pictures_dir: PathBuf,
    downloads_dir: PathBuf,
}

impl DirectoryWriter {
    pub fn new(pictures_dir: impl Into<PathBuf>, downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            pictures_dir: pictures_dir.into(),
            downloads_dir: downloads_dir.into(),
        }
    }

    /// Resolve the configured export directories under `root`
    pub fn from_config(root: impl AsRef<Path>, config: &ExportConfig) -> Self {
        let root = root.as_ref();
        Self::new(root.join(&config.pictures_dir), root.join(&config.downloads_dir))
    }

    pub fn pictures_dir(&self) -> &Path {
        &self.pictures_dir
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Path an SVG named `file_name` is stored at
    pub fn vector_path(&self, file_name: &str) -> PathBuf {
        self.downloads_dir.join(file_name)
    }
}

impl ExportWriter for DirectoryWriter {
    type Handle = PathBuf;

    fn save_raster(&self, image: &RasterImage, file_name: &str) -> Result<PathBuf, ExportError> {
        let bytes = encode_png(image)?;
        write_atomically(&self.pictures_dir, file_name, &bytes)
    }

    fn save_vector(&self, svg: &str, file_name: &str) -> Result<(), ExportError> {
        write_atomically(&self.downloads_dir, file_name, svg.as_bytes()).map(|_| ())
    }
}

/// Write `bytes` to `dir/file_name` via a temporary sibling file
fn write_atomically(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    validate_file_name(file_name)?;

    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let target = dir.join(file_name);
    let partial = dir.join(format!(".{file_name}.partial"));

    let result = write_then_rename(&partial, &target, bytes);
    if result.is_err() && partial.exists() {
        if let Err(err) = fs::remove_file(&partial) {
            warn!("Failed to remove partial file {}: {}", partial.display(), err);
        }
    }
    result?;

    debug!("Wrote {} bytes to {}", bytes.len(), target.display());
    Ok(target)
}

fn write_then_rename(partial: &Path, target: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Io { path, source }
    };

    let mut file = File::create(partial).map_err(io_err(partial))?;
    file.write_all(bytes).map_err(io_err(partial))?;
    file.sync_all().map_err(io_err(partial))?;
    drop(file);

    fs::rename(partial, target).map_err(io_err(target))
}

/// Only bare file names: no separators, no parent references
fn validate_file_name(file_name: &str) -> Result<(), ExportError> {
    let is_bare = !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && Path::new(file_name).file_name().and_then(|n| n.to_str()) == Some(file_name);
    if is_bare {
        Ok(())
    } else {
        Err(ExportError::InvalidFileName(file_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas::{render_raster, Color};

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_raster_writes_png() {
        let root = tempfile::tempdir().unwrap();
        let writer = DirectoryWriter::from_config(root.path(), &ExportConfig::default());
        let image = render_raster(&[], 16, 16, Some(Color::WHITE)).unwrap();

        let path = writer.save_raster(&image, "canvas_16.png").unwrap();
        assert_eq!(path, root.path().join("Pictures/Canvas/canvas_16.png"));

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(entries(writer.pictures_dir()), vec!["canvas_16.png"]);
    }

    #[test]
    fn test_save_vector_writes_text() {
        let root = tempfile::tempdir().unwrap();
        let writer = DirectoryWriter::from_config(root.path(), &ExportConfig::default());

        writer.save_vector("<svg/>", "canvas_16.svg").unwrap();
        let path = writer.vector_path("canvas_16.svg");
        assert_eq!(path, root.path().join("Download/canvas_16.svg"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<svg/>");
    }

    #[test]
    fn test_failed_rename_leaves_no_partial_file() {
        let root = tempfile::tempdir().unwrap();
        let writer = DirectoryWriter::new(root.path().join("png"), root.path().join("svg"));

        // A directory occupying the target name makes the final rename fail
        fs::create_dir_all(writer.downloads_dir().join("taken.svg/inner")).unwrap();

        let result = writer.save_vector("<svg/>", "taken.svg");
        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert_eq!(entries(writer.downloads_dir()), vec!["taken.svg"]);
    }

    #[test]
    fn test_unwritable_directory() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();
        let writer = DirectoryWriter::new(&blocker, &blocker);

        let image = render_raster(&[], 4, 4, None).unwrap();
        assert!(writer.save_raster(&image, "a.png").is_err());
        assert!(writer.save_vector("<svg/>", "a.svg").is_err());
        assert_eq!(fs::read(&blocker).unwrap(), b"file");
    }

    #[test]
    fn test_rejects_paths_as_file_names() {
        let root = tempfile::tempdir().unwrap();
        let writer = DirectoryWriter::new(root.path(), root.path());
        for name in ["", "..", "../escape.svg", "nested/name.svg"] {
            assert!(
                matches!(
                    writer.save_vector("<svg/>", name),
                    Err(ExportError::InvalidFileName(_))
                ),
                "{name}"
            );
        }
        assert!(entries(root.path()).is_empty());
    }
}
