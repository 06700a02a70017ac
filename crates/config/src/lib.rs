//! Shared configuration for sketch export
//!
//! This crate provides the single source of truth for export sizes,
//! background policy, stroke defaults, and output locations shared by the
//! canvas core, the export writer, and the command-line host.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default stroke width as a fraction of the export's smaller dimension
pub const DEFAULT_WIDTH_FRACTION: f32 = 0.012;

/// Default stroke color (opaque black), RGBA
pub const DEFAULT_STROKE_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Largest pixel gap allowed between consecutive samples after densification
pub const DEFAULT_MAX_GAP_PX: f32 = 1.5;

/// Default export edge length in pixels
pub const DEFAULT_EXPORT_SIZE: u32 = 256;

/// Every supported square export edge length, smallest first
pub const EXPORT_SIZES: [u32; 4] = [128, 256, 512, 1024];

/// Directory (relative to the storage root) that receives PNG exports
pub const DEFAULT_PICTURES_DIR: &str = "Pictures/Canvas";

/// Directory (relative to the storage root) that receives SVG exports
pub const DEFAULT_DOWNLOADS_DIR: &str = "Download";

/// Environment variable overriding the export size
pub const ENV_EXPORT_SIZE: &str = "SKETCH_EXPORT_SIZE";

/// Environment variable overriding the background mode
pub const ENV_BACKGROUND: &str = "SKETCH_BACKGROUND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported export size: {0} (expected one of 128, 256, 512, 1024)")]
    UnsupportedSize(u32),
    #[error("Unknown background mode: {0}")]
    UnknownBackground(String),
    #[error("Invalid stroke width fraction: {0}")]
    InvalidWidthFraction(f32),
    #[error("Invalid densification gap: {0}")]
    InvalidGap(f32),
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Square export resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum ExportSize {
    S128,
    #[default]
    S256,
    S512,
    S1024,
}

impl ExportSize {
    /// All sizes in ascending order
    pub const ALL: [ExportSize; 4] = [Self::S128, Self::S256, Self::S512, Self::S1024];

    /// Edge length in pixels
    pub fn pixels(self) -> u32 {
        match self {
            Self::S128 => 128,
            Self::S256 => 256,
            Self::S512 => 512,
            Self::S1024 => 1024,
        }
    }
}

impl TryFrom<u32> for ExportSize {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            128 => Ok(Self::S128),
            256 => Ok(Self::S256),
            512 => Ok(Self::S512),
            1024 => Ok(Self::S1024),
            other => Err(ConfigError::UnsupportedSize(other)),
        }
    }
}

impl From<ExportSize> for u32 {
    fn from(size: ExportSize) -> Self {
        size.pixels()
    }
}

impl std::fmt::Display for ExportSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// Background policy for exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Opaque white fill
    #[default]
    White,
    /// No fill, alpha preserved
    Transparent,
}

impl BackgroundMode {
    /// Fill color as RGBA, or None for a transparent export
    pub fn rgba(self) -> Option<[u8; 4]> {
        match self {
            Self::White => Some([255, 255, 255, 255]),
            Self::Transparent => None,
        }
    }
}

impl std::str::FromStr for BackgroundMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Self::White),
            "transparent" | "none" => Ok(Self::Transparent),
            other => Err(ConfigError::UnknownBackground(other.to_string())),
        }
    }
}

/// Style applied to every new stroke
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrokeDefaults {
    /// Width as a fraction of min(width, height) of the render target
    pub width_fraction: f32,
    /// RGBA color
    pub color: [u8; 4],
}

impl Default for StrokeDefaults {
    fn default() -> Self {
        Self {
            width_fraction: DEFAULT_WIDTH_FRACTION,
            color: DEFAULT_STROKE_COLOR,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub size: ExportSize,
    pub background: BackgroundMode,
    /// Densification threshold in output pixels
    pub max_gap_px: f32,
    /// Where PNG files land, relative to the storage root
    pub pictures_dir: PathBuf,
    /// Where SVG files land, relative to the storage root
    pub downloads_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            size: ExportSize::default(),
            background: BackgroundMode::default(),
            max_gap_px: DEFAULT_MAX_GAP_PX,
            pictures_dir: PathBuf::from(DEFAULT_PICTURES_DIR),
            downloads_dir: PathBuf::from(DEFAULT_DOWNLOADS_DIR),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SketchConfig {
    pub stroke: StrokeDefaults,
    pub export: ExportConfig,
}

impl SketchConfig {
    /// Parse a JSON document; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Apply `SKETCH_EXPORT_SIZE` / `SKETCH_BACKGROUND` when set
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(
            std::env::var(ENV_EXPORT_SIZE).ok().as_deref(),
            std::env::var(ENV_BACKGROUND).ok().as_deref(),
        )
    }

    fn with_overrides(
        mut self,
        size: Option<&str>,
        background: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(size) = size {
            let pixels = size
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::UnsupportedSize(0))?;
            self.export.size = ExportSize::try_from(pixels)?;
        }
        if let Some(background) = background {
            self.export.background = background.parse()?;
        }
        Ok(self)
    }

    /// Reject values the renderers cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fraction = self.stroke.width_fraction;
        if !fraction.is_finite() || fraction <= 0.0 {
            return Err(ConfigError::InvalidWidthFraction(fraction));
        }
        let gap = self.export.max_gap_px;
        if !gap.is_finite() || gap <= 0.0 {
            return Err(ConfigError::InvalidGap(gap));
        }
        Ok(())
    }
}
