//! Suggested export file names
//!
//! Names follow `canvas_<size>_<yyyyMMdd_HHmmss_SSS>.<ext>`. The timestamp is
//! advisory only; the writer decides what to do with collisions.

use chrono::NaiveDateTime;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// File name for a `size`px export taken at `at` (local wall-clock time)
pub fn suggested_file_name(size: u32, format: ExportFormat, at: NaiveDateTime) -> String {
    format!(
        "canvas_{}_{}.{}",
        size,
        at.format("%Y%m%d_%H%M%S_%3f"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_milli_opt(9, 5, 2, 41)
            .unwrap()
    }

    #[test]
    fn test_png_name() {
        assert_eq!(
            suggested_file_name(256, ExportFormat::Png, at()),
            "canvas_256_20240307_090502_041.png"
        );
    }

    #[test]
    fn test_svg_name() {
        assert_eq!(
            suggested_file_name(1024, ExportFormat::Svg, at()),
            "canvas_1024_20240307_090502_041.svg"
        );
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Svg.mime_type(), "image/svg+xml");
    }
}
