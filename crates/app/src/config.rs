//! Command-line options and export configuration resolution

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sketch_config::{BackgroundMode, ExportSize, SketchConfig};

/// Which files to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatChoice {
    Png,
    Svg,
    #[default]
    Both,
}

impl FormatChoice {
    pub fn wants_png(self) -> bool {
        matches!(self, Self::Png | Self::Both)
    }

    pub fn wants_svg(self) -> bool {
        matches!(self, Self::Svg | Self::Both)
    }
}

/// Background choice as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackgroundChoice {
    White,
    Transparent,
}

impl From<BackgroundChoice> for BackgroundMode {
    fn from(choice: BackgroundChoice) -> Self {
        match choice {
            BackgroundChoice::White => Self::White,
            BackgroundChoice::Transparent => Self::Transparent,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sketch-export", version, about)]
pub struct Cli {
    /// Recorded gesture file (JSON)
    #[arg(short, long)]
    pub gestures: PathBuf,

    /// Square export size: 128, 256, 512 or 1024
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Background fill
    #[arg(short, long, value_enum)]
    pub background: Option<BackgroundChoice>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatChoice::Both)]
    pub format: FormatChoice,

    /// Storage root; PNG and SVG directories are created beneath it
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Log per-stroke detail
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Config file (or defaults), then environment, then command-line flags
    pub fn resolve_config(&self) -> anyhow::Result<SketchConfig> {
        let config = match &self.config {
            Some(path) => SketchConfig::from_file(path)?,
            None => SketchConfig::default(),
        };
        let config = config.with_env_overrides()?;
        self.apply_flags(config)
    }

    fn apply_flags(&self, mut config: SketchConfig) -> anyhow::Result<SketchConfig> {
        if let Some(size) = self.size {
            config.export.size = ExportSize::try_from(size)?;
        }
        if let Some(background) = self.background {
            config.export.background = background.into();
        }
        Ok(config)
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else if self.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sketch-export").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--gestures", "g.json"]);
        assert_eq!(cli.format, FormatChoice::Both);
        assert_eq!(cli.out, PathBuf::from("."));
        assert_eq!(cli.log_level(), tracing::Level::WARN);

        let config = cli.apply_flags(SketchConfig::default()).unwrap();
        assert_eq!(config, SketchConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "-g", "g.json", "--size", "1024", "--background", "transparent", "--format", "svg",
        ]);
        let config = cli.apply_flags(SketchConfig::default()).unwrap();
        assert_eq!(config.export.size, ExportSize::S1024);
        assert_eq!(config.export.background, BackgroundMode::Transparent);
        assert!(cli.format.wants_svg());
        assert!(!cli.format.wants_png());
    }

    #[test]
    fn test_unsupported_size() {
        let cli = parse(&["-g", "g.json", "--size", "100"]);
        assert!(cli.apply_flags(SketchConfig::default()).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["-g", "g", "-v"]).log_level(), tracing::Level::INFO);
        assert_eq!(parse(&["-g", "g", "--debug"]).log_level(), tracing::Level::DEBUG);
    }
}
