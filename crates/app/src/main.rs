//! sketch-export - replay recorded canvas gestures and export PNG / SVG

mod config;
mod input;

use std::process::ExitCode;

use canvas::{ExportTarget, StrokeStyle};
use clap::Parser;
use sketch_export::{DirectoryWriter, Exporter};
use tracing::{error, info};

use config::Cli;
use input::GestureRecording;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(cli.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.resolve_config()?;
    info!(
        "Exporting {}px, background {:?}",
        config.export.size, config.export.background
    );

    let recording = GestureRecording::load(&cli.gestures)?;
    let drawing = recording.replay(StrokeStyle::from(&config.stroke));
    // Taken once; both formats render the same strokes
    let snapshot = drawing.snapshot();
    info!("{} strokes to export", snapshot.len());

    let target = ExportTarget::square(config.export.size, config.export.background);
    let exporter = Exporter::with_config(
        DirectoryWriter::from_config(&cli.out, &config.export),
        &config.export,
    );

    let mut failed = false;

    if cli.format.wants_png() {
        match exporter.export_png(snapshot.clone(), target).await {
            Ok(path) => println!("{}", path.display()),
            Err(err) => {
                error!("PNG export failed: {}", err);
                failed = true;
            }
        }
    }

    if cli.format.wants_svg() {
        match exporter.export_svg(snapshot, target).await {
            Ok(file_name) => println!("{}", exporter.writer().vector_path(&file_name).display()),
            Err(err) => {
                error!("SVG export failed: {}", err);
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
