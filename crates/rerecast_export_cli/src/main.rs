//! Exports the navmesh input geometry of a JSON scene description as RecastDemo OBJ files.

mod scene;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rerecast_export::{ExportOptions, Identity, ZUpToYUp, export_navigation_data};

use crate::scene::SceneDescription;

/// Export navmesh input geometry for RecastDemo
#[derive(Parser, Debug)]
#[command(name = "rerecast-export", version)]
struct Args {
    /// Path to the JSON scene description
    scene: PathBuf,

    /// Prefix of the written files, possibly including directories
    #[arg(short, long, default_value = "nav")]
    out: PathBuf,

    /// Timestamp used in file names instead of the current local time
    #[arg(long)]
    timestamp: Option<String>,

    /// The scene is already Y-up, so coordinates are written unchanged
    #[arg(long)]
    y_up: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let scene = SceneDescription::load(&args.scene)?;

    let mut options = ExportOptions::new(args.out);
    options.timestamp = args.timestamp;

    let navigation = scene.navigation.as_ref();
    let summary = if args.y_up {
        export_navigation_data(navigation, &scene.world, &Identity, &options)?
    } else {
        export_navigation_data(navigation, &scene.world, &ZUpToYUp, &options)?
    };

    for path in &summary.written {
        tracing::info!("Wrote {}", path.display());
    }
    for skipped in &summary.skipped {
        tracing::warn!("Skipped navigation data set {}: {}", skipped.index, skipped.reason);
    }
    Ok(())
}
