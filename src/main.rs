//! austral - south-polar map scene composer
//!
//! This is the main entry point for the austral command-line tool. It loads a
//! record table, composes a polar scene and writes the scene description as JSON.

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tracing::{error, info};

use austral::config::Args;
use austral::data_loader::{load_coastline, load_dataset};
use austral::{
    init_tracing, log_error, log_scene_stats, log_timed_operation, Config, Mapping,
    PaletteTable, PlotRequest, SceneComposer, WorldCoastline,
};

fn main() -> Result<()> {
    let (config, args) = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log_level);
    info!("Starting austral v{}", env!("CARGO_PKG_VERSION"));

    run(&config, &args)
}

fn run(config: &Config, args: &Args) -> Result<()> {
    let dataset = load_dataset(&args.data_file)
        .with_context(|| format!("Failed to load records from {}", args.data_file.display()))?;

    let coastline = match &args.coastline {
        Some(path) => load_coastline(path)
            .with_context(|| format!("Failed to load coastline from {}", path.display()))?,
        None => {
            info!("No coastline file given; coastline overlay will be empty");
            WorldCoastline::default()
        }
    };

    let composer = SceneComposer::new(PaletteTable::shared(), Arc::new(coastline))
        .with_options(config.plot.to_options());

    let mut mapping = Mapping::new();
    if let Some(column) = &args.fill {
        mapping.insert("fill", column.clone());
    }
    if let Some(column) = &args.colour {
        mapping.insert("colour", column.clone());
    }

    let request = PlotRequest::new(mapping, config.plot.geom_kind()?)
        .with_precision(config.plot.precision());

    let scene = log_timed_operation("compose", || composer.compose(&dataset, &request))
        .map_err(|e| {
            log_error(&e, "compose");
            e
        })?;
    log_scene_stats(&scene);

    let json = serde_json::to_string_pretty(&scene).context("Failed to serialize scene")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write scene to {}", path.display()))?;
            info!("Wrote scene to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).map_err(|e| {
                error!("Failed to write scene to stdout: {}", e);
                e
            })?;
        }
    }

    Ok(())
}
