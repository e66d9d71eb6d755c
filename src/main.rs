/*
 * Flocking Simulation
 *
 * This application simulates a 2-D flock whose motion emerges from local
 * interaction rules evaluated every frame:
 * 1. Repulsion: move away from neighbors that are too close
 * 2. Grouping: steer toward the centroid and mean heading of neighbors
 * 3. Boundary steering: curve back from the window edges
 *
 * Radii and population are controlled from the keyboard; the remaining
 * parameters live in a panel toggled with Tab.
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use flock::config::DEFAULT_CONFIG_PATH;
use flock::{app, init_tracing, Config};

#[derive(Parser, Debug)]
#[command(name = "flock")]
#[command(about = "Interactive 2-D flocking simulator")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of entities to start with (overrides the config)
    #[arg(long)]
    entities: Option<usize>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.flock.seed = Some(seed);
    }
    if let Some(entities) = args.entities {
        config.flock.initial_entities = entities;
    }
    config.validate().context("invalid settings")?;

    app::run(config);
    Ok(())
}
