/*
 * Headless Flock Runner
 *
 * Runs the simulation without a window for a fixed number of ticks and
 * logs flock statistics along the way. Useful for profiling the engine
 * and for checking long runs stay bounded.
 */

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use flock::config::DEFAULT_CONFIG_PATH;
use flock::{init_tracing, step, Config, FlockStats, Viewport};

#[derive(Parser, Debug)]
#[command(name = "flock_headless")]
#[command(about = "Run the flocking simulation without a window")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of entities to spawn (overrides the config)
    #[arg(long)]
    entities: Option<usize>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Viewport width (overrides the config)
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height (overrides the config)
    #[arg(long)]
    height: Option<u32>,

    /// Log statistics every N ticks
    #[arg(long, default_value_t = 100)]
    report_every: u64,
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
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    config.validate().context("invalid settings")?;
    if args.report_every == 0 {
        bail!("--report-every must be at least 1");
    }

    let viewport: Viewport = config.viewport();
    let mut rng = config.rng();
    let mut flock = config.empty_flock();
    let spawned = flock.populate(config.flock.initial_entities, viewport, &mut rng);

    info!(
        entities = spawned,
        ticks = args.ticks,
        width = viewport.width,
        height = viewport.height,
        seed = ?config.flock.seed,
        "starting headless run"
    );

    for tick in 1..=args.ticks {
        step(&mut flock, viewport, &config.params);

        if tick % args.report_every == 0 || tick == args.ticks {
            let stats = FlockStats::collect(&flock);
            info!(
                tick,
                count = stats.count,
                energy = stats.energy,
                mean_speed = stats.mean_speed,
                max_speed = stats.max_speed,
                "flock stats"
            );
        }
    }

    info!("headless run finished");
    Ok(())
}
