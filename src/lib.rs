/*
 * Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulator.
 * The simulation core (entity store, flocking engine, boundary steering)
 * has no dependency on the windowing layer; the viewer modules are only
 * compiled with the `viewer` feature.
 */

// Re-export key components for easier access
pub use command::{Command, CommandOutcome};
pub use config::{Config, ConfigError};
pub use entity::Entity;
pub use flock::{EntityId, Flock};
pub use params::SimulationParams;
pub use physics::{step, step_with_probe, GroupProbe};
pub use snapshot::SnapshotError;
pub use stats::FlockStats;
pub use viewport::Viewport;

// Define modules
pub mod command;
pub mod config;
pub mod entity;
pub mod flock;
pub mod params;
pub mod physics;
pub mod snapshot;
pub mod stats;
pub mod steering;
pub mod vectors;
pub mod viewport;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod debug;
#[cfg(feature = "viewer")]
pub mod input;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;

// Constants
pub const MAX_ENTITIES: usize = 1000;
pub const INITIAL_ENTITIES: usize = 30;
pub const ENTITY_SPEED: f32 = 6.0;
pub const ENTITY_LENGTH: f32 = 10.0;
pub const ENTITY_WIDTH: f32 = 6.0;

// Radii are adjusted in fixed steps and never drop below the floor
pub const MIN_RADIUS: f32 = 10.0;
pub const RADIUS_STEP: f32 = 10.0;
pub const DEFAULT_REPULSION_RADIUS: f32 = 50.0;
pub const DEFAULT_GROUP_RADIUS: f32 = 140.0;

/// Installs the `tracing` subscriber shared by both binaries.
///
/// `RUST_LOG` wins when set; otherwise everything at `info` and above is shown.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
