/*
 * Application Module
 *
 * This module defines the viewer's model and per-frame update. The
 * window supplies the viewport size and keyboard commands; the flock
 * advances exactly one tick per frame unless paused.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::SmallRng;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::debug::{DebugInfo, Overlay};
use crate::flock::{EntityId, Flock};
use crate::input::{key_pressed, raw_window_event, viewport_of};
use crate::params::SimulationParams;
use crate::physics::step_with_probe;
use crate::renderer::view;
use crate::stats::FlockStats;
use crate::ui;

// nannou builds the model from a plain `fn(&App)`, so the launch
// settings are parked here by `run`
static LAUNCH_CONFIG: OnceLock<Config> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub rng: SmallRng,
    pub egui: Egui,
    pub overlay: Overlay,
    pub debug_info: DebugInfo,
    pub paused: bool,
}

/// Opens the window and runs until it is closed.
pub fn run(config: Config) {
    if LAUNCH_CONFIG.set(config).is_err() {
        warn!("viewer already launched, ignoring new config");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = LAUNCH_CONFIG.get().cloned().unwrap_or_default();

    // Create the main window
    let window_id = app
        .new_window()
        .title(&config.window.title)
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to create the main window");

    let window = app.window(window_id).expect("main window closed during setup");
    let egui = Egui::from_window(&window);

    // Populate the flock inside the window that was actually created
    let viewport = viewport_of(app);
    let mut rng = config.rng();
    let mut flock = config.empty_flock();
    let spawned = flock.populate(config.flock.initial_entities, viewport, &mut rng);
    info!(
        entities = spawned,
        width = viewport.width,
        height = viewport.height,
        "viewer started"
    );

    Model {
        flock,
        params: config.params,
        rng,
        egui,
        overlay: Overlay::default(),
        debug_info: DebugInfo::default(),
        paused: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Control panel; commands go through the same path as the keyboard
    model.egui.set_elapsed_time(update.since_start);
    let response = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &model.flock,
        &model.debug_info,
        model.overlay.show_panel,
    );
    let viewport = viewport_of(app);
    for command in response.commands {
        model.flock.apply(command, viewport, &mut model.rng);
    }
    if response.params_changed {
        debug!(params = ?model.params, "simulation parameters changed");
    }

    if !model.paused {
        model.debug_info.probe = step_with_probe(&mut model.flock, viewport, &model.params, EntityId(0));
    }
    model.debug_info.stats = FlockStats::collect(&model.flock);
}
