/*
 * Input Module
 *
 * This module maps keyboard input to flock commands and overlay toggles.
 *
 * Keys:
 * - P spawn an entity, M or ; remove the last one
 * - Up/Down grow/shrink the repulsion radius
 * - Right/Left grow/shrink the group radius
 * - F, E, N, I, H toggle the FPS, energy, count, radii and help overlays
 * - Tab toggles the parameter panel, Space pauses
 */

use nannou::prelude::*;
use tracing::debug;

use crate::app::Model;
use crate::command::{Command, CommandOutcome};
use crate::debug::Overlay;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Flock(Command),
    Toggle(OverlayLayer),
    TogglePause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayLayer {
    Fps,
    Energy,
    Count,
    Radii,
    Help,
    Panel,
}

pub fn action_for_key(key: Key) -> Option<KeyAction> {
    let action = match key {
        Key::P => KeyAction::Flock(Command::Spawn),
        Key::M | Key::Semicolon => KeyAction::Flock(Command::DespawnLast),
        Key::Up => KeyAction::Flock(Command::grow_repulsion()),
        Key::Down => KeyAction::Flock(Command::shrink_repulsion()),
        Key::Right => KeyAction::Flock(Command::grow_group()),
        Key::Left => KeyAction::Flock(Command::shrink_group()),
        Key::F => KeyAction::Toggle(OverlayLayer::Fps),
        Key::E => KeyAction::Toggle(OverlayLayer::Energy),
        Key::N => KeyAction::Toggle(OverlayLayer::Count),
        Key::I => KeyAction::Toggle(OverlayLayer::Radii),
        Key::H => KeyAction::Toggle(OverlayLayer::Help),
        Key::Tab => KeyAction::Toggle(OverlayLayer::Panel),
        Key::Space => KeyAction::TogglePause,
        _ => return None,
    };
    Some(action)
}

impl Overlay {
    pub fn toggle(&mut self, layer: OverlayLayer) {
        let flag = match layer {
            OverlayLayer::Fps => &mut self.show_fps,
            OverlayLayer::Energy => &mut self.show_energy,
            OverlayLayer::Count => &mut self.show_count,
            OverlayLayer::Radii => &mut self.show_radii,
            OverlayLayer::Help => &mut self.show_help,
            OverlayLayer::Panel => &mut self.show_panel,
        };
        *flag = !*flag;
    }
}

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    // Typing into the parameter panel must not steer the flock
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match action_for_key(key) {
        Some(KeyAction::Flock(command)) => {
            let viewport = viewport_of(app);
            let outcome = model.flock.apply(command, viewport, &mut model.rng);
            if outcome == CommandOutcome::Ignored {
                debug!(?command, "command had no effect");
            }
        }
        Some(KeyAction::Toggle(layer)) => model.overlay.toggle(layer),
        Some(KeyAction::TogglePause) => model.paused = !model.paused,
        None => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

/// Current drawable area of the main window, in world units.
pub fn viewport_of(app: &App) -> Viewport {
    let rect = app.window_rect();
    Viewport::new(rect.w().max(0.0) as u32, rect.h().max(0.0) as u32)
}
