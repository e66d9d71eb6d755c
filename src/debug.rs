/*
 * Debug Information Module
 *
 * This module defines what the viewer's overlay shows: per-frame metrics
 * and the display toggles bound to the keyboard.
 *
 * Includes:
 * - FPS and frame time
 * - Flock statistics (count, energy)
 * - Grouping vectors of the first entity, for the radii overlay
 */

use std::time::Duration;

use crate::physics::GroupProbe;
use crate::stats::FlockStats;

// Metrics refreshed every frame
#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub stats: FlockStats,
    pub probe: Option<GroupProbe>,
}

// Which overlay layers are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub show_fps: bool,
    pub show_energy: bool,
    pub show_count: bool,
    pub show_radii: bool,
    pub show_help: bool,
    pub show_panel: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_energy: true,
            show_count: true,
            show_radii: true,
            show_help: true,
            show_panel: false,
        }
    }
}
