/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains the
 * tunable constants of the flocking engine. The defaults reproduce the
 * reference flock; every field can be overridden from the `[params]`
 * table of the configuration file or from the viewer's control panel.
 *
 * The two radii are not here: they are part of the flock's own state
 * because they must stay consistent with each other at all times.
 */

use serde::Deserialize;
use std::f32::consts::PI;
use std::ops::RangeInclusive;

use crate::config::ConfigError;
use crate::ENTITY_SPEED;

// 150 degrees
pub const DEFAULT_FOV_ANGLE: f32 = 5.0 * PI / 6.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    // Shared speed limit for every entity
    pub max_speed: f32,
    // Boundary push per unit of penetration
    pub steer_strength: f32,
    // Lerp factor toward `velocity + repulsion` per too-close neighbor
    pub repulsion_smoothing: f32,
    // Lerp factor toward `velocity + group vector` once per tick
    pub group_smoothing: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub fov_enabled: bool,
    // Radians
    pub fov_angle: f32,
    // Uniform velocity multiplier applied after the speed clamp; 1 disables it
    pub drag: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            max_speed: ENTITY_SPEED,
            steer_strength: 0.1,
            repulsion_smoothing: 0.3,
            group_smoothing: 0.18,
            cohesion_weight: 0.7,
            alignment_weight: 1.0,
            fov_enabled: true,
            fov_angle: DEFAULT_FOV_ANGLE,
            drag: 1.0,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("max_speed", self.max_speed),
            ("steer_strength", self.steer_strength),
            ("repulsion_smoothing", self.repulsion_smoothing),
            ("group_smoothing", self.group_smoothing),
            ("cohesion_weight", self.cohesion_weight),
            ("alignment_weight", self.alignment_weight),
            ("fov_angle", self.fov_angle),
            ("drag", self.drag),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be a finite number"));
            }
        }

        if self.max_speed <= 0.0 {
            return Err(ConfigError::invalid("max_speed", "must be positive"));
        }
        if self.steer_strength < 0.0 {
            return Err(ConfigError::invalid("steer_strength", "must not be negative"));
        }
        for (field, value) in [
            ("repulsion_smoothing", self.repulsion_smoothing),
            ("group_smoothing", self.group_smoothing),
        ] {
            if !Self::smoothing_range().contains(&value) {
                return Err(ConfigError::invalid(field, "must be between 0 and 1"));
            }
        }
        if self.cohesion_weight < 0.0 || self.alignment_weight < 0.0 {
            return Err(ConfigError::invalid("cohesion_weight/alignment_weight", "must not be negative"));
        }
        if self.fov_angle <= 0.0 || self.fov_angle > PI {
            return Err(ConfigError::invalid("fov_angle", "must be in (0, π] radians"));
        }
        if self.drag <= 0.0 || self.drag > 1.0 {
            return Err(ConfigError::invalid("drag", "must be in (0, 1]"));
        }

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn max_speed_range() -> RangeInclusive<f32> {
        1.0..=20.0
    }

    pub fn steer_strength_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn smoothing_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn weight_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn fov_angle_range() -> RangeInclusive<f32> {
        0.1..=PI
    }

    pub fn drag_range() -> RangeInclusive<f32> {
        0.5..=1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let bad_speed = SimulationParams { max_speed: 0.0, ..Default::default() };
        assert!(bad_speed.validate().is_err());

        let bad_smoothing = SimulationParams { group_smoothing: 1.5, ..Default::default() };
        assert!(bad_smoothing.validate().is_err());

        let bad_fov = SimulationParams { fov_angle: 4.0, ..Default::default() };
        assert!(bad_fov.validate().is_err());

        let nan_drag = SimulationParams { drag: f32::NAN, ..Default::default() };
        assert!(nan_drag.validate().is_err());
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let params: SimulationParams = toml::from_str("max_speed = 4.0\nfov_enabled = false").unwrap();
        assert_eq!(params.max_speed, 4.0);
        assert!(!params.fov_enabled);
        assert_eq!(params.cohesion_weight, 0.7);
    }
}
