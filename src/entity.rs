/*
 * Entity Module
 *
 * This module defines the Entity record: one simulated agent with a
 * position, a velocity and a drawing size. Entities carry no colour;
 * the colour is derived from the speed ratio whenever it is needed.
 *
 * The record is plain old data so a whole flock can be handed around
 * as one flat block of bytes.
 */

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

use crate::vectors::{normalize_or_default, normalize_or_zero, DEFAULT_DIRECTION};
use crate::viewport::Viewport;
use crate::{ENTITY_LENGTH, ENTITY_SPEED, ENTITY_WIDTH};

// Hue (degrees) of an entity at rest; full speed maps to 0 (red)
pub const REST_HUE: f32 = 220.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Entity {
    pub position: Vec2,
    pub velocity: Vec2,
    // x is the length along the heading, y the width across it
    pub size: Vec2,
}

impl Entity {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            size: Vec2::new(ENTITY_LENGTH, ENTITY_WIDTH),
        }
    }

    /// Creates an entity somewhere inside the viewport heading in a random
    /// direction at `ENTITY_SPEED`.
    pub fn random<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let x = random_coordinate(rng, viewport.width());
        let y = random_coordinate(rng, viewport.height());

        // Random initial heading; a degenerate sample falls back to +x
        let dx = rng.gen_range(-1.0..=1.0);
        let dy = rng.gen_range(-1.0..=1.0);
        let velocity = normalize_or_default(Vec2::new(dx, dy)) * ENTITY_SPEED;

        Self::new(Vec2::new(x, y), velocity)
    }

    pub fn speed_squared(&self) -> f32 {
        self.velocity.length_squared()
    }

    /// `|velocity|² / max_speed²`, clamped to `[0, 1]`.
    pub fn speed_ratio(&self, max_speed: f32) -> f32 {
        let max_squared = max_speed * max_speed;
        if max_squared <= 0.0 {
            return 0.0;
        }
        (self.speed_squared() / max_squared).clamp(0.0, 1.0)
    }

    /// Display hue in degrees: blue when slow, red at the speed limit.
    pub fn hue(&self, max_speed: f32) -> f32 {
        (1.0 - self.speed_ratio(max_speed)) * REST_HUE
    }

    /// Unit heading, or `None` when the entity is not moving.
    pub fn heading(&self) -> Option<Vec2> {
        let unit = normalize_or_zero(self.velocity);
        if unit == Vec2::ZERO {
            None
        } else {
            Some(unit)
        }
    }

    /// Triangle outline pointing along the velocity: tip first, then the
    /// two base corners. A stationary entity points along +x.
    pub fn outline(&self) -> [Vec2; 3] {
        let direction = self.heading().unwrap_or(DEFAULT_DIRECTION);
        let half_length = self.size.x / 2.0;
        let half_width = self.size.y / 2.0;
        let across = Vec2::new(-direction.y, direction.x);

        [
            self.position + direction * half_length,
            self.position + across * half_width,
            self.position - across * half_width,
        ]
    }
}

// Uniform in [0, extent); a zero-sized extent pins the coordinate at 0
fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_entity_inside_viewport_at_fixed_speed() {
        let mut rng = SmallRng::seed_from_u64(7);
        let viewport = Viewport::new(800, 600);

        for _ in 0..200 {
            let entity = Entity::random(viewport, &mut rng);
            assert!(entity.position.x >= 0.0 && entity.position.x < 800.0);
            assert!(entity.position.y >= 0.0 && entity.position.y < 600.0);
            assert!((entity.velocity.length() - ENTITY_SPEED).abs() < 1e-4);
        }
    }

    #[test]
    fn random_entity_in_empty_viewport() {
        let mut rng = SmallRng::seed_from_u64(1);
        let entity = Entity::random(Viewport::new(0, 0), &mut rng);
        assert_eq!(entity.position, Vec2::ZERO);
        assert!(entity.velocity.x.is_finite() && entity.velocity.y.is_finite());
    }

    #[test]
    fn hue_tracks_speed_ratio() {
        let resting = Entity::new(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(resting.hue(ENTITY_SPEED), REST_HUE);

        let flat_out = Entity::new(Vec2::ZERO, Vec2::new(ENTITY_SPEED, 0.0));
        assert!(flat_out.hue(ENTITY_SPEED).abs() < 1e-4);

        // Speed ratio is squared: half speed is a quarter of the range
        let half = Entity::new(Vec2::ZERO, Vec2::new(ENTITY_SPEED / 2.0, 0.0));
        assert!((half.hue(ENTITY_SPEED) - REST_HUE * 0.75).abs() < 1e-3);
    }

    #[test]
    fn outline_points_along_velocity() {
        let entity = Entity::new(Vec2::new(100.0, 100.0), Vec2::new(0.0, 3.0));
        let [tip, left, right] = entity.outline();
        assert!((tip - Vec2::new(100.0, 105.0)).length() < 1e-5);
        assert!(((left - right).length() - ENTITY_WIDTH).abs() < 1e-5);
    }
}
