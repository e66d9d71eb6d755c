/*
 * Boundary Steering Module
 *
 * Keeps entities inside the viewport by pushing them back softly once
 * they enter a margin band along any edge. The push grows with how far
 * the entity has intruded, so entities curve back inward instead of
 * being reflected or clipped.
 */

use glam::Vec2;

use crate::entity::Entity;
use crate::vectors::clamp_speed;
use crate::viewport::Viewport;

/// Steering force for an entity `margin` units from the viewport edges.
///
/// Each axis is handled independently, so a corner intrusion pushes along
/// both. The far edges use `position + size`, the entity's true extent.
pub fn boundary_force(entity: &Entity, margin: f32, viewport: Viewport, steer_strength: f32) -> Vec2 {
    let far = entity.position + entity.size;
    let mut steering = Vec2::ZERO;

    // Left or right edge
    if entity.position.x < margin {
        steering.x += margin - entity.position.x;
    } else if far.x > viewport.width() - margin {
        steering.x -= far.x - (viewport.width() - margin);
    }

    // Top or bottom edge
    if entity.position.y < margin {
        steering.y += margin - entity.position.y;
    } else if far.y > viewport.height() - margin {
        steering.y -= far.y - (viewport.height() - margin);
    }

    steering * steer_strength
}

/// Adds the boundary force to the entity's velocity, then re-clamps speed.
pub fn steer_within_bounds(entity: &mut Entity, margin: f32, viewport: Viewport, steer_strength: f32, max_speed: f32) {
    let force = boundary_force(entity, margin, viewport, steer_strength);
    entity.velocity = clamp_speed(entity.velocity + force, max_speed);
}
