/*
 * Physics Module
 *
 * This module runs one simulation tick over the whole flock. For each
 * entity in index order:
 * 1. Integrate: position += velocity (one unit time-step per tick)
 * 2. Boundary steering with a margin of half the repulsion radius
 * 3. Neighbor scan over every other entity, classified by squared distance:
 *    - closer than the repulsion radius: nudge away (smoothed)
 *    - within the group radius and inside the field of view: accumulate
 *      position and velocity for cohesion and alignment
 *    - further away: ignored
 * 4. Blend the grouping vector into the velocity (smoothed)
 * 5. Clamp speed, then apply optional drag
 *
 * Each entity reads the current state of all others and writes only its
 * own record, so entities earlier in the order have already moved when
 * later ones scan them.
 */

use glam::Vec2;
use tracing::trace;

use crate::entity::Entity;
use crate::flock::{EntityId, Flock};
use crate::params::SimulationParams;
use crate::steering::steer_within_bounds;
use crate::vectors::{clamp_speed, lerp, normalize_or_zero, within_fov};
use crate::viewport::Viewport;

/// The grouping vectors computed for one entity during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupProbe {
    pub to_centroid: Vec2,
    pub mean_direction: Vec2,
    // Weighted sum of the two above
    pub group_vector: Vec2,
    pub neighbors: usize,
    pub repelled_by: usize,
}

// Per-tick constants shared by every entity update
struct TickContext<'a> {
    viewport: Viewport,
    params: &'a SimulationParams,
    margin: f32,
    repulsion_radius_sq: f32,
    group_radius_sq: f32,
}

impl<'a> TickContext<'a> {
    fn new(flock: &Flock, viewport: Viewport, params: &'a SimulationParams) -> Self {
        let repulsion_radius = flock.repulsion_radius();
        let group_radius = flock.group_radius();

        Self {
            viewport,
            params,
            margin: repulsion_radius / 2.0,
            repulsion_radius_sq: repulsion_radius * repulsion_radius,
            group_radius_sq: group_radius * group_radius,
        }
    }
}

/// Advances every entity of the flock by one tick.
pub fn step(flock: &mut Flock, viewport: Viewport, params: &SimulationParams) {
    advance(flock, viewport, params, None);
}

/// Same update as [`step`], additionally reporting the grouping vectors
/// of `probe`. `None` when `probe` is not a live entity.
pub fn step_with_probe(
    flock: &mut Flock,
    viewport: Viewport,
    params: &SimulationParams,
    probe: EntityId,
) -> Option<GroupProbe> {
    advance(flock, viewport, params, Some(probe))
}

fn advance(
    flock: &mut Flock,
    viewport: Viewport,
    params: &SimulationParams,
    probe: Option<EntityId>,
) -> Option<GroupProbe> {
    let context = TickContext::new(flock, viewport, params);
    let entities = flock.entities_mut();

    let mut probed = None;
    let mut repulsions = 0;
    for index in 0..entities.len() {
        let report = update_entity(entities, index, &context);
        repulsions += report.repelled_by;
        if probe == Some(EntityId(index)) {
            probed = Some(report);
        }
    }

    trace!(entities = entities.len(), repulsions, "tick complete");
    probed
}

fn update_entity(entities: &mut [Entity], index: usize, context: &TickContext<'_>) -> GroupProbe {
    let params = context.params;
    let mut entity = entities[index];

    // Integrate position
    entity.position += entity.velocity;

    // Keep away from the viewport edges
    steer_within_bounds(
        &mut entity,
        context.margin,
        context.viewport,
        params.steer_strength,
        params.max_speed,
    );

    let mut position_sum = Vec2::ZERO;
    let mut velocity_sum = Vec2::ZERO;
    let mut neighbors = 0;
    let mut repelled_by = 0;

    for (other_index, other) in entities.iter().enumerate() {
        if other_index == index {
            continue;
        }

        let offset = entity.position - other.position;
        let distance_sq = offset.length_squared();

        if distance_sq < context.repulsion_radius_sq {
            // Coincident entities give no direction to flee in
            let away = normalize_or_zero(offset);
            if away != Vec2::ZERO {
                entity.velocity = lerp(entity.velocity, entity.velocity + away, params.repulsion_smoothing);
                repelled_by += 1;
            }
        } else if distance_sq < context.group_radius_sq
            && (!params.fov_enabled || within_fov(offset, entity.velocity, params.fov_angle))
        {
            position_sum += other.position;
            velocity_sum += other.velocity;
            neighbors += 1;
        }
    }

    let mut probe = GroupProbe {
        neighbors,
        repelled_by,
        ..GroupProbe::default()
    };

    if neighbors > 0 {
        let count = neighbors as f32;
        let centroid = position_sum / count;
        probe.to_centroid = normalize_or_zero(centroid - entity.position);
        probe.mean_direction = normalize_or_zero(velocity_sum / count);
        probe.group_vector =
            probe.to_centroid * params.cohesion_weight + probe.mean_direction * params.alignment_weight;

        entity.velocity = lerp(entity.velocity, entity.velocity + probe.group_vector, params.group_smoothing);
    }

    entity.velocity = clamp_speed(entity.velocity, params.max_speed);
    if params.drag < 1.0 {
        entity.velocity *= params.drag;
    }

    entities[index] = entity;
    probe
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(800, 600);

    fn flock_of(entities: &[Entity]) -> Flock {
        let mut flock = Flock::new();
        for &entity in entities {
            flock.spawn_entity(entity);
        }
        flock
    }

    #[test]
    fn lone_entity_keeps_moving_straight() {
        let mut flock = flock_of(&[Entity::new(Vec2::new(400.0, 300.0), Vec2::new(2.0, 1.0))]);
        step(&mut flock, VIEWPORT, &SimulationParams::default());

        let entity = flock.entities()[0];
        assert_eq!(entity.position, Vec2::new(402.0, 301.0));
        assert_eq!(entity.velocity, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn repulsion_pushes_apart() {
        let mut flock = flock_of(&[
            Entity::new(Vec2::new(400.0, 300.0), Vec2::ZERO),
            Entity::new(Vec2::new(420.0, 300.0), Vec2::ZERO),
        ]);
        step(&mut flock, VIEWPORT, &SimulationParams::default());

        let [left, right] = [flock.entities()[0], flock.entities()[1]];
        assert!(left.velocity.x < 0.0);
        assert!(right.velocity.x > 0.0);
    }

    #[test]
    fn group_neighbors_attract_and_align() {
        // 100 apart: outside repulsion (50), inside group (140)
        let mut flock = flock_of(&[
            Entity::new(Vec2::new(300.0, 300.0), Vec2::new(0.0, 1.0)),
            Entity::new(Vec2::new(400.0, 300.0), Vec2::new(0.0, 1.0)),
        ]);
        let params = SimulationParams { fov_enabled: false, ..Default::default() };
        let probe = step_with_probe(&mut flock, VIEWPORT, &params, EntityId(0)).unwrap();

        assert_eq!(probe.neighbors, 1);
        // Entity 0 has already moved one unit down before scanning
        assert!((probe.to_centroid - Vec2::new(1.0, 0.0)).length() < 0.02);
        assert!((probe.mean_direction - Vec2::new(0.0, 1.0)).length() < 1e-5);
        assert!(flock.entities()[0].velocity.x > 0.0);
    }

    #[test]
    fn fov_gate_hides_neighbor_straight_ahead() {
        let mut flock = flock_of(&[
            Entity::new(Vec2::new(300.0, 300.0), Vec2::new(1.0, 0.0)),
            Entity::new(Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0)),
        ]);
        let probe = step_with_probe(&mut flock, VIEWPORT, &SimulationParams::default(), EntityId(0)).unwrap();
        assert_eq!(probe.neighbors, 0);
    }

    #[test]
    fn coincident_entities_stay_finite() {
        let position = Vec2::new(400.0, 300.0);
        let mut flock = flock_of(&[Entity::new(position, Vec2::ZERO), Entity::new(position, Vec2::ZERO)]);
        step(&mut flock, VIEWPORT, &SimulationParams::default());

        for entity in flock.entities() {
            assert!(entity.position.x.is_finite() && entity.position.y.is_finite());
            assert!(entity.velocity.x.is_finite() && entity.velocity.y.is_finite());
        }
    }

    #[test]
    fn speed_is_clamped_then_dragged() {
        let mut flock = flock_of(&[Entity::new(Vec2::new(400.0, 300.0), Vec2::new(30.0, 0.0))]);
        let params = SimulationParams { drag: 0.5, ..Default::default() };
        step(&mut flock, VIEWPORT, &params);

        assert!((flock.entities()[0].velocity.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn probe_outside_flock_is_none() {
        let mut flock = flock_of(&[Entity::new(Vec2::new(400.0, 300.0), Vec2::ZERO)]);
        assert!(step_with_probe(&mut flock, VIEWPORT, &SimulationParams::default(), EntityId(3)).is_none());
    }
}
