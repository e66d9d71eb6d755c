//! Flock behaviour tests
//!
//! Long-run bounds, store contracts and small hand-built scenarios,
//! exercised through the public API only.

use flock::{step, Command, CommandOutcome, Entity, Flock, SimulationParams, Viewport, MAX_ENTITIES};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const VIEWPORT: Viewport = Viewport::new(800, 600);

fn seeded_flock(count: usize, seed: u64) -> Flock {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut flock = Flock::new();
    flock.populate(count, VIEWPORT, &mut rng);
    flock
}

fn flock_of(entities: &[Entity]) -> Flock {
    let mut flock = Flock::new();
    for &entity in entities {
        flock.spawn_entity(entity);
    }
    flock
}

fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Speed never exceeds the limit, whatever the flock does
#[test]
fn test_speed_stays_bounded() {
    let params = SimulationParams::default();
    let mut flock = seeded_flock(150, 42);

    for _ in 0..500 {
        step(&mut flock, VIEWPORT, &params);
        for entity in flock.entities() {
            assert!(entity.velocity.length() <= params.max_speed + 1e-3);
        }
    }
}

/// Boundary steering keeps every entity near the viewport over a long run
#[test]
fn test_positions_stay_near_viewport() {
    let params = SimulationParams::default();
    let mut flock = seeded_flock(50, 7);
    let bound = 150.0;

    for _ in 0..2000 {
        step(&mut flock, VIEWPORT, &params);
        for entity in flock.entities() {
            let p = entity.position;
            assert!(p.x >= -bound && p.x <= VIEWPORT.width() + bound, "escaped horizontally: {:?}", p);
            assert!(p.y >= -bound && p.y <= VIEWPORT.height() + bound, "escaped vertically: {:?}", p);
        }
    }
}

/// An entity placed far outside is brought back over time
#[test]
fn test_escaped_entity_returns() {
    let params = SimulationParams::default();
    let mut flock = flock_of(&[Entity::new(Vec2::new(-1000.0, 300.0), Vec2::new(-6.0, 0.0))]);

    for _ in 0..1000 {
        step(&mut flock, VIEWPORT, &params);
    }

    let x = flock.entities()[0].position.x;
    assert!(x > -100.0 && x < VIEWPORT.width() + 100.0, "still outside at x = {}", x);
}

#[test]
fn test_spawn_at_capacity_leaves_count() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut flock = seeded_flock(MAX_ENTITIES, 1);
    assert_eq!(flock.len(), MAX_ENTITIES);

    assert_eq!(flock.apply(Command::Spawn, VIEWPORT, &mut rng), CommandOutcome::Ignored);
    assert_eq!(flock.len(), MAX_ENTITIES);
}

#[test]
fn test_despawn_empty_leaves_count() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut flock = Flock::new();

    assert_eq!(flock.apply(Command::DespawnLast, VIEWPORT, &mut rng), CommandOutcome::Ignored);
    assert_eq!(flock.len(), 0);
}

#[test]
fn test_repulsion_never_exceeds_group_radius() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut flock = Flock::new();

    for _ in 0..20 {
        flock.apply(Command::grow_repulsion(), VIEWPORT, &mut rng);
        assert!(flock.repulsion_radius() <= flock.group_radius());
    }
    for _ in 0..20 {
        flock.apply(Command::shrink_group(), VIEWPORT, &mut rng);
        assert!(flock.repulsion_radius() <= flock.group_radius());
    }
    assert_eq!(flock.repulsion_radius(), flock.group_radius());
}

/// Coincident entities with no relative motion must not produce NaN
#[test]
fn test_coincident_entities_stay_finite() {
    let position = Vec2::new(300.0, 300.0);
    let mut flock = flock_of(&[Entity::new(position, Vec2::ZERO), Entity::new(position, Vec2::ZERO)]);

    for _ in 0..10 {
        step(&mut flock, VIEWPORT, &SimulationParams::default());
    }
    for entity in flock.entities() {
        assert!(is_finite(entity.position));
        assert!(is_finite(entity.velocity));
    }
}

/// A resting entity away from the edges and from others feels no force
#[test]
fn test_lone_resting_entity_unchanged() {
    let start = Entity::new(Vec2::new(400.0, 300.0), Vec2::ZERO);
    let mut flock = flock_of(&[start]);

    step(&mut flock, VIEWPORT, &SimulationParams::default());
    assert_eq!(flock.entities()[0], start);
}

/// Approaching entities inside the repulsion radius separate faster than
/// they would without repulsion
#[test]
fn test_repulsion_increases_separation() {
    let approaching = [
        Entity::new(Vec2::new(400.0, 300.0), Vec2::new(2.0, 0.0)),
        Entity::new(Vec2::new(420.0, 300.0), Vec2::new(-2.0, 0.0)),
    ];
    let with_repulsion = SimulationParams::default();
    let without_repulsion = SimulationParams { repulsion_smoothing: 0.0, ..Default::default() };

    let mut repelled = flock_of(&approaching);
    let mut baseline = flock_of(&approaching);
    step(&mut repelled, VIEWPORT, &with_repulsion);
    step(&mut baseline, VIEWPORT, &without_repulsion);

    let closing_speed = |flock: &Flock| flock.entities()[1].velocity.x - flock.entities()[0].velocity.x;
    assert!(closing_speed(&repelled) > closing_speed(&baseline));

    // Positions integrate before forces, so the gap shows on the next tick
    step(&mut repelled, VIEWPORT, &with_repulsion);
    step(&mut baseline, VIEWPORT, &without_repulsion);

    let separation = |flock: &Flock| flock.entities()[0].position.distance(flock.entities()[1].position);
    assert!(separation(&repelled) > separation(&baseline));
}

/// An entity beyond the left edge is steered rightward
#[test]
fn test_left_edge_steers_inward() {
    let mut flock = flock_of(&[Entity::new(Vec2::new(-200.0, 300.0), Vec2::ZERO)]);

    step(&mut flock, VIEWPORT, &SimulationParams::default());
    assert!(flock.entities()[0].velocity.x > 0.0);
}

/// Same seed, same commands, same ticks: identical state
#[test]
fn test_seeded_runs_are_identical() {
    let run = || {
        let mut flock = seeded_flock(80, 1234);
        for _ in 0..200 {
            step(&mut flock, VIEWPORT, &SimulationParams::default());
        }
        flock.snapshot().to_vec()
    };

    assert_eq!(run(), run());
}

/// Independent flocks do not share parameters
#[test]
fn test_flocks_are_independent() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut a = Flock::new();
    let b = Flock::new();

    a.apply(Command::shrink_repulsion(), VIEWPORT, &mut rng);
    assert_ne!(a.repulsion_radius(), b.repulsion_radius());
}

/// A restored snapshot continues exactly like the original
#[test]
fn test_restored_flock_continues_identically() {
    let params = SimulationParams::default();
    let mut original = seeded_flock(60, 99);
    for _ in 0..50 {
        step(&mut original, VIEWPORT, &params);
    }

    let mut restored = Flock::restore(original.snapshot()).expect("valid snapshot");
    for _ in 0..50 {
        step(&mut original, VIEWPORT, &params);
        step(&mut restored, VIEWPORT, &params);
    }
    assert_eq!(original.entities(), restored.entities());
}
