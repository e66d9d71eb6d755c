/*
 * Snapshot Module
 *
 * The flock's entire state lives in one flat block (header, radii and
 * every entity slot) with no pointers. A host that swaps out the code
 * between frames can keep the bytes and hand them back afterwards.
 * Restoring validates the block instead of trusting it.
 */

use thiserror::Error;

use crate::flock::{Flock, FlockState, STATE_MAGIC, STATE_VERSION};
use crate::{MAX_ENTITIES, MIN_RADIUS};

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("snapshot is {actual} bytes, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("snapshot does not start with the flock magic number")]
    Magic,
    #[error("snapshot version {found} is not supported (expected {expected})")]
    Version { expected: u32, found: u32 },
    #[error("snapshot capacity {found} does not match this build ({expected})")]
    Capacity { expected: u32, found: u32 },
    #[error("snapshot holds {len} entities, more than its capacity")]
    Count { len: u32 },
    #[error("snapshot radii are inconsistent (repulsion {repulsion}, group {group})")]
    Radii { repulsion: f32, group: f32 },
    #[error("entity {index} has a non-finite field")]
    NonFinite { index: usize },
}

impl Flock {
    /// The whole store as bytes, suitable for [`Flock::restore`].
    pub fn snapshot(&self) -> &[u8] {
        bytemuck::bytes_of(&*self.state)
    }

    pub fn snapshot_len() -> usize {
        std::mem::size_of::<FlockState>()
    }

    /// Rebuilds a flock from bytes produced by [`Flock::snapshot`].
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let expected = Self::snapshot_len();
        if bytes.len() != expected {
            return Err(SnapshotError::Length { expected, actual: bytes.len() });
        }

        // Copy into a heap block; the input slice may be unaligned
        let mut state: Box<FlockState> = bytemuck::zeroed_box();
        bytemuck::bytes_of_mut(&mut *state).copy_from_slice(bytes);
        validate(&state)?;

        Ok(Self { state })
    }
}

fn validate(state: &FlockState) -> Result<(), SnapshotError> {
    if state.magic != STATE_MAGIC {
        return Err(SnapshotError::Magic);
    }
    if state.version != STATE_VERSION {
        return Err(SnapshotError::Version { expected: STATE_VERSION, found: state.version });
    }
    if state.capacity as usize != MAX_ENTITIES {
        return Err(SnapshotError::Capacity { expected: MAX_ENTITIES as u32, found: state.capacity });
    }
    if state.len > state.capacity {
        return Err(SnapshotError::Count { len: state.len });
    }

    let (repulsion, group) = (state.repulsion_radius, state.group_radius);
    let radii_ok = repulsion.is_finite() && group.is_finite() && repulsion >= MIN_RADIUS && repulsion <= group;
    if !radii_ok {
        return Err(SnapshotError::Radii { repulsion, group });
    }

    for (index, entity) in state.entities[..state.len as usize].iter().enumerate() {
        let fields = [entity.position, entity.velocity, entity.size];
        if fields.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(SnapshotError::NonFinite { index });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::viewport::Viewport;
    use glam::Vec2;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_flock() -> Flock {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut flock = Flock::with_radii(40.0, 120.0);
        flock.populate(25, Viewport::new(1024, 768), &mut rng);
        flock
    }

    #[test]
    fn restore_reproduces_the_store() {
        let flock = sample_flock();
        let restored = Flock::restore(flock.snapshot()).unwrap();

        assert_eq!(restored.entities(), flock.entities());
        assert_eq!(restored.repulsion_radius(), 40.0);
        assert_eq!(restored.group_radius(), 120.0);
        assert_eq!(restored.snapshot(), flock.snapshot());
    }

    #[test]
    fn despawned_slots_do_not_leak_into_snapshot() {
        let mut flock = sample_flock();
        let mut rng = SmallRng::seed_from_u64(5);
        let before = flock.snapshot().to_vec();

        flock.spawn(Viewport::new(1024, 768), &mut rng);
        flock.despawn_last();
        assert_eq!(flock.snapshot(), &before[..]);
    }

    #[test]
    fn rejects_truncated_bytes() {
        let flock = sample_flock();
        let bytes = &flock.snapshot()[..100];
        assert!(matches!(Flock::restore(bytes), Err(SnapshotError::Length { .. })));
    }

    #[test]
    fn rejects_foreign_bytes() {
        let bytes = vec![0u8; Flock::snapshot_len()];
        assert_eq!(Flock::restore(&bytes).unwrap_err(), SnapshotError::Magic);
    }

    #[test]
    fn rejects_broken_invariants() {
        let mut flock = sample_flock();
        flock.state.repulsion_radius = 500.0;
        assert!(matches!(Flock::restore(flock.snapshot()), Err(SnapshotError::Radii { .. })));

        let mut flock = sample_flock();
        flock.spawn_entity(Entity::new(Vec2::new(f32::NAN, 0.0), Vec2::ZERO));
        assert_eq!(Flock::restore(flock.snapshot()).unwrap_err(), SnapshotError::NonFinite { index: 25 });
    }
}
