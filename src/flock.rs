/*
 * Flock Module (entity store)
 *
 * This module owns the simulated population: a fixed-capacity arena of
 * `MAX_ENTITIES` entity slots with a live-count cursor, plus the two
 * interaction radii shared by every entity.
 *
 * Rules the store enforces:
 * - Spawning at capacity and despawning an empty flock are silent no-ops.
 * - Removal always takes the most recently spawned entity, so the index of
 *   every earlier entity stays valid.
 * - `MIN_RADIUS <= repulsion_radius <= group_radius` holds after every
 *   adjustment; an adjustment that would break it is reverted.
 */

use bytemuck::{Pod, Zeroable};
use rand::Rng;
use std::fmt;
use tracing::debug;

use crate::entity::Entity;
use crate::viewport::Viewport;
use crate::{DEFAULT_GROUP_RADIUS, DEFAULT_REPULSION_RADIUS, MAX_ENTITIES, MIN_RADIUS};

pub(crate) const STATE_MAGIC: u32 = u32::from_le_bytes(*b"FLCK");
pub(crate) const STATE_VERSION: u32 = 1;

/// Index of an entity in the flock. Stays valid until that entity (or a
/// later one) is despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub usize);

/// The whole store as one flat block: a fixed header followed by every
/// slot, live or not. Slots at or beyond `len` are kept zeroed.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct FlockState {
    pub(crate) magic: u32,
    pub(crate) version: u32,
    pub(crate) capacity: u32,
    pub(crate) len: u32,
    pub(crate) repulsion_radius: f32,
    pub(crate) group_radius: f32,
    pub(crate) entities: [Entity; MAX_ENTITIES],
}

pub struct Flock {
    pub(crate) state: Box<FlockState>,
}

impl Flock {
    pub fn new() -> Self {
        Self::with_radii(DEFAULT_REPULSION_RADIUS, DEFAULT_GROUP_RADIUS)
    }

    /// Creates an empty flock with the given radii. Out-of-range values are
    /// pulled back: repulsion to the floor, group up to the repulsion radius.
    pub fn with_radii(repulsion_radius: f32, group_radius: f32) -> Self {
        let repulsion_radius = if repulsion_radius.is_finite() {
            repulsion_radius.max(MIN_RADIUS)
        } else {
            DEFAULT_REPULSION_RADIUS
        };
        let group_radius = if group_radius.is_finite() {
            group_radius.max(repulsion_radius)
        } else {
            DEFAULT_GROUP_RADIUS.max(repulsion_radius)
        };

        // Allocate the slots directly on the heap
        let mut state: Box<FlockState> = bytemuck::zeroed_box();
        state.magic = STATE_MAGIC;
        state.version = STATE_VERSION;
        state.capacity = MAX_ENTITIES as u32;
        state.repulsion_radius = repulsion_radius;
        state.group_radius = group_radius;

        Self { state }
    }

    /// Spawns `count` random entities, stopping early at capacity.
    /// Returns how many were added.
    pub fn populate<R: Rng + ?Sized>(&mut self, count: usize, viewport: Viewport, rng: &mut R) -> usize {
        let mut spawned = 0;
        while spawned < count && self.spawn(viewport, rng).is_some() {
            spawned += 1;
        }
        spawned
    }

    /// Appends a randomly placed entity. `None` when the flock is full.
    pub fn spawn<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) -> Option<EntityId> {
        if self.is_full() {
            debug!(capacity = MAX_ENTITIES, "spawn ignored, flock is full");
            return None;
        }
        self.spawn_entity(Entity::random(viewport, rng))
    }

    /// Appends a specific entity record. `None` when the flock is full.
    pub fn spawn_entity(&mut self, entity: Entity) -> Option<EntityId> {
        if self.is_full() {
            return None;
        }

        let index = self.len();
        self.state.entities[index] = entity;
        self.state.len += 1;
        Some(EntityId(index))
    }

    /// Removes the highest-index entity and returns it.
    pub fn despawn_last(&mut self) -> Option<Entity> {
        if self.is_empty() {
            debug!("despawn ignored, flock is empty");
            return None;
        }

        self.state.len -= 1;
        let index = self.len();
        let removed = self.state.entities[index];
        self.state.entities[index] = Entity::zeroed();
        Some(removed)
    }

    /// Adds `delta` to the repulsion radius unless the result would fall
    /// below the floor or exceed the group radius, in which case the radius
    /// is left as it was. Returns whether the change was kept.
    pub fn adjust_repulsion_radius(&mut self, delta: f32) -> bool {
        let previous = self.state.repulsion_radius;
        self.state.repulsion_radius += delta;

        let radius = self.state.repulsion_radius;
        if !radius.is_finite() || radius < MIN_RADIUS || radius > self.state.group_radius {
            self.state.repulsion_radius = previous;
            debug!(
                delta,
                repulsion_radius = previous,
                group_radius = self.state.group_radius,
                "repulsion radius adjustment reverted"
            );
            return false;
        }

        debug!(repulsion_radius = radius, "repulsion radius adjusted");
        true
    }

    /// Adds `delta` to the group radius unless the result would fall below
    /// the floor or the repulsion radius, in which case the radius is left
    /// as it was. Returns whether the change was kept.
    pub fn adjust_group_radius(&mut self, delta: f32) -> bool {
        let previous = self.state.group_radius;
        self.state.group_radius += delta;

        let radius = self.state.group_radius;
        if !radius.is_finite() || radius < MIN_RADIUS || radius < self.state.repulsion_radius {
            self.state.group_radius = previous;
            debug!(
                delta,
                group_radius = previous,
                repulsion_radius = self.state.repulsion_radius,
                "group radius adjustment reverted"
            );
            return false;
        }

        debug!(group_radius = radius, "group radius adjusted");
        true
    }

    pub fn repulsion_radius(&self) -> f32 {
        self.state.repulsion_radius
    }

    pub fn group_radius(&self) -> f32 {
        self.state.group_radius
    }

    pub fn len(&self) -> usize {
        self.state.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.state.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= MAX_ENTITIES
    }

    pub fn capacity(&self) -> usize {
        MAX_ENTITIES
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities().get(id.0)
    }

    /// Live entities in spawn order; this is the render feed.
    pub fn entities(&self) -> &[Entity] {
        &self.state.entities[..self.len()]
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        let len = self.len();
        &mut self.state.entities[..len]
    }
}

impl Default for Flock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Flock {
    fn clone(&self) -> Self {
        Self { state: self.state.clone() }
    }
}

impl fmt::Debug for Flock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flock")
            .field("len", &self.len())
            .field("repulsion_radius", &self.repulsion_radius())
            .field("group_radius", &self.group_radius())
            .finish()
    }
}
