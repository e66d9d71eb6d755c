/*
 * Command Module
 *
 * Discrete requests a host may issue between ticks. This is the only
 * way the hosts change the flock; nothing outside the engine writes to
 * an entity directly.
 */

use rand::Rng;

use crate::flock::Flock;
use crate::viewport::Viewport;
use crate::RADIUS_STEP;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Spawn,
    DespawnLast,
    AdjustRepulsion(f32),
    AdjustGroup(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    // The store absorbed the command without changing state
    Ignored,
}

impl Command {
    pub fn grow_repulsion() -> Self {
        Command::AdjustRepulsion(RADIUS_STEP)
    }

    pub fn shrink_repulsion() -> Self {
        Command::AdjustRepulsion(-RADIUS_STEP)
    }

    pub fn grow_group() -> Self {
        Command::AdjustGroup(RADIUS_STEP)
    }

    pub fn shrink_group() -> Self {
        Command::AdjustGroup(-RADIUS_STEP)
    }
}

impl CommandOutcome {
    fn from_applied(applied: bool) -> Self {
        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        }
    }
}

impl Flock {
    pub fn apply<R: Rng + ?Sized>(&mut self, command: Command, viewport: Viewport, rng: &mut R) -> CommandOutcome {
        let applied = match command {
            Command::Spawn => self.spawn(viewport, rng).is_some(),
            Command::DespawnLast => self.despawn_last().is_some(),
            Command::AdjustRepulsion(delta) => self.adjust_repulsion_radius(delta),
            Command::AdjustGroup(delta) => self.adjust_group_radius(delta),
        };
        CommandOutcome::from_applied(applied)
    }
}
