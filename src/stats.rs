/*
 * Flock Statistics
 *
 * Read-only aggregates over the live entities, shown by the viewer's
 * overlay and logged by the headless runner.
 */

use crate::flock::Flock;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockStats {
    pub count: usize,
    // sqrt of the summed squared speeds
    pub energy: f32,
    pub mean_speed: f32,
    pub max_speed: f32,
}

impl FlockStats {
    pub fn collect(flock: &Flock) -> Self {
        let entities = flock.entities();
        if entities.is_empty() {
            return Self::default();
        }

        let mut sum_sq = 0.0;
        let mut speed_sum = 0.0;
        let mut fastest: f32 = 0.0;
        for entity in entities {
            let speed_sq = entity.speed_squared();
            let speed = speed_sq.sqrt();
            sum_sq += speed_sq;
            speed_sum += speed;
            fastest = fastest.max(speed);
        }

        Self {
            count: entities.len(),
            energy: sum_sq.sqrt(),
            mean_speed: speed_sum / entities.len() as f32,
            max_speed: fastest,
        }
    }
}
