//! Obstacle spawning, scrolling and retirement
//!
//! Passing is recorded on the obstacle itself, so a crossing is reported on
//! exactly one tick no matter how far an obstacle moves per step.

use rand::Rng;

use super::state::{GameEvent, Obstacle, SessionState};
use crate::tuning::Tuning;

/// Draw a gap position uniformly from the configured placement range
pub fn random_gap_top<R: Rng>(tuning: &Tuning, rng: &mut R) -> f32 {
    let (lo, hi) = tuning.gap_top_range();
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Append a new obstacle at the right edge of the world
pub fn spawn_obstacle<R: Rng>(
    state: &mut SessionState,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let gap_top = random_gap_top(tuning, rng);
    let id = state.next_obstacle_id();
    state
        .obstacles
        .push(Obstacle::new(id, tuning.world_width, gap_top));
    log::debug!("Spawned obstacle {} with gap at {:.1}", id, gap_top);
    events.push(GameEvent::ObstacleSpawned { id, gap_top });
    id
}

/// Scroll every obstacle left and flag first crossings of the entity
///
/// Returns the number of obstacles passed on this tick.
pub fn advance_obstacles(
    state: &mut SessionState,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut passed = 0;
    for obstacle in &mut state.obstacles {
        obstacle.x -= tuning.obstacle_speed;
        if !obstacle.passed && obstacle.trailing_edge(tuning.obstacle_width) < tuning.entity_x {
            obstacle.passed = true;
            passed += 1;
            events.push(GameEvent::ObstaclePassed { id: obstacle.id });
        }
    }
    passed
}

/// Drop obstacles that have fully left the world, keeping survivor order
pub fn retire_obstacles(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let width = tuning.obstacle_width;
    state.obstacles.retain(|o| {
        let keep = o.x > -width;
        if !keep {
            events.push(GameEvent::ObstacleRetired { id: o.id });
        }
        keep
    });
}
