//! Fixed timestep tick handlers
//!
//! Two handlers share one [`SessionState`]: the physics tick and the spawn
//! tick. Each checks the phase first, so a stale timer firing after the run
//! ended (or while paused) changes nothing.

use rand::Rng;

use super::collision::find_collision;
use super::obstacles::{advance_obstacles, retire_obstacles, spawn_obstacle};
use super::physics::{Landing, step_entity};
use super::rewards::credit_passes;
use super::state::{EndCause, GameEvent, Phase, SessionState};
use crate::tuning::Tuning;

/// Advance the simulation by one physics tick
///
/// Returns the end cause when this tick finished the run.
pub fn physics_tick(
    state: &mut SessionState,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Option<EndCause> {
    if state.phase != Phase::Running {
        return None;
    }
    state.ticks += 1;

    if step_entity(state, tuning) == Landing::Floor {
        return Some(end_run(state, EndCause::FloorImpact, events));
    }

    let passed = advance_obstacles(state, tuning, events);
    credit_passes(state, tuning, passed);
    retire_obstacles(state, tuning, events);

    if let Some(obstacle_id) = find_collision(state, tuning) {
        return Some(end_run(state, EndCause::Collision { obstacle_id }, events));
    }

    log::trace!(
        "tick {}: y={:.2} v={:.2} obstacles={}",
        state.ticks,
        state.entity_y,
        state.entity_velocity,
        state.obstacles.len()
    );
    None
}

/// Spawn one obstacle if the run is live
pub fn spawn_tick<R: Rng>(
    state: &mut SessionState,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<u32> {
    if state.phase != Phase::Running {
        return None;
    }
    Some(spawn_obstacle(state, tuning, rng, events))
}

/// Move to `Over`, recording why
pub fn end_run(state: &mut SessionState, cause: EndCause, events: &mut Vec<GameEvent>) -> EndCause {
    state.phase = Phase::Over;
    events.push(GameEvent::SessionEnded { cause });
    cause
}
