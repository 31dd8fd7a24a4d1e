//! Vertical motion of the controlled entity
//!
//! Semi-implicit Euler per tick: velocity first, then position. The ceiling
//! clamps without touching velocity; the floor clamps and ends the run.

use super::state::SessionState;
use crate::tuning::Tuning;

/// Where the entity ended up after a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Inside the world (possibly pinned to the ceiling)
    Airborne,
    /// Touching the floor
    Floor,
}

/// Apply gravity, integrate position and clamp to world bounds
///
/// An entity already resting on the floor lands without moving, whatever
/// its velocity.
pub fn step_entity(state: &mut SessionState, tuning: &Tuning) -> Landing {
    let floor = tuning.floor_y();
    if state.entity_y >= floor {
        state.entity_y = floor;
        return Landing::Floor;
    }

    state.entity_velocity += tuning.gravity;
    state.entity_y += state.entity_velocity;

    if state.entity_y >= floor {
        state.entity_y = floor;
        Landing::Floor
    } else {
        if state.entity_y <= 0.0 {
            state.entity_y = 0.0;
        }
        Landing::Airborne
    }
}

/// Instant upward impulse
#[inline]
pub fn flap(state: &mut SessionState, tuning: &Tuning) {
    state.entity_velocity = tuning.jump_impulse;
}
