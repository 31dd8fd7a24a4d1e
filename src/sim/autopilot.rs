//! Idle/demo controller
//!
//! Flaps when the entity has sunk near the bottom of the next gap it still
//! has to clear. Good enough to keep a demo run alive for a while.

use super::state::{Phase, SessionState};
use crate::tuning::Tuning;

/// Fraction of the gap kept clear above its bottom edge
const BOTTOM_CLEARANCE: f32 = 0.1;

/// Should the host send a trigger this frame?
pub fn should_trigger(state: &SessionState, tuning: &Tuning) -> bool {
    if state.phase != Phase::Running || state.entity_velocity < 0.0 {
        return false;
    }
    let gap_bottom = state
        .obstacles
        .iter()
        .find(|o| !o.passed)
        .map(|o| o.gap_bottom(tuning.gap_height))
        .unwrap_or((tuning.world_height + tuning.gap_height) / 2.0);

    let entity_bottom = state.entity_y + tuning.entity_size;
    entity_bottom > gap_bottom - tuning.gap_height * BOTTOM_CLEARANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;

    fn running_state(tuning: &Tuning) -> SessionState {
        let mut state = SessionState::new(tuning);
        state.begin_run(tuning, 1);
        state
    }

    #[test]
    fn test_flaps_when_sinking_below_gap() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.obstacles.push(Obstacle::new(0, 600.0, 100.0));
        // Gap bottom 250, threshold 235, entity bottom 290
        state.entity_y = 250.0;
        state.entity_velocity = 1.0;
        assert!(should_trigger(&state, &tuning));

        state.entity_y = 150.0;
        assert!(!should_trigger(&state, &tuning));
    }

    #[test]
    fn test_waits_while_rising() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.entity_y = 500.0;
        state.entity_velocity = -3.0;
        assert!(!should_trigger(&state, &tuning));
    }

    #[test]
    fn test_ignores_passed_obstacles() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        let mut behind = Obstacle::new(0, 0.0, 400.0);
        behind.passed = true;
        state.obstacles.push(behind);
        state.obstacles.push(Obstacle::new(1, 500.0, 50.0));
        // Next gap bottom is 200, entity bottom 290
        assert!(should_trigger(&state, &tuning));
    }

    #[test]
    fn test_idle_outside_running() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        state.entity_y = 550.0;
        assert!(!should_trigger(&state, &tuning));
    }
}
