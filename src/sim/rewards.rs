//! Score, coin and XP accumulation
//!
//! Coins stay fractional for the whole run; rounding is a display concern.

use serde::{Deserialize, Serialize};

use super::state::{EndCause, SessionState};
use crate::tuning::Tuning;

/// Terminal report handed to the host once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub coins_earned: f64,
    pub xp_earned: u32,
    pub obstacles_passed: u32,
    /// Simulated running time (pauses excluded)
    pub duration_seconds: f64,
    /// Level the rewards were computed with
    pub player_level: u32,
    pub cause: EndCause,
}

/// Coins for a single pass at the given level
#[inline]
pub fn coins_per_pass(tuning: &Tuning, player_level: u32) -> f64 {
    tuning.coin_reward_base * f64::from(player_level)
}

/// Credit `passed` obstacle passes to the run totals
pub fn credit_passes(state: &mut SessionState, tuning: &Tuning, passed: u32) {
    if passed == 0 {
        return;
    }
    state.score += passed;
    state.obstacles_passed += passed;
    state.coins += f64::from(passed) * coins_per_pass(tuning, state.player_level);
    state.xp += passed * tuning.xp_per_pass;
}

/// Build the terminal summary from the current run totals
pub fn summarize(state: &SessionState, tuning: &Tuning, cause: EndCause) -> SessionSummary {
    SessionSummary {
        score: state.score,
        coins_earned: state.coins,
        xp_earned: state.xp,
        obstacles_passed: state.obstacles_passed,
        duration_seconds: state.ticks as f64 * tuning.physics_interval_ms / 1000.0,
        player_level: state.player_level,
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state(tuning: &Tuning, level: u32) -> SessionState {
        let mut state = SessionState::new(tuning);
        state.begin_run(tuning, level);
        state
    }

    #[test]
    fn test_single_pass_at_level_three() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning, 3);
        credit_passes(&mut state, &tuning, 1);

        assert_eq!(state.score, 1);
        assert_eq!(state.xp, 10);
        assert!((state.coins - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_coins_accumulate_without_rounding() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning, 1);
        for _ in 0..7 {
            credit_passes(&mut state, &tuning, 1);
        }
        assert!((state.coins - 0.35).abs() < 1e-12);
        assert_eq!(state.score, 7);
        assert_eq!(state.xp, 70);
    }

    #[test]
    fn test_summary_duration() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning, 2);
        state.ticks = 120;
        credit_passes(&mut state, &tuning, 2);

        let summary = summarize(&state, &tuning, EndCause::FloorImpact);
        assert!((summary.duration_seconds - 2.0).abs() < 1e-9);
        assert_eq!(summary.obstacles_passed, 2);
        assert_eq!(summary.player_level, 2);
        assert!((summary.coins_earned - 0.2).abs() < 1e-12);
    }
}
