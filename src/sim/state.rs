//! Session state and core simulation types
//!
//! Everything the tick handlers mutate lives in [`SessionState`]. Hosts only
//! ever see it through shared references or serialized snapshots.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Lifecycle phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first start
    #[default]
    NotStarted,
    /// Clocks ticking
    Running,
    /// Clocks stopped, resumable
    Paused,
    /// Run finished, summary emitted
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Entity reached the floor
    FloorImpact,
    /// Entity overlapped an obstacle outside its gap
    Collision { obstacle_id: u32 },
    /// Host quit the run
    Quit,
}

/// A paired obstacle: a top and bottom column with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Top of the gap (bottom of the upper column)
    pub gap_top: f32,
    /// Set once, on the tick the trailing edge crosses the entity
    #[serde(default)]
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, gap_top: f32) -> Self {
        Self {
            id,
            x,
            gap_top,
            passed: false,
        }
    }

    /// Right edge
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Bottom of the gap (top of the lower column)
    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_top + gap_height
    }
}

/// Things that happened during a tick, for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { energy_consumed: u32 },
    Flap,
    ObstacleSpawned { id: u32, gap_top: f32 },
    ObstaclePassed { id: u32 },
    ObstacleRetired { id: u32 },
    SessionEnded { cause: EndCause },
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    /// Top edge of the entity; `0 <= entity_y <= world_height - entity_size`
    pub entity_y: f32,
    /// Signed, unclamped
    pub entity_velocity: f32,
    /// Spawn order, which is also decreasing x
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub coins: f64,
    pub xp: u32,
    /// Obstacles passed this run
    pub obstacles_passed: u32,
    /// Player level snapshotted at start
    pub player_level: u32,
    /// Physics ticks executed this run
    pub ticks: u64,
    /// Runs started over the lifetime of this state
    pub energy_consumed: u32,
    /// Next obstacle ID (never reset between runs)
    next_id: u32,
}

impl SessionState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: Phase::NotStarted,
            entity_y: tuning.entity_start_y,
            entity_velocity: 0.0,
            obstacles: Vec::new(),
            score: 0,
            coins: 0.0,
            xp: 0,
            obstacles_passed: 0,
            player_level: 1,
            ticks: 0,
            energy_consumed: 0,
            next_id: 0,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear per-run fields and enter `Running`
    ///
    /// Energy bookkeeping and the ID counter carry over.
    pub fn begin_run(&mut self, tuning: &Tuning, player_level: u32) {
        self.entity_y = tuning.entity_start_y;
        self.entity_velocity = 0.0;
        self.obstacles.clear();
        self.score = 0;
        self.coins = 0.0;
        self.xp = 0;
        self.obstacles_passed = 0;
        self.player_level = player_level;
        self.ticks = 0;
        self.energy_consumed += 1;
        self.phase = Phase::Running;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_at_start_position() {
        let tuning = Tuning::default();
        let state = SessionState::new(&tuning);
        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!(state.entity_y, 250.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_begin_run_resets_run_but_keeps_ids() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        state.begin_run(&tuning, 2);
        let id = state.next_obstacle_id();
        state.obstacles.push(Obstacle::new(id, 10.0, 100.0));
        state.score = 4;
        state.coins = 0.4;
        state.entity_velocity = 3.0;
        state.phase = Phase::Over;

        state.begin_run(&tuning, 3);
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.coins, 0.0);
        assert_eq!(state.entity_velocity, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.energy_consumed, 2);
        assert_eq!(state.player_level, 3);
        assert!(state.next_obstacle_id() > id);
    }
}
