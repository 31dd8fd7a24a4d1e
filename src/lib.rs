//! Skyhop - a tap-to-fly arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session lifecycle)
//! - `tuning`: Data-driven game balance and setup validation
//!
//! Rendering, input devices and persistence belong to the host. The host feeds
//! elapsed time and a single trigger action into a [`sim::Session`] and
//! receives one [`sim::SessionSummary`] per finished run.

pub mod sim;
pub mod tuning;

pub use sim::{Phase, Session, SessionObserver, SessionParams, SessionState, SessionSummary};
pub use tuning::{ConfigError, Tuning};

/// Default tuning constants
pub mod consts {
    /// Physics tick period (~60 Hz)
    pub const PHYSICS_INTERVAL_MS: f64 = 1000.0 / 60.0;
    /// Obstacle spawn period
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Longest elapsed time accepted per frame
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Controlled entity (square, fixed horizontal position)
    pub const ENTITY_SIZE: f32 = 40.0;
    pub const ENTITY_X: f32 = 100.0;
    pub const ENTITY_START_Y: f32 = 250.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a trigger (negative is up)
    pub const JUMP_IMPULSE: f32 = -8.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 3.0;
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    pub const GAP_MARGIN_TOP: f32 = 50.0;
    pub const GAP_MARGIN_BOTTOM: f32 = 50.0;

    /// Rewards per passed obstacle
    pub const COIN_REWARD_BASE: f64 = 0.05;
    pub const XP_PER_PASS: u32 = 10;
}
