//! Tap-to-fly simulation core
//!
//! A [`Session`] owns one [`SessionState`] and drives it from two clocks:
//! physics ticks move the entity and obstacles, spawn ticks add obstacles
//! from a seeded `Pcg32`. Given the same seed, tuning and trigger timings,
//! two sessions produce identical runs and summaries.

pub mod autopilot;
pub(crate) mod clock;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod rewards;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Aabb, entity_box, find_collision, hits_obstacle};
pub use rewards::SessionSummary;
pub use session::{Session, SessionObserver, SessionParams};
pub use state::{EndCause, GameEvent, Obstacle, Phase, SessionState};
pub use tick::{physics_tick, spawn_tick};
