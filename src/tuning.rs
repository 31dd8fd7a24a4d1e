//! Game balance and world geometry
//!
//! Every constant the simulation reads comes from [`Tuning`], so tests and
//! hosts can override any of them. Loaded from JSON with missing fields
//! falling back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Setup-time failure. The simulation itself never errors once running.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Tunable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Clocks ===
    /// Physics tick period in milliseconds
    pub physics_interval_ms: f64,
    /// Obstacle spawn period in milliseconds
    pub spawn_interval_ms: f64,
    /// Elapsed time per `advance` call is clamped to this
    pub max_frame_ms: f64,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Entity ===
    pub entity_size: f32,
    /// Fixed left edge of the entity; also the pass reference line
    pub entity_x: f32,
    /// Vertical position at session start
    pub entity_start_y: f32,
    /// Added to velocity every physics tick
    pub gravity: f32,
    /// Velocity assigned on trigger
    pub jump_impulse: f32,

    // === Obstacles ===
    /// Leftward movement per physics tick
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    /// Smallest allowed `gap_top`
    pub gap_margin_top: f32,
    /// Space kept between the gap bottom and the floor
    pub gap_margin_bottom: f32,

    // === Rewards ===
    /// Coins per pass, multiplied by player level
    pub coin_reward_base: f64,
    pub xp_per_pass: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            physics_interval_ms: PHYSICS_INTERVAL_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            max_frame_ms: MAX_FRAME_MS,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            entity_size: ENTITY_SIZE,
            entity_x: ENTITY_X,
            entity_start_y: ENTITY_START_Y,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_speed: OBSTACLE_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            gap_margin_top: GAP_MARGIN_TOP,
            gap_margin_bottom: GAP_MARGIN_BOTTOM,

            coin_reward_base: COIN_REWARD_BASE,
            xp_per_pass: XP_PER_PASS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Lowest y the entity can occupy (its top edge resting on the floor)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.world_height - self.entity_size
    }

    /// Inclusive range `gap_top` is drawn from
    #[inline]
    pub fn gap_top_range(&self) -> (f32, f32) {
        (
            self.gap_margin_top,
            self.world_height - self.gap_height - self.gap_margin_bottom,
        )
    }

    /// Check the configuration is playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("entity_size", self.entity_size),
            ("entity_x", self.entity_x),
            ("entity_start_y", self.entity_start_y),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("gap_margin_top", self.gap_margin_top),
            ("gap_margin_bottom", self.gap_margin_bottom),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        positive_ms("physics_interval_ms", self.physics_interval_ms)?;
        positive_ms("spawn_interval_ms", self.spawn_interval_ms)?;
        positive_ms("max_frame_ms", self.max_frame_ms)?;

        if self.world_width <= 0.0 {
            return Err(ConfigError::invalid("world_width", "must be positive"));
        }
        if self.world_height <= 0.0 {
            return Err(ConfigError::invalid("world_height", "must be positive"));
        }
        if self.entity_size <= 0.0 || self.entity_size >= self.world_height {
            return Err(ConfigError::invalid(
                "entity_size",
                format!("must be in (0, {})", self.world_height),
            ));
        }
        if !(0.0..self.floor_y()).contains(&self.entity_start_y) {
            return Err(ConfigError::invalid(
                "entity_start_y",
                format!("must be in [0, {}), above the floor", self.floor_y()),
            ));
        }
        if self.obstacle_speed <= 0.0 {
            return Err(ConfigError::invalid("obstacle_speed", "must be positive"));
        }
        if self.obstacle_width <= 0.0 {
            return Err(ConfigError::invalid("obstacle_width", "must be positive"));
        }
        if self.gap_height <= 0.0 || self.gap_height > self.world_height {
            return Err(ConfigError::invalid(
                "gap_height",
                format!("must be in (0, {}]", self.world_height),
            ));
        }
        if self.gap_margin_top < 0.0 {
            return Err(ConfigError::invalid("gap_margin_top", "must not be negative"));
        }
        if self.gap_margin_bottom < 0.0 {
            return Err(ConfigError::invalid("gap_margin_bottom", "must not be negative"));
        }
        let (lo, hi) = self.gap_top_range();
        if lo > hi {
            return Err(ConfigError::invalid(
                "gap_margin_top",
                format!("gap placement range [{lo}, {hi}] is empty"),
            ));
        }
        if !self.coin_reward_base.is_finite() || self.coin_reward_base < 0.0 {
            return Err(ConfigError::invalid(
                "coin_reward_base",
                "must be finite and not negative",
            ));
        }
        Ok(())
    }
}

fn positive_ms(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be a positive duration, got {value}")))
    }
}
