//! Session lifecycle and host control surface
//!
//! `NotStarted -> Running <-> Paused -> Over -> (restart) -> Running`.
//! A [`Session`] owns the state, both clocks and the RNG. Every transition
//! out of `Running` stops the clocks; entering `Over` reports the summary to
//! the observer exactly once.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Scheduler, Timer};
use super::physics::flap;
use super::rewards::{SessionSummary, summarize};
use super::state::{EndCause, GameEvent, Phase, SessionState};
use super::tick::{end_run, physics_tick, spawn_tick};
use crate::tuning::{ConfigError, Tuning};

/// Starting parameters supplied by the surrounding app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionParams {
    /// Scales coin rewards; at least 1
    pub player_level: u32,
    /// Runs the player may start
    pub available_energy: u32,
    /// Display only
    pub max_energy: u32,
    /// Cosmetic character choice, never read by the physics
    pub entity_variant: String,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            player_level: 1,
            available_energy: 5,
            max_energy: 5,
            entity_variant: "bird".to_string(),
        }
    }
}

impl SessionParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_level(self.player_level)
    }
}

fn validate_level(level: u32) -> Result<(), ConfigError> {
    if level == 0 {
        Err(ConfigError::invalid("player_level", "must be at least 1"))
    } else {
        Ok(())
    }
}

/// Receives the terminal summary of every run
pub trait SessionObserver {
    fn on_session_end(&mut self, summary: &SessionSummary);
}

impl<F: FnMut(&SessionSummary)> SessionObserver for F {
    fn on_session_end(&mut self, summary: &SessionSummary) {
        self(summary)
    }
}

/// A playable game session
pub struct Session {
    tuning: Tuning,
    params: SessionParams,
    state: SessionState,
    clock: Scheduler,
    seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
    observer: Option<Box<dyn SessionObserver>>,
    last_summary: Option<SessionSummary>,
}

impl Session {
    /// Validate the setup and build an idle session
    pub fn new(tuning: Tuning, params: SessionParams, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        params.validate()?;
        Ok(Self {
            state: SessionState::new(&tuning),
            clock: Scheduler::new(tuning.physics_interval_ms, tuning.spawn_interval_ms),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tuning,
            params,
            events: Vec::new(),
            observer: None,
            last_summary: None,
        })
    }

    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl SessionObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // === Read access for renderers ===

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn entity_variant(&self) -> &str {
        &self.params.entity_variant
    }

    pub fn max_energy(&self) -> u32 {
        self.params.max_energy
    }

    pub fn energy_remaining(&self) -> u32 {
        self.params
            .available_energy
            .saturating_sub(self.state.energy_consumed)
    }

    /// Whether a start/restart would currently succeed on energy
    pub fn can_start(&self) -> bool {
        self.state.energy_consumed < self.params.available_energy
    }

    /// Summary of the most recent finished run
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    // === Collaborator updates ===

    /// Takes effect at the next start; the running session keeps its snapshot
    pub fn set_player_level(&mut self, level: u32) -> Result<(), ConfigError> {
        validate_level(level)?;
        self.params.player_level = level;
        Ok(())
    }

    pub fn set_available_energy(&mut self, energy: u32) {
        self.params.available_energy = energy;
    }

    // === Control surface ===

    /// The single input action
    pub fn trigger(&mut self) {
        match self.state.phase {
            Phase::NotStarted => {
                self.start();
            }
            Phase::Running => {
                flap(&mut self.state, &self.tuning);
                self.events.push(GameEvent::Flap);
            }
            Phase::Paused | Phase::Over => {}
        }
    }

    /// Begin the first run. Returns false (changing nothing) when not
    /// `NotStarted` or out of energy.
    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::NotStarted {
            return false;
        }
        self.begin_run()
    }

    /// Begin another run after `Over`, under the same energy rule as `start`
    pub fn restart(&mut self) -> bool {
        if self.state.phase != Phase::Over {
            return false;
        }
        self.begin_run()
    }

    pub fn pause(&mut self) {
        if self.state.phase == Phase::Running {
            self.clock.stop();
            self.state.phase = Phase::Paused;
            log::debug!("Paused at tick {}", self.state.ticks);
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == Phase::Paused {
            self.state.phase = Phase::Running;
            self.clock.start();
            log::debug!("Resumed at tick {}", self.state.ticks);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Abandon the current run, reporting it like any other ending
    pub fn quit(&mut self) {
        if matches!(self.state.phase, Phase::Running | Phase::Paused) {
            let cause = end_run(&mut self.state, EndCause::Quit, &mut self.events);
            self.finish(cause);
        }
    }

    /// Feed elapsed host time and run every tick that fell due
    ///
    /// Non-finite or non-positive deltas are dropped.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            log::trace!("Ignoring frame delta {}", elapsed_ms);
            return;
        }
        self.clock.feed(elapsed_ms.min(self.tuning.max_frame_ms));
        while let Some(timer) = self.clock.next_due() {
            match timer {
                Timer::Physics => self.step_physics(),
                Timer::Spawn => self.step_spawn(),
            }
        }
    }

    /// Physics tick handler; no-op unless running
    pub fn step_physics(&mut self) {
        if let Some(cause) = physics_tick(&mut self.state, &self.tuning, &mut self.events) {
            self.finish(cause);
        }
    }

    /// Spawn tick handler; no-op unless running
    pub fn step_spawn(&mut self) {
        spawn_tick(&mut self.state, &self.tuning, &mut self.rng, &mut self.events);
    }

    fn begin_run(&mut self) -> bool {
        if !self.can_start() {
            log::debug!(
                "Start rejected: {} of {} energy used",
                self.state.energy_consumed,
                self.params.available_energy
            );
            return false;
        }
        self.state.begin_run(&self.tuning, self.params.player_level);
        self.clock.start();
        self.events.push(GameEvent::SessionStarted {
            energy_consumed: self.state.energy_consumed,
        });
        log::info!(
            "Run started (level {}, energy {}/{})",
            self.state.player_level,
            self.energy_remaining(),
            self.params.max_energy
        );
        true
    }

    fn finish(&mut self, cause: EndCause) {
        self.clock.stop();
        let summary = summarize(&self.state, &self.tuning, cause);
        log::info!(
            "Run over ({:?}): score {}, coins {:.2}, xp {}, {:.1}s",
            summary.cause,
            summary.score,
            summary.coins_earned,
            summary.xp_earned,
            summary.duration_seconds
        );
        if let Some(observer) = self.observer.as_mut() {
            observer.on_session_end(&summary);
        }
        self.last_summary = Some(summary);
    }
}
