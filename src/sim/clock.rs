//! Two independent fixed-period clocks driven by host elapsed time
//!
//! The host feeds wall-clock milliseconds; the scheduler hands back due
//! ticks one at a time in time order. Both clocks start and stop together.

/// Which clock fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Physics,
    Spawn,
}

/// A single periodic timer
#[derive(Debug, Clone)]
struct Interval {
    period_ms: f64,
    /// Time left until the next firing
    remaining_ms: f64,
}

impl Interval {
    fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            remaining_ms: period_ms,
        }
    }

    fn rearm(&mut self) {
        self.remaining_ms = self.period_ms;
    }
}

/// Physics and spawn clocks sharing one time budget
#[derive(Debug, Clone)]
pub struct Scheduler {
    physics: Interval,
    spawn: Interval,
    /// Elapsed time not yet consumed by firings
    budget_ms: f64,
    running: bool,
}

impl Scheduler {
    pub fn new(physics_period_ms: f64, spawn_period_ms: f64) -> Self {
        Self {
            physics: Interval::new(physics_period_ms),
            spawn: Interval::new(spawn_period_ms),
            budget_ms: 0.0,
            running: false,
        }
    }

    /// Arm both clocks with a full period ahead of them
    pub fn start(&mut self) {
        self.physics.rearm();
        self.spawn.rearm();
        self.budget_ms = 0.0;
        self.running = true;
    }

    /// Disarm both clocks and discard pending time
    pub fn stop(&mut self) {
        self.running = false;
        self.budget_ms = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Add elapsed wall-clock time; ignored while stopped
    pub fn feed(&mut self, elapsed_ms: f64) {
        if self.running && elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.budget_ms += elapsed_ms;
        }
    }

    /// Pop the next timer due within the fed budget
    ///
    /// Physics wins ties. Once nothing else is due the leftover budget is
    /// credited to both clocks.
    pub fn next_due(&mut self) -> Option<Timer> {
        if !self.running {
            return None;
        }
        let (timer, wait) = if self.physics.remaining_ms <= self.spawn.remaining_ms {
            (Timer::Physics, self.physics.remaining_ms)
        } else {
            (Timer::Spawn, self.spawn.remaining_ms)
        };

        if wait > self.budget_ms {
            self.physics.remaining_ms -= self.budget_ms;
            self.spawn.remaining_ms -= self.budget_ms;
            self.budget_ms = 0.0;
            return None;
        }

        self.budget_ms -= wait;
        self.physics.remaining_ms -= wait;
        self.spawn.remaining_ms -= wait;
        match timer {
            Timer::Physics => self.physics.remaining_ms += self.physics.period_ms,
            Timer::Spawn => self.spawn.remaining_ms += self.spawn.period_ms,
        }
        Some(timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler) -> Vec<Timer> {
        std::iter::from_fn(|| scheduler.next_due()).collect()
    }

    #[test]
    fn test_stopped_scheduler_never_fires() {
        let mut scheduler = Scheduler::new(10.0, 30.0);
        scheduler.feed(1000.0);
        assert!(drain(&mut scheduler).is_empty());
    }

    #[test]
    fn test_interleaves_in_time_order() {
        let mut scheduler = Scheduler::new(10.0, 25.0);
        scheduler.start();
        scheduler.feed(50.0);
        use Timer::*;
        // physics at 10, 20, 30, 40, 50; spawn at 25, 50
        assert_eq!(
            drain(&mut scheduler),
            vec![Physics, Physics, Spawn, Physics, Physics, Physics, Spawn]
        );
    }

    #[test]
    fn test_partial_time_carries_over() {
        let mut scheduler = Scheduler::new(10.0, 1000.0);
        scheduler.start();
        scheduler.feed(6.0);
        assert!(drain(&mut scheduler).is_empty());
        scheduler.feed(6.0);
        assert_eq!(drain(&mut scheduler), vec![Timer::Physics]);
        scheduler.feed(8.0);
        assert_eq!(drain(&mut scheduler), vec![Timer::Physics]);
    }

    #[test]
    fn test_stop_discards_pending_and_restart_rearms() {
        let mut scheduler = Scheduler::new(10.0, 15.0);
        scheduler.start();
        scheduler.feed(100.0);
        assert_eq!(scheduler.next_due(), Some(Timer::Physics));
        scheduler.stop();
        assert_eq!(scheduler.next_due(), None);

        scheduler.start();
        scheduler.feed(9.0);
        assert!(drain(&mut scheduler).is_empty());
        scheduler.feed(1.0);
        assert_eq!(drain(&mut scheduler), vec![Timer::Physics]);
    }

    #[test]
    fn test_ignores_negative_time() {
        let mut scheduler = Scheduler::new(10.0, 15.0);
        scheduler.start();
        scheduler.feed(-50.0);
        scheduler.feed(f64::NAN);
        assert!(drain(&mut scheduler).is_empty());
    }
}
