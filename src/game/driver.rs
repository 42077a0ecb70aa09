//! Fixed-step frame driver
//!
//! Rendering runs as fast as the frontend likes; the snake advances in
//! constant steps measured against a monotonic clock.

use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

use super::engine::{SnakeGame, StepOutcome};

/// Source of monotonic elapsed time
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Accumulates elapsed time and steps the game once per `step_rate`
#[derive(Debug, Clone)]
pub struct FrameDriver {
    step_rate: Duration,
    last_step: Duration,
}

impl FrameDriver {
    /// Start counting steps from `now`
    pub fn new(step_rate: Duration, now: Duration) -> Self {
        assert!(!step_rate.is_zero(), "step rate must be positive");
        Self {
            step_rate,
            last_step: now,
        }
    }

    pub fn step_rate(&self) -> Duration {
        self.step_rate
    }

    /// Number of whole steps due at `now`, consuming them
    ///
    /// A stalled frame yields several steps at once so the simulation keeps
    /// its pace instead of slowing down.
    pub fn due_steps(&mut self, now: Duration) -> u32 {
        let mut steps = 0;
        while now.saturating_sub(self.last_step) >= self.step_rate {
            self.last_step += self.step_rate;
            steps += 1;
        }
        if steps > 1 {
            debug!("Catching up {steps} steps");
        }
        steps
    }

    /// Run every step due at `now` against `game`
    pub fn pump<R: Rng>(&mut self, now: Duration, game: &mut SnakeGame<R>) -> Vec<StepOutcome> {
        (0..self.due_steps(now)).map(|_| game.step()).collect()
    }
}
