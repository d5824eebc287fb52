//! Step pacing.

use std::time::Duration;

use crate::engine::Pace;

/// Delays applied between emitted steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay after a structural step (swap, placement)
    pub step_delay: Duration,

    /// Delay after each flash of the completion sweep
    pub flash_delay: Duration,

    /// Upper bound on steps emitted per host tick, keeps frames responsive
    pub max_steps_per_tick: usize,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(1),
            flash_delay: Duration::from_millis(5),
            max_steps_per_tick: 64,
        }
    }
}

impl Pacing {
    /// Suspension that follows a step with the given pace
    pub fn delay_for(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Structural => self.step_delay,
            Pace::Flash => self.flash_delay,
            Pace::Immediate => Duration::ZERO,
        }
    }
}
