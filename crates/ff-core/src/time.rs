//! Simulation time model.
//!
//! Time is an integer step counter.  One step is one simulated hour at the
//! default `steps_per_day = 24`; the rest of the simulator only reasons in
//! steps, steps-of-day and days, so the wall-clock meaning is irrelevant.
//!
//! ```text
//! step_in_day = current_step % steps_per_day
//! day         = number of completed day rollovers
//! ```

use std::fmt;

/// Step / day counters of one run.
///
/// `current_step` is 0 before the first `step()` call.  Each call to
/// [`advance`](Self::advance) moves to the next step and recomputes
/// `step_in_day`; the day counter increments when `step_in_day` wraps to 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorClock {
    pub steps_per_day: u32,
    pub current_step:  u64,
    pub step_in_day:   u32,
    pub current_day:   u64,
}

impl FloorClock {
    pub fn new(steps_per_day: u32) -> Self {
        debug_assert!(steps_per_day > 0, "steps_per_day must be > 0");
        Self {
            steps_per_day,
            current_step: 0,
            step_in_day:  0,
            current_day:  0,
        }
    }

    /// Advance by one step.  Returns `true` if this step started a new day.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.current_step += 1;
        self.step_in_day = (self.current_step % self.steps_per_day as u64) as u32;
        if self.step_in_day == 0 {
            self.current_day += 1;
            true
        } else {
            false
        }
    }

    /// `true` on the final step of a day (daily statistics are archived here).
    #[inline]
    pub fn is_last_step_of_day(&self) -> bool {
        self.step_in_day + 1 == self.steps_per_day
    }

    /// `(from + n) mod steps_per_day`: the step-of-day `n` steps after `from`.
    #[inline]
    pub fn step_of_day_after(&self, from: u32, n: u32) -> u32 {
        ((from as u64 + n as u64) % self.steps_per_day as u64) as u32
    }
}

impl fmt::Display for FloorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {} (day {} step {}/{})",
            self.current_step, self.current_day, self.step_in_day, self.steps_per_day
        )
    }
}
