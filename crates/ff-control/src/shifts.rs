//! `ShiftScheduler` — anchor rotation at shift boundaries.
//!
//! ```text
//! steps_per_shift   = steps_per_day / shifts_per_day
//! next_shift_change = steps_per_shift mod steps_per_day      (initially)
//! due               ⇔ step_in_day == next_shift_change  or a change is pending
//! after a change    : next_shift_change = (step_in_day + steps_per_shift) mod steps_per_day
//! ```
//!
//! A change gives every active worker a fresh anchor in its own section.
//! With social distancing on, anchors are kept at least
//! `min_anchor_distance` apart (Manhattan) where feasible.

use log::debug;
use serde::{Deserialize, Serialize};

use ff_behavior::Floor;
use ff_core::{PolicyConfig, ShiftsPerDay};

use crate::relocate::relocate_active;
use crate::{ControlResult, RelocationReport};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftParams {
    /// Random cells tried per phase and worker.
    pub placement_attempts:  usize,
    pub min_anchor_distance: u32,
}

impl Default for ShiftParams {
    fn default() -> Self {
        Self {
            placement_attempts:  50,
            min_anchor_distance: 2,
        }
    }
}

pub struct ShiftScheduler {
    params:            ShiftParams,
    steps_per_day:     u32,
    steps_per_shift:   u32,
    next_shift_change: u32,
    pending:           bool,
    changes:           u64,
}

impl ShiftScheduler {
    pub fn new(params: ShiftParams, policy: &PolicyConfig) -> ControlResult<Self> {
        let steps_per_shift = policy.steps_per_shift()?;
        Ok(Self {
            params,
            steps_per_day: policy.steps_per_day,
            steps_per_shift,
            next_shift_change: steps_per_shift % policy.steps_per_day,
            pending: false,
            changes: 0,
        })
    }

    #[inline]
    pub fn params(&self) -> &ShiftParams {
        &self.params
    }

    #[inline]
    pub fn steps_per_shift(&self) -> u32 {
        self.steps_per_shift
    }

    #[inline]
    pub fn next_shift_change(&self) -> u32 {
        self.next_shift_change
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Shift changes performed so far.
    #[inline]
    pub fn changes(&self) -> u64 {
        self.changes
    }

    #[inline]
    pub fn is_due(&self, step_in_day: u32) -> bool {
        self.pending || step_in_day == self.next_shift_change
    }

    /// Recompute `steps_per_shift` and force a change at the next check.
    /// An indivisible day leaves the scheduler untouched.
    pub fn set_shifts_per_day(&mut self, shifts: ShiftsPerDay) -> ControlResult<()> {
        self.steps_per_shift = shifts.steps_per_shift(self.steps_per_day)?;
        self.pending = true;
        Ok(())
    }

    /// Reassign anchors and schedule the next change.
    pub fn change_shift(
        &mut self,
        floor:             &mut Floor<'_>,
        social_distancing: bool,
        step_in_day:       u32,
    ) -> RelocationReport {
        let spacing = social_distancing.then_some(self.params.min_anchor_distance);
        let report = relocate_active(floor, self.params.placement_attempts, spacing, "shift change");

        self.next_shift_change = (step_in_day + self.steps_per_shift) % self.steps_per_day;
        self.pending = false;
        self.changes += 1;
        debug!(
            "shift change at step-of-day {step_in_day}: {} anchors, {} best-effort, {} dropped, next at {}",
            report.placed,
            report.best_effort.len(),
            report.dropped.len(),
            self.next_shift_change
        );
        report
    }
}
