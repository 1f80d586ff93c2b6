//! Per-step result types.

use serde::Serialize;

use ff_agent::HealthCounts;

use crate::StateVector;

/// Diagnostics for one step.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StepInfo {
    pub step:              u64,
    pub day:               u64,
    pub step_in_day:       u32,
    pub new_infections:    usize,
    /// New infections so far today.
    pub daily_infections:  usize,
    pub total_infected:    usize,
    pub health:            HealthCounts,
    pub deaths_this_step:  usize,
    /// Normalised by population, with cleaning and testing modifiers applied.
    pub productivity:      f64,
    /// Raw sum of per-worker production.
    pub total_production:  f64,
    pub quarantined:       usize,
    /// Cost of the policy changes applied since the previous step.
    pub action_cost:       f64,
    pub cleaning_modifier: f64,
    pub testing_modifier:  f64,
    pub tested:            usize,
    pub positives:         usize,
    pub released:          usize,
    pub shift_changed:     bool,
    /// Workers dropped from the roster during this step.
    pub dropped:           usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepResult {
    pub state:  StateVector,
    pub reward: f64,
    pub done:   bool,
    pub info:   StepInfo,
}
