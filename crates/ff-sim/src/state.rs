//! The fixed-length observation handed to the learning side.

use serde::Serialize;

use ff_agent::HealthCounts;
use ff_core::PolicyConfig;

/// Length of [`StateVector`].
pub const STATE_DIM: usize = 8;

/// `[healthy, infected, recovered, dead, productivity, step_in_day,
/// social_distancing, mask_mandate]`, flags as 0.0 / 1.0.
///
/// The order is part of the external contract and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StateVector(pub [f64; STATE_DIM]);

impl StateVector {
    pub fn new(counts: &HealthCounts, productivity: f64, step_in_day: u32, policy: &PolicyConfig) -> Self {
        StateVector([
            counts.healthy as f64,
            counts.infected as f64,
            counts.recovered as f64,
            counts.dead as f64,
            productivity,
            step_in_day as f64,
            flag(policy.social_distancing),
            flag(policy.mask_mandate),
        ])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn healthy(&self) -> f64 {
        self.0[0]
    }

    pub fn infected(&self) -> f64 {
        self.0[1]
    }

    pub fn recovered(&self) -> f64 {
        self.0[2]
    }

    pub fn dead(&self) -> f64 {
        self.0[3]
    }

    pub fn productivity(&self) -> f64 {
        self.0[4]
    }
}

fn flag(on: bool) -> f64 {
    if on { 1.0 } else { 0.0 }
}
