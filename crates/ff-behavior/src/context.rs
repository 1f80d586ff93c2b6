//! World borrows handed to behavior and control callbacks.

use ff_agent::WorkerStore;
use ff_core::{PolicyConfig, SimRng};
use ff_spatial::{SectionPartitioner, SpatialGrid};

/// Mutable view of everything a step may change: the lattice, the section
/// map with its infection pressure, worker state and the run's RNG.
///
/// Built by `ff-sim` from disjoint fields of the environment, so each
/// subsystem gets exactly the state it needs without borrowing the whole
/// environment.
pub struct Floor<'a> {
    pub grid:     &'a mut SpatialGrid,
    pub sections: &'a mut SectionPartitioner,
    pub workers:  &'a mut WorkerStore,
    pub rng:      &'a mut SimRng,
}

impl<'a> Floor<'a> {
    #[inline]
    pub fn new(
        grid:     &'a mut SpatialGrid,
        sections: &'a mut SectionPartitioner,
        workers:  &'a mut WorkerStore,
        rng:      &'a mut SimRng,
    ) -> Self {
        Self { grid, sections, workers, rng }
    }
}

/// Read-only facts about the current step.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    /// Policy in force for the whole step.
    pub policy: &'a PolicyConfig,

    /// Absolute step number (1 on the first call to `step`).
    pub step: u64,

    pub step_in_day: u32,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(policy: &'a PolicyConfig, step: u64, step_in_day: u32) -> Self {
        Self { policy, step, step_in_day }
    }
}
