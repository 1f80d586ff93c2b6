//! A no-op behavior model — workers stand still and never change state.

use ff_agent::WorkerStore;
use ff_core::WorkerId;

use crate::{Floor, HealthTransition, StepContext, WorkerBehavior};

/// A [`WorkerBehavior`] that never moves, infects or progresses anyone.
///
/// Useful in tests of the scheduled-event phase, where worker dynamics would
/// only add noise.  Production is the worker's base production, or zero
/// while quarantined or dead.
pub struct NoopBehavior;

impl WorkerBehavior for NoopBehavior {
    fn move_worker(&self, _worker: WorkerId, _floor: &mut Floor<'_>, _ctx: &StepContext<'_>) {}

    fn attempt_infection(
        &self,
        _worker: WorkerId,
        _floor:  &mut Floor<'_>,
        _ctx:    &StepContext<'_>,
    ) -> Vec<WorkerId> {
        vec![]
    }

    fn progress_disease(
        &self,
        _worker: WorkerId,
        _floor:  &mut Floor<'_>,
        _ctx:    &StepContext<'_>,
    ) -> Option<HealthTransition> {
        None
    }

    fn production(&self, worker: WorkerId, workers: &WorkerStore, _ctx: &StepContext<'_>) -> f64 {
        if workers.is_quarantined(worker) || workers.is_dead(worker) {
            0.0
        } else {
            workers.base_production[worker.index()]
        }
    }
}
