//! The `WorkerBehavior` trait — the per-worker extension point.

use log::debug;

use ff_agent::WorkerStore;
use ff_core::WorkerId;

use crate::{Floor, StepContext};

/// A disease-state change produced by [`WorkerBehavior::progress_disease`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HealthTransition {
    Recovered,
    /// Recovered → Healthy (immunity waned).
    Waned,
    Died,
}

/// What happened to one worker in one step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerOutcome {
    /// Workers this worker infected.
    pub infected:   Vec<WorkerId>,
    pub transition: Option<HealthTransition>,
}

/// Pluggable worker behavior.
///
/// The environment calls [`step_worker`](Self::step_worker) once per roster
/// worker per step, in a fixed shuffled order.  Implementations supply the
/// four primitive operations; the provided `step_worker` sequences them and
/// keeps the grid consistent (a worker that dies leaves the grid at once).
///
/// # Example
///
/// ```rust,ignore
/// struct Stationary;
///
/// impl WorkerBehavior for Stationary {
///     fn move_worker(&self, _: WorkerId, _: &mut Floor<'_>, _: &StepContext<'_>) {}
///     fn attempt_infection(&self, _: WorkerId, _: &mut Floor<'_>, _: &StepContext<'_>) -> Vec<WorkerId> {
///         vec![]
///     }
///     fn progress_disease(&self, _: WorkerId, _: &mut Floor<'_>, _: &StepContext<'_>) -> Option<HealthTransition> {
///         None
///     }
///     fn production(&self, w: WorkerId, workers: &WorkerStore, _: &StepContext<'_>) -> f64 {
///         workers.base_production[w.index()]
///     }
/// }
/// ```
pub trait WorkerBehavior: Send + Sync + 'static {
    /// Pre-step repositioning when social distancing is on.
    ///
    /// Default: no nudge.
    fn distancing_nudge(&self, _worker: WorkerId, _floor: &mut Floor<'_>, _ctx: &StepContext<'_>) {}

    /// Relocate around the shift anchor.  Only called for workers on the grid.
    fn move_worker(&self, worker: WorkerId, floor: &mut Floor<'_>, ctx: &StepContext<'_>);

    /// Transmission attempts from `worker` to nearby healthy workers.
    /// Returns the newly infected.  Only called for workers on the grid.
    fn attempt_infection(
        &self,
        worker: WorkerId,
        floor:  &mut Floor<'_>,
        ctx:    &StepContext<'_>,
    ) -> Vec<WorkerId>;

    /// Advance the disease state machine by one step.
    fn progress_disease(
        &self,
        worker: WorkerId,
        floor:  &mut Floor<'_>,
        ctx:    &StepContext<'_>,
    ) -> Option<HealthTransition>;

    /// This step's `current_production` for `worker`.
    fn production(&self, worker: WorkerId, workers: &WorkerStore, ctx: &StepContext<'_>) -> f64;

    /// Full per-step pipeline for one worker.
    fn step_worker(&self, worker: WorkerId, floor: &mut Floor<'_>, ctx: &StepContext<'_>) -> WorkerOutcome {
        let mut outcome = WorkerOutcome::default();
        if !floor.workers.is_on_roster(worker) {
            return outcome;
        }

        if floor.workers.is_active(worker) && floor.grid.position(worker).is_some() {
            if ctx.policy.social_distancing {
                self.distancing_nudge(worker, floor, ctx);
            }
            self.move_worker(worker, floor, ctx);
            outcome.infected = self.attempt_infection(worker, floor, ctx);
        }

        if !floor.workers.is_dead(worker) {
            outcome.transition = self.progress_disease(worker, floor, ctx);
            if outcome.transition == Some(HealthTransition::Died) {
                debug!("{worker} died at step {}", ctx.step);
                // `NotPlaced` just means the worker died in quarantine.
                let _ = floor.grid.remove(worker);
            }
        }

        let production = self.production(worker, floor.workers, ctx);
        floor.workers.current_production[worker.index()] = production;
        outcome
    }
}
