//! `FactoryEnvironment` — owns every subsystem and drives the step protocol.

use log::{debug, info};

use ff_agent::{HealthCounts, WorkerStore};
use ff_behavior::{Floor, HealthTransition, StandardBehavior, StepContext, WorkerBehavior};
use ff_control::{
    redistribute, CleaningScheduler, ControlParams, QuarantineManager, ShiftScheduler, TestingManager,
};
use ff_core::policy::PolicyChanges;
use ff_core::{EnvConfig, FloorClock, HealthStatus, PolicyConfig, PolicyDelta, SimRng, WorkerId};
use ff_spatial::{SectionPartitioner, SpatialError, SpatialGrid};

use crate::{
    BaselineReward, EnvObserver, EnvironmentBuilder, NoopObserver, RewardFunction, RewardInput, SimResult,
    StateVector, StatsCollector, StepInfo, StepResult,
};

/// The simulation environment.
///
/// `FactoryEnvironment<B, R>` holds all state of one run and exposes the
/// control contract:
///
/// - [`step`](Self::step): optionally apply an action, then advance one step.
/// - [`update_config`](Self::update_config): apply a partial policy update
///   immediately.
/// - [`state`](Self::state) / [`is_done`](Self::is_done).
///
/// Create via [`EnvironmentBuilder`] or [`FactoryEnvironment::standard`].
pub struct FactoryEnvironment<B: WorkerBehavior, R: RewardFunction> {
    /// Fixed run parameters.  `config.policy` is the *initial* policy.
    pub config: EnvConfig,

    /// Policy in force.  Only changes through `update_config`.
    pub policy: PolicyConfig,

    pub clock:    FloorClock,
    pub grid:     SpatialGrid,
    pub sections: SectionPartitioner,
    pub workers:  WorkerStore,

    // ── Scheduled-event managers ──────────────────────────────────────────
    pub cleaning:   CleaningScheduler,
    pub testing:    TestingManager,
    pub quarantine: QuarantineManager,
    pub shifts:     ShiftScheduler,

    pub stats: StatsCollector,

    pub behavior:  B,
    pub reward_fn: R,

    pub(crate) control:             ControlParams,
    pub(crate) rng:                 SimRng,
    /// Worker activation order, shuffled once at construction.
    pub(crate) order:               Vec<WorkerId>,
    pub(crate) pending_action_cost: f64,
    pub(crate) last_productivity:   f64,
}

impl FactoryEnvironment<StandardBehavior, BaselineReward> {
    /// Environment with the default worker dynamics and baseline reward.
    pub fn standard(config: EnvConfig) -> SimResult<Self> {
        EnvironmentBuilder::new(config, StandardBehavior::default(), BaselineReward).build()
    }
}

impl<B: WorkerBehavior, R: RewardFunction> FactoryEnvironment<B, R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one step, optionally applying `action` first.
    pub fn step(&mut self, action: Option<&PolicyDelta>) -> SimResult<StepResult> {
        self.step_observed(action, &mut NoopObserver)
    }

    /// Step repeatedly until `is_done`.  Returns the number of steps taken.
    pub fn run<O: EnvObserver>(&mut self, observer: &mut O) -> SimResult<u64> {
        let mut steps = 0;
        while !self.is_done() {
            self.step_observed(None, observer)?;
            steps += 1;
        }
        observer.on_episode_end(self.clock.current_step);
        Ok(steps)
    }

    /// [`step`](Self::step) with observer callbacks.
    pub fn step_observed<O: EnvObserver>(
        &mut self,
        action:   Option<&PolicyDelta>,
        observer: &mut O,
    ) -> SimResult<StepResult> {
        if let Some(delta) = action {
            if self.update_config(delta)?.any() {
                observer.on_policy_change(&self.policy);
            }
        }

        // ① clock
        if self.clock.advance() {
            debug!("day {} begins", self.clock.current_day);
        }
        let step = self.clock.current_step;
        let step_in_day = self.clock.step_in_day;
        let mut info = StepInfo {
            step,
            day: self.clock.current_day,
            step_in_day,
            ..StepInfo::default()
        };

        // ② scheduled events
        self.cleaning.process(step_in_day, self.clock.steps_per_day, &mut self.sections);
        {
            let mut floor = Floor::new(&mut self.grid, &mut self.sections, &mut self.workers, &mut self.rng);

            for report in self.testing.run_scheduled(&mut floor, &mut self.quarantine, step, step_in_day) {
                info.tested += report.tested;
                info.positives += report.positives.len();
            }

            let released = self.quarantine.process(&mut floor);
            info.released = released.released.len();

            if self.shifts.is_due(step_in_day) {
                let report = self.shifts.change_shift(&mut floor, self.policy.social_distancing, step_in_day);
                info.shift_changed = true;
                info.dropped += report.dropped.len();
            }
        }

        // ③ – ⑤ workers
        let infected_before = self.workers.count_status(HealthStatus::Infected);
        {
            let ctx = StepContext::new(&self.policy, step, step_in_day);
            let mut floor = Floor::new(&mut self.grid, &mut self.sections, &mut self.workers, &mut self.rng);
            for &worker in &self.order {
                let outcome = self.behavior.step_worker(worker, &mut floor, &ctx);
                if outcome.transition == Some(HealthTransition::Died) {
                    info.deaths_this_step += 1;
                }
            }
        }
        let counts = self.workers.health_counts();
        info.new_infections = counts.infected.saturating_sub(infected_before);

        // ⑥ metrics
        info.cleaning_modifier = self.cleaning.productivity_modifier();
        info.testing_modifier = self.testing.productivity_modifier();
        info.total_production = self.workers.total_production();
        info.productivity = self.productivity_from(info.total_production);
        self.last_productivity = info.productivity;

        info.action_cost = std::mem::take(&mut self.pending_action_cost);
        let reward = self.reward_fn.reward(&RewardInput {
            productivity:   info.productivity,
            new_infections: info.new_infections,
            population:     self.config.num_agents,
            counts,
            action_cost:    info.action_cost,
            policy:         &self.policy,
        });
        self.stats.record_step(info.new_infections, info.productivity, reward, &self.policy);

        info.health = counts;
        info.total_infected = counts.infected;
        info.quarantined = self.quarantine.len();
        info.daily_infections = self.stats.daily_infections();

        // ⑦ day end
        if self.clock.is_last_step_of_day() {
            let day = self.stats.archive_day(self.clock.current_day, &counts, info.quarantined, info.productivity);
            info!(
                "day {} closed: {} new infections, {} infected, {} dead, {} quarantined, productivity {:.3}",
                day.day, day.new_infections, day.infected, day.dead, day.quarantined, day.productivity
            );
            observer.on_day_end(&day);
        }

        // ⑧ result
        let result = StepResult {
            state: StateVector::new(&counts, info.productivity, step_in_day, &self.policy),
            reward,
            done: self.done_for(&counts),
            info,
        };
        observer.on_step_end(&result);
        Ok(result)
    }

    /// Apply every lever present in `delta`.
    ///
    /// The whole delta is validated first (shift divisibility, grid width for
    /// the splitting level); on error nothing changes.  Each changed lever is
    /// then forwarded to the subsystem that owns it.  Returns which levers
    /// actually changed value.
    pub fn update_config(&mut self, delta: &PolicyDelta) -> SimResult<PolicyChanges> {
        let mut next = self.policy.clone();
        let changes = next.apply(delta)?;
        if !changes.any() {
            return Ok(changes);
        }
        let sections = next.splitting_level.section_count();
        if changes.splitting_level && (self.grid.width() as usize) < sections {
            return Err(SpatialError::SectionTooNarrow { width: self.grid.width(), sections }.into());
        }

        if changes.cleaning_type {
            self.cleaning.set_cleaning_type(next.cleaning_type);
        }
        if changes.testing_level {
            self.testing.set_testing_level(next.testing_level);
        }
        if changes.shifts_per_day {
            self.shifts.set_shifts_per_day(next.shifts_per_day)?;
        }
        if changes.splitting_level {
            let mut floor = Floor::new(&mut self.grid, &mut self.sections, &mut self.workers, &mut self.rng);
            redistribute(
                next.splitting_level,
                &mut floor,
                &mut self.quarantine,
                self.control.shifts.placement_attempts,
            )?;
        }

        self.pending_action_cost += next.action_cost(&changes);
        self.policy = next;
        info!(
            "policy updated: cleaning={} splitting={} testing={} distancing={} masks={} shifts={}",
            self.policy.cleaning_type.as_str(),
            self.policy.splitting_level,
            self.policy.testing_level.as_str(),
            self.policy.social_distancing,
            self.policy.mask_mandate,
            self.policy.shifts_per_day.get()
        );
        Ok(changes)
    }

    /// Decode and apply a JSON action dictionary.
    pub fn update_config_json(&mut self, json: &str) -> SimResult<PolicyChanges> {
        let delta = PolicyDelta::from_json(json)?;
        self.update_config(&delta)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Current observation, without stepping.
    pub fn state(&self) -> StateVector {
        StateVector::new(&self.health_counts(), self.last_productivity, self.clock.step_in_day, &self.policy)
    }

    /// No infected worker left, or the step cap reached.
    pub fn is_done(&self) -> bool {
        self.done_for(&self.health_counts())
    }

    pub fn health_counts(&self) -> HealthCounts {
        self.workers.health_counts()
    }

    /// Productivity computed by the most recent step.
    pub fn productivity(&self) -> f64 {
        self.last_productivity
    }

    /// Cost accumulated by `update_config` since the last step.
    pub fn pending_action_cost(&self) -> f64 {
        self.pending_action_cost
    }

    /// Workers breaking the placement invariant: an active worker off the
    /// grid or outside its section, or an inactive worker on the grid.
    /// Always empty in a consistent environment.
    pub fn occupancy_violations(&self) -> Vec<WorkerId> {
        self.workers
            .worker_ids()
            .filter(|&w| match self.grid.position(w) {
                Some(pos) => {
                    !self.workers.is_active(w)
                        || !self
                            .sections
                            .section_bounds(self.workers.section[w.index()])
                            .is_ok_and(|b| b.contains(&pos.x))
                }
                None => self.workers.is_active(w),
            })
            .collect()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn productivity_from(&self, total_production: f64) -> f64 {
        let population = self.config.num_agents.max(1) as f64;
        total_production * self.cleaning.productivity_modifier() * self.testing.productivity_modifier() / population
    }

    fn done_for(&self, counts: &HealthCounts) -> bool {
        counts.infected == 0 || self.clock.current_step >= self.config.max_steps
    }
}
