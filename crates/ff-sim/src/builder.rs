//! Fluent builder for constructing a [`FactoryEnvironment`].

use log::info;

use ff_agent::WorkerStoreBuilder;
use ff_behavior::{BehaviorParams, StandardBehavior, StepContext, WorkerBehavior};
use ff_control::{CleaningScheduler, ControlParams, QuarantineManager, ShiftScheduler, TestingManager};
use ff_core::{EnvConfig, FloorClock, SimRng, WorkerId};
use ff_spatial::{shuffled_cells, SectionPartitioner, SpatialGrid};

use crate::{FactoryEnvironment, RewardFunction, SimError, SimResult, StatsCollector};

/// Fluent builder for [`FactoryEnvironment<B, R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                            |
/// |--------------------------|------------------------------------|
/// | `.control_params(p)`     | `ControlParams::default()`         |
/// | `.initial_infected(w)`   | one worker drawn from the seed     |
/// | `.behavior_params(p)`    | `BehaviorParams::default()`        |
///
/// # Example
///
/// ```rust,ignore
/// let mut env = EnvironmentBuilder::new(config, StandardBehavior::default(), ShapedReward::default())
///     .initial_infected(WorkerId(0))
///     .build()?;
/// env.run(&mut NoopObserver)?;
/// ```
pub struct EnvironmentBuilder<B: WorkerBehavior, R: RewardFunction> {
    config:           EnvConfig,
    control:          ControlParams,
    initial_infected: Option<WorkerId>,
    behavior:         B,
    reward_fn:        R,
}

impl<B: WorkerBehavior, R: RewardFunction> EnvironmentBuilder<B, R> {
    pub fn new(config: EnvConfig, behavior: B, reward_fn: R) -> Self {
        Self {
            config,
            control: ControlParams::default(),
            initial_infected: None,
            behavior,
            reward_fn,
        }
    }

    /// Replace the cleaning, testing, quarantine and shift parameters.
    pub fn control_params(mut self, params: ControlParams) -> Self {
        self.control = params;
        self
    }

    /// Start the episode with `worker` infected instead of a random one.
    pub fn initial_infected(mut self, worker: WorkerId) -> Self {
        self.initial_infected = Some(worker);
        self
    }

    /// Validate the config, lay the workers out on the floor and return a
    /// ready-to-step environment.
    ///
    /// Every random draw comes from one RNG seeded with `config.seed`, in
    /// this order: base production, patient zero, initial cells, activation
    /// order.
    pub fn build(self) -> SimResult<FactoryEnvironment<B, R>> {
        let config = self.config;
        config.validate()?;
        let n = config.num_agents;

        let mut rng = SimRng::new(config.seed);

        // ── Workers ───────────────────────────────────────────────────────
        let mut workers = WorkerStoreBuilder::new(n)
            .production_variance(config.production_variance)
            .build(&mut rng);
        let patient_zero = match self.initial_infected {
            Some(w) if w.index() >= n => {
                return Err(SimError::UnknownWorker { worker: w.0, count: n });
            }
            Some(w) => w,
            None => WorkerId(rng.gen_range(0..n) as u32),
        };
        workers.infect(patient_zero);

        // ── Floor layout ──────────────────────────────────────────────────
        let mut grid = SpatialGrid::new(config.width, config.height, n);
        let sections = SectionPartitioner::new(config.width, config.policy.splitting_level)?;
        let cells = shuffled_cells(config.width, config.height, &mut rng);
        for (i, &pos) in cells.iter().take(n).enumerate() {
            grid.place(WorkerId(i as u32), pos)?;
            workers.base_position[i] = pos;
            workers.section[i] = sections.section_index(pos.x);
        }

        let mut order: Vec<WorkerId> = workers.worker_ids().collect();
        rng.shuffle(&mut order);

        // ── Managers ──────────────────────────────────────────────────────
        let spd = config.steps_per_day();
        let policy = config.policy.clone();
        let cleaning = CleaningScheduler::new(self.control.cleaning, policy.cleaning_type, spd);
        let testing = TestingManager::new(self.control.testing.clone(), policy.testing_level, spd);
        let quarantine = QuarantineManager::new(self.control.quarantine.clone());
        let shifts = ShiftScheduler::new(self.control.shifts.clone(), &policy)?;

        let mut env = FactoryEnvironment {
            clock: FloorClock::new(spd),
            policy,
            grid,
            sections,
            workers,
            cleaning,
            testing,
            quarantine,
            shifts,
            stats: StatsCollector::new(),
            behavior: self.behavior,
            reward_fn: self.reward_fn,
            control: self.control,
            rng,
            order,
            pending_action_cost: 0.0,
            last_productivity: 0.0,
            config,
        };
        env.seed_production();

        info!(
            "environment ready: {}x{} floor, {} workers, {} sections, patient zero {patient_zero}, seed {}",
            env.config.width,
            env.config.height,
            n,
            env.sections.section_count(),
            env.config.seed
        );
        Ok(env)
    }
}

impl<R: RewardFunction> EnvironmentBuilder<StandardBehavior, R> {
    /// Replace the disease, transmission and production parameters.
    pub fn behavior_params(mut self, params: BehaviorParams) -> SimResult<Self> {
        params.validate()?;
        self.behavior = StandardBehavior::new(params);
        Ok(self)
    }
}

impl<B: WorkerBehavior, R: RewardFunction> FactoryEnvironment<B, R> {
    /// Production before the first step, so `state()` is meaningful at
    /// step 0.
    fn seed_production(&mut self) {
        let ctx = StepContext::new(&self.policy, 0, 0);
        for i in 0..self.workers.count {
            let production = self.behavior.production(WorkerId(i as u32), &self.workers, &ctx);
            self.workers.current_production[i] = production;
        }
        let total = self.workers.total_production();
        self.last_productivity = total / self.config.num_agents.max(1) as f64;
    }
}
