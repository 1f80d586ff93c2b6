//! `TestingManager` — scheduled diagnostic sampling.
//!
//! # Tiers
//!
//! | Tier   | Proportion | Productivity impact | Impact duration | Frequency |
//! |--------|------------|---------------------|-----------------|-----------|
//! | light  | 0.1        | 0.00                | 1               | 8         |
//! | medium | 0.5        | 0.10                | 1               | 16        |
//! | heavy  | 0.8        | 0.20                | 2               | 24        |
//!
//! False-positive (0.05) and false-negative (0.14) rates are shared by all
//! tiers.  Only the tier matching the policy's testing level is enabled.
//!
//! # Schedule
//!
//! Each tier's first test falls on step-of-day `frequency mod steps_per_day`.
//! [`should_run_testing`](TestingManager::should_run_testing) fires at most
//! once per absolute step and then advances that tier by its frequency.

use log::debug;
use serde::{Deserialize, Serialize};

use ff_behavior::Floor;
use ff_core::{HealthStatus, SimRng, TestingLevel, WorkerId};

use crate::QuarantineManager;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestingTier {
    /// Share of the active workforce sampled per round.
    pub proportion:          f64,
    pub productivity_impact: f64,
    pub impact_duration:     u32,
    pub frequency:           u32,
}

impl TestingTier {
    pub const fn new(proportion: f64, productivity_impact: f64, impact_duration: u32, frequency: u32) -> Self {
        Self { proportion, productivity_impact, impact_duration, frequency }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestingParams {
    /// Light, medium, heavy.
    pub tiers:               [TestingTier; 3],
    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
}

impl Default for TestingParams {
    fn default() -> Self {
        Self {
            tiers: [
                TestingTier::new(0.1, 0.0, 1, 8),
                TestingTier::new(0.5, 0.10, 1, 16),
                TestingTier::new(0.8, 0.20, 2, 24),
            ],
            false_positive_rate: 0.05,
            false_negative_rate: 0.14,
        }
    }
}

/// Outcome of one testing round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestingReport {
    pub tier:            Option<TestingLevel>,
    pub tested:          usize,
    pub positives:       Vec<WorkerId>,
    pub true_positives:  usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

#[derive(Clone, Debug)]
struct TierState {
    enabled:     bool,
    next_step:   u32,
    last_tested: Option<u64>,
}

pub struct TestingManager {
    params:           TestingParams,
    steps_per_day:    u32,
    state:            [TierState; 3],
    impact:           f64,
    impact_remaining: u32,
    rounds:           u64,
}

/// Position of a running tier in the per-tier arrays.
fn slot(level: TestingLevel) -> Option<usize> {
    match level {
        TestingLevel::None => None,
        TestingLevel::Light => Some(0),
        TestingLevel::Medium => Some(1),
        TestingLevel::Heavy => Some(2),
    }
}

impl TestingManager {
    pub fn new(params: TestingParams, level: TestingLevel, steps_per_day: u32) -> Self {
        let spd = steps_per_day.max(1);
        let state = params.tiers.map(|t| TierState {
            enabled:     false,
            next_step:   t.frequency % spd,
            last_tested: None,
        });
        let mut manager = Self {
            params,
            steps_per_day: spd,
            state,
            impact: 0.0,
            impact_remaining: 0,
            rounds: 0,
        };
        manager.set_testing_level(level);
        manager
    }

    #[inline]
    pub fn params(&self) -> &TestingParams {
        &self.params
    }

    pub fn tier(&self, level: TestingLevel) -> Option<&TestingTier> {
        slot(level).map(|i| &self.params.tiers[i])
    }

    pub fn is_enabled(&self, level: TestingLevel) -> bool {
        slot(level).is_some_and(|i| self.state[i].enabled)
    }

    pub fn next_step(&self, level: TestingLevel) -> Option<u32> {
        slot(level).map(|i| self.state[i].next_step)
    }

    /// Testing rounds run so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Disable every tier, then enable `level` (nothing for `None`).
    pub fn set_testing_level(&mut self, level: TestingLevel) {
        for s in &mut self.state {
            s.enabled = false;
        }
        if let Some(i) = slot(level) {
            self.state[i].enabled = true;
        }
    }

    /// Production multiplier while a testing impact is in effect.
    pub fn productivity_modifier(&self) -> f64 {
        if self.impact_remaining > 0 {
            1.0 - self.impact
        } else {
            1.0
        }
    }

    /// Count down the running productivity impact.  Called once at the start
    /// of the testing phase, before any new round.
    pub fn tick_impact(&mut self) {
        if self.impact_remaining > 0 {
            self.impact_remaining -= 1;
            if self.impact_remaining == 0 {
                self.impact = 0.0;
            }
        }
    }

    /// `true` exactly once per scheduled occurrence of an enabled tier.
    pub fn should_run_testing(&mut self, level: TestingLevel, step: u64, step_in_day: u32) -> bool {
        let Some(i) = slot(level) else { return false };
        let frequency = self.params.tiers[i].frequency;
        let spd = self.steps_per_day;
        let state = &mut self.state[i];
        if !state.enabled || state.next_step != step_in_day || state.last_tested == Some(step) {
            return false;
        }
        state.last_tested = Some(step);
        state.next_step = (step_in_day + frequency) % spd;
        true
    }

    /// One test of a worker whose true state is `status`.  `true` = positive.
    pub fn test_worker(&self, status: HealthStatus, rng: &mut SimRng) -> bool {
        match status {
            HealthStatus::Infected => !rng.gen_bool(self.params.false_negative_rate),
            HealthStatus::Healthy | HealthStatus::Recovered => rng.gen_bool(self.params.false_positive_rate),
            HealthStatus::Dead => false,
        }
    }

    /// Sample `proportion × active` workers without replacement, test them
    /// and quarantine every positive.  Starts the tier's productivity impact.
    pub fn process_testing(
        &mut self,
        level:      TestingLevel,
        floor:      &mut Floor<'_>,
        quarantine: &mut QuarantineManager,
    ) -> TestingReport {
        let mut report = TestingReport { tier: Some(level), ..TestingReport::default() };
        let Some(i) = slot(level) else { return report };
        let tier = self.params.tiers[i];

        let active: Vec<WorkerId> = floor
            .workers
            .worker_ids()
            .filter(|&w| floor.workers.is_active(w) && floor.grid.position(w).is_some())
            .collect();
        let amount = ((tier.proportion * active.len() as f64) as usize).min(active.len());
        let sample = floor.rng.sample(&active, amount);

        for worker in sample {
            let status = floor.workers.status(worker);
            let positive = self.test_worker(status, floor.rng);
            report.tested += 1;
            match (positive, status == HealthStatus::Infected) {
                (true, true) => report.true_positives += 1,
                (true, false) => report.false_positives += 1,
                (false, true) => report.false_negatives += 1,
                (false, false) => {}
            }
            if positive {
                quarantine.quarantine(worker, floor);
                report.positives.push(worker);
            }
        }

        if tier.impact_duration > 0 {
            self.impact = tier.productivity_impact;
            self.impact_remaining = tier.impact_duration;
        }
        self.rounds += 1;
        debug!(
            "{} testing: {} tested, {} positive ({} false), {} missed",
            level.as_str(),
            report.tested,
            report.positives.len(),
            report.false_positives,
            report.false_negatives
        );
        report
    }

    /// The whole testing phase of a step: impact countdown, then every due
    /// tier in light → heavy order.
    pub fn run_scheduled(
        &mut self,
        floor:       &mut Floor<'_>,
        quarantine:  &mut QuarantineManager,
        step:        u64,
        step_in_day: u32,
    ) -> Vec<TestingReport> {
        self.tick_impact();
        let mut reports = Vec::new();
        for level in TestingLevel::TIERS {
            if self.should_run_testing(level, step, step_in_day) {
                reports.push(self.process_testing(level, floor, quarantine));
            }
        }
        reports
    }
}
