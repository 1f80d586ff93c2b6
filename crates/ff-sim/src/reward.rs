//! Reward functions.
//!
//! The reward shaping is a pluggable policy: the environment is generic over
//! [`RewardFunction`] and only supplies the per-step measurements.

use ff_agent::HealthCounts;
use ff_core::PolicyConfig;

/// Measurements available to a reward function after a step.
#[derive(Clone, Copy, Debug)]
pub struct RewardInput<'a> {
    /// Normalised productivity (see `StepInfo::productivity`).
    pub productivity:   f64,
    pub new_infections: usize,
    /// Initial head count.
    pub population:     usize,
    pub counts:         HealthCounts,
    /// Cost of the policy changes applied since the previous step.
    pub action_cost:    f64,
    pub policy:         &'a PolicyConfig,
}

pub trait RewardFunction: Send + Sync + 'static {
    fn reward(&self, input: &RewardInput<'_>) -> f64;
}

/// `2 × productivity − 2 × new_infections / population − action_cost`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselineReward;

impl RewardFunction for BaselineReward {
    fn reward(&self, input: &RewardInput<'_>) -> f64 {
        let population = input.population.max(1) as f64;
        2.0 * input.productivity - 2.0 * (input.new_infections as f64 / population) - input.action_cost
    }
}

/// Heavily penalises deaths and productivity below a floor:
///
/// ```text
/// r = −infection_weight × infected − death_weight × dead
///     + productivity_weight × productivity           if productivity ≥ threshold
///     − death_weight × (threshold − productivity)    otherwise
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ShapedReward {
    pub infection_weight:    f64,
    pub death_weight:        f64,
    pub productivity_weight: f64,
    pub threshold:           f64,
}

impl Default for ShapedReward {
    fn default() -> Self {
        Self {
            infection_weight:    2.0,
            death_weight:        100_000.0,
            productivity_weight: 20.0,
            threshold:           0.6,
        }
    }
}

impl RewardFunction for ShapedReward {
    fn reward(&self, input: &RewardInput<'_>) -> f64 {
        let mut r = -self.infection_weight * input.counts.infected as f64
            - self.death_weight * input.counts.dead as f64;
        if input.productivity >= self.threshold {
            r += self.productivity_weight * input.productivity;
        } else {
            r -= self.death_weight * (self.threshold - input.productivity);
        }
        r
    }
}
