//! Plain data row types written by output backends.

use ff_sim::{DailyStats, StepResult};

/// One step of an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRow {
    pub step:           u64,
    pub day:            u64,
    pub step_in_day:    u32,
    pub healthy:        usize,
    pub infected:       usize,
    pub recovered:      usize,
    pub dead:           usize,
    pub new_infections: usize,
    pub quarantined:    usize,
    pub productivity:   f64,
    pub reward:         f64,
    pub action_cost:    f64,
    pub tested:         usize,
    pub positives:      usize,
    pub shift_changed:  bool,
}

impl From<&StepResult> for StepRow {
    fn from(r: &StepResult) -> Self {
        let info = &r.info;
        Self {
            step:           info.step,
            day:            info.day,
            step_in_day:    info.step_in_day,
            healthy:        info.health.healthy,
            infected:       info.health.infected,
            recovered:      info.health.recovered,
            dead:           info.health.dead,
            new_infections: info.new_infections,
            quarantined:    info.quarantined,
            productivity:   info.productivity,
            reward:         r.reward,
            action_cost:    info.action_cost,
            tested:         info.tested,
            positives:      info.positives,
            shift_changed:  info.shift_changed,
        }
    }
}

/// One archived day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRow {
    pub day:               u64,
    pub new_infections:    usize,
    pub healthy:           usize,
    pub infected:          usize,
    pub recovered:         usize,
    pub dead:              usize,
    pub quarantined:       usize,
    pub productivity:      f64,
    pub mean_productivity: f64,
    pub cumulative_reward: f64,
}

impl From<&DailyStats> for DailyRow {
    fn from(d: &DailyStats) -> Self {
        Self {
            day:               d.day,
            new_infections:    d.new_infections,
            healthy:           d.healthy,
            infected:          d.infected,
            recovered:         d.recovered,
            dead:              d.dead,
            quarantined:       d.quarantined,
            productivity:      d.productivity,
            mean_productivity: d.mean_productivity,
            cumulative_reward: d.cumulative_reward,
        }
    }
}
