//! Episode statistics: daily archive, policy usage and running totals.

use serde::Serialize;

use ff_agent::HealthCounts;
use ff_core::PolicyConfig;

/// One archived day.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DailyStats {
    /// 0-based index of the day that just ended.
    pub day:               u64,
    pub new_infections:    usize,
    pub healthy:           usize,
    pub infected:          usize,
    pub recovered:         usize,
    pub dead:              usize,
    pub quarantined:       usize,
    /// Productivity on the day's last step.
    pub productivity:      f64,
    pub mean_productivity: f64,
    pub cumulative_reward: f64,
}

/// Steps spent under each lever value.  Arrays are indexed by the lever's
/// natural index (`CleaningType::index`, splitting level, `TestingLevel::index`,
/// `shifts - 1`, flag as 0/1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PolicyUsage {
    pub cleaning:          [u64; 3],
    pub splitting:         [u64; 4],
    pub testing:           [u64; 4],
    pub shifts:            [u64; 4],
    pub mask_mandate:      [u64; 2],
    pub social_distancing: [u64; 2],
}

impl PolicyUsage {
    pub fn record(&mut self, policy: &PolicyConfig) {
        self.cleaning[policy.cleaning_type.index()] += 1;
        self.splitting[policy.splitting_level.get() as usize] += 1;
        self.testing[policy.testing_level.index()] += 1;
        self.shifts[policy.shifts_per_day.get() as usize - 1] += 1;
        self.mask_mandate[policy.mask_mandate as usize] += 1;
        self.social_distancing[policy.social_distancing as usize] += 1;
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatsCollector {
    steps:                u64,
    total_new_infections: usize,
    cumulative_reward:    f64,
    daily_infections:     usize,
    day_productivity_sum: f64,
    day_steps:            u32,
    daily:                Vec<DailyStats>,
    usage:                PolicyUsage,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one step into the running totals.
    pub fn record_step(&mut self, new_infections: usize, productivity: f64, reward: f64, policy: &PolicyConfig) {
        self.steps += 1;
        self.total_new_infections += new_infections;
        self.daily_infections += new_infections;
        self.cumulative_reward += reward;
        self.day_productivity_sum += productivity;
        self.day_steps += 1;
        self.usage.record(policy);
    }

    /// Close the current day and reset the daily counters.
    pub fn archive_day(
        &mut self,
        day:          u64,
        counts:       &HealthCounts,
        quarantined:  usize,
        productivity: f64,
    ) -> DailyStats {
        let stats = DailyStats {
            day,
            new_infections: self.daily_infections,
            healthy: counts.healthy,
            infected: counts.infected,
            recovered: counts.recovered,
            dead: counts.dead,
            quarantined,
            productivity,
            mean_productivity: if self.day_steps > 0 {
                self.day_productivity_sum / self.day_steps as f64
            } else {
                productivity
            },
            cumulative_reward: self.cumulative_reward,
        };
        self.daily.push(stats.clone());
        self.daily_infections = 0;
        self.day_productivity_sum = 0.0;
        self.day_steps = 0;
        stats
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn total_new_infections(&self) -> usize {
        self.total_new_infections
    }

    pub fn daily_infections(&self) -> usize {
        self.daily_infections
    }

    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    pub fn daily_stats(&self) -> &[DailyStats] {
        &self.daily
    }

    pub fn policy_usage(&self) -> &PolicyUsage {
        &self.usage
    }
}
