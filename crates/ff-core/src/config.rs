//! Top-level environment configuration.
//!
//! Typically loaded from a JSON file by the application and handed to
//! `ff_sim::EnvironmentBuilder`.  Every field except `policy` is fixed for
//! the run; the policy levers change through `update_config`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, PolicyConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Grid width (the axis cut into sections).
    pub width: u32,
    pub height: u32,

    /// Number of workers created at initialisation.
    pub num_agents: usize,

    /// Episode step cap; `done` becomes true once it is reached.
    pub max_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Sample per-worker base production from `[0.9, 1.1]` (`true`) or fix it
    /// at 1.0 (`false`).
    pub production_variance: bool,

    /// Initial policy.  `policy.steps_per_day` fixes the day length.
    pub policy: PolicyConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width:               25,
            height:              25,
            num_agents:          100,
            max_steps:           200,
            seed:                42,
            production_variance: true,
            policy:              PolicyConfig::default(),
        }
    }
}

impl EnvConfig {
    /// Parse from a JSON string; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: EnvConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    #[inline]
    pub fn steps_per_day(&self) -> u32 {
        self.policy.steps_per_day
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject configurations the simulator cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::EmptyGrid);
        }
        if self.num_agents == 0 {
            return Err(CoreError::NoAgents);
        }
        if self.num_agents > self.cell_count() {
            return Err(CoreError::TooManyAgents {
                agents: self.num_agents,
                cells:  self.cell_count(),
            });
        }
        let sections = self.policy.splitting_level.section_count();
        if (self.width as usize) < sections {
            return Err(CoreError::Config(format!(
                "grid width {} is too narrow for {} sections",
                self.width, sections
            )));
        }
        if self.policy.steps_per_day == 0 {
            return Err(CoreError::Config("steps_per_day must be > 0".into()));
        }
        self.policy.validate()
    }
}
