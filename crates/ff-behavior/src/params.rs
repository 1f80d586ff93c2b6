//! Heuristic probability and production tables.
//!
//! The defaults are the values the simulator is calibrated with; they are
//! not epidemiological estimates.

use serde::{Deserialize, Serialize};

use ff_core::{HealthStatus, PolicyConfig, ShiftsPerDay};

use crate::{BehaviorError, BehaviorResult};

/// All tables used by [`StandardBehavior`](crate::StandardBehavior).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorParams {
    pub disease:      DiseaseParams,
    pub transmission: TransmissionParams,
    pub production:   ProductionParams,
}

impl BehaviorParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        check_probability("death_probability", self.disease.death_probability)?;
        if self.disease.infected_steps == 0 || self.disease.recovered_steps == 0 {
            return Err(BehaviorError::InvalidParameter("phase durations must be > 0".into()));
        }
        if self.transmission.distance_probabilities.len() <= self.transmission.radius as usize {
            return Err(BehaviorError::InvalidParameter(format!(
                "need a transmission probability for every distance up to {}",
                self.transmission.radius
            )));
        }
        for &p in &self.transmission.distance_probabilities {
            check_probability("distance_probabilities", p)?;
        }
        for (name, p) in [
            ("prior_infection_factor", self.transmission.prior_infection_factor),
            ("mask_factor", self.transmission.mask_factor),
            ("distancing_factor", self.transmission.distancing_factor),
            ("cross_section_factor", self.transmission.cross_section_factor),
        ] {
            check_probability(name, p)?;
        }
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> BehaviorResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(BehaviorError::InvalidParameter(format!("{name} = {p} is outside [0, 1]")))
    }
}

// ── Disease ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseParams {
    /// Drawn once, on the first infected step.
    pub death_probability: f64,

    /// Infected → Recovered after this many steps.
    pub infected_steps: u32,

    /// Recovered → Healthy after this many steps.
    pub recovered_steps: u32,
}

impl Default for DiseaseParams {
    fn default() -> Self {
        Self {
            death_probability: 0.0006,
            infected_steps:    40,
            recovered_steps:   80,
        }
    }
}

// ── Transmission ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionParams {
    /// Base probability indexed by Manhattan distance; must be
    /// non-increasing.
    pub distance_probabilities: Vec<f64>,

    /// Manhattan radius scanned by an infected worker.
    pub radius: u32,

    pub prior_infection_factor: f64,
    pub mask_factor:            f64,
    pub distancing_factor:      f64,

    /// Applied when the target stands in a different section.
    pub cross_section_factor: f64,
}

impl Default for TransmissionParams {
    fn default() -> Self {
        Self {
            distance_probabilities: vec![0.2, 0.1, 0.05, 0.01],
            radius:                 3,
            prior_infection_factor: 0.5,
            mask_factor:            0.7,
            distancing_factor:      0.8,
            cross_section_factor:   0.15,
        }
    }
}

/// Everything that modulates one transmission attempt.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exposure {
    pub distance:          u32,
    pub target_had_covid:  bool,
    pub mask_mandate:      bool,
    pub social_distancing: bool,
    pub cross_section:     bool,
    /// Section pressure multiplier of the target, in `[1, 2]`.
    pub pressure:          f64,
}

impl TransmissionParams {
    /// Infection probability for one source/target pair, clamped to `[0, 1]`.
    pub fn probability(&self, exposure: &Exposure) -> f64 {
        if exposure.distance > self.radius {
            return 0.0;
        }
        let mut p = self
            .distance_probabilities
            .get(exposure.distance as usize)
            .copied()
            .unwrap_or(0.0);
        if exposure.target_had_covid {
            p *= self.prior_infection_factor;
        }
        if exposure.mask_mandate {
            p *= self.mask_factor;
        }
        if exposure.social_distancing {
            p *= self.distancing_factor;
        }
        if exposure.cross_section {
            p *= self.cross_section_factor;
        }
        (p * exposure.pressure).clamp(0.0, 1.0)
    }
}

// ── Production ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionParams {
    pub healthy_factor:   f64,
    pub infected_factor:  f64,
    pub recovered_factor: f64,

    /// Indexed by `shifts_per_day - 1`.
    pub shift_factors: [f64; 4],

    /// Throughput lost per splitting level.
    pub splitting_penalty: f64,

    pub mask_factor:       f64,
    pub distancing_factor: f64,
}

impl Default for ProductionParams {
    fn default() -> Self {
        Self {
            healthy_factor:    1.0,
            infected_factor:   0.2,
            recovered_factor:  0.95,
            shift_factors:     [0.85, 0.90, 0.95, 1.0],
            splitting_penalty: 0.03,
            mask_factor:       0.95,
            distancing_factor: 0.90,
        }
    }
}

impl ProductionParams {
    pub fn health_factor(&self, status: HealthStatus) -> f64 {
        match status {
            HealthStatus::Healthy => self.healthy_factor,
            HealthStatus::Infected => self.infected_factor,
            HealthStatus::Recovered => self.recovered_factor,
            HealthStatus::Dead => 0.0,
        }
    }

    pub fn shift_factor(&self, shifts: ShiftsPerDay) -> f64 {
        let i = (shifts.get() as usize).saturating_sub(1).min(self.shift_factors.len() - 1);
        self.shift_factors[i]
    }

    /// Product of every policy-driven factor (shifts, splitting, masks,
    /// distancing).  Identical for all workers within a step.
    pub fn policy_factor(&self, policy: &PolicyConfig) -> f64 {
        let mut f = self.shift_factor(policy.shifts_per_day);
        f *= (1.0 - self.splitting_penalty * policy.splitting_level.get() as f64).max(0.0);
        if policy.mask_mandate {
            f *= self.mask_factor;
        }
        if policy.social_distancing {
            f *= self.distancing_factor;
        }
        f
    }
}
