//! `CleaningScheduler` — periodic disinfection of the whole floor.
//!
//! Three tiers exist; only the current one fires.  A cycle lasts `duration`
//! steps and starts on the step it is scheduled for:
//!
//! ```text
//! step_in_day == next[tier]  → start: remaining = duration, apply, remaining -= 1
//! remaining > 0              → apply, remaining -= 1
//! apply                      = every section's pressure *= (1 − infection_reduction)
//!                              productivity modifier = 1 − production_reduction
//! ```
//!
//! Each tier keeps its own schedule; it advances by the tier's frequency
//! (mod steps per day) whenever that tier starts a cycle.

use log::debug;
use serde::{Deserialize, Serialize};

use ff_core::CleaningType;
use ff_spatial::SectionPartitioner;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleaningTier {
    /// Steps between cycles; also the first scheduled step-of-day.
    pub frequency:            u32,
    pub infection_reduction:  f64,
    pub production_reduction: f64,
    pub duration:             u32,
}

impl CleaningTier {
    pub const fn new(frequency: u32, infection_reduction: f64, production_reduction: f64, duration: u32) -> Self {
        Self { frequency, infection_reduction, production_reduction, duration }
    }

    /// Light, medium, heavy.
    pub fn defaults() -> [CleaningTier; 3] {
        [
            CleaningTier::new(8, 0.35, 0.0, 1),
            CleaningTier::new(16, 0.65, 0.15, 2),
            CleaningTier::new(16, 0.8, 0.25, 2),
        ]
    }
}

/// What the scheduler did on one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CleaningOutcome {
    Idle,
    Started(CleaningType),
    Continued(CleaningType),
}

pub struct CleaningScheduler {
    tiers:             [CleaningTier; 3],
    current:           CleaningType,
    next_step:         [u32; 3],
    remaining:         u32,
    applied_this_step: bool,
    /// Sections touched by the running cycle; empty between cycles.
    cleaned_sections:  Vec<usize>,
    cycles:            u64,
}

impl CleaningScheduler {
    pub fn new(tiers: [CleaningTier; 3], current: CleaningType, steps_per_day: u32) -> Self {
        let spd = steps_per_day.max(1);
        Self {
            tiers,
            current,
            next_step: tiers.map(|t| t.frequency % spd),
            remaining: 0,
            applied_this_step: false,
            cleaned_sections: Vec::new(),
            cycles: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> CleaningType {
        self.current
    }

    #[inline]
    pub fn tier(&self, kind: CleaningType) -> &CleaningTier {
        &self.tiers[kind.index()]
    }

    #[inline]
    pub fn next_step(&self, kind: CleaningType) -> u32 {
        self.next_step[kind.index()]
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0 || self.applied_this_step
    }

    pub fn cleaned_sections(&self) -> &[usize] {
        &self.cleaned_sections
    }

    /// Cycles started since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Switch tier.  A running cycle of the old tier is abandoned.
    pub fn set_cleaning_type(&mut self, kind: CleaningType) {
        if kind != self.current {
            self.current = kind;
            self.remaining = 0;
            self.cleaned_sections.clear();
        }
    }

    /// Production multiplier for this step: `1 − production_reduction` while
    /// an effect was applied this step, else 1.
    pub fn productivity_modifier(&self) -> f64 {
        if self.applied_this_step {
            1.0 - self.tier(self.current).production_reduction
        } else {
            1.0
        }
    }

    /// Run the cleaning phase of one step.
    pub fn process(
        &mut self,
        step_in_day:   u32,
        steps_per_day: u32,
        sections:      &mut SectionPartitioner,
    ) -> CleaningOutcome {
        self.applied_this_step = false;

        if self.remaining > 0 {
            self.apply(sections);
            return CleaningOutcome::Continued(self.current);
        }

        let i = self.current.index();
        if step_in_day != self.next_step[i] {
            return CleaningOutcome::Idle;
        }

        let tier = self.tiers[i];
        self.next_step[i] = (step_in_day + tier.frequency) % steps_per_day.max(1);
        self.cycles += 1;
        self.remaining = tier.duration.max(1);
        self.cleaned_sections = (0..sections.section_count()).collect();
        debug!(
            "{} cleaning started at step-of-day {step_in_day} for {} step(s), next at {}",
            self.current.as_str(),
            self.remaining,
            self.next_step[i]
        );
        self.apply(sections);
        CleaningOutcome::Started(self.current)
    }

    fn apply(&mut self, sections: &mut SectionPartitioner) {
        sections.decay(self.tier(self.current).infection_reduction);
        self.applied_this_step = true;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.cleaned_sections.clear();
        }
    }
}
