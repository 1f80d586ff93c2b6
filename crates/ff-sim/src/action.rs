//! `ActionSpace` — the discrete action set seen by a learning agent.
//!
//! Every combination of lever values is one action, numbered in mixed radix
//! with `shifts_per_day` varying fastest:
//!
//! ```text
//! index = ((((cleaning × 4 + splitting) × 4 + testing) × 2 + distancing) × 2 + mask) × 4 + (shifts − 1)
//! ```
//!
//! 3 × 4 × 4 × 2 × 2 × 4 = 768 actions.  Each decodes to a `PolicyDelta`
//! with every lever present.

use ff_core::{CleaningType, PolicyConfig, PolicyDelta, ShiftsPerDay, SplittingLevel, TestingLevel};

use crate::{SimError, SimResult};

const CLEANING: usize = 3;
const SPLITTING: usize = 4;
const TESTING: usize = 4;
const FLAG: usize = 2;
const SHIFTS: usize = 4;

pub struct ActionSpace;

impl ActionSpace {
    pub const SIZE: usize = CLEANING * SPLITTING * TESTING * FLAG * FLAG * SHIFTS;

    pub fn decode(index: usize) -> SimResult<PolicyDelta> {
        if index >= Self::SIZE {
            return Err(SimError::ActionOutOfRange { index, size: Self::SIZE });
        }
        let mut rest = index;
        let shifts = rest % SHIFTS;
        rest /= SHIFTS;
        let mask = rest % FLAG;
        rest /= FLAG;
        let distancing = rest % FLAG;
        rest /= FLAG;
        let testing = rest % TESTING;
        rest /= TESTING;
        let splitting = rest % SPLITTING;
        let cleaning = rest / SPLITTING;

        Ok(PolicyDelta {
            cleaning_type:     Some(CleaningType::ALL[cleaning]),
            splitting_level:   Some(SplittingLevel::new(splitting as u8)?),
            testing_level:     Some(TestingLevel::ALL[testing]),
            social_distancing: Some(distancing == 1),
            mask_mandate:      Some(mask == 1),
            shifts_per_day:    Some(ShiftsPerDay::new(shifts as u8 + 1)?),
        })
    }

    /// Index of the action that reproduces `policy`'s levers.
    pub fn encode(policy: &PolicyConfig) -> usize {
        let mut index = policy.cleaning_type.index();
        index = index * SPLITTING + policy.splitting_level.get() as usize;
        index = index * TESTING + policy.testing_level.index();
        index = index * FLAG + policy.social_distancing as usize;
        index = index * FLAG + policy.mask_mandate as usize;
        index * SHIFTS + (policy.shifts_per_day.get() as usize - 1)
    }
}
