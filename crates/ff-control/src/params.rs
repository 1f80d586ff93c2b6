//! Parameter bundle for every manager in this crate.

use serde::{Deserialize, Serialize};

use crate::cleaning::CleaningTier;
use crate::{QuarantineParams, ShiftParams, TestingParams};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlParams {
    /// Light, medium, heavy.
    pub cleaning:   [CleaningTier; 3],
    pub testing:    TestingParams,
    pub quarantine: QuarantineParams,
    pub shifts:     ShiftParams,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            cleaning:   CleaningTier::defaults(),
            testing:    TestingParams::default(),
            quarantine: QuarantineParams::default(),
            shifts:     ShiftParams::default(),
        }
    }
}
