//! Policy levers and the partial-update type used by the control loop.
//!
//! # Levers
//!
//! | Lever               | Domain                          |
//! |---------------------|---------------------------------|
//! | `cleaning_type`     | light, medium, heavy            |
//! | `splitting_level`   | 0..=3 (1, 2, 4, 8 sections)     |
//! | `testing_level`     | none, light, medium, heavy      |
//! | `social_distancing` | bool                            |
//! | `mask_mandate`      | bool                            |
//! | `shifts_per_day`    | 1..=4                           |
//!
//! `PolicyConfig` is the full snapshot, fixed for the duration of a step.
//! `PolicyDelta` is the decoded action dictionary: any subset of the levers.
//! [`PolicyConfig::apply`] validates a delta completely before mutating
//! anything, so a rejected delta leaves the policy untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// ── CleaningType ──────────────────────────────────────────────────────────────

/// Disinfection intensity tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleaningType {
    #[default]
    Light,
    Medium,
    Heavy,
}

impl CleaningType {
    pub const ALL: [CleaningType; 3] = [CleaningType::Light, CleaningType::Medium, CleaningType::Heavy];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CleaningType::Light => "light",
            CleaningType::Medium => "medium",
            CleaningType::Heavy => "heavy",
        }
    }
}

// ── TestingLevel ──────────────────────────────────────────────────────────────

/// Diagnostic testing intensity.  `None` disables testing entirely.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestingLevel {
    None,
    #[default]
    Light,
    Medium,
    Heavy,
}

impl TestingLevel {
    pub const ALL: [TestingLevel; 4] = [
        TestingLevel::None,
        TestingLevel::Light,
        TestingLevel::Medium,
        TestingLevel::Heavy,
    ];

    /// The three tiers that actually run tests.
    pub const TIERS: [TestingLevel; 3] = [TestingLevel::Light, TestingLevel::Medium, TestingLevel::Heavy];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestingLevel::None => "none",
            TestingLevel::Light => "light",
            TestingLevel::Medium => "medium",
            TestingLevel::Heavy => "heavy",
        }
    }
}

// ── SplittingLevel ────────────────────────────────────────────────────────────

/// Number of binary splits of the floor: `2^level` vertical sections.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SplittingLevel(u8);

impl SplittingLevel {
    pub const MAX: u8 = 3;

    pub fn new(level: u8) -> CoreResult<Self> {
        if level > Self::MAX {
            return Err(CoreError::InvalidSplittingLevel(level));
        }
        Ok(Self(level))
    }

    pub fn all() -> impl Iterator<Item = SplittingLevel> {
        (0..=Self::MAX).map(SplittingLevel)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// 1, 2, 4 or 8.
    #[inline]
    pub fn section_count(self) -> usize {
        1usize << self.0
    }
}

impl TryFrom<u8> for SplittingLevel {
    type Error = CoreError;
    fn try_from(level: u8) -> CoreResult<Self> {
        Self::new(level)
    }
}

impl From<SplittingLevel> for u8 {
    fn from(level: SplittingLevel) -> u8 {
        level.0
    }
}

impl fmt::Display for SplittingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── ShiftsPerDay ──────────────────────────────────────────────────────────────

/// How many shifts the working day is sliced into (1..=4).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShiftsPerDay(u8);

impl ShiftsPerDay {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(shifts: u8) -> CoreResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&shifts) {
            return Err(CoreError::InvalidShiftsPerDay(shifts));
        }
        Ok(Self(shifts))
    }

    pub fn all() -> impl Iterator<Item = ShiftsPerDay> {
        (Self::MIN..=Self::MAX).map(ShiftsPerDay)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// `steps_per_day / shifts`, or an error if the division is not exact.
    pub fn steps_per_shift(self, steps_per_day: u32) -> CoreResult<u32> {
        let shifts = self.0 as u32;
        if steps_per_day == 0 || steps_per_day % shifts != 0 {
            return Err(CoreError::IndivisibleShifts {
                steps_per_day,
                shifts_per_day: self.0,
            });
        }
        Ok(steps_per_day / shifts)
    }
}

impl Default for ShiftsPerDay {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for ShiftsPerDay {
    type Error = CoreError;
    fn try_from(shifts: u8) -> CoreResult<Self> {
        Self::new(shifts)
    }
}

impl From<ShiftsPerDay> for u8 {
    fn from(shifts: ShiftsPerDay) -> u8 {
        shifts.0
    }
}

// ── PolicyDelta ───────────────────────────────────────────────────────────────

/// A partial policy update.  Absent fields keep their current value.
///
/// Deserialisation rejects unknown keys and out-of-domain values, so a
/// malformed action dictionary from the learning side never reaches the
/// simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_type:     Option<CleaningType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitting_level:   Option<SplittingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing_level:     Option<TestingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_distancing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_mandate:      Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shifts_per_day:    Option<ShiftsPerDay>,
}

impl PolicyDelta {
    /// Decode a JSON object such as `{"splitting_level": 2, "mask_mandate": true}`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::MalformedAction(e.to_string()))
    }

    /// `true` if no lever is present.
    pub fn is_empty(&self) -> bool {
        *self == PolicyDelta::default()
    }
}

// ── PolicyConfig ──────────────────────────────────────────────────────────────

/// Levers that actually changed value when a [`PolicyDelta`] was applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyChanges {
    pub cleaning_type:     bool,
    pub splitting_level:   bool,
    pub testing_level:     bool,
    pub social_distancing: bool,
    pub mask_mandate:      bool,
    pub shifts_per_day:    bool,
}

impl PolicyChanges {
    pub fn any(&self) -> bool {
        self.cleaning_type
            || self.splitting_level
            || self.testing_level
            || self.social_distancing
            || self.mask_mandate
            || self.shifts_per_day
    }
}

/// Snapshot of all six levers plus the fixed day length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub cleaning_type:     CleaningType,
    pub splitting_level:   SplittingLevel,
    pub testing_level:     TestingLevel,
    pub social_distancing: bool,
    pub mask_mandate:      bool,
    pub shifts_per_day:    ShiftsPerDay,
    /// Fixed for the whole run; not a lever.
    #[serde(default = "default_steps_per_day")]
    pub steps_per_day:     u32,
}

fn default_steps_per_day() -> u32 {
    24
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cleaning_type:     CleaningType::Light,
            splitting_level:   SplittingLevel(1),
            testing_level:     TestingLevel::Light,
            social_distancing: false,
            mask_mandate:      false,
            shifts_per_day:    ShiftsPerDay::default(),
            steps_per_day:     default_steps_per_day(),
        }
    }
}

impl PolicyConfig {
    /// Check that `steps_per_day` splits evenly into the configured shifts.
    pub fn validate(&self) -> CoreResult<()> {
        self.shifts_per_day.steps_per_shift(self.steps_per_day).map(|_| ())
    }

    /// `steps_per_day / shifts_per_day`.
    pub fn steps_per_shift(&self) -> CoreResult<u32> {
        self.shifts_per_day.steps_per_shift(self.steps_per_day)
    }

    /// Apply every lever present in `delta`.
    ///
    /// Validation happens first; on error the policy is unchanged.
    pub fn apply(&mut self, delta: &PolicyDelta) -> CoreResult<PolicyChanges> {
        if let Some(shifts) = delta.shifts_per_day {
            shifts.steps_per_shift(self.steps_per_day)?;
        }

        let mut changes = PolicyChanges::default();
        if let Some(v) = delta.cleaning_type {
            changes.cleaning_type = v != self.cleaning_type;
            self.cleaning_type = v;
        }
        if let Some(v) = delta.splitting_level {
            changes.splitting_level = v != self.splitting_level;
            self.splitting_level = v;
        }
        if let Some(v) = delta.testing_level {
            changes.testing_level = v != self.testing_level;
            self.testing_level = v;
        }
        if let Some(v) = delta.social_distancing {
            changes.social_distancing = v != self.social_distancing;
            self.social_distancing = v;
        }
        if let Some(v) = delta.mask_mandate {
            changes.mask_mandate = v != self.mask_mandate;
            self.mask_mandate = v;
        }
        if let Some(v) = delta.shifts_per_day {
            changes.shifts_per_day = v != self.shifts_per_day;
            self.shifts_per_day = v;
        }
        Ok(changes)
    }

    /// One-off cost of the changes just applied: switching masks on costs
    /// 0.1, switching distancing on 0.15, and a new splitting level
    /// `0.1 × level`.
    pub fn action_cost(&self, changes: &PolicyChanges) -> f64 {
        let mut cost = 0.0;
        if changes.mask_mandate && self.mask_mandate {
            cost += 0.1;
        }
        if changes.social_distancing && self.social_distancing {
            cost += 0.15;
        }
        if changes.splitting_level {
            cost += 0.1 * self.splitting_level.get() as f64;
        }
        cost
    }
}
