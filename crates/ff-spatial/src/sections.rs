//! `SectionPartitioner` — vertical bands of the floor and their infection
//! pressure.
//!
//! # Band arithmetic
//!
//! With `n = 2^level` sections and `w = width / n`:
//!
//! ```text
//! section_index(x) = min(x / w, n - 1)
//! bounds(i)        = [i * w, (i + 1) * w)      for i < n - 1
//! bounds(n - 1)    = [(n - 1) * w, width)      (absorbs the remainder)
//! ```
//!
//! A width smaller than `n` would give empty bands and is rejected.
//!
//! # Infection pressure
//!
//! Each section carries a counter bumped by transmission events that start
//! or land inside it (capped at [`MAX_PRESSURE_LEVEL`]) and decayed
//! multiplicatively by cleaning.  The counter is turned into a transmission
//! multiplier `min(1 + 0.1 × level, 2.0)`.

use std::ops::Range;

use ff_core::SplittingLevel;

use crate::{SpatialError, SpatialResult};

/// Ceiling of the per-section infection counter.
pub const MAX_PRESSURE_LEVEL: f64 = 10.0;

/// Multiplier added per unit of pressure.
const PRESSURE_STEP: f64 = 0.1;

/// Upper bound of the pressure multiplier.
const MAX_PRESSURE_MULTIPLIER: f64 = 2.0;

#[derive(Clone, Debug)]
pub struct SectionPartitioner {
    width:         u32,
    level:         SplittingLevel,
    section_width: u32,
    pressure:      Vec<f64>,
}

impl SectionPartitioner {
    pub fn new(width: u32, level: SplittingLevel) -> SpatialResult<Self> {
        let section_width = Self::checked_section_width(width, level)?;
        Ok(Self {
            width,
            level,
            section_width,
            pressure: vec![0.0; level.section_count()],
        })
    }

    #[inline]
    pub fn level(&self) -> SplittingLevel {
        self.level
    }

    #[inline]
    pub fn section_count(&self) -> usize {
        self.level.section_count()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Section containing column `x`.  Columns past the grid map to the last
    /// section.
    #[inline]
    pub fn section_index(&self, x: u32) -> usize {
        ((x / self.section_width) as usize).min(self.section_count() - 1)
    }

    /// Column range `[x_start, x_end)` of section `index`.
    pub fn section_bounds(&self, index: usize) -> SpatialResult<Range<u32>> {
        let n = self.section_count();
        if index >= n {
            return Err(SpatialError::SectionOutOfRange { index, sections: n });
        }
        let start = index as u32 * self.section_width;
        let end = if index + 1 == n { self.width } else { start + self.section_width };
        Ok(start..end)
    }

    /// Every section's bounds, left to right.
    pub fn all_bounds(&self) -> Vec<Range<u32>> {
        (0..self.section_count())
            .map(|i| {
                let start = i as u32 * self.section_width;
                let end = if i + 1 == self.section_count() { self.width } else { start + self.section_width };
                start..end
            })
            .collect()
    }

    /// Switch to `level`.  Returns `Ok(true)` if the level changed, in which
    /// case the pressure array is resized and zeroed.  Moving workers into
    /// their new sections is the caller's job.
    pub fn set_level(&mut self, level: SplittingLevel) -> SpatialResult<bool> {
        if level == self.level {
            return Ok(false);
        }
        self.section_width = Self::checked_section_width(self.width, level)?;
        self.level = level;
        self.pressure = vec![0.0; level.section_count()];
        Ok(true)
    }

    // ── Infection pressure ────────────────────────────────────────────────

    /// Raw pressure counters, one per section.
    #[inline]
    pub fn pressure_levels(&self) -> &[f64] {
        &self.pressure
    }

    #[inline]
    pub fn pressure(&self, index: usize) -> f64 {
        self.pressure.get(index).copied().unwrap_or(0.0)
    }

    /// Count one transmission event in `index`.  Out-of-range indices are
    /// ignored.
    pub fn record_infection(&mut self, index: usize) {
        if let Some(p) = self.pressure.get_mut(index) {
            *p = (*p + 1.0).min(MAX_PRESSURE_LEVEL);
        }
    }

    /// Transmission multiplier for section `index`, in `[1.0, 2.0]`.
    pub fn infection_pressure(&self, index: usize) -> f64 {
        (1.0 + self.pressure(index) * PRESSURE_STEP).min(MAX_PRESSURE_MULTIPLIER)
    }

    /// Multiply every section's counter by `1 - reduction`.
    pub fn decay(&mut self, reduction: f64) {
        let keep = (1.0 - reduction).clamp(0.0, 1.0);
        for p in &mut self.pressure {
            *p *= keep;
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn checked_section_width(width: u32, level: SplittingLevel) -> SpatialResult<u32> {
        let sections = level.section_count();
        let section_width = width / sections as u32;
        if section_width == 0 {
            return Err(SpatialError::SectionTooNarrow { width, sections });
        }
        Ok(section_width)
    }
}
