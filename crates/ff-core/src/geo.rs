//! Grid coordinate type.
//!
//! `Pos` is a plain lattice coordinate.  Distances here are *non-wrapping*;
//! toroidal neighborhood queries live on `SpatialGrid` in `ff-spatial`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the factory floor, `x` across sections, `y` along
/// them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: u32,
    pub y: u32,
}

impl Pos {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// |dx| + |dy|.
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// max(|dx|, |dy|).
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Apply a signed offset, returning `None` if either coordinate leaves
    /// `[0, width) × [0, height)`.
    #[inline]
    pub fn offset_within(self, dx: i64, dy: i64, width: u32, height: u32) -> Option<Pos> {
        let x = self.x as i64 + dx;
        let y = self.y as i64 + dy;
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            return None;
        }
        Some(Pos::new(x as u32, y as u32))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
