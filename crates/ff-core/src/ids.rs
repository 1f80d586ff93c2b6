//! Strongly typed worker identifier.
//!
//! The inner integer is `pub` so SoA arrays can be indexed via `id.0 as
//! usize`, but callers should prefer [`WorkerId::index`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable index of a worker in SoA storage.  Assigned once at environment
/// construction and never reused.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct WorkerId(pub u32);

impl WorkerId {
    /// Sentinel meaning "no valid worker".
    pub const INVALID: WorkerId = WorkerId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for WorkerId {
    /// Returns the `INVALID` sentinel so uninitialised IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkerId({})", self.0)
    }
}

impl From<WorkerId> for usize {
    #[inline(always)]
    fn from(id: WorkerId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for WorkerId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<WorkerId, Self::Error> {
        u32::try_from(n).map(WorkerId)
    }
}
