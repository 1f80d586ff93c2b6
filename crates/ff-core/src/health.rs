//! Worker health state tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Disease state of one worker.
///
/// ```text
/// Healthy ──infection──▶ Infected ──recovery──▶ Recovered ──waning──▶ Healthy
///                           │
///                           └──death draw──▶ Dead   (absorbing)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Infected,
    Recovered,
    Dead,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Healthy,
        HealthStatus::Infected,
        HealthStatus::Recovered,
        HealthStatus::Dead,
    ];

    /// `true` for the absorbing state.
    #[inline]
    pub fn is_dead(self) -> bool {
        matches!(self, HealthStatus::Dead)
    }

    /// Stable lowercase label used in CSV output and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Infected => "infected",
            HealthStatus::Recovered => "recovered",
            HealthStatus::Dead => "death",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
