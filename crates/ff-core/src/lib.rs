//! `ff-core` — foundational types for the factory-floor outbreak simulator.
//!
//! This crate is a dependency of every other `ff-*` crate.  It has no `ff-*`
//! dependencies and a small external surface (`rand`, `thiserror`, `serde`,
//! `serde_json`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `WorkerId`                                                 |
//! | [`geo`]     | `Pos`, Manhattan / Chebyshev distance                      |
//! | [`health`]  | `HealthStatus` state tag                                   |
//! | [`time`]    | `FloorClock` (step, step-in-day, day)                      |
//! | [`rng`]     | `SimRng` — the single seedable generator of a run          |
//! | [`policy`]  | `PolicyConfig`, lever enums, `PolicyDelta`                 |
//! | [`config`]  | `EnvConfig` (grid size, population, seed, initial policy)  |
//! | [`error`]   | `CoreError`, `CoreResult`                                  |

pub mod config;
pub mod error;
pub mod geo;
pub mod health;
pub mod ids;
pub mod policy;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EnvConfig;
pub use error::{CoreError, CoreResult};
pub use geo::Pos;
pub use health::HealthStatus;
pub use ids::WorkerId;
pub use policy::{CleaningType, PolicyConfig, PolicyDelta, ShiftsPerDay, SplittingLevel, TestingLevel};
pub use rng::SimRng;
pub use time::FloorClock;
