//! `ff-control` — the scheduled-event phase of a step.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | [`cleaning`]     | `CleaningScheduler` — periodic pressure decay + production cost |
//! | [`testing`]      | `TestingManager` — sampled tests with FP/FN noise           |
//! | [`quarantine`]   | `QuarantineManager` — off-grid isolation and release        |
//! | [`shifts`]       | `ShiftScheduler` — anchor rotation at shift boundaries      |
//! | [`redistribute`] | `redistribute` — worker re-placement after a splitting change |
//! | [`relocate`]     | bounded placement of every active worker (shared by the two above) |
//! | [`params`]       | `ControlParams` bundle                                      |
//! | [`error`]        | `ControlError`, `ControlResult<T>`                          |
//!
//! # Order within a step
//!
//! `ff-sim` runs the managers in a fixed order before any worker moves:
//!
//! ```text
//! cleaning → testing (each due tier) → quarantine → shift change (if due)
//! ```
//!
//! Each manager takes the mutable [`Floor`](ff_behavior::Floor) borrow for
//! the duration of its call and returns a small report struct.  Placement
//! exhaustion is never an error: it is logged with `warn!` and reported.

pub mod cleaning;
pub mod error;
pub mod params;
pub mod quarantine;
pub mod redistribute;
pub mod relocate;
pub mod shifts;
pub mod testing;

#[cfg(test)]
mod tests;

pub use cleaning::{CleaningOutcome, CleaningScheduler, CleaningTier};
pub use error::{ControlError, ControlResult};
pub use params::ControlParams;
pub use quarantine::{QuarantineManager, QuarantineParams, QuarantineReport};
pub use redistribute::redistribute;
pub use relocate::RelocationReport;
pub use shifts::{ShiftParams, ShiftScheduler};
pub use testing::{TestingManager, TestingParams, TestingReport, TestingTier};
