//! `ff-behavior` — what a single worker does in one step.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`context`]  | `Floor<'a>` (mutable world borrow), `StepContext<'a>` (read-only) |
//! | [`params`]   | `BehaviorParams` — disease, transmission and production tables  |
//! | [`model`]    | `WorkerBehavior` trait, `WorkerOutcome`, `HealthTransition`     |
//! | [`standard`] | `StandardBehavior` — the default move/infect/progress/produce   |
//! | [`noop`]     | `NoopBehavior` — workers stand still and never change state     |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Per-worker pipeline
//!
//! [`WorkerBehavior::step_worker`] runs, for one worker:
//!
//! 1. distancing nudge (only if social distancing is on),
//! 2. move inside the 3×3 block around the shift anchor,
//! 3. transmission attempts (if infected),
//! 4. disease progression,
//! 5. production recomputation.
//!
//! Steps 1–3 only happen for workers on the grid.  Quarantined workers still
//! progress through the disease; dead and dropped workers do nothing.

pub mod context;
pub mod error;
pub mod model;
pub mod noop;
pub mod params;
pub mod standard;

#[cfg(test)]
mod tests;

pub use context::{Floor, StepContext};
pub use error::{BehaviorError, BehaviorResult};
pub use model::{HealthTransition, WorkerBehavior, WorkerOutcome};
pub use noop::NoopBehavior;
pub use params::{BehaviorParams, DiseaseParams, Exposure, ProductionParams, TransmissionParams};
pub use standard::StandardBehavior;
