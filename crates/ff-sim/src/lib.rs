//! `ff-sim` — the factory environment and its step protocol.
//!
//! # One step
//!
//! ```text
//! [action]   — optional PolicyDelta applied through update_config
//! ① clock    — advance step; step_in_day = step mod steps_per_day
//! ② events   — cleaning → testing (due tiers) → quarantine → shift change
//! ③ snapshot — infected count before workers act
//! ④ workers  — for each roster worker in the run's fixed shuffled order:
//!                distancing nudge, move, infect, progress, produce
//! ⑤ snapshot — new infections = max(0, infected_after − infected_before)
//! ⑥ metrics  — productivity, reward (minus pending action cost)
//! ⑦ day end  — on the last step of a day, archive DailyStats
//! ⑧ result   — StepResult { state, reward, done, info }
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`environment`] | `FactoryEnvironment<B, R>` — owns every subsystem          |
//! | [`builder`]     | `EnvironmentBuilder` — validation and initial layout       |
//! | [`state`]       | `StateVector`, `STATE_DIM`                                 |
//! | [`step`]        | `StepInfo`, `StepResult`                                   |
//! | [`reward`]      | `RewardFunction`, `BaselineReward`, `ShapedReward`         |
//! | [`stats`]       | `StatsCollector`, `DailyStats`, `PolicyUsage`              |
//! | [`action`]      | `ActionSpace` — discrete index ↔ `PolicyDelta`             |
//! | [`observer`]    | `EnvObserver` hooks, `NoopObserver`                        |
//! | [`error`]       | `SimError`, `SimResult<T>`                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ff_core::{EnvConfig, PolicyDelta};
//! use ff_sim::FactoryEnvironment;
//!
//! let mut env = FactoryEnvironment::standard(EnvConfig::default())?;
//! env.update_config(&PolicyDelta::from_json(r#"{"mask_mandate": true}"#)?)?;
//! while !env.is_done() {
//!     let result = env.step(None)?;
//!     println!("{:?} reward={}", result.state, result.reward);
//! }
//! ```

pub mod action;
pub mod builder;
pub mod environment;
pub mod error;
pub mod observer;
pub mod reward;
pub mod state;
pub mod stats;
pub mod step;


pub use action::ActionSpace;
pub use builder::EnvironmentBuilder;
pub use environment::FactoryEnvironment;
pub use error::{SimError, SimResult};
pub use observer::{EnvObserver, NoopObserver};
pub use reward::{BaselineReward, RewardFunction, RewardInput, ShapedReward};
pub use state::{StateVector, STATE_DIM};
pub use stats::{DailyStats, PolicyUsage, StatsCollector};
pub use step::{StepInfo, StepResult};
