//! Environment observer trait for data collection.

use ff_core::PolicyConfig;

use crate::{DailyStats, StepResult};

/// Callbacks invoked by [`FactoryEnvironment`][crate::FactoryEnvironment]
/// at key points of the step protocol.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct DailyPrinter;
///
/// impl EnvObserver for DailyPrinter {
///     fn on_day_end(&mut self, day: &DailyStats) {
///         println!("day {}: {} new infections", day.day, day.new_infections);
///     }
/// }
/// ```
pub trait EnvObserver {
    /// Called after every step with the value `step` returns.
    fn on_step_end(&mut self, _result: &StepResult) {}

    /// Called on the last step of each day, before `on_step_end`.
    fn on_day_end(&mut self, _day: &DailyStats) {}

    /// Called when an action passed to `step` changed at least one lever.
    fn on_policy_change(&mut self, _policy: &PolicyConfig) {}

    /// Called once when `run` finishes an episode.
    fn on_episode_end(&mut self, _steps: u64) {}
}

/// An [`EnvObserver`] that does nothing.
pub struct NoopObserver;

impl EnvObserver for NoopObserver {}
