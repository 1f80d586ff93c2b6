//! The `OutputWriter` trait implemented by backend writers.

use crate::{DailyRow, OutputResult, StepRow};

/// Errors are returned to the caller; [`EnvOutputObserver`][crate::EnvOutputObserver]
/// stores them for [`take_error`][crate::EnvOutputObserver::take_error].
pub trait OutputWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    fn write_day(&mut self, row: &DailyRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
