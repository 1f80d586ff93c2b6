//! `EnvOutputObserver<W>` — bridges `EnvObserver` to an `OutputWriter`.

use ff_sim::{DailyStats, EnvObserver, StepResult};

use crate::writer::OutputWriter;
use crate::{DailyRow, OutputError, OutputResult, StepRow};

/// An [`EnvObserver`] that writes every step and every archived day to an
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `EnvObserver`
/// methods have no return value.  After the episode, check for errors with
/// [`take_error`][Self::take_error].
pub struct EnvOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EnvOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  `run` does this on its own; call it after driving
    /// the environment with `step_observed` by hand.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the episode).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> EnvObserver for EnvOutputObserver<W> {
    fn on_step_end(&mut self, result: &StepResult) {
        let result = self.writer.write_step(&StepRow::from(result));
        self.store_err(result);
    }

    fn on_day_end(&mut self, day: &DailyStats) {
        let result = self.writer.write_day(&DailyRow::from(day));
        self.store_err(result);
    }

    fn on_episode_end(&mut self, _steps: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
