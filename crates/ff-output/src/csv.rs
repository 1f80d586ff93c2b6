//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `steps.csv`
//! - `daily.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DailyRow, OutputResult, StepRow};

pub const STEP_HEADERS: [&str; 15] = [
    "step",
    "day",
    "step_in_day",
    "healthy",
    "infected",
    "recovered",
    "dead",
    "new_infections",
    "quarantined",
    "productivity",
    "reward",
    "action_cost",
    "tested",
    "positives",
    "shift_changed",
];

pub const DAILY_HEADERS: [&str; 10] = [
    "day",
    "new_infections",
    "healthy",
    "infected",
    "recovered",
    "dead",
    "quarantined",
    "productivity",
    "mean_productivity",
    "cumulative_reward",
];

/// Writes episode output to two CSV files.
pub struct CsvWriter {
    steps:    Writer<File>,
    daily:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(STEP_HEADERS)?;

        let mut daily = Writer::from_path(dir.join("daily.csv"))?;
        daily.write_record(DAILY_HEADERS)?;

        Ok(Self { steps, daily, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.step.to_string(),
            row.day.to_string(),
            row.step_in_day.to_string(),
            row.healthy.to_string(),
            row.infected.to_string(),
            row.recovered.to_string(),
            row.dead.to_string(),
            row.new_infections.to_string(),
            row.quarantined.to_string(),
            row.productivity.to_string(),
            row.reward.to_string(),
            row.action_cost.to_string(),
            row.tested.to_string(),
            row.positives.to_string(),
            (row.shift_changed as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_day(&mut self, row: &DailyRow) -> OutputResult<()> {
        self.daily.write_record(&[
            row.day.to_string(),
            row.new_infections.to_string(),
            row.healthy.to_string(),
            row.infected.to_string(),
            row.recovered.to_string(),
            row.dead.to_string(),
            row.quarantined.to_string(),
            row.productivity.to_string(),
            row.mean_productivity.to_string(),
            row.cumulative_reward.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.daily.flush()?;
        Ok(())
    }
}
