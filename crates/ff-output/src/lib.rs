//! `ff-output` — episode output writers.
//!
//! | Backend | Files created               |
//! |---------|-----------------------------|
//! | CSV     | `steps.csv`, `daily.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`EnvOutputObserver`], which implements `ff_sim::EnvObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ff_output::{CsvWriter, EnvOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = EnvOutputObserver::new(writer);
//! env.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EnvOutputObserver;
pub use row::{DailyRow, StepRow};
pub use writer::OutputWriter;
