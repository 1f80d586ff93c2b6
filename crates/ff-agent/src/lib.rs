//! `ff-agent` — Structure-of-Arrays storage for factory workers.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`store`]   | `WorkerStore` (SoA arrays), `HealthCounts`              |
//! | [`builder`] | `WorkerStoreBuilder` (fluent construction)              |
//!
//! Worker positions are not stored here: `ff_spatial::SpatialGrid` is the
//! single owner of "where is worker i", so the two can never disagree.

pub mod builder;
pub mod store;


pub use builder::WorkerStoreBuilder;
pub use store::{HealthCounts, WorkerStore};
