//! `ff-spatial` — the factory floor as a lattice.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`grid`]      | `SpatialGrid` — toroidal lattice, many workers per cell       |
//! | [`sections`]  | `SectionPartitioner` — vertical bands + infection pressure    |
//! | [`placement`] | bounded random search for free cells, shuffled initial layout |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                            |
//!
//! The grid is the single owner of worker positions.  A worker that is on
//! the floor appears in exactly one cell and `SpatialGrid::position` returns
//! `Some`; a quarantined, dead or dropped worker appears in no cell and
//! `position` returns `None`.

pub mod error;
pub mod grid;
pub mod placement;
pub mod sections;


pub use error::{SpatialError, SpatialResult};
pub use grid::SpatialGrid;
pub use placement::{random_pos_in, search_position, shuffled_cells};
pub use sections::{SectionPartitioner, MAX_PRESSURE_LEVEL};
