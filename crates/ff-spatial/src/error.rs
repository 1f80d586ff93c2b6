//! Spatial-subsystem error type.

use thiserror::Error;

use ff_core::{Pos, WorkerId};

/// Errors produced by `ff-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("position {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Pos, width: u32, height: u32 },

    #[error("{0} is not on the grid")]
    NotPlaced(WorkerId),

    #[error("{0} is already on the grid")]
    AlreadyPlaced(WorkerId),

    #[error("grid width {width} is too narrow for {sections} sections")]
    SectionTooNarrow { width: u32, sections: usize },

    #[error("section {index} does not exist ({sections} sections)")]
    SectionOutOfRange { index: usize, sections: usize },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
