use thiserror::Error;

use ff_core::CoreError;
use ff_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type ControlResult<T> = Result<T, ControlError>;
