use thiserror::Error;

use ff_behavior::BehaviorError;
use ff_control::ControlError;
use ff_core::CoreError;
use ff_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("action index {index} is outside the action space of {size}")]
    ActionOutOfRange { index: usize, size: usize },

    #[error("initially infected worker {worker} does not exist ({count} workers)")]
    UnknownWorker { worker: u32, count: usize },
}

pub type SimResult<T> = Result<T, SimError>;
