use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("invalid behavior parameter: {0}")]
    InvalidParameter(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
