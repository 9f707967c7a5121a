use thiserror::Error;

use crate::Millis;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Round duration must be positive")]
    ZeroDuration,
    #[error("Tick interval must be positive")]
    ZeroInterval,
    #[error("Time remaining {remaining}ms exceeds the round duration of {limit}ms")]
    TimeOutOfRange { remaining: Millis, limit: Millis },
}

pub type Result<T> = core::result::Result<T, GameError>;
