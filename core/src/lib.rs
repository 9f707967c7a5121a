use serde::{Deserialize, Serialize};

pub use controller::*;
pub use countdown::*;
pub use error::*;
pub use snapshot::*;
pub use surface::*;
pub use types::*;

mod controller;
mod countdown;
mod error;
mod snapshot;
mod surface;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub initial_duration: Millis,
    pub tick_interval: Millis,
}

impl GameConfig {
    pub const DEFAULT_DURATION: Millis = 50_000;
    pub const DEFAULT_INTERVAL: Millis = 1_000;

    pub const fn new_unchecked(initial_duration: Millis, tick_interval: Millis) -> Self {
        Self {
            initial_duration,
            tick_interval,
        }
    }

    pub fn new(initial_duration: Millis, tick_interval: Millis) -> Result<Self> {
        if initial_duration == 0 {
            return Err(GameError::ZeroDuration);
        }
        if tick_interval == 0 {
            return Err(GameError::ZeroInterval);
        }
        Ok(Self::new_unchecked(initial_duration, tick_interval))
    }

    /// A countdown armed for a full round.
    pub fn fresh_countdown(&self) -> Countdown {
        Countdown::armed(self.initial_duration, self.tick_interval)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_DURATION, Self::DEFAULT_INTERVAL)
    }
}
