use serde::{Deserialize, Serialize};

use crate::*;

/// The state handed to the host for safekeeping across a teardown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: Score,
    pub time_remaining: Millis,
    pub is_running: bool,
}

impl Snapshot {
    pub const fn fresh(config: &GameConfig) -> Self {
        Self {
            score: 0,
            time_remaining: config.initial_duration,
            is_running: false,
        }
    }

    /// Checks a snapshot read back from untrusted storage against `config`.
    pub fn validate(self, config: &GameConfig) -> Result<Self> {
        if self.time_remaining > config.initial_duration {
            return Err(GameError::TimeOutOfRange {
                remaining: self.time_remaining,
                limit: config.initial_duration,
            });
        }
        Ok(self)
    }
}
