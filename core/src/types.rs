use core::time::Duration;

/// Time in milliseconds, used for durations and the time left in a round.
pub type Millis = u64;

/// Score counter type.
pub type Score = u32;

pub const MILLIS_PER_SEC: Millis = 1_000;

pub trait ToMillis {
    fn to_millis(self) -> Millis;
}

impl ToMillis for Duration {
    fn to_millis(self) -> Millis {
        self.as_millis().try_into().unwrap_or(Millis::MAX)
    }
}

/// Whole seconds as shown to the player, truncating like an integer division.
pub const fn whole_secs(millis: Millis) -> Millis {
    millis / MILLIS_PER_SEC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_secs_truncates() {
        assert_eq!(whole_secs(49_000), 49);
        assert_eq!(whole_secs(48_999), 48);
        assert_eq!(whole_secs(999), 0);
    }

    #[test]
    fn duration_to_millis_saturates() {
        assert_eq!(Duration::from_millis(1_500).to_millis(), 1_500);
        assert_eq!(Duration::MAX.to_millis(), Millis::MAX);
    }
}
