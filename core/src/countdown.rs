use core::time::Duration;
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownState {
    Armed,
    Running,
    Finished,
    Cancelled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Time left until the deadline, in milliseconds.
    Tick(Millis),
    Finished,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Armed,
    Running { deadline: Instant, next_tick: Instant },
    Finished,
    Cancelled,
}

/// A repeating countdown that the host drives by reporting the current time.
///
/// Ticks land on `start + k * interval`. Once less than one interval is left
/// no more ticks are reported, only [`CountdownEvent::Finished`] at the
/// deadline. Missed ticks are dropped rather than replayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    from: Millis,
    interval: Millis,
    phase: Phase,
}

impl Countdown {
    pub const fn armed(from: Millis, interval: Millis) -> Self {
        Self {
            from,
            interval,
            phase: Phase::Armed,
        }
    }

    pub const fn duration(&self) -> Millis {
        self.from
    }

    pub const fn interval(&self) -> Millis {
        self.interval
    }

    pub const fn state(&self) -> CountdownState {
        match self.phase {
            Phase::Armed => CountdownState::Armed,
            Phase::Running { .. } => CountdownState::Running,
            Phase::Finished => CountdownState::Finished,
            Phase::Cancelled => CountdownState::Cancelled,
        }
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn start(&mut self, now: Instant) -> bool {
        if !matches!(self.phase, Phase::Armed) {
            return false;
        }

        self.phase = Phase::Running {
            deadline: now + Duration::from_millis(self.from),
            next_tick: now,
        };
        true
    }

    /// Returns whether there was anything pending to cancel.
    pub fn cancel(&mut self) -> bool {
        let pending = matches!(self.phase, Phase::Armed | Phase::Running { .. });
        self.phase = Phase::Cancelled;
        pending
    }

    pub fn poll(&mut self, now: Instant) -> Option<CountdownEvent> {
        let Phase::Running {
            deadline,
            next_tick,
        } = self.phase
        else {
            return None;
        };

        let left = deadline.saturating_duration_since(now);
        if left.is_zero() {
            self.phase = Phase::Finished;
            return Some(CountdownEvent::Finished);
        }

        if now < next_tick {
            return None;
        }

        let interval = Duration::from_millis(self.interval);
        if left < interval {
            self.phase = Phase::Running {
                deadline,
                next_tick: deadline,
            };
            return None;
        }

        let behind = now.duration_since(next_tick).to_millis() / self.interval.max(1);
        let next_tick = next_tick + Duration::from_millis(self.interval.saturating_mul(behind + 1));
        self.phase = Phase::Running {
            deadline,
            next_tick,
        };
        Some(CountdownEvent::Tick(left.to_millis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: Instant, millis: Millis) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[test]
    fn armed_countdown_never_fires() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(5_000, 1_000);

        assert_eq!(countdown.state(), CountdownState::Armed);
        assert_eq!(countdown.duration(), 5_000);
        assert_eq!(countdown.interval(), 1_000);
        assert_eq!(countdown.poll(at(t0, 0)), None);
        assert_eq!(countdown.poll(at(t0, 60_000)), None);
    }

    #[test]
    fn ticks_every_interval_then_finishes_once() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(3_000, 1_000);
        assert!(countdown.start(t0));

        assert_eq!(countdown.poll(at(t0, 0)), Some(CountdownEvent::Tick(3_000)));
        assert_eq!(countdown.poll(at(t0, 500)), None);
        assert_eq!(countdown.poll(at(t0, 1_000)), Some(CountdownEvent::Tick(2_000)));
        assert_eq!(countdown.poll(at(t0, 2_000)), Some(CountdownEvent::Tick(1_000)));
        assert_eq!(countdown.poll(at(t0, 2_999)), None);
        assert_eq!(countdown.poll(at(t0, 3_000)), Some(CountdownEvent::Finished));
        assert_eq!(countdown.state(), CountdownState::Finished);
        assert_eq!(countdown.poll(at(t0, 4_000)), None);
    }

    #[test]
    fn no_tick_when_less_than_an_interval_remains() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(2_500, 1_000);
        countdown.start(t0);

        assert_eq!(countdown.poll(at(t0, 0)), Some(CountdownEvent::Tick(2_500)));
        assert_eq!(countdown.poll(at(t0, 1_000)), Some(CountdownEvent::Tick(1_500)));
        assert_eq!(countdown.poll(at(t0, 2_000)), None);
        assert_eq!(countdown.poll(at(t0, 2_400)), None);
        assert_eq!(countdown.poll(at(t0, 2_500)), Some(CountdownEvent::Finished));
    }

    #[test]
    fn missed_ticks_are_skipped() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(10_000, 1_000);
        countdown.start(t0);

        assert_eq!(countdown.poll(at(t0, 0)), Some(CountdownEvent::Tick(10_000)));
        assert_eq!(countdown.poll(at(t0, 3_500)), Some(CountdownEvent::Tick(6_500)));
        assert_eq!(countdown.poll(at(t0, 3_900)), None);
        assert_eq!(countdown.poll(at(t0, 4_000)), Some(CountdownEvent::Tick(6_000)));
    }

    #[test]
    fn late_poll_jumps_straight_to_finished() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(3_000, 1_000);
        countdown.start(t0);

        assert_eq!(countdown.poll(at(t0, 9_000)), Some(CountdownEvent::Finished));
        assert_eq!(countdown.poll(at(t0, 9_000)), None);
    }

    #[test]
    fn zero_length_countdown_finishes_on_first_poll() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(0, 1_000);
        countdown.start(t0);

        assert_eq!(countdown.poll(t0), Some(CountdownEvent::Finished));
    }

    #[test]
    fn start_only_from_armed() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(3_000, 1_000);

        assert!(countdown.start(t0));
        assert!(!countdown.start(at(t0, 1_000)));
        assert_eq!(countdown.poll(at(t0, 1_000)), Some(CountdownEvent::Tick(2_000)));
    }

    #[test]
    fn cancel_silences_and_tolerates_repeats() {
        let t0 = Instant::now();
        let mut countdown = Countdown::armed(3_000, 1_000);
        countdown.start(t0);

        assert!(countdown.cancel());
        assert_eq!(countdown.state(), CountdownState::Cancelled);
        assert_eq!(countdown.poll(at(t0, 1_000)), None);
        assert_eq!(countdown.poll(at(t0, 5_000)), None);
        assert!(!countdown.cancel());
        assert!(!countdown.start(at(t0, 5_000)));
    }
}
