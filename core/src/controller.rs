use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    Idle,
    Active,
}

impl GamePhase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Owns one game: the score, the time left, and the countdown that drives it.
///
/// Every operation runs on the host's single UI thread. The host delivers
/// timer callbacks by calling [`GameController::poll`], so a countdown that
/// has been replaced or cancelled can never reach the current state.
#[derive(Debug)]
pub struct GameController<S: Surface> {
    config: GameConfig,
    surface: S,
    score: Score,
    time_remaining: Millis,
    is_running: bool,
    countdown: Countdown,
}

impl<S: Surface> GameController<S> {
    pub fn initialize(
        config: GameConfig,
        saved: Option<Snapshot>,
        surface: S,
        now: Instant,
    ) -> Self {
        let mut controller = Self {
            config,
            surface,
            score: 0,
            time_remaining: config.initial_duration,
            is_running: false,
            countdown: config.fresh_countdown(),
        };

        match saved {
            Some(snapshot) => controller.restore(snapshot, now),
            None => controller.reset(),
        }

        controller
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn time_remaining(&self) -> Millis {
        self.time_remaining
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_running {
            GamePhase::Active
        } else {
            GamePhase::Idle
        }
    }

    pub fn countdown_state(&self) -> CountdownState {
        self.countdown.state()
    }

    /// Current state without touching the countdown.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            time_remaining: self.time_remaining,
            is_running: self.is_running,
        }
    }

    pub fn on_tap(&mut self, now: Instant) {
        if !self.is_running || !self.countdown.is_running() {
            self.start(now);
        }

        self.score = self.score.saturating_add(1);
        self.surface.pulse_score();
        self.render_score();
    }

    pub fn on_tick(&mut self, remaining: Millis) {
        let remaining = remaining.min(self.time_remaining);
        log::trace!("tick: {}ms left", remaining);

        self.time_remaining = remaining;
        self.render_time();
        self.surface.blink_time();
    }

    /// Ends the round and returns its final score.
    pub fn on_timer_expired(&mut self) -> Score {
        let final_score = self.score;
        log::info!("round over, final score: {}", final_score);

        self.surface.show_notice(&final_score_message(final_score));
        self.is_running = false;
        self.reset();

        final_score
    }

    /// Cancels the pending countdown, then hands out the state to persist.
    ///
    /// Polling delivers nothing until the controller is initialized again or
    /// the next tap re-arms the countdown from the captured time.
    pub fn capture_state(&mut self) -> Snapshot {
        let cancelled = self.countdown.cancel();
        let snapshot = self.snapshot();
        log::debug!(
            "capturing {:?} (countdown cancelled: {})",
            snapshot,
            cancelled
        );
        snapshot
    }

    /// Delivers every countdown callback that is due at `now`, in order.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.countdown.poll(now) {
            delivered += 1;
            match event {
                CountdownEvent::Tick(remaining) => self.on_tick(remaining),
                CountdownEvent::Finished => {
                    self.on_timer_expired();
                    break;
                }
            }
        }
        delivered
    }

    fn start(&mut self, now: Instant) {
        if self.countdown.state() != CountdownState::Armed {
            log::debug!(
                "re-arming {:?} countdown from {}ms",
                self.countdown.state(),
                self.time_remaining
            );
            self.countdown = Countdown::armed(self.time_remaining, self.config.tick_interval);
        }

        if self.countdown.start(now) {
            log::info!("round started with {}ms on the clock", self.time_remaining);
            self.is_running = true;
        }
    }

    fn restore(&mut self, snapshot: Snapshot, now: Instant) {
        log::debug!("restoring {:?}", snapshot);

        let Snapshot {
            score,
            time_remaining,
            is_running,
        } = snapshot;
        self.score = score;
        self.time_remaining = time_remaining;
        self.is_running = is_running;

        self.render_score();
        self.render_time();

        self.countdown = Countdown::armed(time_remaining, self.config.tick_interval);
        if is_running {
            self.countdown.start(now);
        }
    }

    fn reset(&mut self) {
        self.score = 0;
        self.time_remaining = self.config.initial_duration;

        self.render_score();
        self.render_time();

        self.countdown = self.config.fresh_countdown();
    }

    fn render_score(&mut self) {
        self.surface.set_score_text(&self.score.to_string());
    }

    fn render_time(&mut self) {
        self.surface
            .set_time_text(&whole_secs(self.time_remaining).to_string());
    }
}

pub fn final_score_message(score: Score) -> String {
    format!("Time's up! Your final score is {}", score)
}
