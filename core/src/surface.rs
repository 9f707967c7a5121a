/// Where the controller writes what the player sees.
///
/// All calls are fire-and-forget. The cosmetic hooks default to doing nothing
/// so a headless surface only needs the text setters and the notice.
pub trait Surface {
    fn set_score_text(&mut self, text: &str);

    fn set_time_text(&mut self, text: &str);

    /// Shown once when a round ends.
    fn show_notice(&mut self, message: &str);

    fn pulse_score(&mut self) {}

    fn blink_time(&mut self) {}
}

/// A surface that only remembers what it was told. Useful for headless hosts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    pub score_text: String,
    pub time_text: String,
    pub notices: Vec<String>,
    pub pulses: u32,
    pub blinks: u32,
}

impl Surface for RecordingSurface {
    fn set_score_text(&mut self, text: &str) {
        self.score_text.clear();
        self.score_text.push_str(text);
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_text.clear();
        self.time_text.push_str(text);
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn pulse_score(&mut self) {
        self.pulses += 1;
    }

    fn blink_time(&mut self) {
        self.blinks += 1;
    }
}
