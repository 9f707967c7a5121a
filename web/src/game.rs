use crate::about::AboutView;
use crate::utils::*;
use clap::Args;
use game::{GameConfig, GameController, Snapshot, Surface};
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use timefighter_core as game;
use wasm_bindgen::JsCast;
use web_time::Instant;
use yew::prelude::*;

const POLL_MILLIS: u32 = 100;
const NOTICE_MILLIS: u32 = 3_500;

impl StorageKey for Snapshot {
    const KEY: &'static str = "timefighter:snapshot:v1";
}

/// Reads back the snapshot saved by the last suspend, if it still fits `config`.
fn load_snapshot(config: &GameConfig) -> Option<Snapshot> {
    let snapshot = Snapshot::session_load()?;
    match snapshot.validate(config) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            log::warn!("discarding saved game: {}", err);
            None
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ViewSurface {
    score_text: String,
    time_text: String,
    pulses: u32,
    blinks: u32,
    notice: Option<String>,
    notice_id: u32,
}

impl ViewSurface {
    // Two identical keyframes, swapped on every hit, so the animation restarts.
    fn pulse_class(&self) -> Option<&'static str> {
        match self.pulses {
            0 => None,
            n if n % 2 == 0 => Some("pulse-even"),
            _ => Some("pulse-odd"),
        }
    }

    fn blink_class(&self) -> Option<&'static str> {
        match self.blinks {
            0 => None,
            n if n % 2 == 0 => Some("blink-even"),
            _ => Some("blink-odd"),
        }
    }

    fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }
}

impl Surface for ViewSurface {
    fn set_score_text(&mut self, text: &str) {
        self.score_text = text.to_owned();
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_text = text.to_owned();
    }

    fn show_notice(&mut self, message: &str) {
        self.notice = Some(message.to_owned());
        self.notice_id = self.notice_id.wrapping_add(1);
    }

    fn pulse_score(&mut self) {
        self.pulses = self.pulses.wrapping_add(1);
    }

    fn blink_time(&mut self) {
        self.blinks = self.blinks.wrapping_add(1);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tap,
    Poll,
    Suspend,
    Resume,
    DismissNotice,
    ToggleAbout,
}

#[derive(Args, Properties, Debug, Default, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Round length in seconds
    #[arg(short, long)]
    #[prop_or_default]
    pub duration: Option<u64>,

    /// Countdown tick interval in milliseconds
    #[arg(short, long)]
    #[prop_or_default]
    pub interval: Option<u64>,
}

impl GameProps {
    pub(crate) fn config(&self) -> GameConfig {
        let duration = self
            .duration
            .map_or(GameConfig::DEFAULT_DURATION, |secs| {
                secs.saturating_mul(game::MILLIS_PER_SEC)
            });
        let interval = self.interval.unwrap_or(GameConfig::DEFAULT_INTERVAL);

        GameConfig::new(duration, interval).unwrap_or_else(|err| {
            log::warn!("{}, falling back to the default round", err);
            GameConfig::default()
        })
    }
}

/// The lifecycle host: owns the controller and saves or restores it around
/// the points where the browser may discard the page.
#[derive(Debug)]
pub(crate) struct GameHost {
    controller: GameController<ViewSurface>,
    suspended: bool,
}

impl GameHost {
    pub(crate) fn load(config: GameConfig, now: Instant) -> Self {
        let saved = load_snapshot(&config);
        Self {
            controller: GameController::initialize(config, saved, ViewSurface::default(), now),
            suspended: false,
        }
    }

    pub(crate) fn controller(&self) -> &GameController<ViewSurface> {
        &self.controller
    }

    pub(crate) fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub(crate) fn tap(&mut self, now: Instant) -> bool {
        if self.suspended {
            return false;
        }

        self.controller.on_tap(now);
        self.controller.poll(now);
        true
    }

    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        self.controller.poll(now) > 0
    }

    pub(crate) fn dismiss_notice(&mut self) -> bool {
        self.controller.surface_mut().dismiss_notice()
    }

    pub(crate) fn suspend(&mut self) -> bool {
        if self.suspended {
            return false;
        }

        // capture cancels the countdown before anything is written
        let snapshot = self.controller.capture_state();
        snapshot.session_save();
        self.suspended = true;
        log::debug!("suspended");
        false
    }

    pub(crate) fn resume(&mut self, now: Instant) -> bool {
        if !self.suspended {
            return false;
        }

        let config = *self.controller.config();
        let saved = load_snapshot(&config).unwrap_or_else(|| self.controller.snapshot());
        let surface = std::mem::take(self.controller.surface_mut());
        self.controller = GameController::initialize(config, Some(saved), surface, now);
        self.suspended = false;
        log::debug!("resumed");
        true
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    host: GameHost,
    about_open: bool,
    notice_id: u32,
    _notice_timeout: Option<Timeout>,
    _poll_interval: Interval,
    _lifecycle_listeners: [EventListener; 3],
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(POLL_MILLIS, move || link.send_message(Msg::Poll))
    }

    /// Hidden and shown pages are the points where the browser may discard
    /// or restore us, so they play the role of save and restore.
    fn create_lifecycle_listeners(ctx: &Context<Self>) -> [EventListener; 3] {
        use gloo::utils::{document, window};

        let visibility = {
            let link = ctx.link().clone();
            EventListener::new(&document(), "visibilitychange", move |_| {
                if document().hidden() {
                    link.send_message(Msg::Suspend);
                } else {
                    link.send_message(Msg::Resume);
                }
            })
        };

        let page_hide = {
            let link = ctx.link().clone();
            EventListener::new(&window(), "pagehide", move |_| {
                link.send_message(Msg::Suspend)
            })
        };

        let page_show = {
            let link = ctx.link().clone();
            EventListener::new(&window(), "pageshow", move |event| {
                let persisted = event
                    .dyn_ref::<web_sys::PageTransitionEvent>()
                    .is_some_and(|event| event.persisted());
                if persisted {
                    link.send_message(Msg::Resume);
                }
            })
        };

        [visibility, page_hide, page_show]
    }

    fn watch_notice(&mut self, ctx: &Context<Self>) {
        let notice_id = self.host.controller().surface().notice_id;
        if notice_id == self.notice_id {
            return;
        }

        self.notice_id = notice_id;
        let link = ctx.link().clone();
        self._notice_timeout = Some(Timeout::new(NOTICE_MILLIS, move || {
            link.send_message(Msg::DismissNotice)
        }));
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            host: GameHost::load(ctx.props().config(), Instant::now()),
            about_open: false,
            notice_id: 0,
            _notice_timeout: None,
            _poll_interval: GameView::create_timer(ctx),
            _lifecycle_listeners: GameView::create_lifecycle_listeners(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Tap => self.host.tap(Instant::now()),
            Poll => self.host.poll(Instant::now()),
            Suspend => self.host.suspend(),
            Resume => self.host.resume(Instant::now()),
            DismissNotice => {
                self._notice_timeout = None;
                self.host.dismiss_notice()
            }
            ToggleAbout => {
                self.about_open = !self.about_open;
                true
            }
        };

        self.watch_notice(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let controller = self.host.controller();
        let surface = controller.surface();
        let phase_class = if self.host.is_suspended() {
            "suspended"
        } else if controller.phase().is_active() {
            "in-progress"
        } else {
            "not-started"
        };
        let duration_secs = game::whole_secs(controller.config().initial_duration);

        let cb_tap = ctx.link().callback(|_: MouseEvent| Tap);
        let cb_show_about = ctx.link().callback(|_: MouseEvent| ToggleAbout);
        let cb_close_about = ctx.link().callback(|()| ToggleAbout);

        html! {
            <div class="timefighter">
                <nav>
                    <h1>{"Time Fighter"}</h1>
                    <small onclick={cb_show_about}>{"···"}</small>
                </nav>
                <section>
                    <p class={classes!("score", surface.pulse_class())}>
                        {"Your score: "}{surface.score_text.clone()}
                    </p>
                    <p class={classes!("time", surface.blink_class())}>
                        {"Time left: "}{surface.time_text.clone()}
                    </p>
                </section>
                <button class={classes!("tap", phase_class)} onclick={cb_tap}>{"Tap me"}</button>
                if let Some(notice) = surface.notice.clone() {
                    <output class="notice">{notice}</output>
                }
                <AboutView open={self.about_open} {duration_secs} on_close={cb_close_about}/>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.host.suspend();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn props_default_to_a_fifty_second_round() {
        assert_eq!(GameProps::default().config(), GameConfig::default());
    }

    #[test]
    fn props_convert_seconds_to_millis() {
        let props = GameProps {
            duration: Some(30),
            interval: Some(250),
        };
        assert_eq!(props.config(), GameConfig::new(30_000, 250).unwrap());
    }

    #[test]
    fn invalid_props_fall_back_to_defaults() {
        let props = GameProps {
            duration: Some(0),
            interval: None,
        };
        assert_eq!(props.config(), GameConfig::default());
    }

    #[test]
    fn animation_classes_alternate() {
        let mut surface = ViewSurface::default();
        assert_eq!(surface.pulse_class(), None);
        assert_eq!(surface.blink_class(), None);

        surface.pulse_score();
        assert_eq!(surface.pulse_class(), Some("pulse-odd"));
        surface.pulse_score();
        assert_eq!(surface.pulse_class(), Some("pulse-even"));

        surface.blink_time();
        assert_eq!(surface.blink_class(), Some("blink-odd"));
    }

    #[test]
    fn view_surface_follows_a_restored_round() {
        let t0 = Instant::now();
        let mut controller = GameController::initialize(
            GameConfig::default(),
            None,
            ViewSurface::default(),
            t0,
        );
        for _ in 0..5 {
            controller.on_tap(t0);
        }
        controller.on_tick(49_000);

        let saved = controller.capture_state();
        let surface = std::mem::take(controller.surface_mut());
        let restored = GameController::initialize(GameConfig::default(), Some(saved), surface, t0);

        assert_eq!(restored.surface().score_text, "5");
        assert_eq!(restored.surface().time_text, "49");
        assert_eq!(restored.surface().pulses, 5);
    }

    #[test]
    fn round_end_raises_a_dismissable_notice() {
        let t0 = Instant::now();
        let config = GameConfig::new(2_000, 1_000).unwrap();
        let mut controller =
            GameController::initialize(config, None, ViewSurface::default(), t0);

        controller.on_tap(t0);
        controller.poll(t0 + Duration::from_millis(2_000));

        let surface = controller.surface_mut();
        assert_eq!(surface.notice_id, 1);
        assert_eq!(
            surface.notice.as_deref(),
            Some("Time's up! Your final score is 1")
        );
        assert!(surface.dismiss_notice());
        assert!(!surface.dismiss_notice());
    }
}
