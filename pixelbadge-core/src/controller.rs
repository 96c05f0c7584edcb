//! Main controller coordinating input, timers, schedule and rendering
//!
//! The controller is the central brain that:
//! - Interprets the button into short and long presses
//! - Advances the active mode's timers
//! - Runs the wall-clock schedule
//! - Drives the self-update flow through the transport
//! - Renders one frame per poll and flushes it to the LEDs
//!
//! It never sleeps. The caller polls it from a loop with a short delay.

use heapless::Vec;

use crate::character::{Catalog, Character, CharacterDef, Tint};
use crate::color::{Brightness, Rgb};
use crate::config::BadgeConfig;
use crate::effects;
use crate::frame::{Frame, MATRIX_SIZE};
use crate::input::{Press, PressDetector};
use crate::schedule::Schedule;
use crate::state::{
    DefaultPhase, Event, Mode, PomodoroPhase, PomodoroSession, ResetReason, StatusCycle,
    UpdatePhase, UpdateSession,
};
use crate::text;
use crate::time::{elapsed_ms, has_elapsed};
use crate::traits::{
    Button, Clock, LedMatrix, SelectionStore, StoreError, SystemControl, UpdateError,
    UpdateTransport,
};
use crate::version::is_newer;

/// Most events a single poll can report
pub const MAX_EVENTS: usize = 8;

/// Events applied during one poll, in order
pub type Events = Vec<Event, MAX_EVENTS>;

/// Character tint while browsing the gallery
pub const SELECTION_COLOR: Rgb = Rgb::new(255, 0, 128);

/// Solid colour shown in each Pomodoro phase
pub fn pomodoro_color(phase: PomodoroPhase) -> Rgb {
    match phase {
        PomodoroPhase::Intro => Rgb::new(255, 128, 0),
        PomodoroPhase::Setup => Rgb::new(255, 165, 0),
        PomodoroPhase::Active => Rgb::new(255, 69, 0),
        PomodoroPhase::Complete => Rgb::new(255, 215, 0),
    }
}

/// Spinner, progress or flash colour for each update phase
pub fn update_color(phase: UpdatePhase) -> Rgb {
    match phase {
        UpdatePhase::Connecting => Rgb::BLUE,
        UpdatePhase::Checking => Rgb::new(128, 0, 255),
        UpdatePhase::Downloading => Rgb::new(80, 0, 0),
        UpdatePhase::Installing => Rgb::new(255, 128, 0),
        UpdatePhase::Error => Rgb::RED,
    }
}

/// Row offset of the sliding intro, from 8 (off screen) down to 0
///
/// Ease-out cubic: fast at first, settling gently.
pub fn intro_row_offset(elapsed_ms: u32, duration_ms: u32) -> i8 {
    let progress = (elapsed_ms as f32 / duration_ms.max(1) as f32).min(1.0);
    let remaining = 1.0 - progress;
    let eased = 1.0 - remaining * remaining * remaining;
    ((1.0 - eased) * MATRIX_SIZE as f32) as i8
}

fn status_tint(phase: DefaultPhase) -> Tint {
    match phase {
        DefaultPhase::Intro | DefaultPhase::Available => Tint::Available,
        DefaultPhase::Busy => Tint::Busy,
        DefaultPhase::Social => Tint::Social,
        DefaultPhase::Bonus => Tint::Plain,
    }
}

fn push(events: &mut Events, event: Event) {
    // A full list only loses log lines, never behaviour
    let _ = events.push(event);
}

/// Everything the controller talks to
pub struct Board<L, B, C, S, U, R> {
    pub leds: L,
    pub button: B,
    pub clock: C,
    pub store: S,
    pub network: U,
    pub system: R,
}

pub struct Controller<L, B, C, S, U, R> {
    board: Board<L, B, C, S, U, R>,
    config: BadgeConfig,
    brightness: Brightness,
    catalog: Catalog,
    /// Current mode
    mode: Mode,
    /// Index of the saved character
    selected: usize,
    /// Index shown in the gallery
    preview: usize,
    /// Character being drawn, if the mode draws one
    character: Option<Character>,
    cycle: StatusCycle,
    intro_started_ms: u32,
    bonus_started_ms: u32,
    pomodoro: PomodoroSession,
    update: UpdateSession,
    buttons: PressDetector,
    /// Start of a hold that began before boot
    boot_hold_since: Option<u32>,
    schedule: Schedule,
    frame: Frame,
    /// Set once a reset has been requested
    halted: bool,
}

impl<L, B, C, S, U, R> Controller<L, B, C, S, U, R>
where
    L: LedMatrix,
    B: Button,
    C: Clock,
    S: SelectionStore,
    U: UpdateTransport,
    R: SystemControl,
{
    /// Create a controller; nothing happens until [`boot`](Self::boot)
    pub fn new(board: Board<L, B, C, S, U, R>, config: BadgeConfig, catalog: Catalog) -> Self {
        let now = board.clock.now_ms();
        Self {
            brightness: config.brightness(),
            buttons: PressDetector::new(config.timing.long_press_ms),
            pomodoro: PomodoroSession::new(config.pomodoro, now),
            schedule: Schedule::new(config.schedule, now),
            board,
            config,
            catalog,
            mode: Mode::BOOT,
            selected: 0,
            preview: 0,
            character: None,
            cycle: StatusCycle::default(),
            intro_started_ms: now,
            bonus_started_ms: now,
            update: UpdateSession::new(now),
            boot_hold_since: None,
            frame: Frame::new(),
            halted: false,
        }
    }

    /// Restore the saved character and pick the start mode
    ///
    /// A button held at power-on opens the character gallery; holding it
    /// on past the boot update hold starts the update flow.
    pub fn boot(&mut self) -> Events {
        let mut events = Events::new();
        let now = self.board.clock.now_ms();

        self.selected = self
            .board
            .store
            .load()
            .and_then(|id| self.catalog.index_of(&id))
            .unwrap_or(0);
        self.schedule = Schedule::new(self.config.schedule, now);
        self.enter(Mode::BOOT, now);

        if self.board.button.is_pressed() {
            self.boot_hold_since = Some(now);
            self.buttons.suppress_until_release();
            self.apply(Event::BootHeld, now, &mut events);
        }

        self.render(now);
        self.frame.flush(&mut self.board.leds);
        events
    }

    /// One pass of the main loop
    pub fn poll(&mut self) -> Events {
        let mut events = Events::new();
        if self.halted {
            return events;
        }

        let now = self.board.clock.now_ms();
        let pressed = self.board.button.is_pressed();

        self.check_boot_hold(pressed, now, &mut events);
        self.advance_timers(now, &mut events);
        if self.halted {
            return events;
        }
        self.check_schedule(now, &mut events);
        self.handle_button(pressed, now, &mut events);

        self.render(now);
        self.frame.flush(&mut self.board.leds);
        events
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Definition of the saved character
    pub fn selected_character(&self) -> Option<&'static CharacterDef> {
        self.catalog.get(self.selected)
    }

    pub fn pomodoro_minutes(&self) -> u16 {
        self.pomodoro.duration_minutes()
    }

    pub fn status_cycle(&self) -> StatusCycle {
        self.cycle
    }

    pub fn update_error(&self) -> Option<UpdateError> {
        self.update.error()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn board(&self) -> &Board<L, B, C, S, U, R> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<L, B, C, S, U, R> {
        &mut self.board
    }

    fn check_boot_hold(&mut self, pressed: bool, now: u32, events: &mut Events) {
        let Some(since) = self.boot_hold_since else {
            return;
        };
        if !pressed {
            self.boot_hold_since = None;
        } else if has_elapsed(now, since, self.config.timing.boot_update_hold_ms) {
            self.boot_hold_since = None;
            self.apply(Event::BootUpdateHold, now, events);
        }
    }

    fn advance_timers(&mut self, now: u32, events: &mut Events) {
        let timing = self.config.timing;
        match self.mode {
            Mode::Default(DefaultPhase::Intro) => {
                if has_elapsed(now, self.intro_started_ms, timing.default_intro_ms) {
                    self.apply(Event::IntroFinished, now, events);
                }
            }
            Mode::Pomodoro(PomodoroPhase::Intro) => {
                if self.pomodoro.phase_elapsed(now, timing.pomodoro_intro_ms) {
                    self.apply(Event::IntroFinished, now, events);
                }
            }
            Mode::Pomodoro(PomodoroPhase::Setup) => {
                if self.pomodoro.phase_elapsed(now, timing.pomodoro_setup_timeout_ms) {
                    self.apply(Event::SetupTimedOut, now, events);
                }
            }
            Mode::Pomodoro(PomodoroPhase::Active) => {
                if self.pomodoro.is_finished(now) {
                    self.apply(Event::TimerFinished, now, events);
                }
            }
            Mode::Update(phase) => self.step_update(phase, now, events),
            _ => {}
        }
    }

    fn check_schedule(&mut self, now: u32, events: &mut Events) {
        if !self.mode.is_update() {
            let clock = &self.board.clock;
            if self.schedule.maintenance_due(now, || clock.wall_time()) {
                self.apply(Event::MaintenanceWindow, now, events);
            }
        }

        let clock = &self.board.clock;
        let Some(in_window) = self.schedule.bonus_check(now, || clock.wall_time()) else {
            return;
        };
        if !matches!(self.mode, Mode::Default(phase) if phase != DefaultPhase::Intro) {
            return;
        }
        if in_window != self.cycle.has_bonus() {
            self.cycle.set_bonus(in_window);
            let event = if in_window {
                Event::BonusStarted
            } else {
                Event::BonusEnded
            };
            self.apply(event, now, events);
        }
    }

    fn handle_button(&mut self, pressed: bool, now: u32, events: &mut Events) {
        let Some(press) = self.buttons.update(pressed, now) else {
            return;
        };
        if !self.mode.accepts_input() {
            return;
        }
        let event = match press {
            Press::Short => Event::ShortPress,
            Press::Long => Event::LongPress,
        };
        self.apply(event, now, events);
    }

    /// Run an event through the state machine plus its side effects
    fn apply(&mut self, event: Event, now: u32, events: &mut Events) {
        push(events, event);
        let previous = self.mode;
        let next = previous.transition(event, self.cycle);

        match (previous, event) {
            (Mode::CharacterSelect, Event::ShortPress) => {
                self.preview = self.catalog.next_index(self.preview);
                self.character = self.catalog.instantiate(self.preview, now).ok();
            }
            (Mode::CharacterSelect, Event::LongPress) => {
                self.selected = self.preview;
                self.save_selection(events);
            }
            (Mode::Pomodoro(PomodoroPhase::Setup), Event::ShortPress) => {
                self.pomodoro.increase(now);
            }
            _ => {}
        }

        if next != previous {
            self.enter(next, now);
        }
    }

    /// Reset the timers owned by `mode`
    fn enter(&mut self, mode: Mode, now: u32) {
        self.mode = mode;
        match mode {
            Mode::Default(DefaultPhase::Intro) => {
                self.intro_started_ms = now;
                self.character = self.catalog.instantiate(self.selected, now).ok();
            }
            Mode::Default(DefaultPhase::Bonus) => self.bonus_started_ms = now,
            Mode::Default(_) => {}
            Mode::CharacterSelect => {
                self.preview = self.selected;
                self.character = self.catalog.instantiate(self.preview, now).ok();
            }
            Mode::Pomodoro(PomodoroPhase::Intro) => self.pomodoro.enter_intro(now),
            Mode::Pomodoro(PomodoroPhase::Setup) => self.pomodoro.enter_setup(now),
            Mode::Pomodoro(PomodoroPhase::Active) => self.pomodoro.start(now),
            Mode::Pomodoro(PomodoroPhase::Complete) => {}
            Mode::Update(UpdatePhase::Connecting) => {
                self.update = UpdateSession::new(now);
                self.character = None;
            }
            Mode::Update(_) => self.update.enter_phase(now),
        }
    }

    fn save_selection(&mut self, events: &mut Events) {
        let result = match self.catalog.id_at(self.selected) {
            Some(id) => self.board.store.save(&id),
            None => Err(StoreError::Serialize),
        };
        push(
            events,
            match result {
                Ok(()) => Event::SelectionSaved,
                Err(e) => Event::SaveFailed(e),
            },
        );
    }

    fn step_update(&mut self, phase: UpdatePhase, now: u32, events: &mut Events) {
        match phase {
            UpdatePhase::Connecting => {
                if !self.update.step_done() {
                    self.update.mark_step_done();
                    if let Err(e) = self.board.network.start_connection() {
                        return self.fail_update(e, now, events);
                    }
                }
                if self.board.network.is_connected() {
                    self.apply(Event::Connected, now, events);
                } else if self.update.phase_elapsed_ms(now) > self.config.update.connect_timeout_ms {
                    self.fail_update(UpdateError::ConnectTimeout, now, events);
                }
            }
            UpdatePhase::Checking => {
                if !self.update.step_done() {
                    self.update.mark_step_done();
                    match self.board.network.fetch_release(&self.config.update.url) {
                        Ok(release) => self.update.set_release(release),
                        Err(e) => return self.fail_update(e, now, events),
                    }
                }
                let update = &self.config.update;
                if self.update.phase_elapsed_ms(now) < update.check_hold_ms {
                    return;
                }
                let newer = self
                    .update
                    .release()
                    .is_some_and(|r| is_newer(&r.version, &update.current_version));
                if newer || update.force_update {
                    self.apply(Event::UpdateAvailable, now, events);
                } else {
                    self.board.network.disconnect();
                    self.reset(ResetReason::UpToDate, events);
                }
            }
            UpdatePhase::Downloading => self.download(now, events),
            UpdatePhase::Installing => {
                if !self.update.step_done() {
                    self.update.mark_step_done();
                    if let Err(e) = self.board.network.install() {
                        return self.fail_update(e, now, events);
                    }
                    self.board.network.disconnect();
                }
                if self.update.phase_elapsed_ms(now) >= self.config.update.install_hold_ms {
                    self.reset(ResetReason::Installed, events);
                }
            }
            UpdatePhase::Error => {
                if self.update.phase_elapsed_ms(now) >= UpdateSession::error_display_ms() {
                    self.board.network.disconnect();
                    self.reset(ResetReason::Failed, events);
                }
            }
        }
    }

    /// Blocking download, redrawing the progress bar on every report
    fn download(&mut self, now: u32, events: &mut Events) {
        let Some(url) = self.update.release().map(|r| r.url.clone()) else {
            return self.fail_update(UpdateError::InvalidRelease, now, events);
        };
        let color = update_color(UpdatePhase::Downloading);
        effects::progress_bar(&mut self.frame, color, 0.0);
        self.frame.flush(&mut self.board.leds);

        let frame = &mut self.frame;
        let leds = &mut self.board.leds;
        let mut last = None;
        let result = self.board.network.download(&url, &mut |progress| {
            effects::progress_bar(frame, color, progress.fraction());
            frame.flush(&mut *leds);
            last = Some(progress);
        });
        if let Some(progress) = last {
            self.update.set_progress(progress);
        }

        match result {
            Ok(()) => self.apply(Event::Downloaded, now, events),
            Err(e) => self.fail_update(e, now, events),
        }
    }

    fn fail_update(&mut self, error: UpdateError, now: u32, events: &mut Events) {
        self.update.fail(error);
        self.apply(Event::UpdateFailed(error), now, events);
    }

    fn reset(&mut self, reason: ResetReason, events: &mut Events) {
        push(events, Event::Reset(reason));
        self.halted = true;
        self.board.system.reset();
    }

    fn draw_character(&mut self, tint: Tint, row_offset: i8, now: u32) {
        match &self.character {
            Some(character) => {
                character.render(&mut self.frame, tint, self.brightness, row_offset, now)
            }
            None => self.frame.clear(),
        }
    }

    fn render(&mut self, now: u32) {
        if let Some(character) = self.character.as_mut() {
            character.tick(now);
        }
        let brightness = self.brightness;
        match self.mode {
            Mode::Default(DefaultPhase::Intro) => {
                let offset = intro_row_offset(
                    elapsed_ms(now, self.intro_started_ms),
                    self.config.timing.default_intro_ms,
                );
                self.draw_character(Tint::Available, offset, now);
            }
            Mode::Default(DefaultPhase::Bonus) => {
                let position =
                    text::scroll_position(text::BONUS_TEXT, elapsed_ms(now, self.bonus_started_ms));
                effects::scroll_text(&mut self.frame, text::BONUS_TEXT, position, now, brightness);
            }
            Mode::Default(phase) => self.draw_character(status_tint(phase), 0, now),
            Mode::CharacterSelect => {
                self.draw_character(Tint::Override(SELECTION_COLOR), 0, now)
            }
            Mode::Pomodoro(phase) => {
                effects::fill_scaled(&mut self.frame, pomodoro_color(phase), brightness)
            }
            Mode::Update(UpdatePhase::Downloading) => {
                let progress = self.update.progress().map_or(0.0, |p| p.fraction());
                effects::progress_bar(
                    &mut self.frame,
                    update_color(UpdatePhase::Downloading),
                    progress,
                );
            }
            Mode::Update(UpdatePhase::Error) => {
                if self.update.error_flash_on(now) {
                    effects::fill_scaled(&mut self.frame, update_color(UpdatePhase::Error), brightness);
                } else {
                    self.frame.clear();
                }
            }
            Mode::Update(phase) => {
                let position = self
                    .update
                    .spinner_position(now, self.config.timing.spinner_step_ms);
                effects::spinner(&mut self.frame, update_color(phase), position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterId;
    use crate::frame::PIXEL_COUNT;
    use crate::traits::{DownloadProgress, Release, WallTime};

    struct RecordingMatrix {
        writes: u32,
        last: [Rgb; PIXEL_COUNT],
    }

    impl LedMatrix for RecordingMatrix {
        fn write(&mut self, pixels: &[Rgb; PIXEL_COUNT]) {
            self.writes += 1;
            self.last = *pixels;
        }
    }

    struct TestButton {
        pressed: bool,
    }

    impl Button for TestButton {
        fn is_pressed(&mut self) -> bool {
            self.pressed
        }
    }

    struct TestClock {
        now: u32,
        wall: Option<WallTime>,
    }

    impl Clock for TestClock {
        fn now_ms(&self) -> u32 {
            self.now
        }

        fn wall_time(&self) -> Option<WallTime> {
            self.wall
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Option<CharacterId>,
        fail: bool,
    }

    impl SelectionStore for MemoryStore {
        fn load(&mut self) -> Option<CharacterId> {
            self.saved.clone()
        }

        fn save(&mut self, id: &str) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Flash);
            }
            let mut saved = CharacterId::new();
            saved.push_str(id).map_err(|_| StoreError::Serialize)?;
            self.saved = Some(saved);
            Ok(())
        }
    }

    struct ScriptedTransport {
        /// `is_connected` returns true from this call onwards
        connect_after: u32,
        connect_polls: u32,
        release: Result<Release, UpdateError>,
        download: Result<(), UpdateError>,
        connects: u32,
        fetches: u32,
        downloads: u32,
        installs: u32,
        disconnects: u32,
    }

    impl ScriptedTransport {
        fn new(version: &str) -> Self {
            let mut release = Release {
                version: heapless::String::new(),
                url: heapless::String::new(),
            };
            release.version.push_str(version).unwrap();
            release.url.push_str("http://example.invalid/fw.bin").unwrap();
            Self {
                connect_after: 1,
                connect_polls: 0,
                release: Ok(release),
                download: Ok(()),
                connects: 0,
                fetches: 0,
                downloads: 0,
                installs: 0,
                disconnects: 0,
            }
        }
    }

    impl UpdateTransport for ScriptedTransport {
        fn start_connection(&mut self) -> Result<(), UpdateError> {
            self.connects += 1;
            Ok(())
        }

        fn is_connected(&mut self) -> bool {
            self.connect_polls += 1;
            self.connect_polls > self.connect_after
        }

        fn disconnect(&mut self) {
            self.disconnects += 1;
        }

        fn fetch_release(&mut self, _url: &str) -> Result<Release, UpdateError> {
            self.fetches += 1;
            self.release.clone()
        }

        fn download(
            &mut self,
            _url: &str,
            progress: &mut dyn FnMut(DownloadProgress),
        ) -> Result<(), UpdateError> {
            self.downloads += 1;
            for downloaded in [256, 512, 1024] {
                progress(DownloadProgress {
                    downloaded,
                    total: Some(1024),
                });
            }
            self.download
        }

        fn install(&mut self) -> Result<(), UpdateError> {
            self.installs += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingReset {
        resets: u32,
    }

    impl SystemControl for CountingReset {
        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    type TestController = Controller<
        RecordingMatrix,
        TestButton,
        TestClock,
        MemoryStore,
        ScriptedTransport,
        CountingReset,
    >;

    fn test_board() -> Board<
        RecordingMatrix,
        TestButton,
        TestClock,
        MemoryStore,
        ScriptedTransport,
        CountingReset,
    > {
        Board {
            leds: RecordingMatrix {
                writes: 0,
                last: [Rgb::BLACK; PIXEL_COUNT],
            },
            button: TestButton { pressed: false },
            clock: TestClock { now: 0, wall: None },
            store: MemoryStore::default(),
            network: ScriptedTransport::new("1.0.11"),
            system: CountingReset::default(),
        }
    }

    fn controller(config: BadgeConfig) -> TestController {
        Controller::new(test_board(), config, Catalog::builtin().unwrap())
    }

    fn booted() -> TestController {
        let mut c = controller(BadgeConfig::default());
        c.boot();
        c
    }

    fn step(c: &mut TestController, now: u32, pressed: bool) -> Events {
        c.board_mut().clock.now = now;
        c.board_mut().button.pressed = pressed;
        c.poll()
    }

    fn short_press(c: &mut TestController, at: u32) -> Events {
        step(c, at, true);
        step(c, at + 100, false)
    }

    fn long_press(c: &mut TestController, at: u32) -> Events {
        step(c, at, true);
        let events = step(c, at + 700, true);
        step(c, at + 800, false);
        events
    }

    fn friday(hour: u8) -> WallTime {
        WallTime {
            year: 2024,
            month: 5,
            day: 17,
            weekday: 4,
            hour,
            minute: 0,
            second: 0,
        }
    }

    fn led(c: &TestController, row: usize, col: usize) -> Rgb {
        c.board().leds.last[row * 8 + col]
    }

    #[test]
    fn test_intro_slides_then_available() {
        let mut c = booted();
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Intro));
        // Fully off screen at the start of the slide
        assert!(c.board().leds.last.iter().all(|p| *p == Rgb::BLACK));

        // Presses during the intro are ignored
        let events = short_press(&mut c, 100);
        assert!(events.is_empty());
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Intro));

        let events = step(&mut c, 600, false);
        assert_eq!(&events[..], &[Event::IntroFinished]);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Available));
        // Ghost body top row is green at 20% brightness
        assert_eq!(led(&c, 0, 2), Rgb::new(0, 51, 0));
    }

    #[test]
    fn test_short_presses_cycle_status() {
        let mut c = booted();
        step(&mut c, 600, false);

        short_press(&mut c, 1000);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Busy));
        assert_eq!(led(&c, 0, 2), Rgb::new(51, 0, 0));

        short_press(&mut c, 1300);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Social));

        short_press(&mut c, 1600);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Available));
    }

    #[test]
    fn test_pomodoro_session() {
        let mut c = booted();
        step(&mut c, 600, false);

        let events = long_press(&mut c, 1000);
        assert_eq!(&events[..], &[Event::LongPress]);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Intro));

        step(&mut c, 2700, false);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Setup));
        assert_eq!(c.pomodoro_minutes(), 15);

        short_press(&mut c, 3000);
        short_press(&mut c, 3200);
        short_press(&mut c, 3400);
        assert_eq!(c.pomodoro_minutes(), 60);

        // Idle timeout counts from the last adjustment at 3500
        step(&mut c, 8499, false);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Setup));
        step(&mut c, 8500, false);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Active));
        assert_eq!(c.pomodoro_minutes(), 60);
        assert_eq!(led(&c, 4, 4), Rgb::new(51, 14, 0));

        step(&mut c, 8500 + 3_600_000 - 1, false);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Active));
        let events = step(&mut c, 8500 + 3_600_000, false);
        assert_eq!(&events[..], &[Event::TimerFinished]);
        assert_eq!(led(&c, 0, 0), Rgb::new(51, 43, 0));

        long_press(&mut c, 8500 + 3_700_000);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Intro));
    }

    #[test]
    fn test_pomodoro_interrupt_and_restart() {
        let mut c = booted();
        step(&mut c, 600, false);
        long_press(&mut c, 1000);
        step(&mut c, 2700, false);
        step(&mut c, 7700, false);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Active));

        short_press(&mut c, 8000);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Complete));
        short_press(&mut c, 8500);
        assert_eq!(c.mode(), Mode::Pomodoro(PomodoroPhase::Intro));
    }

    #[test]
    fn test_gallery_browse_and_save() {
        let mut c = controller(BadgeConfig::default());
        c.board_mut().button.pressed = true;
        let events = c.boot();
        assert_eq!(&events[..], &[Event::BootHeld]);
        assert_eq!(c.mode(), Mode::CharacterSelect);

        // Releasing the boot hold is not a press
        let events = step(&mut c, 500, false);
        assert!(events.is_empty());

        short_press(&mut c, 1000);
        // Heart body in pink at 20%
        assert_eq!(led(&c, 1, 1), Rgb::new(51, 0, 26));

        let events = long_press(&mut c, 2000);
        assert_eq!(&events[..], &[Event::LongPress, Event::SelectionSaved]);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Intro));
        assert_eq!(c.selected_character().map(|d| d.id), Some("heart"));
        assert_eq!(
            c.board().store.saved.as_ref().map(|s| s.as_str()),
            Some("heart")
        );
    }

    #[test]
    fn test_gallery_preview_starts_fresh_animation() {
        let mut c = controller(BadgeConfig::default());
        c.board_mut().button.pressed = true;
        c.boot();
        step(&mut c, 500, false);

        // Heart preview is built when the press is released at 1100
        short_press(&mut c, 1000);
        let white = Rgb::new(51, 51, 51);
        let pink = Rgb::new(51, 0, 26);

        // Blink rests on its open-eye frame for a full interval
        step(&mut c, 1100 + 7000 - 1, false);
        assert_eq!(led(&c, 3, 2), white);
        assert_eq!(led(&c, 4, 2), white);

        // Then plays the half-closed frame
        step(&mut c, 1100 + 7000 + 60, false);
        assert_eq!(led(&c, 3, 2), pink);
        assert_eq!(led(&c, 4, 2), white);
    }

    #[test]
    fn test_save_failure_reported() {
        let mut c = controller(BadgeConfig::default());
        c.board_mut().store.fail = true;
        c.board_mut().button.pressed = true;
        c.boot();
        step(&mut c, 500, false);

        let events = long_press(&mut c, 1000);
        assert_eq!(
            &events[..],
            &[Event::LongPress, Event::SaveFailed(StoreError::Flash)]
        );
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Intro));
    }

    #[test]
    fn test_saved_selection_restored() {
        let mut c = controller(BadgeConfig::default());
        let mut id = CharacterId::new();
        id.push_str("creeper").unwrap();
        c.board_mut().store.saved = Some(id);
        c.boot();
        assert_eq!(c.selected_character().map(|d| d.id), Some("creeper"));
    }

    #[test]
    fn test_unknown_saved_id_falls_back() {
        let mut c = controller(BadgeConfig::default());
        let mut id = CharacterId::new();
        id.push_str("retired").unwrap();
        c.board_mut().store.saved = Some(id);
        c.boot();
        assert_eq!(c.selected_character().map(|d| d.id), Some("ghost_plain"));
    }

    #[test]
    fn test_boot_hold_starts_update() {
        let mut c = controller(BadgeConfig::default());
        c.board_mut().button.pressed = true;
        c.boot();

        step(&mut c, 3999, true);
        assert_eq!(c.mode(), Mode::CharacterSelect);
        let events = step(&mut c, 4000, true);
        assert_eq!(events[0], Event::BootUpdateHold);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Connecting));
        assert_eq!(c.board().network.connects, 1);
    }

    #[test]
    fn test_update_installs_and_resets() {
        let mut c = booted();
        c.board_mut().clock.wall = Some(WallTime {
            hour: 3,
            minute: 10,
            ..friday(3)
        });

        let events = step(&mut c, 60_000, false);
        assert!(events.contains(&Event::MaintenanceWindow));
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Connecting));

        step(&mut c, 60_010, false);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Connecting));
        step(&mut c, 60_020, false);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Checking));

        step(&mut c, 60_030, false);
        assert_eq!(c.board().network.fetches, 1);
        step(&mut c, 62_019, false);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Checking));
        step(&mut c, 62_020, false);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Downloading));

        let writes_before = c.board().leds.writes;
        let events = step(&mut c, 62_030, false);
        assert_eq!(&events[..], &[Event::Downloaded]);
        // Initial bar, three progress reports, end of poll
        assert_eq!(c.board().leds.writes, writes_before + 5);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Installing));

        step(&mut c, 62_040, false);
        assert_eq!(c.board().network.installs, 1);
        assert_eq!(c.board().network.disconnects, 1);

        let events = step(&mut c, 64_040, false);
        assert_eq!(&events[..], &[Event::Reset(ResetReason::Installed)]);
        assert_eq!(c.board().system.resets, 1);
        assert!(c.is_halted());
        assert!(step(&mut c, 70_000, false).is_empty());
        assert_eq!(c.board().network.fetches, 1);
        assert_eq!(c.board().network.downloads, 1);
    }

    #[test]
    fn test_current_release_skips_download() {
        let mut config = BadgeConfig::default();
        config.update.force_update = false;
        let mut c = controller(config);
        c.board_mut().network = ScriptedTransport::new("1.0.10");
        c.board_mut().button.pressed = true;
        c.boot();
        step(&mut c, 4000, true);

        step(&mut c, 4010, false);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Checking));
        step(&mut c, 4020, false);
        let events = step(&mut c, 6010, false);
        assert_eq!(&events[..], &[Event::Reset(ResetReason::UpToDate)]);
        assert_eq!(c.board().network.downloads, 0);
        assert_eq!(c.board().network.disconnects, 1);
    }

    #[test]
    fn test_connect_timeout_flashes_then_resets() {
        let mut c = controller(BadgeConfig::default());
        c.board_mut().network.connect_after = u32::MAX;
        c.board_mut().button.pressed = true;
        c.boot();
        step(&mut c, 4000, true);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Connecting));

        step(&mut c, 14_000, false);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Connecting));
        let events = step(&mut c, 14_001, false);
        assert_eq!(
            &events[..],
            &[Event::UpdateFailed(UpdateError::ConnectTimeout)]
        );
        assert_eq!(c.update_error(), Some(UpdateError::ConnectTimeout));

        // Off half, then red half
        step(&mut c, 14_100, false);
        assert_eq!(led(&c, 3, 3), Rgb::BLACK);
        step(&mut c, 14_250, false);
        assert_eq!(led(&c, 3, 3), Rgb::new(51, 0, 0));

        step(&mut c, 15_700, false);
        assert!(!c.is_halted());
        let events = step(&mut c, 15_701, false);
        assert_eq!(&events[..], &[Event::Reset(ResetReason::Failed)]);
        assert_eq!(c.board().system.resets, 1);
    }

    #[test]
    fn test_download_failure() {
        let mut c = controller(BadgeConfig::default());
        c.board_mut().network.download = Err(UpdateError::Transfer);
        c.board_mut().button.pressed = true;
        c.boot();
        step(&mut c, 4000, true);
        step(&mut c, 4010, false);
        step(&mut c, 4020, false);
        step(&mut c, 6010, false);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Downloading));

        let events = step(&mut c, 6020, false);
        assert_eq!(&events[..], &[Event::UpdateFailed(UpdateError::Transfer)]);
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Error));
        assert_eq!(c.board().network.installs, 0);
    }

    #[test]
    fn test_update_ignores_buttons() {
        let mut c = controller(BadgeConfig::default());
        c.board_mut().network.connect_after = u32::MAX;
        c.board_mut().button.pressed = true;
        c.boot();
        step(&mut c, 4000, true);
        step(&mut c, 4100, false);

        let events = long_press(&mut c, 5000);
        assert!(events.is_empty());
        assert_eq!(c.mode(), Mode::Update(UpdatePhase::Connecting));
    }

    #[test]
    fn test_unsynced_clock_skips_schedule() {
        let mut c = booted();
        step(&mut c, 600, false);
        for now in [10_000, 60_000, 120_000] {
            assert!(step(&mut c, now, false).is_empty());
        }
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Available));
    }

    #[test]
    fn test_bonus_window_enters_and_leaves() {
        let mut c = booted();
        step(&mut c, 600, false);
        c.board_mut().clock.wall = Some(friday(16));

        let events = step(&mut c, 10_000, false);
        assert_eq!(&events[..], &[Event::BonusStarted]);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Bonus));
        assert!(c.status_cycle().has_bonus());

        // Cycle now includes the banner
        short_press(&mut c, 11_000);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Available));
        short_press(&mut c, 11_500);
        short_press(&mut c, 12_000);
        short_press(&mut c, 12_500);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Bonus));

        c.board_mut().clock.wall = Some(friday(14));
        let events = step(&mut c, 20_000, false);
        assert_eq!(&events[..], &[Event::BonusEnded]);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Available));
        assert!(!c.status_cycle().has_bonus());
    }

    #[test]
    fn test_bonus_does_not_interrupt_busy() {
        let mut c = booted();
        step(&mut c, 600, false);
        short_press(&mut c, 1000);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Busy));

        c.board_mut().clock.wall = Some(friday(16));
        let events = step(&mut c, 10_000, false);
        assert_eq!(&events[..], &[Event::BonusStarted]);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Busy));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut c = booted();
        step(&mut c, 600, false);
        short_press(&mut c, 1000);
        short_press(&mut c, 1300);
        assert_eq!(c.mode(), Mode::Default(DefaultPhase::Social));

        step(&mut c, 5000, false);
        let first = c.board().leds.last;
        step(&mut c, 5000, false);
        assert_eq!(c.board().leds.last, first);
    }

    #[test]
    fn test_intro_row_offset_curve() {
        assert_eq!(intro_row_offset(0, 600), 8);
        assert_eq!(intro_row_offset(300, 600), 1);
        assert_eq!(intro_row_offset(600, 600), 0);
        assert_eq!(intro_row_offset(10_000, 600), 0);
    }
}
