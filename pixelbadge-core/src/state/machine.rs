//! Mode and sub-state definitions
//!
//! Everything the badge shows is a function of the current mode, the
//! active character and the time.

use super::events::Event;

/// Default mode sub-states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefaultPhase {
    /// Character slides in from the top
    Intro,
    /// Green character
    Available,
    /// Red character
    Busy,
    /// Rainbow character
    Social,
    /// Scrolling weekend banner
    Bonus,
}

/// Pomodoro mode sub-states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PomodoroPhase {
    /// Brief colour flash on entry
    Intro,
    /// Short presses choose the duration
    Setup,
    /// Counting down
    Active,
    /// Finished or interrupted
    Complete,
}

/// Update mode sub-states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdatePhase {
    Connecting,
    Checking,
    Downloading,
    Installing,
    /// Terminal; ends in a reset
    Error,
}

/// Status phases reachable with a short press in the default mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusCycle {
    bonus: bool,
}

impl StatusCycle {
    const BASE: [DefaultPhase; 3] = [
        DefaultPhase::Available,
        DefaultPhase::Busy,
        DefaultPhase::Social,
    ];

    pub fn has_bonus(&self) -> bool {
        self.bonus
    }

    pub fn set_bonus(&mut self, bonus: bool) {
        self.bonus = bonus;
    }

    fn len(&self) -> usize {
        Self::BASE.len() + self.bonus as usize
    }

    fn get(&self, index: usize) -> DefaultPhase {
        Self::BASE
            .get(index)
            .copied()
            .unwrap_or(DefaultPhase::Bonus)
    }

    pub fn contains(&self, phase: DefaultPhase) -> bool {
        Self::BASE.contains(&phase) || (self.bonus && phase == DefaultPhase::Bonus)
    }

    /// Phase after `phase`, wrapping; phases outside the cycle go to the first
    pub fn next(&self, phase: DefaultPhase) -> DefaultPhase {
        let next = (0..self.len())
            .position(|i| self.get(i) == phase)
            .map(|i| (i + 1) % self.len())
            .unwrap_or(0);
        self.get(next)
    }
}

/// Top-level badge modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Status indicator
    Default(DefaultPhase),
    /// Character gallery
    CharacterSelect,
    /// Countdown timer
    Pomodoro(PomodoroPhase),
    /// Self-update; never returns to another mode
    Update(UpdatePhase),
}

impl Mode {
    /// Mode entered after a normal boot
    pub const BOOT: Mode = Mode::Default(DefaultPhase::Intro);

    /// Check if button presses are interpreted in this mode
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Mode::Default(DefaultPhase::Intro) | Mode::Update(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Mode::Update(_))
    }

    /// Process an event and return the next mode
    ///
    /// `cycle` is the current status cycle, consulted for short presses in
    /// the default mode.
    pub fn transition(self, event: Event, cycle: StatusCycle) -> Self {
        use DefaultPhase as D;
        use Event::*;
        use Mode::*;
        use PomodoroPhase as P;
        use UpdatePhase as U;

        match (self, event) {
            // Boot gestures
            (Default(D::Intro), BootHeld) => CharacterSelect,
            (CharacterSelect, BootUpdateHold) => Update(U::Connecting),

            // Update flow
            (Update(U::Connecting), Connected) => Update(U::Checking),
            (Update(U::Checking), UpdateAvailable) => Update(U::Downloading),
            (Update(U::Downloading), Downloaded) => Update(U::Installing),
            (Update(U::Error), UpdateFailed(_)) => self,
            (Update(_), UpdateFailed(_)) => Update(U::Error),
            (Update(_), _) => self,

            // Maintenance interrupts any other mode
            (_, MaintenanceWindow) => Update(U::Connecting),

            // Default mode
            (Default(D::Intro), IntroFinished) => Default(D::Available),
            (Default(D::Intro), _) => self,
            (Default(phase), ShortPress) => Default(cycle.next(phase)),
            (Default(_), LongPress) => Pomodoro(P::Intro),
            (Default(D::Busy | D::Bonus), BonusStarted) => self,
            (Default(_), BonusStarted) => Default(D::Bonus),
            (Default(D::Bonus), BonusEnded) => Default(D::Available),

            // Character gallery; short presses change the preview only
            (CharacterSelect, LongPress) => Default(D::Intro),

            // Pomodoro
            (Pomodoro(_), LongPress) => Default(D::Intro),
            (Pomodoro(P::Intro), IntroFinished) => Pomodoro(P::Setup),
            (Pomodoro(P::Setup), SetupTimedOut) => Pomodoro(P::Active),
            (Pomodoro(P::Active), ShortPress | TimerFinished) => Pomodoro(P::Complete),
            (Pomodoro(P::Complete), ShortPress) => Pomodoro(P::Intro),

            // Default: stay in current mode
            _ => self,
        }
    }
}
