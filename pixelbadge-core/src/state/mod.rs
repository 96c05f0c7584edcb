//! Mode state machine
//!
//! Exactly one mode is active at a time. Mode changes are a pure function
//! of the current mode and an event; timers and side effects live in the
//! controller and the per-mode sessions.

pub mod events;
pub mod machine;
pub mod pomodoro;
pub mod update;

pub use events::Event;
pub use machine::{DefaultPhase, Mode, PomodoroPhase, StatusCycle, UpdatePhase};
pub use pomodoro::PomodoroSession;
pub use update::{ResetReason, UpdateSession};
