mod engine;
mod presets;
mod scheduler;

pub use engine::{
    format_clock, CompletedRun, CountdownTimer, TimerState, TimerStatus, DEFAULT_DURATION_SECS,
};
pub use presets::{default_presets, Preset};
pub use scheduler::{IntervalScheduler, ManualScheduler, TickHandle, TickScheduler};
