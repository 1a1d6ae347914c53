//! # Studyroom Core Library
//!
//! Core logic for the Studyroom study planner: a countdown study timer and
//! the statistics engine that turns finished timer runs into a session log,
//! running totals and a day-based streak. The CLI binary is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Timer**: an in-memory countdown state machine. Ticks come from an
//!   injected [`TickScheduler`]; the timer holds at most one live tick source
//!   and drops ticks from cancelled ones.
//! - **Statistics**: [`StatsEngine`] records sessions, maintains
//!   [`UserStats`], and answers derived queries (subject progress, daily
//!   totals). It never fails on storage errors; it falls back to defaults.
//! - **Planner**: resource links, a dated study schedule and the local
//!   profile, stored beside the statistics and feeding the same activity log.
//! - **Storage**: the [`Store`] persistence adapter with in-memory and SQLite
//!   implementations, plus TOML [`Config`].
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: countdown state machine
//! - [`StatsEngine`]: session recording and statistics
//! - [`Store`]: persistence adapter trait
//! - [`Config`]: user preferences

pub mod activity;
pub mod clock;
pub mod error;
pub mod events;
pub mod profile;
pub mod resource;
pub mod schedule;
pub mod stats;
pub mod storage;
pub mod subject;
pub mod task;
pub mod timer;

pub use activity::{Activity, ActivityKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use profile::UserProfile;
pub use resource::{NewResource, Resource, ResourceCategory};
pub use schedule::{BlockKind, NewScheduleItem, ScheduleItem, ScheduleUpdate};
pub use stats::{DailyTotal, DailyTotals, StatsEngine, StudySession, UserStats};
pub use storage::{Config, MemoryStore, SqliteStore, Store};
pub use subject::Subject;
pub use task::{NewTask, Priority, Task, TaskStatus, TaskSummary};
pub use timer::{
    CompletedRun, CountdownTimer, IntervalScheduler, ManualScheduler, TickHandle, TickScheduler,
    TimerState, TimerStatus,
};
