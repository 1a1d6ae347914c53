use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::Subject;
use crate::timer::TimerStatus;

/// Every state change in the system produces an Event.
/// The CLI prints them; nothing in the core reacts to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerExpired {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    DurationChanged {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        remaining_secs: u64,
        total_secs: u64,
        formatted_time: String,
        progress_fraction: f64,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        session_id: String,
        subject: Subject,
        duration_min: u32,
        current_streak_days: u32,
        at: DateTime<Utc>,
    },
}
