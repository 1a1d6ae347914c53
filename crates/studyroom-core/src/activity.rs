//! Bounded feed of recent user actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::Subject;

/// Oldest entries are dropped beyond this many.
pub const MAX_ACTIVITIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    TaskCreated,
    TaskCompleted,
    StudySession,
    ResourceAdded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub description: String,
    #[serde(default)]
    pub subject: Option<Subject>,
    pub timestamp: DateTime<Utc>,
}

/// Append `entry`, trimming the front so at most [`MAX_ACTIVITIES`] remain.
pub fn push_capped(log: &mut Vec<Activity>, entry: Activity) {
    log.push(entry);
    if log.len() > MAX_ACTIVITIES {
        let excess = log.len() - MAX_ACTIVITIES;
        log.drain(..excess);
    }
}

/// Newest first, at most `limit` entries.
pub fn most_recent(mut log: Vec<Activity>, limit: usize) -> Vec<Activity> {
    log.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    log.truncate(limit);
    log
}
