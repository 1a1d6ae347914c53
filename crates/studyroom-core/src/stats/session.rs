use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::Subject;

/// One recorded block of study time. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub subject: Subject,
    pub duration_min: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Aggregate statistics for the single local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Sum of every recorded session's `duration_min`.
    #[serde(default)]
    pub total_study_time_min: u64,
    #[serde(default)]
    pub current_streak_days: u32,
    #[serde(default)]
    pub last_study_date: Option<NaiveDate>,
    #[serde(default = "zero_progress")]
    pub subject_progress: BTreeMap<Subject, u8>,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
}

fn zero_progress() -> BTreeMap<Subject, u8> {
    Subject::ALL.iter().map(|&s| (s, 0)).collect()
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_study_time_min: 0,
            current_streak_days: 0,
            last_study_date: None,
            subject_progress: zero_progress(),
            total_tasks: 0,
            completed_tasks: 0,
        }
    }
}
