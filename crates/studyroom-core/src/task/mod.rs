//! Study tasks.
//!
//! Tasks only matter to the statistics engine as the input to per-subject
//! completion ratios; persistence and activity logging go through
//! [`StatsEngine`](crate::stats::StatsEngine).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::subject::Subject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("'{s}' is not one of low, medium, high"),
            }),
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "started" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("'{s}' is not one of pending, in-progress, completed"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub subject: Subject,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| due < now)
    }
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub subject: Subject,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, subject: Subject) -> Self {
        Self {
            title: title.into(),
            description: None,
            subject,
            priority: Priority::default(),
            due_date: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn into_task(self, id: String, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            subject: self.subject,
            priority: self.priority,
            status: TaskStatus::Pending,
            due_date: self.due_date,
            created_at,
            completed_at: None,
        }
    }
}

/// Counts across the whole task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub overdue: u32,
}

pub fn summarize(tasks: &[Task], now: DateTime<Utc>) -> TaskSummary {
    let mut summary = TaskSummary::default();
    for task in tasks {
        summary.total += 1;
        match task.status {
            TaskStatus::Completed => summary.completed += 1,
            TaskStatus::Pending => summary.pending += 1,
            TaskStatus::InProgress => summary.in_progress += 1,
        }
        if task.is_overdue(now) {
            summary.overdue += 1;
        }
    }
    summary
}

/// Rounded percentage of `subject`'s tasks that are completed; 0 with no tasks.
pub fn subject_progress(tasks: &[Task], subject: Subject) -> u8 {
    let (total, completed) = tasks
        .iter()
        .filter(|t| t.subject == subject)
        .fold((0u32, 0u32), |(total, done), t| {
            (total + 1, done + u32::from(t.is_completed()))
        });
    if total == 0 {
        return 0;
    }
    (f64::from(completed) / f64::from(total) * 100.0).round() as u8
}

/// Progress for every subject.
pub fn progress_by_subject(tasks: &[Task]) -> BTreeMap<Subject, u8> {
    Subject::ALL
        .iter()
        .map(|&s| (s, subject_progress(tasks, s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(subject: Subject, status: TaskStatus) -> Task {
        let mut t = NewTask::new("t", subject).into_task("id".into(), Utc::now());
        t.status = status;
        t
    }

    #[test]
    fn progress_rounds() {
        let tasks = vec![
            task(Subject::Physics, TaskStatus::Completed),
            task(Subject::Physics, TaskStatus::Pending),
            task(Subject::Physics, TaskStatus::InProgress),
            task(Subject::Chemistry, TaskStatus::Completed),
            task(Subject::Chemistry, TaskStatus::Completed),
            task(Subject::Chemistry, TaskStatus::Pending),
        ];
        assert_eq!(subject_progress(&tasks, Subject::Physics), 33);
        assert_eq!(subject_progress(&tasks, Subject::Chemistry), 67);
        assert_eq!(subject_progress(&tasks, Subject::Mathematics), 0);

        let all = progress_by_subject(&tasks);
        assert_eq!(all.len(), 3);
        assert_eq!(all[&Subject::Chemistry], 67);
    }

    #[test]
    fn summary_counts_overdue_only_when_open() {
        let now = Utc::now();
        let mut late = task(Subject::Physics, TaskStatus::Pending);
        late.due_date = Some(now - Duration::days(1));
        let mut late_but_done = task(Subject::Physics, TaskStatus::Completed);
        late_but_done.due_date = Some(now - Duration::days(1));
        let mut future = task(Subject::Mathematics, TaskStatus::InProgress);
        future.due_date = Some(now + Duration::days(1));

        let s = summarize(&[late, late_but_done, future], now);
        assert_eq!(
            s,
            TaskSummary {
                total: 3,
                completed: 1,
                pending: 1,
                in_progress: 1,
                overdue: 1,
            }
        );
    }

    #[test]
    fn status_parsing() {
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("later".parse::<TaskStatus>().is_err());
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
