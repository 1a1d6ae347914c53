//! Planned study blocks on a calendar date.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::subject::Subject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Study,
    Revision,
    Practice,
    Break,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Study => "study",
            BlockKind::Revision => "revision",
            BlockKind::Practice => "practice",
            BlockKind::Break => "break",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(BlockKind::Study),
            "revision" | "review" => Ok(BlockKind::Revision),
            "practice" => Ok(BlockKind::Practice),
            "break" => Ok(BlockKind::Break),
            _ => Err(ValidationError::InvalidValue {
                field: "kind".into(),
                message: format!("'{s}' is not one of study, revision, practice, break"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub title: String,
    pub subject: Subject,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Fields supplied when planning a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleItem {
    pub title: String,
    pub subject: Subject,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: BlockKind,
    pub description: Option<String>,
}

impl NewScheduleItem {
    pub fn new(
        title: impl Into<String>,
        subject: Subject,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            title: title.into(),
            subject,
            date,
            start_time,
            end_time,
            kind: BlockKind::default(),
            description: None,
        }
    }

    pub fn with_kind(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// # Errors
    /// Blank title, or an end time not after the start time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_times(self.start_time, self.end_time)
    }

    pub(crate) fn into_item(self, id: String) -> ScheduleItem {
        ScheduleItem {
            id,
            title: self.title.trim().to_string(),
            subject: self.subject,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            kind: self.kind,
            description: self.description,
            completed: false,
        }
    }
}

/// Partial edit of a [`ScheduleItem`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleUpdate {
    pub title: Option<String>,
    pub subject: Option<Subject>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub kind: Option<BlockKind>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl ScheduleUpdate {
    pub fn completed(done: bool) -> Self {
        Self {
            completed: Some(done),
            ..Self::default()
        }
    }

    /// Apply to a copy of `item`, validating the result.
    ///
    /// # Errors
    /// Same rules as [`NewScheduleItem::validate`], checked on the merged item.
    pub fn apply(self, item: &ScheduleItem) -> Result<ScheduleItem, ValidationError> {
        let mut updated = item.clone();
        if let Some(title) = self.title {
            validate_title(&title)?;
            updated.title = title.trim().to_string();
        }
        if let Some(subject) = self.subject {
            updated.subject = subject;
        }
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(start) = self.start_time {
            updated.start_time = start;
        }
        if let Some(end) = self.end_time {
            updated.end_time = end;
        }
        if let Some(kind) = self.kind {
            updated.kind = kind;
        }
        if let Some(description) = self.description {
            updated.description = Some(description);
        }
        if let Some(done) = self.completed {
            updated.completed = done;
        }
        validate_times(updated.start_time, updated.end_time)?;
        Ok(updated)
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "title".into(),
            message: "must not be empty".into(),
        });
    }
    Ok(())
}

fn validate_times(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::InvalidValue {
            field: "end_time".into(),
            message: format!("{} is not after {}", end.format("%H:%M"), start.format("%H:%M")),
        });
    }
    Ok(())
}

/// Items planned for `date`, earliest first.
pub fn for_date(items: &[ScheduleItem], date: NaiveDate) -> Vec<ScheduleItem> {
    let mut day: Vec<ScheduleItem> = items.iter().filter(|i| i.date == date).cloned().collect();
    day.sort_by_key(|i| i.start_time);
    day
}
