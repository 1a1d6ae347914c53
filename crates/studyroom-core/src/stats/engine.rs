//! Study statistics engine.
//!
//! Owns the session log, the aggregate [`UserStats`] record, the task list
//! and the activity feed, all kept in an injected [`Store`]. Reads that fail
//! fall back to empty defaults (see [`storage::load`]), so no method here
//! returns an error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::daily::DailyTotals;
use super::session::{StudySession, UserStats};
use super::streak::advance_streak;
use crate::activity::{self, Activity, ActivityKind};
use crate::clock::{Clock, SystemClock};
use crate::storage::{self, keys, Store};
use crate::subject::Subject;
use crate::task::{self, NewTask, Task, TaskStatus, TaskSummary};
use crate::timer::CompletedRun;

pub struct StatsEngine<S: Store, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: Store> StatsEngine<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: Store, C: Clock> StatsEngine<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Append a session and update totals and streak.
    ///
    /// Sessions shorter than one minute are discarded and `None` is returned.
    pub fn record_session(
        &self,
        subject: Subject,
        duration_min: u32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        notes: Option<String>,
    ) -> Option<StudySession> {
        if duration_min < 1 {
            tracing::debug!(%subject, "discarding sub-minute session");
            return None;
        }

        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            subject,
            duration_min,
            start_time,
            end_time,
            notes,
        };

        let mut sessions: Vec<StudySession> = storage::load(&self.store, keys::SESSIONS);
        sessions.push(session.clone());
        storage::save(&self.store, keys::SESSIONS, &sessions);

        let mut stats = self.stats();
        let today = self.clock.today();
        stats.total_study_time_min = stats
            .total_study_time_min
            .saturating_add(u64::from(duration_min));
        stats.current_streak_days =
            advance_streak(stats.current_streak_days, stats.last_study_date, today);
        stats.last_study_date = Some(today);
        storage::save(&self.store, keys::USER_STATS, &stats);

        self.log_activity(
            ActivityKind::StudySession,
            format!("Studied {subject} for {duration_min} minutes"),
            Some(subject),
        );

        tracing::info!(
            %subject,
            duration_min,
            streak = stats.current_streak_days,
            "study session recorded"
        );
        Some(session)
    }

    /// Record a stopped timer run. The note names its length and, when the
    /// run came from a preset, the preset's label.
    pub fn record_run(
        &self,
        subject: Subject,
        run: &CompletedRun,
        preset_label: Option<&str>,
    ) -> Option<StudySession> {
        let minutes = run.duration_min();
        let note = match preset_label {
            Some(label) => format!("{minutes} minute {label} session"),
            None => format!("{minutes} minute session"),
        };
        self.record_session(subject, minutes, run.started_at, run.ended_at, Some(note))
    }

    pub fn sessions(&self) -> Vec<StudySession> {
        storage::load(&self.store, keys::SESSIONS)
    }

    /// Sessions whose start falls on today's date.
    pub fn todays_sessions(&self) -> Vec<StudySession> {
        let today = self.clock.today();
        self.sessions()
            .into_iter()
            .filter(|s| self.clock.date_of(s.start_time) == today)
            .collect()
    }

    pub fn sessions_for(&self, subject: Subject) -> Vec<StudySession> {
        self.sessions()
            .into_iter()
            .filter(|s| s.subject == subject)
            .collect()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn stats(&self) -> UserStats {
        storage::load(&self.store, keys::USER_STATS)
    }

    /// Rounded completion percentage of `subject`'s tasks.
    pub fn subject_progress(&self, subject: Subject) -> u8 {
        task::subject_progress(&self.tasks(), subject)
    }

    /// Per-day minutes for the last `days` days ending today, oldest first.
    pub fn daily_totals(&self, days: usize) -> DailyTotals {
        let mut by_day = HashMap::new();
        for session in self.sessions() {
            *by_day.entry(self.clock.date_of(session.start_time)).or_insert(0) +=
                u64::from(session.duration_min);
        }
        DailyTotals::new(by_day, self.clock.today(), days)
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn tasks(&self) -> Vec<Task> {
        storage::load(&self.store, keys::TASKS)
    }

    pub fn tasks_for(&self, subject: Subject) -> Vec<Task> {
        self.tasks()
            .into_iter()
            .filter(|t| t.subject == subject)
            .collect()
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.tasks().into_iter().find(|t| t.id == id)
    }

    pub fn add_task(&self, new_task: NewTask) -> Task {
        let task = new_task.into_task(Uuid::new_v4().to_string(), self.clock.now());
        let mut tasks = self.tasks();
        tasks.push(task.clone());
        storage::save(&self.store, keys::TASKS, &tasks);

        self.log_activity(
            ActivityKind::TaskCreated,
            format!("Created task \"{}\"", task.title),
            Some(task.subject),
        );
        self.refresh_task_stats(&tasks);
        task
    }

    /// Move a task to `status`. Returns `None` for an unknown id.
    pub fn set_task_status(&self, id: &str, status: TaskStatus) -> Option<Task> {
        let mut tasks = self.tasks();
        let task = tasks.iter_mut().find(|t| t.id == id)?;

        let newly_completed = status == TaskStatus::Completed && !task.is_completed();
        task.status = status;
        if newly_completed {
            task.completed_at = Some(self.clock.now());
        } else if status != TaskStatus::Completed {
            task.completed_at = None;
        }
        let updated = task.clone();
        storage::save(&self.store, keys::TASKS, &tasks);

        if newly_completed {
            self.log_activity(
                ActivityKind::TaskCompleted,
                format!("Completed task \"{}\"", updated.title),
                Some(updated.subject),
            );
        }
        self.refresh_task_stats(&tasks);
        Some(updated)
    }

    /// Remove a task. Returns `false` if no task had that id.
    pub fn delete_task(&self, id: &str) -> bool {
        let mut tasks = self.tasks();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return false;
        }
        storage::save(&self.store, keys::TASKS, &tasks);
        self.refresh_task_stats(&tasks);
        true
    }

    pub fn task_summary(&self) -> TaskSummary {
        task::summarize(&self.tasks(), self.clock.now())
    }

    // ── Activity ─────────────────────────────────────────────────────

    /// Newest first.
    pub fn recent_activity(&self, limit: usize) -> Vec<Activity> {
        activity::most_recent(storage::load(&self.store, keys::ACTIVITIES), limit)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn refresh_task_stats(&self, tasks: &[Task]) {
        let mut stats = self.stats();
        stats.total_tasks = tasks.len() as u32;
        stats.completed_tasks = tasks.iter().filter(|t| t.is_completed()).count() as u32;
        stats.subject_progress = task::progress_by_subject(tasks);
        storage::save(&self.store, keys::USER_STATS, &stats);
    }

    pub(super) fn log_activity(
        &self,
        kind: ActivityKind,
        description: String,
        subject: Option<Subject>,
    ) {
        let mut log: Vec<Activity> = storage::load(&self.store, keys::ACTIVITIES);
        activity::push_capped(
            &mut log,
            Activity {
                id: Uuid::new_v4().to_string(),
                kind,
                description,
                subject,
                timestamp: self.clock.now(),
            },
        );
        storage::save(&self.store, keys::ACTIVITIES, &log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::{Duration, NaiveDate};

    fn engine() -> StatsEngine<MemoryStore, FixedClock> {
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        StatsEngine::with_clock(MemoryStore::new(), FixedClock::at_date(date))
    }

    fn record(e: &StatsEngine<MemoryStore, FixedClock>, subject: Subject, minutes: u32) {
        let start = e.clock().now();
        e.record_session(
            subject,
            minutes,
            start,
            start + Duration::minutes(i64::from(minutes)),
            None,
        );
    }

    #[test]
    fn fresh_physics_session() {
        let e = engine();
        let t0 = e.clock().now();
        let session = e
            .record_session(Subject::Physics, 45, t0, t0 + Duration::minutes(45), None)
            .unwrap();
        assert_eq!(session.duration_min, 45);

        let stats = e.stats();
        assert_eq!(stats.total_study_time_min, 45);
        assert_eq!(stats.current_streak_days, 1);
        assert_eq!(stats.last_study_date, Some(e.clock().today()));
        assert_eq!(e.sessions().len(), 1);
    }

    #[test]
    fn sub_minute_session_is_noop() {
        let e = engine();
        let t0 = e.clock().now();
        assert!(e
            .record_session(Subject::Chemistry, 0, t0, t0, None)
            .is_none());
        assert!(e.sessions().is_empty());
        assert_eq!(e.stats(), UserStats::default());
        assert!(e.recent_activity(10).is_empty());
    }

    #[test]
    fn streak_same_day_then_next_day_then_gap() {
        let e = engine();
        record(&e, Subject::Physics, 10);
        record(&e, Subject::Physics, 10);
        assert_eq!(e.stats().current_streak_days, 1);

        e.clock().advance_days(1);
        record(&e, Subject::Mathematics, 10);
        assert_eq!(e.stats().current_streak_days, 2);

        e.clock().advance_days(3);
        record(&e, Subject::Mathematics, 10);
        assert_eq!(e.stats().current_streak_days, 1);
        assert_eq!(e.stats().total_study_time_min, 40);
    }

    #[test]
    fn record_run_rounds_and_annotates() {
        let e = engine();
        let now = e.clock().now();
        let run = CompletedRun {
            started_at: now,
            ended_at: now + Duration::minutes(25),
            elapsed_secs: 1500,
            total_secs: 1500,
        };
        let session = e.record_run(Subject::Chemistry, &run, None).unwrap();
        assert_eq!(session.duration_min, 25);
        assert_eq!(session.notes.as_deref(), Some("25 minute session"));

        let short = CompletedRun {
            elapsed_secs: 20,
            ..run
        };
        assert!(e.record_run(Subject::Chemistry, &short, None).is_none());
    }

    #[test]
    fn record_run_names_the_preset() {
        let e = engine();
        let now = e.clock().now();
        let run = CompletedRun {
            started_at: now,
            ended_at: now + Duration::minutes(45),
            elapsed_secs: 2700,
            total_secs: 2700,
        };
        let session = e
            .record_run(Subject::Physics, &run, Some("Focus Block"))
            .unwrap();
        assert_eq!(
            session.notes.as_deref(),
            Some("45 minute Focus Block session")
        );
    }

    #[test]
    fn daily_totals_window_never_passes_today() {
        let e = engine();
        let totals = e.daily_totals(100_000_000);
        let today = e.clock().today();
        assert_eq!(
            totals.len() as i64,
            (today - chrono::NaiveDate::MIN).num_days() + 1
        );
    }

    #[test]
    fn todays_and_subject_filters() {
        let e = engine();
        record(&e, Subject::Physics, 10);
        e.clock().advance_days(1);
        record(&e, Subject::Chemistry, 20);
        record(&e, Subject::Physics, 5);

        assert_eq!(e.todays_sessions().len(), 2);
        assert_eq!(e.sessions_for(Subject::Physics).len(), 2);
        assert_eq!(e.sessions_for(Subject::Mathematics).len(), 0);
    }

    #[test]
    fn daily_totals_groups_by_date() {
        let e = engine();
        record(&e, Subject::Physics, 10);
        record(&e, Subject::Physics, 15);
        e.clock().advance_days(2);
        record(&e, Subject::Chemistry, 30);

        let totals: Vec<u64> = e.daily_totals(4).map(|d| d.total_min).collect();
        assert_eq!(totals, vec![0, 25, 0, 30]);
    }

    #[test]
    fn task_lifecycle_updates_progress() {
        let e = engine();
        let a = e.add_task(NewTask::new("Kinematics", Subject::Physics));
        let _b = e.add_task(NewTask::new("Optics", Subject::Physics));
        assert_eq!(e.stats().total_tasks, 2);
        assert_eq!(e.subject_progress(Subject::Physics), 0);

        let done = e.set_task_status(&a.id, TaskStatus::Completed).unwrap();
        assert!(done.completed_at.is_some());
        assert_eq!(e.subject_progress(Subject::Physics), 50);

        let stats = e.stats();
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.subject_progress[&Subject::Physics], 50);

        assert!(e.delete_task(&a.id));
        assert!(!e.delete_task(&a.id));
        assert_eq!(e.stats().subject_progress[&Subject::Physics], 0);
        assert_eq!(e.stats().total_tasks, 1);
    }

    #[test]
    fn reopening_task_clears_completion() {
        let e = engine();
        let t = e.add_task(NewTask::new("Organic", Subject::Chemistry));
        e.set_task_status(&t.id, TaskStatus::Completed);
        let reopened = e.set_task_status(&t.id, TaskStatus::InProgress).unwrap();
        assert!(reopened.completed_at.is_none());
        assert_eq!(e.subject_progress(Subject::Chemistry), 0);
    }

    #[test]
    fn unknown_task_id() {
        let e = engine();
        assert!(e.set_task_status("nope", TaskStatus::Completed).is_none());
        assert!(e.task("nope").is_none());
    }

    #[test]
    fn task_events_do_not_touch_streak() {
        let e = engine();
        let t = e.add_task(NewTask::new("Limits", Subject::Mathematics));
        e.set_task_status(&t.id, TaskStatus::Completed);
        assert_eq!(e.stats().current_streak_days, 0);
        assert!(e.stats().last_study_date.is_none());
    }

    #[test]
    fn activity_feed_records_actions() {
        let e = engine();
        let t = e.add_task(NewTask::new("Vectors", Subject::Mathematics));
        e.clock().advance(Duration::minutes(1));
        e.set_task_status(&t.id, TaskStatus::Completed);
        e.clock().advance(Duration::minutes(1));
        record(&e, Subject::Mathematics, 30);

        let recent = e.recent_activity(10);
        let kinds: Vec<_> = recent.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityKind::StudySession,
                ActivityKind::TaskCompleted,
                ActivityKind::TaskCreated,
            ]
        );
        assert_eq!(recent[0].description, "Studied Mathematics for 30 minutes");
        assert_eq!(recent[2].description, "Created task \"Vectors\"");
    }

    #[test]
    fn corrupted_stats_fall_back_to_defaults() {
        let e = engine();
        e.store().write(keys::USER_STATS, "][").unwrap();
        e.store().write(keys::SESSIONS, "{\"oops\":true}").unwrap();
        assert_eq!(e.stats(), UserStats::default());
        assert!(e.sessions().is_empty());

        record(&e, Subject::Physics, 5);
        assert_eq!(e.stats().total_study_time_min, 5);
        assert_eq!(e.sessions().len(), 1);
    }
}
