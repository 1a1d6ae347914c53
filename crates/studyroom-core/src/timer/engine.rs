//! Countdown timer state machine.
//!
//! The timer owns a [`TickScheduler`] and at most one live tick source. Ticks
//! are delivered back through [`CountdownTimer::on_tick`] together with the
//! handle of the source that produced them; anything other than the current
//! handle is dropped.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!         Expired          (any) -> Idle on reset()/stop()
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = CountdownTimer::new(ManualScheduler::new());
//! timer.start();
//! timer.advance_secs(60);
//! let run = timer.stop(); // hand to StatsEngine::record_run
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scheduler::{ManualScheduler, TickHandle, TickScheduler};
use crate::events::Event;

/// Duration a fresh timer starts with (25 minutes).
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero on its own.
    Expired,
}

/// Plain-data view of a timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub status: TimerStatus,
}

impl TimerState {
    fn new(total_secs: u64) -> Self {
        Self {
            remaining_secs: total_secs,
            total_secs,
            status: TimerStatus::Idle,
        }
    }

    pub fn running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    /// 0.0 .. 1.0 share of the run already elapsed.
    pub fn progress_fraction(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        let elapsed = self.total_secs.saturating_sub(self.remaining_secs);
        (elapsed as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    pub fn formatted_time(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Render seconds as `MM:SS`, or `HH:MM:SS` from one hour up.
pub fn format_clock(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// A finished (stopped) run, ready to be recorded as a study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedRun {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Seconds actually counted down; paused time is excluded.
    pub elapsed_secs: u64,
    pub total_secs: u64,
}

impl CompletedRun {
    /// Elapsed time rounded to the nearest whole minute.
    pub fn duration_min(&self) -> u32 {
        ((self.elapsed_secs + 30) / 60) as u32
    }
}

/// Countdown timer driven by an injected tick scheduler.
pub struct CountdownTimer<S: TickScheduler> {
    state: TimerState,
    scheduler: S,
    active_tick: Option<TickHandle>,
    started_at: Option<DateTime<Utc>>,
}

impl<S: TickScheduler> CountdownTimer<S> {
    /// Create an idle timer with the default 25-minute duration.
    pub fn new(scheduler: S) -> Self {
        Self::with_duration(scheduler, DEFAULT_DURATION_SECS)
    }

    /// Create an idle timer. A zero duration falls back to the default.
    pub fn with_duration(scheduler: S, total_secs: u64) -> Self {
        let total_secs = if total_secs == 0 {
            DEFAULT_DURATION_SECS
        } else {
            total_secs
        };
        Self {
            state: TimerState::new(total_secs),
            scheduler,
            active_tick: None,
            started_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.state.total_secs
    }

    pub fn running(&self) -> bool {
        self.state.running()
    }

    pub fn paused(&self) -> bool {
        self.state.paused()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.state.progress_fraction()
    }

    pub fn formatted_time(&self) -> String {
        self.state.formatted_time()
    }

    /// Handle of the live tick source, if any.
    pub fn active_tick(&self) -> Option<TickHandle> {
        self.active_tick
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.state.status,
            remaining_secs: self.state.remaining_secs,
            total_secs: self.state.total_secs,
            formatted_time: self.formatted_time(),
            progress_fraction: self.progress_fraction(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume counting down. No-op while already running, after
    /// expiry, or with nothing left on the clock.
    pub fn start(&mut self) -> Option<Event> {
        match self.state.status {
            TimerStatus::Running | TimerStatus::Expired => None,
            TimerStatus::Idle | TimerStatus::Paused => {
                if self.state.remaining_secs == 0 {
                    return None;
                }
                let resuming = self.state.status == TimerStatus::Paused;

                // Only one source may ever be live.
                self.cancel_tick();
                self.active_tick = Some(self.scheduler.schedule_tick());
                self.state.status = TimerStatus::Running;
                let now = Utc::now();
                if self.started_at.is_none() {
                    self.started_at = Some(now);
                }
                tracing::debug!(
                    remaining_secs = self.state.remaining_secs,
                    resuming,
                    "timer running"
                );

                if resuming {
                    Some(Event::TimerResumed {
                        remaining_secs: self.state.remaining_secs,
                        at: now,
                    })
                } else {
                    Some(Event::TimerStarted {
                        remaining_secs: self.state.remaining_secs,
                        total_secs: self.state.total_secs,
                        at: now,
                    })
                }
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state.status {
            TimerStatus::Running => {
                self.cancel_tick();
                self.state.status = TimerStatus::Paused;
                tracing::debug!(remaining_secs = self.state.remaining_secs, "timer paused");
                Some(Event::TimerPaused {
                    remaining_secs: self.state.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Back to `Idle` with the full duration restored.
    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_tick();
        self.state.remaining_secs = self.state.total_secs;
        self.state.status = TimerStatus::Idle;
        self.started_at = None;
        Some(Event::TimerReset {
            total_secs: self.state.total_secs,
            at: Utc::now(),
        })
    }

    /// Change the run length. Rejected (returns `None`) for zero seconds or
    /// while a run is in progress.
    pub fn set_duration(&mut self, total_secs: u64) -> Option<Event> {
        if total_secs == 0 {
            tracing::debug!("ignoring zero-length duration");
            return None;
        }
        if matches!(self.state.status, TimerStatus::Running | TimerStatus::Paused) {
            tracing::debug!(status = ?self.state.status, "duration change rejected mid-run");
            return None;
        }
        self.cancel_tick();
        self.state = TimerState::new(total_secs);
        self.started_at = None;
        Some(Event::DurationChanged {
            total_secs,
            at: Utc::now(),
        })
    }

    /// Deliver one tick. Returns `Some(Event::TimerExpired)` when the
    /// countdown reaches zero.
    pub fn on_tick(&mut self, handle: TickHandle) -> Option<Event> {
        if self.state.status != TimerStatus::Running || self.active_tick != Some(handle) {
            tracing::trace!(handle = handle.id(), "dropping stale tick");
            return None;
        }

        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            return None;
        }

        self.cancel_tick();
        self.state.status = TimerStatus::Expired;
        tracing::debug!(total_secs = self.state.total_secs, "timer expired");
        Some(Event::TimerExpired {
            total_secs: self.state.total_secs,
            at: Utc::now(),
        })
    }

    /// End the current run and reset to `Idle`.
    ///
    /// Returns `None` if the timer was never started since the last reset.
    pub fn stop(&mut self) -> Option<CompletedRun> {
        let started_at = self.started_at?;
        let run = CompletedRun {
            started_at,
            ended_at: Utc::now(),
            elapsed_secs: self
                .state
                .total_secs
                .saturating_sub(self.state.remaining_secs),
            total_secs: self.state.total_secs,
        };
        self.reset();
        Some(run)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.active_tick.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl CountdownTimer<ManualScheduler> {
    /// Simulate `secs` seconds of wall-clock time: every live source fires
    /// once per second. Returns any events produced along the way.
    pub fn advance_secs(&mut self, secs: u64) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..secs {
            for handle in self.scheduler.active_handles() {
                events.extend(self.on_tick(handle));
            }
        }
        events
    }
}

impl<S: TickScheduler> Drop for CountdownTimer<S> {
    fn drop(&mut self) {
        self.cancel_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(secs: u64) -> CountdownTimer<ManualScheduler> {
        CountdownTimer::with_duration(ManualScheduler::new(), secs)
    }

    #[test]
    fn start_pause_resume() {
        let mut t = timer(60);
        assert_eq!(t.status(), TimerStatus::Idle);

        assert!(matches!(t.start(), Some(Event::TimerStarted { .. })));
        assert!(t.running());

        assert!(t.pause().is_some());
        assert!(t.paused());
        assert_eq!(t.scheduler().active_count(), 0);

        assert!(matches!(t.start(), Some(Event::TimerResumed { .. })));
        assert!(t.running());
        assert_eq!(t.scheduler().active_count(), 1);
    }

    #[test]
    fn double_start_keeps_single_source() {
        let mut t = timer(60);
        assert!(t.start().is_some());
        assert!(t.start().is_none());
        assert_eq!(t.scheduler().active_count(), 1);
        assert_eq!(t.scheduler().scheduled_total(), 1);

        t.advance_secs(1);
        assert_eq!(t.remaining_secs(), 59);
    }

    #[test]
    fn stale_tick_after_pause_is_ignored() {
        let mut t = timer(60);
        t.start();
        let old = t.active_tick().unwrap();
        t.pause();
        t.start();

        assert!(t.on_tick(old).is_none());
        assert_eq!(t.remaining_secs(), 60);

        let current = t.active_tick().unwrap();
        t.on_tick(current);
        assert_eq!(t.remaining_secs(), 59);
    }

    #[test]
    fn tick_while_paused_does_nothing() {
        let mut t = timer(10);
        t.start();
        let handle = t.active_tick().unwrap();
        t.pause();
        assert!(t.on_tick(handle).is_none());
        assert_eq!(t.remaining_secs(), 10);
    }

    #[test]
    fn expires_at_zero_and_cancels_source() {
        let mut t = timer(3);
        t.start();
        let events = t.advance_secs(3);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::TimerExpired { total_secs: 3, .. }));
        assert_eq!(t.status(), TimerStatus::Expired);
        assert!(!t.running());
        assert_eq!(t.scheduler().active_count(), 0);

        // Further time passing changes nothing.
        t.advance_secs(5);
        assert_eq!(t.remaining_secs(), 0);
    }

    #[test]
    fn start_after_expiry_is_noop() {
        let mut t = timer(1);
        t.start();
        t.advance_secs(1);
        assert!(t.start().is_none());
        assert_eq!(t.scheduler().active_count(), 0);
    }

    #[test]
    fn reset_restores_total_from_any_state() {
        let mut t = timer(120);
        t.start();
        t.advance_secs(30);
        t.pause();
        t.reset();
        assert_eq!(t.remaining_secs(), 120);
        assert_eq!(t.status(), TimerStatus::Idle);
        assert!(t.started_at().is_none());
        assert_eq!(t.scheduler().active_count(), 0);
    }

    #[test]
    fn set_duration_only_when_idle() {
        let mut t = timer(60);
        assert!(t.set_duration(300).is_some());
        assert_eq!(t.total_secs(), 300);
        assert_eq!(t.remaining_secs(), 300);

        t.start();
        assert!(t.set_duration(10).is_none());
        assert_eq!(t.total_secs(), 300);

        t.pause();
        assert!(t.set_duration(10).is_none());
        assert_eq!(t.total_secs(), 300);
    }

    #[test]
    fn set_duration_rejects_zero() {
        let mut t = timer(60);
        assert!(t.set_duration(0).is_none());
        assert_eq!(t.total_secs(), 60);
    }

    #[test]
    fn set_duration_allowed_after_expiry() {
        let mut t = timer(1);
        t.start();
        t.advance_secs(1);
        assert!(t.set_duration(90).is_some());
        assert_eq!(t.status(), TimerStatus::Idle);
        assert_eq!(t.remaining_secs(), 90);
    }

    #[test]
    fn zero_duration_constructor_falls_back_to_default() {
        let t = timer(0);
        assert_eq!(t.total_secs(), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn progress_fraction_tracks_elapsed() {
        let mut t = timer(100);
        assert_eq!(t.progress_fraction(), 0.0);
        t.start();
        t.advance_secs(25);
        assert!((t.progress_fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "01:00:00");
        assert_eq!(format_clock(3725), "01:02:05");
    }

    #[test]
    fn stop_reports_counted_seconds() {
        let mut t = timer(1500);
        t.start();
        t.advance_secs(600);
        t.pause();
        let run = t.stop().unwrap();
        assert_eq!(run.elapsed_secs, 600);
        assert_eq!(run.duration_min(), 10);
        assert_eq!(t.status(), TimerStatus::Idle);
        assert_eq!(t.remaining_secs(), 1500);
    }

    #[test]
    fn stop_without_start_returns_none() {
        let mut t = timer(60);
        assert!(t.stop().is_none());
    }

    #[test]
    fn completed_run_rounds_to_nearest_minute() {
        let now = Utc::now();
        let run = |elapsed_secs| CompletedRun {
            started_at: now,
            ended_at: now,
            elapsed_secs,
            total_secs: 3600,
        };
        assert_eq!(run(29).duration_min(), 0);
        assert_eq!(run(30).duration_min(), 1);
        assert_eq!(run(89).duration_min(), 1);
        assert_eq!(run(90).duration_min(), 2);
    }

    #[test]
    fn snapshot_reports_state() {
        let t = timer(1500);
        match t.snapshot() {
            Event::StateSnapshot {
                status,
                remaining_secs,
                formatted_time,
                ..
            } => {
                assert_eq!(status, TimerStatus::Idle);
                assert_eq!(remaining_secs, 1500);
                assert_eq!(formatted_time, "25:00");
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
