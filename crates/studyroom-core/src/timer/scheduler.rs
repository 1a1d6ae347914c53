//! Tick sources for the countdown timer.
//!
//! The timer never sleeps on its own. It asks a [`TickScheduler`] for a
//! recurring one-second tick source and receives a [`TickHandle`] back; every
//! tick delivered to the timer carries that handle so ticks from a cancelled
//! source can be recognised and dropped.
//!
//! Two implementations:
//!
//! - [`ManualScheduler`]: no clock at all. Tests decide when ticks fire.
//! - [`IntervalScheduler`]: one tokio task per source, each running a
//!   `tokio::time::interval` and sending its handle over an mpsc channel.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one scheduled tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to start and stop recurring one-second ticks.
pub trait TickScheduler {
    /// Begin a new recurring tick source.
    fn schedule_tick(&mut self) -> TickHandle;

    /// Stop a tick source. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Fake scheduler driven entirely by the caller.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: BTreeSet<TickHandle>,
    scheduled_total: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles of every source that has not been cancelled.
    pub fn active_handles(&self) -> Vec<TickHandle> {
        self.active.iter().copied().collect()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of sources ever scheduled, cancelled or not.
    pub fn scheduled_total(&self) -> u64 {
        self.scheduled_total
    }

    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.active.contains(&handle)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        self.scheduled_total += 1;
        let handle = TickHandle(self.next_id);
        self.active.insert(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.active.remove(&handle);
    }
}

/// Real-time scheduler backed by tokio intervals.
///
/// `schedule_tick` spawns onto the ambient runtime, so it must be called from
/// within a tokio context. Ticks arrive on the receiver returned by
/// [`IntervalScheduler::new`]; the driving loop forwards them to the timer.
pub struct IntervalScheduler {
    period: Duration,
    tx: mpsc::UnboundedSender<TickHandle>,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
    next_id: u64,
}

impl IntervalScheduler {
    /// One-second scheduler plus the channel its ticks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickHandle>) {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<TickHandle>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            period,
            tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, rx)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let tx = self.tx.clone();
        let period = self.period;

        let task = tokio::spawn(async move {
            // First tick one full period from now, not immediately.
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });

        tracing::trace!(handle = handle.id(), "tick source scheduled");
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            tracing::trace!(handle = handle.id(), "tick source cancelled");
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<TickHandle>) -> Vec<TickHandle> {
        let mut out = Vec::new();
        while let Ok(h) = rx.try_recv() {
            out.push(h);
        }
        out
    }

    #[test]
    fn manual_scheduler_tracks_active_sources() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_tick();
        let b = sched.schedule_tick();
        assert_ne!(a, b);
        assert_eq!(sched.active_count(), 2);

        sched.cancel(a);
        assert!(!sched.is_active(a));
        assert!(sched.is_active(b));
        assert_eq!(sched.active_count(), 1);
        assert_eq!(sched.scheduled_total(), 2);
    }

    #[test]
    fn manual_scheduler_cancel_unknown_is_noop() {
        let mut sched = ManualScheduler::new();
        sched.cancel(TickHandle(42));
        assert_eq!(sched.active_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_scheduler_fires_once_per_period() {
        let (mut sched, mut rx) = IntervalScheduler::new();
        let handle = sched.schedule_tick();

        tokio::time::sleep(Duration::from_millis(3500)).await;

        let ticks = drain(&mut rx);
        assert_eq!(ticks, vec![handle, handle, handle]);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_scheduler_cancel_stops_ticks() {
        let (mut sched, mut rx) = IntervalScheduler::new();
        let handle = sched.schedule_tick();
        sched.cancel(handle);
        assert_eq!(sched.active_count(), 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
