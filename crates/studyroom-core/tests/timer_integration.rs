//! Integration tests for the countdown timer.

use proptest::prelude::*;
use studyroom_core::timer::{CountdownTimer, ManualScheduler, TimerStatus};
use studyroom_core::Event;

fn pomodoro() -> CountdownTimer<ManualScheduler> {
    CountdownTimer::with_duration(ManualScheduler::new(), 1500)
}

#[test]
fn test_full_run_expires() {
    let mut timer = pomodoro();
    timer.start();

    let events = timer.advance_secs(1500);

    assert_eq!(timer.status(), TimerStatus::Expired);
    assert_eq!(timer.remaining_secs(), 0);
    assert_eq!(timer.progress_fraction(), 1.0);
    assert_eq!(timer.formatted_time(), "00:00");
    assert!(matches!(events.as_slice(), [Event::TimerExpired { total_secs: 1500, .. }]));
}

#[test]
fn test_pause_midway_then_resume_to_expiry() {
    let mut timer = pomodoro();
    timer.start();
    timer.advance_secs(600);
    timer.pause();
    assert_eq!(timer.remaining_secs(), 900);

    // Time passing while paused does not count.
    timer.advance_secs(120);
    assert_eq!(timer.remaining_secs(), 900);

    timer.start();
    timer.advance_secs(900);
    assert_eq!(timer.status(), TimerStatus::Expired);
}

#[test]
fn test_double_start_one_decrement_per_second() {
    let mut timer = pomodoro();
    timer.start();
    timer.start();
    assert_eq!(timer.scheduler().active_count(), 1);

    timer.advance_secs(10);
    assert_eq!(timer.remaining_secs(), 1490);
}

#[test]
fn test_stop_after_expiry_reports_full_run() {
    let mut timer = pomodoro();
    timer.start();
    timer.advance_secs(1500);
    let run = timer.stop().unwrap();
    assert_eq!(run.elapsed_secs, 1500);
    assert_eq!(run.duration_min(), 25);
    assert_eq!(timer.status(), TimerStatus::Idle);
}

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Reset,
    Tick(u64),
    SetDuration(u64),
    Stop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::Pause),
        Just(Op::Reset),
        (0u64..200).prop_map(Op::Tick),
        (0u64..400).prop_map(Op::SetDuration),
        Just(Op::Stop),
    ]
}

proptest! {
    #[test]
    fn remaining_never_exceeds_total(ops in prop::collection::vec(op(), 0..60)) {
        let mut timer = CountdownTimer::with_duration(ManualScheduler::new(), 120);
        for op in ops {
            match op {
                Op::Start => { timer.start(); }
                Op::Pause => { timer.pause(); }
                Op::Reset => { timer.reset(); }
                Op::Tick(n) => { timer.advance_secs(n); }
                Op::SetDuration(n) => { timer.set_duration(n); }
                Op::Stop => { timer.stop(); }
            }
            prop_assert!(timer.remaining_secs() <= timer.total_secs());
            prop_assert!(timer.total_secs() > 0);
            prop_assert!(timer.scheduler().active_count() <= 1);
            prop_assert_eq!(timer.scheduler().active_count() == 1, timer.running());
            let p = timer.progress_fraction();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn reset_always_restores_total(ops in prop::collection::vec(op(), 0..40)) {
        let mut timer = CountdownTimer::with_duration(ManualScheduler::new(), 90);
        for op in ops {
            match op {
                Op::Start => { timer.start(); }
                Op::Pause => { timer.pause(); }
                Op::Tick(n) => { timer.advance_secs(n); }
                _ => {}
            }
        }
        timer.reset();
        prop_assert_eq!(timer.remaining_secs(), timer.total_secs());
        prop_assert_eq!(timer.status(), TimerStatus::Idle);
        prop_assert_eq!(timer.scheduler().active_count(), 0);
    }
}
