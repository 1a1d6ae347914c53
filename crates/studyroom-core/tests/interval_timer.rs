//! Drives a real `IntervalScheduler` under tokio's paused clock.

use std::time::Duration;

use studyroom_core::timer::{CountdownTimer, IntervalScheduler, TimerStatus};

#[tokio::test(start_paused = true)]
async fn test_countdown_on_tokio_intervals() {
    let (scheduler, mut ticks) = IntervalScheduler::new();
    let mut timer = CountdownTimer::with_duration(scheduler, 5);
    timer.start();

    while let Some(handle) = ticks.recv().await {
        if timer.on_tick(handle).is_some() {
            break;
        }
    }

    assert_eq!(timer.status(), TimerStatus::Expired);
    assert_eq!(timer.remaining_secs(), 0);
    assert_eq!(timer.scheduler().active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_double_start_single_interval() {
    let (scheduler, mut ticks) = IntervalScheduler::new();
    let mut timer = CountdownTimer::with_duration(scheduler, 60);
    timer.start();
    timer.start();
    assert_eq!(timer.scheduler().active_count(), 1);

    tokio::time::sleep(Duration::from_millis(3500)).await;
    while let Ok(handle) = ticks.try_recv() {
        timer.on_tick(handle);
    }
    assert_eq!(timer.remaining_secs(), 57);
}

#[tokio::test(start_paused = true)]
async fn test_pause_stops_decrements() {
    let (scheduler, mut ticks) = IntervalScheduler::new();
    let mut timer = CountdownTimer::with_duration(scheduler, 60);
    timer.start();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    while let Ok(handle) = ticks.try_recv() {
        timer.on_tick(handle);
    }
    assert_eq!(timer.remaining_secs(), 58);
    timer.pause();

    tokio::time::sleep(Duration::from_secs(10)).await;
    while let Ok(handle) = ticks.try_recv() {
        timer.on_tick(handle);
    }
    assert_eq!(timer.remaining_secs(), 58);
    assert_eq!(timer.scheduler().active_count(), 0);
}
