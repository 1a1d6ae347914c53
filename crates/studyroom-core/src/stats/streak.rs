//! Day-based study streak.
//!
//! The streak is advanced incrementally from the last recorded study date
//! only. It is never rebuilt from the session log, so sessions recorded out
//! of chronological order do not repair a broken streak.

use chrono::NaiveDate;

/// Streak value after studying on `today`.
///
/// - already studied today: unchanged
/// - last studied yesterday: +1
/// - anything else (gap, first session, clock moved backwards): 1
pub fn advance_streak(current: u32, last_study: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last_study {
        Some(last) if last == today => current,
        Some(last) if today.pred_opt() == Some(last) => current.saturating_add(1),
        _ => 1,
    }
}

/// Whether a streak ending on `last_study` is still alive on `today`,
/// i.e. the user can still extend it by studying today.
pub fn is_streak_alive(last_study: Option<NaiveDate>, today: NaiveDate) -> bool {
    match last_study {
        Some(last) => last == today || today.pred_opt() == Some(last),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn first_session_starts_at_one() {
        assert_eq!(advance_streak(0, None, d(2024, 5, 1)), 1);
    }

    #[test]
    fn same_day_is_unchanged() {
        assert_eq!(advance_streak(4, Some(d(2024, 5, 1)), d(2024, 5, 1)), 4);
    }

    #[test]
    fn consecutive_day_increments() {
        assert_eq!(advance_streak(4, Some(d(2024, 5, 1)), d(2024, 5, 2)), 5);
        // Across a month boundary.
        assert_eq!(advance_streak(1, Some(d(2024, 2, 29)), d(2024, 3, 1)), 2);
    }

    #[test]
    fn gap_resets_to_one() {
        assert_eq!(advance_streak(9, Some(d(2024, 5, 1)), d(2024, 5, 3)), 1);
        assert_eq!(advance_streak(9, Some(d(2024, 5, 1)), d(2024, 5, 4)), 1);
    }

    #[test]
    fn clock_moving_backwards_resets() {
        assert_eq!(advance_streak(3, Some(d(2024, 5, 5)), d(2024, 5, 4)), 1);
    }

    #[test]
    fn streak_alive_window() {
        let today = d(2024, 5, 10);
        assert!(is_streak_alive(Some(today), today));
        assert!(is_streak_alive(Some(d(2024, 5, 9)), today));
        assert!(!is_streak_alive(Some(d(2024, 5, 8)), today));
        assert!(!is_streak_alive(None, today));
    }
}
