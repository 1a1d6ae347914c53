use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minutes studied on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_min: u64,
}

/// Ascending per-day totals over a window ending today.
///
/// Days without sessions yield `total_min == 0`. Clone the iterator to
/// walk the same window again.
#[derive(Debug, Clone)]
pub struct DailyTotals {
    by_day: HashMap<NaiveDate, u64>,
    next: NaiveDate,
    remaining: usize,
}

impl DailyTotals {
    pub(crate) fn new(by_day: HashMap<NaiveDate, u64>, today: NaiveDate, days: usize) -> Self {
        let back = days.saturating_sub(1) as u64;
        let next = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        // A window reaching past the calendar's start is cut short there, so
        // the last item is still `today`.
        let span = usize::try_from((today - next).num_days() + 1).unwrap_or(usize::MAX);
        Self {
            by_day,
            next,
            remaining: days.min(span),
        }
    }
}

impl Iterator for DailyTotals {
    type Item = DailyTotal;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let date = self.next;
        match date.succ_opt() {
            Some(succ) => {
                self.next = succ;
                self.remaining -= 1;
            }
            None => self.remaining = 0,
        }
        Some(DailyTotal {
            date,
            total_min: self.by_day.get(&date).copied().unwrap_or(0),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for DailyTotals {}
