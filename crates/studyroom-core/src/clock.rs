//! Source of "now" and of calendar dates.
//!
//! Streaks and daily totals compare calendar dates, not instants, so the
//! clock also decides which timezone a timestamp's date is read in.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date `at` falls on.
    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate;

    fn today(&self) -> NaiveDate {
        self.date_of(self.now())
    }
}

/// Wall clock; dates are read in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// Settable clock for tests; dates are read in UTC.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Clock pinned to noon UTC on `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self::new(noon)
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.date_naive()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        (**self).date_of(at)
    }
}

impl<T: Clock + ?Sized> Clock for Rc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        (**self).date_of(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.today(), date);
        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
