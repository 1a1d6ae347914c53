//! Study statistics: session log, aggregates, streak and daily totals.

mod daily;
mod engine;
mod planner;
mod session;
pub mod streak;

pub use daily::{DailyTotal, DailyTotals};
pub use engine::StatsEngine;
pub use session::{StudySession, UserStats};
pub use streak::{advance_streak, is_streak_alive};
