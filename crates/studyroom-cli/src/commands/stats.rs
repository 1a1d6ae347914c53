use clap::Subcommand;
use serde::Serialize;
use studyroom_core::stats::is_streak_alive;
use studyroom_core::{Clock, DailyTotal, Subject, SystemClock, UserStats};

use super::{open_engine, parse_subject, print_json};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Aggregate statistics
    Show,
    /// Minutes studied per day, oldest first
    Daily {
        /// Number of days ending today
        #[arg(long, default_value = "7")]
        days: usize,
    },
    /// Task completion percentage per subject
    Progress {
        /// Only this subject
        subject: Option<String>,
    },
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: UserStats,
    streak_active: bool,
    today_min: u64,
}

#[derive(Serialize)]
struct SubjectProgress {
    subject: Subject,
    percent: u8,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        StatsAction::Show => {
            let stats = engine.stats();
            let today = SystemClock.today();
            let today_min = engine
                .todays_sessions()
                .iter()
                .map(|s| u64::from(s.duration_min))
                .sum();
            print_json(&StatsReport {
                streak_active: is_streak_alive(stats.last_study_date, today),
                stats,
                today_min,
            })?;
        }
        StatsAction::Daily { days } => {
            let totals: Vec<DailyTotal> = engine.daily_totals(days).collect();
            print_json(&totals)?;
        }
        StatsAction::Progress { subject } => {
            let subjects = match subject {
                Some(raw) => vec![parse_subject(&raw)?],
                None => Subject::ALL.to_vec(),
            };
            let progress: Vec<SubjectProgress> = subjects
                .into_iter()
                .map(|subject| SubjectProgress {
                    subject,
                    percent: engine.subject_progress(subject),
                })
                .collect();
            print_json(&progress)?;
        }
    }
    Ok(())
}
