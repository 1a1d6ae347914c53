use chrono::{Duration, Utc};
use clap::Subcommand;

use super::{open_engine, parse_subject, print_json};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Log a session studied away from the timer, ending now
    Add {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        minutes: u32,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List recorded sessions
    List {
        /// Only sessions started today
        #[arg(long)]
        today: bool,
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        SessionAction::Add {
            subject,
            minutes,
            notes,
        } => {
            let subject = parse_subject(&subject)?;
            let end = Utc::now();
            let start = end - Duration::minutes(i64::from(minutes));
            match engine.record_session(subject, minutes, start, end, notes) {
                Some(session) => print_json(&session)?,
                None => eprintln!("sessions under one minute are not recorded"),
            }
        }
        SessionAction::List { today, subject } => {
            let mut sessions = if today {
                engine.todays_sessions()
            } else {
                engine.sessions()
            };
            if let Some(raw) = subject {
                let subject = parse_subject(&raw)?;
                sessions.retain(|s| s.subject == subject);
            }
            print_json(&sessions)?;
        }
    }
    Ok(())
}
