use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;
use studyroom_core::{BlockKind, NewScheduleItem, ScheduleUpdate};

use super::{open_engine, parse_subject, print_json};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Plan a study block
    Add {
        title: String,
        #[arg(long)]
        subject: String,
        /// Start time, HH:MM
        #[arg(long)]
        start: String,
        /// End time, HH:MM
        #[arg(long)]
        end: String,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// study, revision, practice or break
        #[arg(long, default_value = "study")]
        kind: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Blocks planned for a date, earliest first
    List {
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Every block on every date
        #[arg(long, conflicts_with = "date")]
        all: bool,
    },
    /// Move or retitle a block
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        kind: Option<String>,
    },
    /// Mark a block done
    Done { id: String },
    /// Remove a block
    Delete { id: String },
}

fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{raw}' (expected YYYY-MM-DD): {e}").into())
}

fn parse_time(raw: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|e| format!("invalid time '{raw}' (expected HH:MM): {e}").into())
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        ScheduleAction::Add {
            title,
            subject,
            start,
            end,
            date,
            kind,
            description,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Local::now().date_naive(),
            };
            let mut new_item = NewScheduleItem::new(
                title,
                parse_subject(&subject)?,
                date,
                parse_time(&start)?,
                parse_time(&end)?,
            )
            .with_kind(kind.parse::<BlockKind>()?);
            if let Some(description) = description {
                new_item = new_item.with_description(description);
            }
            print_json(&engine.add_schedule_item(new_item)?)?;
        }
        ScheduleAction::List { date, all } => {
            let items = match (all, date) {
                (true, _) => engine.schedule(),
                (false, Some(raw)) => engine.schedule_for(parse_date(&raw)?),
                (false, None) => engine.todays_schedule(),
            };
            print_json(&items)?;
        }
        ScheduleAction::Update {
            id,
            title,
            start,
            end,
            date,
            kind,
        } => {
            let update = ScheduleUpdate {
                title,
                start_time: start.as_deref().map(parse_time).transpose()?,
                end_time: end.as_deref().map(parse_time).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                kind: kind.as_deref().map(str::parse::<BlockKind>).transpose()?,
                ..ScheduleUpdate::default()
            };
            let item = engine
                .update_schedule_item(&id, update)?
                .ok_or_else(|| format!("schedule item not found: {id}"))?;
            print_json(&item)?;
        }
        ScheduleAction::Done { id } => {
            let item = engine
                .update_schedule_item(&id, ScheduleUpdate::completed(true))?
                .ok_or_else(|| format!("schedule item not found: {id}"))?;
            print_json(&item)?;
        }
        ScheduleAction::Delete { id } => {
            if !engine.delete_schedule_item(&id) {
                return Err(format!("schedule item not found: {id}").into());
            }
            println!("Schedule item deleted: {id}");
        }
    }
    Ok(())
}
