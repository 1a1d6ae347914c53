use chrono::Utc;
use clap::Subcommand;
use studyroom_core::timer::{format_clock, CompletedRun, CountdownTimer, IntervalScheduler};
use studyroom_core::{Config, Event};

use super::{open_engine, parse_subject, print_json};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a live countdown; Ctrl-C stops early and records what was studied
    Run {
        /// Length in minutes (defaults to timer.default_minutes)
        #[arg(long, conflicts_with = "preset")]
        minutes: Option<u64>,
        /// Preset name, e.g. "pomodoro" or "focus-block"
        #[arg(long)]
        preset: Option<String>,
        /// Subject to record the session under (defaults to study.default_subject)
        #[arg(long)]
        subject: Option<String>,
        /// Do not draw the live countdown
        #[arg(long)]
        quiet: bool,
    },
    /// List timer presets
    Presets,
    /// Format a number of seconds the way the timer displays it
    Format {
        secs: u64,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            minutes,
            preset,
            subject,
            quiet,
        } => {
            let config = Config::load_or_default();
            let (total_secs, preset_label) = match (minutes, preset) {
                (Some(0), _) => return Err("timer length must be at least one minute".into()),
                (Some(m), _) => (m.saturating_mul(60), None),
                (None, Some(name)) => {
                    let preset = config
                        .preset(&name)
                        .ok_or_else(|| format!("unknown preset: {name}"))?;
                    (preset.duration_secs(), Some(preset.label.clone()))
                }
                (None, None) => (config.default_duration_secs(), None),
            };
            let subject = match subject {
                Some(raw) => parse_subject(&raw)?,
                None => config.study.default_subject,
            };

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let Some(run) = runtime.block_on(countdown(total_secs, quiet))? else {
                return Ok(());
            };

            let engine = open_engine()?;
            match engine.record_run(subject, &run, preset_label.as_deref()) {
                Some(session) => print_json(&Event::SessionRecorded {
                    session_id: session.id,
                    subject: session.subject,
                    duration_min: session.duration_min,
                    current_streak_days: engine.stats().current_streak_days,
                    at: Utc::now(),
                })?,
                None => eprintln!("studied under a minute; nothing recorded"),
            }
        }
        TimerAction::Presets => {
            let config = Config::load_or_default();
            print_json(&config.timer.presets)?;
        }
        TimerAction::Format { secs } => {
            println!("{}", format_clock(secs));
        }
    }
    Ok(())
}

/// Drive a countdown on real one-second intervals until it expires or the
/// user interrupts it.
async fn countdown(
    total_secs: u64,
    quiet: bool,
) -> Result<Option<CompletedRun>, Box<dyn std::error::Error>> {
    let (scheduler, mut ticks) = IntervalScheduler::new();
    let mut timer = CountdownTimer::with_duration(scheduler, total_secs);
    if let Some(event) = timer.start() {
        print_json(&event)?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(handle) = ticks.recv() => {
                if let Some(event) = timer.on_tick(handle) {
                    if !quiet {
                        eprintln!();
                    }
                    print_json(&event)?;
                    break;
                }
                if !quiet {
                    eprint!("\r{}  ", timer.formatted_time());
                }
            }
            result = &mut ctrl_c => {
                result?;
                if !quiet {
                    eprintln!();
                }
                tracing::debug!(remaining_secs = timer.remaining_secs(), "interrupted");
                break;
            }
        }
    }

    Ok(timer.stop())
}
