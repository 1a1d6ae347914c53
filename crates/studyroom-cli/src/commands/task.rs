//! Task management commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use studyroom_core::{NewTask, Priority, TaskStatus};

use super::{open_engine, parse_subject, print_json};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// physics, chemistry or mathematics
        #[arg(long)]
        subject: String,
        /// low, medium or high (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date, RFC 3339 (e.g. 2025-03-01T18:00:00Z)
        #[arg(long)]
        due: Option<String>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
    },
    /// List tasks
    List {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Change a task's status (pending, in-progress, completed)
    Status {
        /// Task ID
        id: String,
        status: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Counts by status, including overdue
    Summary,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        TaskAction::Add {
            title,
            subject,
            priority,
            due,
            description,
        } => {
            let mut new_task = NewTask::new(title, parse_subject(&subject)?)
                .with_priority(priority.parse::<Priority>()?);
            if let Some(raw) = due {
                let due = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| format!("invalid due date '{raw}': {e}"))?;
                new_task = new_task.with_due_date(due.with_timezone(&Utc));
            }
            if let Some(description) = description {
                new_task = new_task.with_description(description);
            }
            let task = engine.add_task(new_task);
            print_json(&task)?;
        }
        TaskAction::List { subject, json } => {
            let tasks = match subject {
                Some(raw) => engine.tasks_for(parse_subject(&raw)?),
                None => engine.tasks(),
            };
            if json {
                print_json(&tasks)?;
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for task in &tasks {
                    println!(
                        "{}  [{:<11}] {:<11} {:<6} {}",
                        task.id,
                        task.status,
                        task.subject,
                        task.priority,
                        task.title
                    );
                }
            }
        }
        TaskAction::Status { id, status } => {
            let status = status.parse::<TaskStatus>()?;
            let task = engine
                .set_task_status(&id, status)
                .ok_or_else(|| format!("task not found: {id}"))?;
            print_json(&task)?;
        }
        TaskAction::Delete { id } => {
            if !engine.delete_task(&id) {
                return Err(format!("task not found: {id}").into());
            }
            println!("Task deleted: {id}");
        }
        TaskAction::Summary => {
            print_json(&engine.task_summary())?;
        }
    }
    Ok(())
}
