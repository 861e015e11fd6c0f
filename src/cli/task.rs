//! Task CLI commands

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{
    month_label, parse_day, parse_month, today, FilterState, Label, MonthGrid, NewTask, Task,
    TaskId, TaskIndex, TaskPatch, TaskStatus,
};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    ///
    /// Examples:
    ///   planner task add "Finalize hero section"
    ///   planner task add "API review" --date tomorrow --label dev
    Add {
        /// Task title
        title: String,

        /// Day to plan the task for (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(long, short, default_value = "today")]
        date: String,

        /// Label (design, dev, content, ops)
        #[arg(long, short)]
        label: Option<String>,

        /// Status (todo, inprogress, done)
        #[arg(long, short)]
        status: Option<String>,

        /// Optional notes
        #[arg(long, short)]
        notes: Option<String>,
    },

    /// List tasks matching the saved filters, grouped by day
    List {
        /// Only tasks in this month (YYYY-MM)
        #[arg(long, short)]
        month: Option<String>,

        /// Ignore the saved filters
        #[arg(long)]
        no_filter: bool,
    },

    /// Show task details
    Show {
        /// Task ID
        id: String,
    },

    /// Change task fields
    Edit {
        /// Task ID
        id: String,

        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        date: Option<String>,

        #[arg(long, short)]
        label: Option<String>,

        #[arg(long, short)]
        status: Option<String>,

        #[arg(long, short)]
        notes: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Move a task to another day
    Move {
        /// Task ID
        id: String,

        /// Target day (YYYY-MM-DD, today, tomorrow, yesterday)
        date: String,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            title,
            date,
            label,
            status,
            notes,
        } => add_task(output, &title, &date, label.as_deref(), status.as_deref(), notes),
        TaskCommands::List { month, no_filter } => list_tasks(output, month.as_deref(), no_filter),
        TaskCommands::Show { id } => show_task(output, &id),
        TaskCommands::Edit {
            id,
            title,
            date,
            label,
            status,
            notes,
        } => {
            let patch = TaskPatch {
                title,
                date: date.as_deref().map(parse_date).transpose()?,
                label: label.as_deref().map(Label::from_key).transpose()?,
                status: status.as_deref().map(TaskStatus::from_key).transpose()?,
                notes,
            };
            edit_task(output, &id, patch)
        }
        TaskCommands::Delete { id } => delete_task(output, &id),
        TaskCommands::Move { id, date } => move_task(output, &id, &date),
    }
}

/// Parses a task ID typed on the command line; stored IDs are never trimmed
fn parse_id(s: &str) -> Result<TaskId> {
    Ok(s.trim().parse()?)
}

/// Parses a day argument relative to today
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(parse_day(s, today())?)
}

/// JSON shape of a task in command output
pub(crate) fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id.to_string(),
        "title": task.title,
        "date": task.date,
        "label": task.label.key(),
        "status": task.status.key(),
        "notes": task.notes,
    })
}

/// One-line text rendering used by list views
pub(crate) fn task_line(task: &Task) -> String {
    format!(
        "{:<14} {:<11} {:<12} {}",
        task.id,
        task.status.key(),
        task.label.display().name(),
        task.title
    )
}

fn add_task(
    output: &Output,
    title: &str,
    date: &str,
    label: Option<&str>,
    status: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let project = Project::open_current()?;
    let defaults = &project.config().project;

    let label = match label {
        Some(key) => Label::from_key(key)?,
        None => defaults.default_label.clone(),
    };
    let status = match status {
        Some(key) => TaskStatus::from_key(key)?,
        None => defaults.default_status.clone(),
    };

    let fields = NewTask::new(title, parse_date(date)?)
        .with_label(label)
        .with_status(status)
        .with_notes(notes.unwrap_or_default());

    let mut store = project.task_store()?;
    let Some(task) = store.create(fields)? else {
        bail!("Task title cannot be empty");
    };

    output.verbose_ctx("task", &format!("Created {} on {}", task.id, task.date));

    if output.is_json() {
        output.data(&task_json(&task));
    } else {
        output.success(&format!("Created task: {} - {} ({})", task.id, task.title, task.date));
    }

    Ok(())
}

fn list_tasks(output: &Output, month: Option<&str>, no_filter: bool) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;
    let filter = if no_filter {
        FilterState::default()
    } else {
        project.filter_store()?.get().clone()
    };

    let grid = month
        .map(parse_month)
        .transpose()?
        .map(|m| MonthGrid::build(m, project.config().project.calendar.week_start));

    let index = TaskIndex::build(store.list(), &filter);
    output.verbose_ctx(
        "list",
        &format!("{} of {} tasks pass the filters", index.filtered().len(), store.len()),
    );

    let days: Vec<(&str, &[&Task])> = index
        .buckets()
        .filter(|(_, tasks)| match &grid {
            Some(grid) => tasks.first().is_some_and(|t| grid.is_in_month(t.date)),
            None => true,
        })
        .collect();

    if output.is_json() {
        let items: Vec<_> = days
            .iter()
            .flat_map(|(_, tasks)| tasks.iter().map(|t| task_json(t)))
            .collect();
        output.data(&items);
        return Ok(());
    }

    if let Some(grid) = &grid {
        println!("{}", month_label(grid.month()));
    }
    if !filter.is_empty() {
        println!("(filtered: {})", super::filter::describe(&filter));
    }

    if days.is_empty() {
        println!("No tasks");
        return Ok(());
    }

    println!("{:<14} {:<11} {:<12} TITLE", "ID", "STATUS", "LABEL");
    println!("{}", "-".repeat(64));
    for (key, tasks) in days {
        println!("{}", key);
        for task in tasks {
            println!("  {}", task_line(task));
        }
    }

    Ok(())
}

fn show_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let id = parse_id(id_str)?;
    let task = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if output.is_json() {
        output.data(&task_json(task));
    } else {
        println!("Task: {}", task.id);
        println!("Title: {}", task.title);
        println!("Date: {}", task.date.format("%a %Y-%m-%d"));
        if task.label.is_known() {
            println!("Label: {}", task.label.name());
        } else {
            println!("Label: {} (shown as {})", task.label.key(), task.label.name());
        }
        println!("Status: {}", task.status.name());

        if !task.notes.is_empty() {
            println!("\nNotes:");
            println!("{}", task.notes);
        }
    }

    Ok(())
}

fn edit_task(output: &Output, id_str: &str, patch: TaskPatch) -> Result<()> {
    if patch.is_empty() {
        bail!(
            "Nothing to change: pass at least one of --title, --date, --label, --status, --notes"
        );
    }
    if patch.clears_title() {
        bail!("Task title cannot be empty");
    }

    let project = Project::open_current()?;
    let mut store = project.task_store()?;
    let id = parse_id(id_str)?;

    let task = store
        .update(&id, patch)?
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if output.is_json() {
        output.data(&task_json(&task));
    } else {
        output.success(&format!("Updated task: {} - {}", task.id, task.title));
    }

    Ok(())
}

fn delete_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.task_store()?;
    let id = parse_id(id_str)?;

    if !store.delete(&id)? {
        bail!("Task not found: {}", id);
    }

    if output.is_json() {
        output.data(&serde_json::json!({ "id": id.to_string(), "deleted": true }));
    } else {
        output.success(&format!("Deleted task: {}", id));
    }

    Ok(())
}

fn move_task(output: &Output, id_str: &str, date_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.task_store()?;
    let id = parse_id(id_str)?;
    let date = parse_date(date_str)?;

    let task = store
        .reschedule(&id, date)?
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if output.is_json() {
        output.data(&task_json(&task));
    } else {
        output.success(&format!("Moved task {} to {}", task.id, task.date));
    }

    Ok(())
}
