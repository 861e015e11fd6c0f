//! Filter CLI commands

use std::collections::BTreeSet;

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{FilterBlob, FilterPatch, FilterState, Label, TaskStatus};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum FilterCommands {
    /// Show the saved filters
    Show,

    /// Replace filter fields (omitted fields are kept)
    ///
    /// Examples:
    ///   planner filter set --query hero
    ///   planner filter set --label dev --label ops --status todo
    Set {
        /// Case-insensitive text matched against title and notes
        #[arg(long, short)]
        query: Option<String>,

        /// Labels to show (repeatable)
        #[arg(long, short)]
        label: Vec<String>,

        /// Statuses to show (repeatable)
        #[arg(long, short)]
        status: Vec<String>,
    },

    /// Toggle one label on or off
    ToggleLabel {
        /// Label key (design, dev, content, ops)
        key: String,
    },

    /// Toggle one status on or off
    ToggleStatus {
        /// Status key (todo, inprogress, done)
        key: String,
    },

    /// Reset all filters
    Clear,
}

pub fn run(cmd: FilterCommands, output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.filter_store()?;

    match cmd {
        FilterCommands::Show => {}
        FilterCommands::Set {
            query,
            label,
            status,
        } => {
            let patch = FilterPatch {
                query,
                labels: label_keys(&label)?,
                statuses: status_keys(&status)?,
            };
            store.set(patch)?;
        }
        FilterCommands::ToggleLabel { key } => {
            let label = Label::from_key(&key)?;
            let on = store.toggle_label(label.key())?;
            output.verbose_ctx("filter", &format!("label {} -> {}", label, on));
        }
        FilterCommands::ToggleStatus { key } => {
            let status = TaskStatus::from_key(&key)?;
            let on = store.toggle_status(status.key())?;
            output.verbose_ctx("filter", &format!("status {} -> {}", status, on));
        }
        FilterCommands::Clear => store.clear()?,
    }

    let state = store.get();
    if output.is_json() {
        output.data(&FilterBlob::from(state));
    } else if state.is_empty() {
        println!("No filters (showing all tasks)");
    } else {
        println!("Filters: {}", describe(state));
    }

    Ok(())
}

/// Validates repeatable label arguments; no arguments leaves labels unchanged
fn label_keys(keys: &[String]) -> Result<Option<BTreeSet<String>>> {
    if keys.is_empty() {
        return Ok(None);
    }
    let set = keys
        .iter()
        .map(|k| Label::from_key(k).map(|l| l.key().to_string()))
        .collect::<Result<_, _>>()?;
    Ok(Some(set))
}

fn status_keys(keys: &[String]) -> Result<Option<BTreeSet<String>>> {
    if keys.is_empty() {
        return Ok(None);
    }
    let set = keys
        .iter()
        .map(|k| TaskStatus::from_key(k).map(|s| s.key().to_string()))
        .collect::<Result<_, _>>()?;
    Ok(Some(set))
}

/// Short human summary, e.g. `query="hero" labels=dev,ops`
pub(crate) fn describe(filter: &FilterState) -> String {
    let mut parts = Vec::new();
    if !filter.query.is_empty() {
        parts.push(format!("query={:?}", filter.query));
    }
    if !filter.labels.is_empty() {
        let labels: Vec<&str> = filter.labels.iter().map(String::as_str).collect();
        parts.push(format!("labels={}", labels.join(",")));
    }
    if !filter.statuses.is_empty() {
        let statuses: Vec<&str> = filter.statuses.iter().map(String::as_str).collect();
        parts.push(format!("statuses={}", statuses.join(",")));
    }
    parts.join(" ")
}
