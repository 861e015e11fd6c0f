//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{filter, month, task, tui};
use crate::domain::{parse_month, today};
use crate::storage::{Config, Project, PLANNER_DIR};

#[derive(Parser)]
#[command(name = "planner")]
#[command(author, version, about = "Month-view task planner for the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new planner project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Skip the example tasks
        #[arg(long)]
        empty: bool,
    },

    /// Show the month grid
    Month {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(long, short)]
        month: Option<String>,

        /// Ignore the saved filter
        #[arg(long)]
        no_filter: bool,
    },

    /// List every task on one day
    Day {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        date: String,

        /// Ignore the saved filter
        #[arg(long)]
        no_filter: bool,
    },

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Manage the saved search and label/status filter
    #[command(subcommand)]
    Filter(filter::FilterCommands),

    /// Launch the interactive month view
    Tui {
        /// Month to open as YYYY-MM
        #[arg(long, short)]
        month: Option<String>,

        /// Initial view (month, agenda)
        #[arg(long, default_value = "month")]
        view: String,
    },
}

/// Parse arguments and run the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Planner CLI starting");

    match cli.command {
        Commands::Init { path, empty } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let existed = std::path::Path::new(&path).join(PLANNER_DIR).is_dir();
            if existed {
                output.warn("Project already initialized; existing tasks are kept");
            }

            let seed = if empty { None } else { Some(today()) };
            let project = Project::init(&path, seed)?;
            output.verbose_ctx(
                "init",
                &format!("Created .planner directory at: {}", project.planner_dir().display()),
            );
            output.success(&format!("Initialized planner project at {}", project.root().display()));
        }

        Commands::Month { month: m, no_filter } => {
            output.verbose_ctx("month", &format!("month={:?}, no_filter={}", m, no_filter));
            month::show_month(&output, m.as_deref(), no_filter)?
        }
        Commands::Day { date, no_filter } => month::show_day(&output, &date, no_filter)?,

        Commands::Task(cmd) => task::run(cmd, &output)?,
        Commands::Filter(cmd) => filter::run(cmd, &output)?,

        Commands::Tui { month: m, view } => {
            let month = m.as_deref().map(parse_month).transpose()?;
            tui::run(&output, month, &view)?
        }
    }

    Ok(())
}
