//! Interactive month view
//!
//! A terminal calendar built on ratatui: a 6-week grid with the tasks of
//! each day, a day list for the full bucket, and pick-up/drop to move a
//! task to another day.

mod app;
mod event;
mod ui;
mod views;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use super::Output;
use app::App;
use event::EventHandler;

/// View mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Agenda,
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" | "m" | "1" => Ok(ViewMode::Month),
            "agenda" | "a" | "2" => Ok(ViewMode::Agenda),
            _ => Err(()),
        }
    }
}

/// Launch the TUI on the month containing `month`
pub fn run(output: &Output, month: Option<NaiveDate>, view: &str) -> Result<()> {
    let view_mode: ViewMode = view.parse().unwrap_or_default();
    output.verbose_ctx("tui", &format!("Opening {:?} view", view_mode));

    // Load data before touching the terminal so errors print normally
    let mut app = App::new(month, view_mode)?;

    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(250);

    // The terminal must leave raw mode even if drawing panics
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));
    let restored = ui::restore_terminal();

    match outcome {
        Ok(result) => result.and(restored),
        Err(payload) => Err(anyhow!("TUI panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown error")
}
