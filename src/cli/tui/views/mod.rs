//! TUI views

pub mod agenda;
pub mod month;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::{App, ConfirmAction, InputMode};
use crate::cli::tui::ViewMode;
use crate::domain::{Label, TaskStatus};

/// Terminal colour for a task label
pub fn label_color(label: &Label) -> Color {
    let (r, g, b) = label.color();
    Color::Rgb(r, g, b)
}

/// Marker shown in front of a task title
pub fn status_marker(status: &TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Done => "[x]",
        TaskStatus::Other(_) => "[?]",
    }
}

/// Bottom bar: prompt for the active input mode, or the last message
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let hint = match app.carried_task() {
                Some(task) => format!("Moving '{}': [enter]drop [esc]cancel", task.title),
                None => "[a]dd [enter]day [m]ove [/]search [f]ilter [1-2]views [q]uit [?]help"
                    .to_string(),
            };
            let msg = app.status_message().map(str::to_string).unwrap_or(hint);
            (msg, Style::default())
        }
        InputMode::Search(query) => (
            format!("Search: {}_", query),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::NewTask(title) => (
            format!("New task on {}: {}_", app.cursor(), title),
            Style::default().fg(Color::Green),
        ),
        InputMode::EditTitle(_, title) => (
            format!("Title: {}_", title),
            Style::default().fg(Color::Green),
        ),
        InputMode::Confirm(ConfirmAction::DeleteTask(id)) => {
            (format!("Delete task {}? [y/n]", id), Style::default().fg(Color::Yellow))
        }
        InputMode::Filter => {
            let labels: Vec<String> = Label::KNOWN
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let on = app.filter().labels.contains(label.key());
                    format!("{}:{}{}", i + 1, label.name(), if on { "*" } else { "" })
                })
                .collect();
            let keys = [
                ('t', TaskStatus::Todo),
                ('i', TaskStatus::InProgress),
                ('d', TaskStatus::Done),
            ];
            let statuses: Vec<String> = keys
                .iter()
                .map(|(k, status)| {
                    let on = app.filter().statuses.contains(status.key());
                    format!("{}:{}{}", k, status.name(), if on { "*" } else { "" })
                })
                .collect();
            (
                format!("Filter {} | {} | c:clear esc:done", labels.join(" "), statuses.join(" ")),
                Style::default().fg(Color::Magenta),
            )
        }
    };

    let view_str = match app.view_mode() {
        ViewMode::Month => "[1:Month]",
        ViewMode::Agenda => "[2:Agenda]",
    };

    let paragraph = Paragraph::new(format!("Planner {} {}", view_str, content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Month title with the active filter summary
pub fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        crate::domain::month_label(app.month()),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];

    let filter = app.effective_filter();
    if !filter.is_empty() {
        spans.push(Span::styled(
            format!("  (filtered: {})", crate::cli::filter::describe(&filter)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
