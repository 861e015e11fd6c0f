//! Agenda view: visible tasks of the month as one list

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::{draw_header, draw_status_bar, label_color, status_marker};
use crate::cli::tui::app::App;

/// Draw the agenda layout
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    let tasks = app.agenda();
    let mut last_date = None;
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            // Date only on the first task of each day
            let date = if last_date == Some(task.date) {
                " ".repeat(10)
            } else {
                task.date.format("%a %d").to_string() + "    "
            };
            last_date = Some(task.date);

            let date_style = if task.date == app.today() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            ListItem::new(Line::from(vec![
                Span::styled(date, date_style),
                Span::raw(format!("{} ", status_marker(&task.status))),
                Span::styled("● ", Style::default().fg(label_color(&task.label))),
                Span::raw(task.title.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Agenda ({})", tasks.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !tasks.is_empty() {
        state.select(Some(app.agenda_index()));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    draw_status_bar(frame, app, chunks[2]);
}
