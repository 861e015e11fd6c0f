//! Month view: 6-week grid with a day list overlay

use chrono::Datelike;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::{draw_header, draw_status_bar, label_color, status_marker};
use crate::cli::text::truncate_str;
use crate::cli::tui::app::App;
use crate::cli::tui::ui::centered_rect;
use crate::domain::{weekday_headers, GridCell, TaskIndex, GRID_WEEKS};

/// Draw the month layout
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Month title
            Constraint::Length(1), // Weekday names
            Constraint::Min(12),   // Grid
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let grid = app.grid();
    let index = app.index();

    draw_header(frame, app, chunks[0]);
    draw_weekdays(frame, grid.week_start(), chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, GRID_WEEKS as u32); GRID_WEEKS])
        .split(chunks[2]);

    let cells: Vec<GridCell> = grid.cells(app.today()).collect();
    for (week, row) in cells.chunks(7).zip(rows.iter()) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, 7); 7])
            .split(*row);

        for (cell, area) in week.iter().zip(columns.iter()) {
            draw_cell(frame, app, &index, cell, *area);
        }
    }

    draw_status_bar(frame, app, chunks[3]);

    if app.show_day_list() {
        draw_day_list(frame, app);
    }
}

fn draw_weekdays(frame: &mut Frame, week_start: crate::domain::WeekStart, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 7); 7])
        .split(area);

    for (name, col) in weekday_headers(week_start).iter().zip(columns.iter()) {
        let heading = Paragraph::new(*name)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(heading, *col);
    }
}

fn draw_cell(frame: &mut Frame, app: &App, index: &TaskIndex<'_>, cell: &GridCell, area: Rect) {
    let selected = cell.date == app.cursor();

    let number_color = if cell.in_month {
        Color::White
    } else {
        Color::DarkGray
    };
    let mut number_style = Style::default().fg(number_color);
    if cell.is_today {
        number_style = number_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }

    let border_style = match (selected, app.carried_task().is_some()) {
        (true, true) => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::DarkGray),
    };

    let block = Block::default()
        .title(Span::styled(format!("{:>2}", cell.date.day()), number_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    // Rows that fit inside the borders; keep one for the overflow line
    let room = area.height.saturating_sub(2) as usize;
    let limit = app.max_tasks_per_cell().min(room.saturating_sub(1)).max(1);
    let preview = index.preview(cell.date, limit);
    let width = area.width.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = preview
        .shown
        .iter()
        .map(|task| {
            let mut title_style = Style::default();
            if task.status.is_complete() {
                title_style = title_style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
            }
            if !cell.in_month {
                title_style = title_style.fg(Color::DarkGray);
            }
            Line::from(vec![
                Span::styled("● ", Style::default().fg(label_color(&task.label))),
                Span::styled(truncate_str(&task.title, width), title_style),
            ])
        })
        .collect();

    if preview.overflow > 0 {
        lines.push(Line::from(Span::styled(
            format!("+{} more", preview.overflow),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Every visible task of the cursor day
fn draw_day_list(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, frame.area());
    let tasks = app.day_tasks();

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new("No tasks. Press [a] to add one.")
            .style(Style::default().fg(Color::DarkGray))]
    } else {
        tasks
            .iter()
            .map(|task| {
                let mut spans = vec![
                    Span::raw(format!("{} ", status_marker(&task.status))),
                    Span::styled("● ", Style::default().fg(label_color(&task.label))),
                    Span::raw(task.title.clone()),
                    Span::styled(
                        format!("  {}", task.label.name()),
                        Style::default().fg(label_color(&task.label)),
                    ),
                ];
                if !task.notes.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", truncate_str(&task.notes, 30)),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let title = format!(
        " {} · [s]tatus [l]abel [e]dit [x]delete [m]ove [esc]close ",
        app.cursor().format("%a %b %-d")
    );
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !tasks.is_empty() {
        state.select(Some(app.day_index()));
    }

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}
