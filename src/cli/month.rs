//! Month grid and day list commands
//!
//! `planner month` prints the fixed 6-week grid with up to
//! `max_tasks_per_cell` titles per day; `planner day` prints one full day
//! bucket (the "+N more" view).

use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use super::output::Output;
use super::task::{parse_date, task_json, task_line};
use super::text::fit;
use crate::domain::{
    month_label, parse_month, start_of_month, to_iso_date, today, weekday_headers, FilterState,
    MonthGrid, Task, TaskIndex, TaskStatus,
};
use crate::storage::Project;

/// Columns per day cell in the text grid
const CELL_WIDTH: usize = 16;

/// Single-character status marker used in cells
pub(crate) fn status_glyph(status: &TaskStatus) -> char {
    match status {
        TaskStatus::Todo => ' ',
        TaskStatus::InProgress => '~',
        TaskStatus::Done => 'x',
        TaskStatus::Other(_) => '?',
    }
}

/// Renders the grid as text lines
///
/// Every week gets the same number of lines: day numbers, `limit` task
/// rows and one overflow row. Overflow days are dimmed with a leading `·`
/// and today is marked with `*`.
pub fn render_month(
    grid: &MonthGrid,
    index: &TaskIndex<'_>,
    today: NaiveDate,
    limit: usize,
) -> Vec<String> {
    let separator = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(7));
    let mut lines = vec![month_label(grid.month()), separator.clone()];

    let header: Vec<String> = weekday_headers(grid.week_start())
        .iter()
        .map(|d| fit(d, CELL_WIDTH))
        .collect();
    lines.push(format!("|{}|", header.join("|")));
    lines.push(separator.clone());

    let cells: Vec<_> = grid.cells(today).collect();
    for week in cells.chunks(7) {
        let numbers: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = match (cell.is_today, cell.in_month) {
                    (true, _) => '*',
                    (false, false) => '·',
                    (false, true) => ' ',
                };
                fit(&format!("{}{:>2}", marker, cell.date.day()), CELL_WIDTH)
            })
            .collect();
        lines.push(format!("|{}|", numbers.join("|")));

        let previews: Vec<_> = week.iter().map(|cell| index.preview(cell.date, limit)).collect();
        for row in 0..limit {
            let texts: Vec<String> = previews
                .iter()
                .map(|p| match p.shown.get(row) {
                    Some(task) => {
                        let text = format!("{}{}", status_glyph(&task.status), task.title);
                        fit(&text, CELL_WIDTH)
                    }
                    None => fit("", CELL_WIDTH),
                })
                .collect();
            lines.push(format!("|{}|", texts.join("|")));
        }

        let more: Vec<String> = previews
            .iter()
            .map(|p| match p.overflow {
                0 => fit("", CELL_WIDTH),
                n => fit(&format!(" +{} more", n), CELL_WIDTH),
            })
            .collect();
        lines.push(format!("|{}|", more.join("|")));
        lines.push(separator.clone());
    }

    lines
}

fn load_filter(project: &Project, no_filter: bool) -> Result<FilterState> {
    if no_filter {
        Ok(FilterState::default())
    } else {
        Ok(project.filter_store()?.get().clone())
    }
}

/// Prints the month grid
pub fn show_month(output: &Output, month: Option<&str>, no_filter: bool) -> Result<()> {
    let project = Project::open_current()?;
    let calendar = &project.config().project.calendar;
    let today = today();

    let reference = match month {
        Some(m) => parse_month(m)?,
        None => start_of_month(today),
    };
    let grid = MonthGrid::build(reference, calendar.week_start);

    let store = project.task_store()?;
    let filter = load_filter(&project, no_filter)?;
    let index = TaskIndex::build(store.list(), &filter);

    output.verbose_ctx(
        "month",
        &format!(
            "Grid {} .. {}, {} visible tasks",
            grid.first_day(),
            grid.last_day(),
            index.count_in(&grid)
        ),
    );

    if output.is_json() {
        let days: Vec<_> = grid
            .cells(today)
            .map(|cell| {
                let bucket = index.day(cell.date);
                serde_json::json!({
                    "date": to_iso_date(cell.date),
                    "in_month": cell.in_month,
                    "is_today": cell.is_today,
                    "tasks": bucket.iter().map(|t| task_json(t)).collect::<Vec<_>>(),
                    "more": bucket.len().saturating_sub(calendar.max_tasks_per_cell),
                })
            })
            .collect();
        output.data(&serde_json::json!({
            "month": grid.month().format("%Y-%m").to_string(),
            "week_start": calendar.week_start,
            "days": days,
        }));
        return Ok(());
    }

    for line in render_month(&grid, &index, today, calendar.max_tasks_per_cell) {
        println!("{}", line);
    }
    if !filter.is_empty() {
        println!("(filtered: {})", super::filter::describe(&filter));
    }

    Ok(())
}

/// Prints every task on one day
pub fn show_day(output: &Output, date: &str, no_filter: bool) -> Result<()> {
    let project = Project::open_current()?;
    let date = parse_date(date)?;

    let store = project.task_store()?;
    let filter = load_filter(&project, no_filter)?;
    let index = TaskIndex::build(store.list(), &filter);
    let bucket: &[&Task] = index.day(date);

    if output.is_json() {
        let items: Vec<_> = bucket.iter().map(|t| task_json(t)).collect();
        output.data(&serde_json::json!({
            "date": to_iso_date(date),
            "tasks": items,
        }));
        return Ok(());
    }

    println!("Tasks on {}", date.format("%A %Y-%m-%d"));
    if bucket.is_empty() {
        println!("No tasks");
    } else {
        for task in bucket {
            println!("  {}", task_line(task));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, TaskId, WeekStart};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, title: &str, date: NaiveDate) -> Task {
        Task::new(id.parse::<TaskId>().unwrap(), NewTask::new(title, date))
    }

    #[test]
    fn grid_has_fixed_height() {
        let grid = MonthGrid::build(ymd(2015, 2, 1), WeekStart::Sunday);
        let tasks: Vec<Task> = Vec::new();
        let index = TaskIndex::build(&tasks, &FilterState::default());

        let lines = render_month(&grid, &index, ymd(2015, 2, 1), 3);
        // title + separator + header + separator, then 6 weeks of (1 + 3 + 1 + separator)
        assert_eq!(lines.len(), 4 + 6 * 6);
        assert_eq!(lines[0], "February 2015");
    }

    #[test]
    fn overflow_is_summarized() {
        let day = ymd(2026, 10, 19);
        let tasks: Vec<Task> = (0..5)
            .map(|i| task(&format!("t{}", i), &format!("Task {}", i), day))
            .collect();
        let grid = MonthGrid::build(day, WeekStart::Sunday);
        let index = TaskIndex::build(&tasks, &FilterState::default());

        let text = render_month(&grid, &index, day, 3).join("\n");
        assert!(text.contains(" Task 0"));
        assert!(text.contains(" Task 2"));
        assert!(!text.contains("Task 3"));
        assert!(text.contains("+2 more"));
        assert!(text.contains("*19"));
    }

    #[test]
    fn glyphs_per_status() {
        assert_eq!(status_glyph(&TaskStatus::Todo), ' ');
        assert_eq!(status_glyph(&TaskStatus::InProgress), '~');
        assert_eq!(status_glyph(&TaskStatus::Done), 'x');
    }
}
