//! Domain models for the month planner
//!
//! Contains the core calendar and task logic without any I/O concerns.

mod date;
mod filter;
mod grid;
mod id;
mod index;
mod task;

pub use date::{
    add_months, clamp_supported, end_of_month, from_iso_date, is_same_day, month_label,
    parse_day, parse_month, shift_days, start_of_month, to_iso_date, today, weekday_headers,
    weekday_offset, DateError, WeekStart, ISO_DATE_FORMAT, MAX_YEAR, MIN_YEAR,
};
pub use filter::{FilterBlob, FilterMatcher, FilterPatch, FilterState};
pub use grid::{GridCell, MonthGrid, GRID_CELLS, GRID_WEEKS};
pub use id::{IdError, TaskId};
pub use index::{compare_in_bucket, DayPreview, TaskIndex};
pub use task::{Label, NewTask, Task, TaskError, TaskPatch, TaskStatus};
