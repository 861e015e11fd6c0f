//! Month grid construction
//!
//! A month is always shown as 6 full weeks (42 cells) starting on the
//! configured first weekday, so the grid keeps the same height whether the
//! month spans 4, 5 or 6 weeks. Cells outside the month are overflow days
//! from the neighbouring months.

use chrono::{Datelike, Duration, NaiveDate};

use super::date::{clamp_supported, start_of_month, weekday_offset, WeekStart};

/// Number of weeks shown for every month
pub const GRID_WEEKS: usize = 6;

/// Number of cells in the grid
pub const GRID_CELLS: usize = GRID_WEEKS * 7;

/// One rendered cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
}

/// The 42 consecutive days shown for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: NaiveDate,
    week_start: WeekStart,
    days: [NaiveDate; GRID_CELLS],
}

impl MonthGrid {
    /// Builds the grid for the month containing `reference`
    ///
    /// References outside the supported years are clamped to the nearest
    /// supported month, which keeps every grid day representable.
    pub fn build(reference: NaiveDate, week_start: WeekStart) -> Self {
        let month = start_of_month(clamp_supported(reference));
        let grid_start = month - Duration::days(weekday_offset(month, week_start) as i64);
        let days = std::array::from_fn(|i| grid_start + Duration::days(i as i64));

        Self {
            month,
            week_start,
            days,
        }
    }

    /// First day of the displayed month
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// All 42 days in display order
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[GRID_CELLS - 1]
    }

    /// True if `date` belongs to the displayed month
    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.month.year() && date.month() == self.month.month()
    }

    /// True if `date` has a cell in this grid
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date).is_some()
    }

    /// Cell index of `date`, if visible
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.first_day()).num_days();
        usize::try_from(offset).ok().filter(|&i| i < GRID_CELLS)
    }

    /// Tagged cells, with `today` marked
    pub fn cells(&self, today: NaiveDate) -> impl Iterator<Item = GridCell> + '_ {
        self.days.iter().map(move |&date| GridCell {
            date,
            in_month: self.is_in_month(date),
            is_today: date == today,
        })
    }

    /// The grid as six rows of seven days
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(7)
    }
}
