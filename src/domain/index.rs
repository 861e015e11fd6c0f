//! Task indexing for the month view
//!
//! Turns the full task list and the active filters into the filtered subset
//! plus one sorted bucket per day, keyed by ISO date string.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use feruca::Collator;

use super::date::to_iso_date;
use super::filter::FilterState;
use super::grid::MonthGrid;
use super::task::Task;

/// Orders two tasks sharing a day: status first, then title
///
/// Titles follow the Unicode Collation Algorithm (CLDR root order), so
/// "éclair" sorts with the e's and case only breaks otherwise equal titles.
/// The exact text decides whatever collation leaves tied.
pub fn compare_in_bucket(collator: &mut Collator, a: &Task, b: &Task) -> Ordering {
    a.status
        .cmp(&b.status)
        .then_with(|| collator.collate(a.title.as_str(), b.title.as_str()))
        .then_with(|| a.title.cmp(&b.title))
}

/// The tasks of one day, capped for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPreview<'a> {
    pub shown: &'a [&'a Task],
    pub overflow: usize,
}

/// Filtered tasks grouped by day
#[derive(Debug, Clone, Default)]
pub struct TaskIndex<'a> {
    filtered: Vec<&'a Task>,
    buckets: BTreeMap<String, Vec<&'a Task>>,
}

impl<'a> TaskIndex<'a> {
    /// Filters `tasks` and buckets the survivors by date
    pub fn build(tasks: &'a [Task], filter: &FilterState) -> Self {
        let matcher = filter.matcher();
        let filtered: Vec<&Task> = tasks.iter().filter(|t| matcher.matches(t)).collect();

        let mut buckets: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
        for &task in &filtered {
            buckets.entry(to_iso_date(task.date)).or_default().push(task);
        }

        // sort_by is stable, so insertion order breaks remaining ties
        let mut collator = Collator::default();
        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| compare_in_bucket(&mut collator, a, b));
        }

        Self { filtered, buckets }
    }

    /// Tasks that passed the filter, in store order
    pub fn filtered(&self) -> &[&'a Task] {
        &self.filtered
    }

    /// Sorted bucket for an ISO date key
    pub fn bucket(&self, key: &str) -> &[&'a Task] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sorted bucket for a day
    pub fn day(&self, date: NaiveDate) -> &[&'a Task] {
        self.bucket(&to_iso_date(date))
    }

    /// First `limit` tasks of a day plus how many were left out
    pub fn preview(&self, date: NaiveDate, limit: usize) -> DayPreview<'_> {
        let bucket = self.day(date);
        let shown = &bucket[..bucket.len().min(limit)];
        DayPreview {
            shown,
            overflow: bucket.len() - shown.len(),
        }
    }

    /// Non-empty buckets in date order
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[&'a Task])> {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of filtered tasks with a cell in `grid`
    pub fn count_in(&self, grid: &MonthGrid) -> usize {
        self.filtered.iter().filter(|t| grid.contains(t.date)).count()
    }
}
