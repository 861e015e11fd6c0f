//! Filter state for the month view
//!
//! The in-memory representation always uses sets. [`FilterBlob`] is the
//! list-shaped form that crosses the persistence boundary; conversion happens
//! only through the `From` impls below.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::task::Task;

/// Active query, label and status filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against title and notes
    pub query: String,

    /// Label keys to keep (empty = all labels)
    pub labels: BTreeSet<String>,

    /// Status keys to keep (empty = all statuses)
    pub statuses: BTreeSet<String>,
}

impl FilterState {
    /// True if no filter restricts anything
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.labels.is_empty() && self.statuses.is_empty()
    }

    /// Returns a matcher that lowercases the query once
    pub fn matcher(&self) -> FilterMatcher<'_> {
        FilterMatcher {
            query: self.query.to_lowercase(),
            filter: self,
        }
    }

    /// True if `task` passes every active predicate
    pub fn matches(&self, task: &Task) -> bool {
        self.matcher().matches(task)
    }

    /// Adds or removes a label key; returns true if it is now selected
    pub fn toggle_label(&mut self, key: &str) -> bool {
        toggle(&mut self.labels, key)
    }

    /// Adds or removes a status key; returns true if it is now selected
    pub fn toggle_status(&mut self, key: &str) -> bool {
        toggle(&mut self.statuses, key)
    }

    /// Merges the set fields of `patch`
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(query) = patch.query {
            self.query = query;
        }
        if let Some(labels) = patch.labels {
            self.labels = labels;
        }
        if let Some(statuses) = patch.statuses {
            self.statuses = statuses;
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, key: &str) -> bool {
    if set.remove(key) {
        false
    } else {
        set.insert(key.to_string());
        true
    }
}

/// Filter predicate with the query pre-lowercased
pub struct FilterMatcher<'a> {
    query: String,
    filter: &'a FilterState,
}

impl FilterMatcher<'_> {
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task) && self.matches_label(task) && self.matches_status(task)
    }

    fn matches_query(&self, task: &Task) -> bool {
        self.query.is_empty()
            || task.title.to_lowercase().contains(&self.query)
            || task.notes.to_lowercase().contains(&self.query)
    }

    fn matches_label(&self, task: &Task) -> bool {
        self.filter.labels.is_empty() || self.filter.labels.contains(task.label.key())
    }

    fn matches_status(&self, task: &Task) -> bool {
        self.filter.statuses.is_empty() || self.filter.statuses.contains(task.status.key())
    }
}

/// Partial filter update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub query: Option<String>,
    pub labels: Option<BTreeSet<String>>,
    pub statuses: Option<BTreeSet<String>>,
}

/// Persisted filter layout: `{query, labels: [..], statuses: [..]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterBlob {
    pub query: String,
    pub labels: Vec<String>,
    pub statuses: Vec<String>,
}

impl From<FilterBlob> for FilterState {
    fn from(blob: FilterBlob) -> Self {
        Self {
            query: blob.query,
            labels: blob.labels.into_iter().collect(),
            statuses: blob.statuses.into_iter().collect(),
        }
    }
}

impl From<&FilterState> for FilterBlob {
    fn from(state: &FilterState) -> Self {
        Self {
            query: state.query.clone(),
            labels: state.labels.iter().cloned().collect(),
            statuses: state.statuses.iter().cloned().collect(),
        }
    }
}
