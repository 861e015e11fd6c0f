//! Task domain model
//!
//! A task is a titled item pinned to one calendar day, tagged with a label
//! and a status. Identity is the [`TaskId`]; every other field is mutable.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Unknown label '{0}' (expected one of: design, dev, content, ops)")]
    UnknownLabel(String),

    #[error("Unknown status '{0}' (expected one of: todo, inprogress, done)")]
    UnknownStatus(String),
}

/// Categorical tag on a task
///
/// Keys outside the fixed set are kept in [`Label::Other`] so they survive a
/// load/save cycle; for display they fall back to the default label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Label {
    #[default]
    Design,
    Dev,
    Content,
    Ops,
    Other(String),
}

impl Label {
    /// The fixed label set, in display order
    pub const KNOWN: [Label; 4] = [Label::Design, Label::Dev, Label::Content, Label::Ops];

    /// Parses a key, rejecting anything outside the fixed set
    pub fn from_key(key: &str) -> Result<Self, TaskError> {
        match Label::from(key.trim().to_lowercase()) {
            Label::Other(other) => Err(TaskError::UnknownLabel(other)),
            label => Ok(label),
        }
    }

    /// Storage key
    pub fn key(&self) -> &str {
        match self {
            Label::Design => "design",
            Label::Dev => "dev",
            Label::Content => "content",
            Label::Ops => "ops",
            Label::Other(key) => key,
        }
    }

    /// The label used for display; unknown keys degrade to the default
    pub fn display(&self) -> Label {
        match self {
            Label::Other(_) => Label::default(),
            known => known.clone(),
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self.display() {
            Label::Dev => "Development",
            Label::Content => "Content",
            Label::Ops => "Ops",
            Label::Design | Label::Other(_) => "Design",
        }
    }

    /// Display colour as RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self.display() {
            Label::Dev => (0x60, 0xa5, 0xfa),
            Label::Content => (0xf5, 0x9e, 0x0b),
            Label::Ops => (0x34, 0xd3, 0x99),
            Label::Design | Label::Other(_) => (0xa7, 0x8b, 0xfa),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Label::Other(_))
    }
}

impl From<String> for Label {
    fn from(key: String) -> Self {
        match key.as_str() {
            "design" => Label::Design,
            "dev" => Label::Dev,
            "content" => Label::Content,
            "ops" => Label::Ops,
            _ => Label::Other(key),
        }
    }
}

impl From<&str> for Label {
    fn from(key: &str) -> Self {
        Label::from(key.to_string())
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        match label {
            Label::Other(key) => key,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Status of a task
///
/// Variant order is the bucket sort order: todo, in progress, done, then
/// any unknown status keys.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Other(String),
}

impl TaskStatus {
    /// The fixed status set, in display order
    pub const KNOWN: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Parses a key, rejecting anything outside the fixed set
    pub fn from_key(key: &str) -> Result<Self, TaskError> {
        let key = key.trim().to_lowercase();
        // Accept the spelling used by other task tools
        let key = if key == "in_progress" { "inprogress".to_string() } else { key };
        match TaskStatus::from(key) {
            TaskStatus::Other(other) => Err(TaskError::UnknownStatus(other)),
            status => Ok(status),
        }
    }

    /// Storage key
    pub fn key(&self) -> &str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
            TaskStatus::Other(key) => key,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
            TaskStatus::Other(key) => key,
        }
    }

    /// Next status in the todo -> in progress -> done cycle
    pub fn next(&self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done | TaskStatus::Other(_) => TaskStatus::Todo,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl From<String> for TaskStatus {
    fn from(key: String) -> Self {
        match key.as_str() {
            "todo" => TaskStatus::Todo,
            "inprogress" => TaskStatus::InProgress,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Other(key),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(key: &str) -> Self {
        TaskStatus::from(key.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(key) => key,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A planned task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Non-empty title
    pub title: String,

    /// Calendar day the task is planned for
    pub date: NaiveDate,

    #[serde(default)]
    pub label: Label,

    #[serde(default)]
    pub status: TaskStatus,

    /// Free-form notes, empty when absent
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Builds a task from creation fields under a fresh ID
    pub fn new(id: TaskId, fields: NewTask) -> Self {
        Self {
            id,
            title: fields.title.trim().to_string(),
            date: fields.date,
            label: fields.label,
            status: fields.status,
            notes: fields.notes,
        }
    }

    /// Merges the set fields of `patch` into this task
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

/// Fields for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub date: NaiveDate,
    pub label: Label,
    pub status: TaskStatus,
    pub notes: String,
}

impl NewTask {
    /// A todo task with the default label and no notes
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            label: Label::default(),
            status: TaskStatus::default(),
            notes: String::new(),
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// True if the title has visible characters
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Partial update for an existing task; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub label: Option<Label>,
    pub status: Option<TaskStatus>,
    pub notes: Option<String>,
}

impl TaskPatch {
    /// A patch that only moves the task to another day
    pub fn reschedule(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// True if the patch would blank out the title
    pub fn clears_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| t.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(title: &str) -> Task {
        let id: TaskId = format!("t-{}", title.to_lowercase()).parse().unwrap();
        Task::new(id, NewTask::new(title, ymd(2026, 10, 19)))
    }

    #[test]
    fn new_task_defaults() {
        let task = make_task("Draft");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.label, Label::Design);
        assert!(task.notes.is_empty());
    }

    #[test]
    fn new_task_trims_title() {
        let id: TaskId = "t-1".parse().unwrap();
        let task = Task::new(id, NewTask::new("  Padded  ", ymd(2026, 1, 1)));
        assert_eq!(task.title, "Padded");
    }

    #[test]
    fn status_order_is_workflow_order() {
        assert!(TaskStatus::Todo < TaskStatus::InProgress);
        assert!(TaskStatus::InProgress < TaskStatus::Done);
        assert!(TaskStatus::Done < TaskStatus::Other("blocked".into()));
    }

    #[test]
    fn status_cycle() {
        assert_eq!(TaskStatus::Todo.next(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.next(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.next(), TaskStatus::Todo);
        assert_eq!(TaskStatus::Other("x".into()).next(), TaskStatus::Todo);
    }

    #[test]
    fn strict_key_parsing() {
        assert_eq!(Label::from_key("Dev").unwrap(), Label::Dev);
        assert!(Label::from_key("marketing").is_err());
        assert_eq!(TaskStatus::from_key("in_progress").unwrap(), TaskStatus::InProgress);
        assert!(TaskStatus::from_key("blocked").is_err());
    }

    #[test]
    fn unknown_label_degrades_for_display() {
        let label = Label::from("marketing");
        assert!(!label.is_known());
        assert_eq!(label.key(), "marketing");
        assert_eq!(label.display(), Label::Design);
        assert_eq!(label.name(), "Design");
    }

    #[test]
    fn serde_uses_persisted_field_names() {
        let task = make_task("Kickoff");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "t-kickoff",
                "title": "Kickoff",
                "date": "2026-10-19",
                "label": "design",
                "status": "todo",
                "notes": "",
            })
        );
    }

    #[test]
    fn unknown_values_survive_roundtrip() {
        let raw = r#"{"id":"x","title":"T","date":"2026-02-03","label":"legal","status":"blocked","notes":"n"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.label, Label::Other("legal".into()));
        assert_eq!(task.status, TaskStatus::Other("blocked".into()));

        let back = serde_json::to_string(&task).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn missing_or_null_notes_become_empty() {
        let missing: Task = serde_json::from_str(
            r#"{"id":"a","title":"T","date":"2026-02-03","label":"ops","status":"done"}"#,
        )
        .unwrap();
        assert_eq!(missing.notes, "");

        let null: Task = serde_json::from_str(
            r#"{"id":"a","title":"T","date":"2026-02-03","label":"ops","status":"done","notes":null}"#,
        )
        .unwrap();
        assert_eq!(null.notes, "");
    }

    #[test]
    fn apply_patch_merges_fields() {
        let mut task = make_task("Draft");
        task.apply(TaskPatch {
            status: Some(TaskStatus::Done),
            notes: Some("shipped".into()),
            ..TaskPatch::default()
        });

        assert_eq!(task.title, "Draft");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.notes, "shipped");
    }

    #[test]
    fn reschedule_patch_only_sets_date() {
        let patch = TaskPatch::reschedule(ymd(2026, 11, 1));
        assert_eq!(patch.date, Some(ymd(2026, 11, 1)));
        assert!(patch.title.is_none() && patch.label.is_none());
        assert!(patch.status.is_none() && patch.notes.is_none());
    }

    #[test]
    fn blank_title_patch_is_detected() {
        let patch = TaskPatch {
            title: Some("   ".into()),
            ..TaskPatch::default()
        };
        assert!(patch.clears_title());
        assert!(!TaskPatch::default().clears_title());
    }
}
