//! Task store
//!
//! Holds the ordered task list in memory and writes the whole list back to
//! the blob store as one JSON array after every successful mutation.
//! Rejected mutations (blank title, unknown ID) change nothing and write
//! nothing.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};

use super::blob::BlobStore;
use crate::domain::{Label, NewTask, Task, TaskId, TaskPatch, TaskStatus};

/// Blob key for the task list
pub const TASKS_KEY: &str = "month_planner_tasks_v1";

/// Parses a persisted task list
pub fn deserialize_tasks(raw: &str) -> Result<Vec<Task>> {
    serde_json::from_str(raw).context("Failed to parse task list")
}

/// Serializes a task list for persistence
pub fn serialize_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize task list")
}

/// Ordered, write-through task collection
pub struct TaskStore {
    blobs: Arc<dyn BlobStore>,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Loads the task list; a missing blob is an empty list
    pub fn load(blobs: Arc<dyn BlobStore>) -> Result<Self> {
        let tasks = match blobs.get(TASKS_KEY)? {
            Some(raw) => deserialize_tasks(&raw)
                .with_context(|| format!("Corrupt blob '{}'", TASKS_KEY))?,
            None => Vec::new(),
        };

        Ok(Self { blobs, tasks })
    }

    /// All tasks in insertion order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Creates a task under a fresh ID
    ///
    /// Returns `None` without touching storage if the title is blank.
    pub fn create(&mut self, fields: NewTask) -> Result<Option<Task>> {
        if !fields.has_title() {
            return Ok(None);
        }

        let id = self.fresh_id(&fields.title);
        let task = Task::new(id, fields);
        self.tasks.push(task.clone());
        self.persist()?;

        Ok(Some(task))
    }

    /// Merges `patch` into the task with `id`
    ///
    /// Returns `None` if the ID is unknown or the patch would blank the title.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> Result<Option<Task>> {
        if patch.clears_title() {
            return Ok(None);
        }

        let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) else {
            return Ok(None);
        };

        task.apply(patch);
        let updated = task.clone();
        self.persist()?;

        Ok(Some(updated))
    }

    /// Moves a task to another day, leaving every other field alone
    pub fn reschedule(&mut self, id: &TaskId, date: NaiveDate) -> Result<Option<Task>> {
        self.update(id, TaskPatch::reschedule(date))
    }

    /// Removes a task; returns false if the ID is unknown
    pub fn delete(&mut self, id: &TaskId) -> Result<bool> {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);

        if self.tasks.len() == len_before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Adds a handful of example tasks around `today`
    pub fn seed_demo(&mut self, today: NaiveDate) -> Result<Vec<Task>> {
        let demo = [
            ("Kickoff moodboard", 0, Label::Design, TaskStatus::Todo, "Collect 10 refs"),
            ("API contract review", 1, Label::Dev, TaskStatus::InProgress, ""),
            ("Landing copy draft", 3, Label::Content, TaskStatus::Todo, ""),
            ("Vendor onboarding", 5, Label::Ops, TaskStatus::Done, ""),
        ];

        let mut created = Vec::new();
        for (title, offset, label, status, notes) in demo {
            let id = self.fresh_id(title);
            let fields = NewTask::new(title, today + Duration::days(offset))
                .with_label(label)
                .with_status(status)
                .with_notes(notes);
            let task = Task::new(id, fields);
            self.tasks.push(task.clone());
            created.push(task);
        }

        self.persist()?;
        Ok(created)
    }

    /// Generates an ID not used by any stored task
    fn fresh_id(&self, title: &str) -> TaskId {
        let now = Utc::now();
        let mut nonce = 0;
        loop {
            let id = TaskId::generate(title, now, nonce);
            if self.get(&id).is_none() {
                return id;
            }
            nonce += 1;
        }
    }

    fn persist(&self) -> Result<()> {
        let raw = serialize_tasks(&self.tasks)?;
        self.blobs
            .set(TASKS_KEY, &raw)
            .with_context(|| format!("Failed to save blob '{}'", TASKS_KEY))
    }
}
