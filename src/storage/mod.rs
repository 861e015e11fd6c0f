//! # Storage Layer
//!
//! Persistence for the planner on top of a key-value blob store.
//!
//! ## Blobs
//!
//! | Key | Content |
//! |-----|---------|
//! | `month_planner_tasks_v1` | JSON array of tasks |
//! | `month_planner_settings_v1` | JSON object `{query, labels, statuses}` |
//!
//! [`DirBlobStore`] writes each key to `.planner/{key}.json` with file
//! locking (`fs2`) and atomic temp-file-and-rename writes.
//!
//! ## Project Structure
//!
//! ```text
//! .planner/
//! ├── config.toml                     # Project configuration
//! ├── month_planner_tasks_v1.json     # Task list
//! └── month_planner_settings_v1.json  # Saved filters
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a planner project
//! - [`TaskStore`] - Write-through task list
//! - [`FilterStore`] - Write-through filter state
//! - [`Config`] - Project and global configuration

mod blob;
mod config;
mod filters;
mod project;
mod tasks;

pub use blob::{BlobStore, DirBlobStore, MemoryBlobStore};
pub use config::{
    CalendarConfig, Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PLANNER_DIR,
};
pub use filters::{FilterStore, SETTINGS_KEY};
pub use project::{Project, ProjectError};
pub use tasks::{deserialize_tasks, serialize_tasks, TaskStore, TASKS_KEY};
