//! Project management
//!
//! Handles project initialization and provides access to stores.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use thiserror::Error;

use super::config::PLANNER_DIR;
use super::{BlobStore, Config, DirBlobStore, FilterStore, TaskStore, TASKS_KEY};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a planner project. Run 'planner init' first.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# Month planner configuration

# Label and status given to new tasks
default_label = "design"
default_status = "todo"

[calendar]
# First day of the week: "sunday" or "monday"
week_start = "sunday"

# Tasks shown per day cell before "+N more"
max_tasks_per_cell = 3
"#;

/// A planner project rooted at a directory containing `.planner/`
pub struct Project {
    root: PathBuf,
    config: Config,
    blobs: Arc<DirBlobStore>,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let planner_dir = root.join(PLANNER_DIR);

        if !planner_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;
        let blobs = Arc::new(DirBlobStore::new(planner_dir));

        Ok(Self {
            root,
            config,
            blobs,
        })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    ///
    /// Demo tasks around `seed_date` are added when the project has no task
    /// list yet, unless `seed_date` is `None`. Re-running on an existing
    /// project leaves its data alone.
    pub fn init(root: impl Into<PathBuf>, seed_date: Option<NaiveDate>) -> Result<Self> {
        let root = root.into();
        let planner_dir = root.join(PLANNER_DIR);

        fs::create_dir_all(&planner_dir).with_context(|| {
            format!("Failed to create {} directory: {}", PLANNER_DIR, planner_dir.display())
        })?;

        let config_path = planner_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let project = Self::open(root)?;

        if let Some(today) = seed_date {
            if project.blobs.get(TASKS_KEY)?.is_none() {
                project.task_store()?.seed_demo(today)?;
            }
        }

        Ok(project)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .planner directory path
    pub fn planner_dir(&self) -> PathBuf {
        self.root.join(PLANNER_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the blob store backing this project
    pub fn blob_store(&self) -> Arc<dyn BlobStore> {
        self.blobs.clone()
    }

    /// Loads the task store
    pub fn task_store(&self) -> Result<TaskStore> {
        TaskStore::load(self.blob_store())
    }

    /// Loads the filter store
    pub fn filter_store(&self) -> Result<FilterStore> {
        FilterStore::load(self.blob_store())
    }
}
