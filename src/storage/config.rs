//! Configuration handling for the planner
//!
//! Configuration is stored in `.planner/config.toml` (project) and
//! `~/.config/planner/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Label, TaskStatus, WeekStart};

/// Name of the per-project data directory
pub const PLANNER_DIR: &str = ".planner";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Calendar layout settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    /// First day of the week in the month grid
    pub week_start: WeekStart,

    /// Tasks listed per day cell before "+N more"
    pub max_tasks_per_cell: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Sunday,
            max_tasks_per_cell: 3,
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Label given to new tasks
    pub default_label: Label,

    /// Status given to new tasks
    pub default_status: TaskStatus,

    /// Calendar settings
    pub calendar: CalendarConfig,
}

impl ProjectConfig {
    /// Rejects values the planner cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calendar.max_tasks_per_cell == 0 {
            return Err(ConfigError::Invalid(
                "calendar.max_tasks_per_cell must be at least 1".to_string(),
            ));
        }
        if !self.default_label.is_known() {
            return Err(ConfigError::Invalid(format!(
                "default_label '{}' is not a known label",
                self.default_label
            )));
        }
        if let TaskStatus::Other(status) = &self.default_status {
            return Err(ConfigError::Invalid(format!(
                "default_status '{}' is not a known status",
                status
            )));
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
}

impl Config {
    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "planner", "planner").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PLANNER_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config.validate()?;
        Ok(config)
    }

    /// Finds the project root by looking for a `.planner/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(PLANNER_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
        };

        assert_eq!(config.project.calendar.week_start, WeekStart::Sunday);
        assert_eq!(config.project.calendar.max_tasks_per_cell, 3);
        assert_eq!(config.project.default_label, Label::Design);
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
default_label = "dev"
default_status = "inprogress"

[calendar]
week_start = "monday"
max_tasks_per_cell = 5
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_label, Label::Dev);
        assert_eq!(config.default_status, TaskStatus::InProgress);
        assert_eq!(config.calendar.week_start, WeekStart::Monday);
        assert_eq!(config.calendar.max_tasks_per_cell, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_calendar_section_keeps_defaults() {
        let config: ProjectConfig =
            toml::from_str("[calendar]\nweek_start = \"monday\"\n").unwrap();
        assert_eq!(config.calendar.max_tasks_per_cell, 3);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = ProjectConfig::default();
        config.calendar.max_tasks_per_cell = 0;
        assert!(config.validate().is_err());

        let config = ProjectConfig {
            default_label: Label::from("legal"),
            ..ProjectConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str("default_format = \"json\"\n").unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn load_project_config_from_disk() {
        let dir = TempDir::new().unwrap();
        let planner_dir = dir.path().join(PLANNER_DIR);
        fs::create_dir_all(&planner_dir).unwrap();
        fs::write(
            planner_dir.join("config.toml"),
            "[calendar]\nmax_tasks_per_cell = 2\n",
        )
        .unwrap();

        let config = Config::for_project(dir.path()).unwrap();
        assert_eq!(config.project.calendar.max_tasks_per_cell, 2);
    }
}
