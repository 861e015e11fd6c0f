//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init` |
//! | Calendar | Month and day views | `month`, `day` |
//! | Task | Task management | `task add`, `task edit`, `task move` |
//! | Filter | Saved search and toggles | `filter set`, `filter toggle-label` |
//! | Interactive | Terminal UI | `tui` |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Without the flag, `default_format` from the global config applies.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! planner --verbose month
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod filter;
mod month;
mod output;
mod task;
mod text;
mod tui;

pub use app::{run, Cli, Commands};
pub use month::render_month;
pub use output::{Output, OutputFormat};
