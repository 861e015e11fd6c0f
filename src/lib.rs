//! Month planner - a local-first month-view task planner
//!
//! Tasks are dated items with a label and a workflow status. They are laid
//! out on a fixed 6-week month grid, bucketed per day in a stable order and
//! narrowed by a persisted search/label/status filter.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{FilterState, Label, MonthGrid, Task, TaskId, TaskIndex, TaskStatus};
