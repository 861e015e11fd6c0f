//! TUI application state and logic

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use super::ViewMode;
use crate::domain::{
    add_months, clamp_supported, end_of_month, shift_days, start_of_month, today, FilterPatch,
    FilterState, Label, MonthGrid, NewTask, Task, TaskId, TaskIndex, TaskPatch, TaskStatus,
};
use crate::storage::{BlobStore, CalendarConfig, FilterStore, Project, ProjectConfig, TaskStore};

const HELP_LINE: &str =
    "hjkl:day/week [/]:month t:today a:add enter:day m:move /:search f:filter 1/2:view q:quit";

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Draft search query, previewed live and persisted on Enter
    Search(String),
    /// Title of a task to add on the cursor day
    NewTask(String),
    EditTitle(TaskId, String),
    Confirm(ConfirmAction),
    /// Label/status toggles
    Filter,
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(TaskId),
}

/// Application state
pub struct App {
    blobs: Arc<dyn BlobStore>,
    tasks: TaskStore,
    filters: FilterStore,

    calendar: CalendarConfig,
    default_label: Label,
    default_status: TaskStatus,

    today: NaiveDate,

    /// First day of the displayed month
    month: NaiveDate,

    /// Selected day; always inside `month`
    cursor: NaiveDate,

    view_mode: ViewMode,
    input_mode: InputMode,

    /// Whether the full task list of the cursor day is open
    show_day_list: bool,

    /// Selected row in the day list
    day_index: usize,

    /// Selected row in the agenda
    agenda_index: usize,

    /// Task picked up for moving to another day
    carrying: Option<TaskId>,

    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Opens the current project and shows the month containing `month`
    pub fn new(month: Option<NaiveDate>, view_mode: ViewMode) -> Result<Self> {
        let project = Project::open_current()?;
        Self::with_store(project.blob_store(), &project.config().project, today(), month, view_mode)
    }

    /// Builds the app over any blob store
    pub fn with_store(
        blobs: Arc<dyn BlobStore>,
        config: &ProjectConfig,
        today: NaiveDate,
        month: Option<NaiveDate>,
        view_mode: ViewMode,
    ) -> Result<Self> {
        let tasks = TaskStore::load(Arc::clone(&blobs))?;
        let filters = FilterStore::load(Arc::clone(&blobs))?;

        let cursor = match month {
            Some(m) if start_of_month(m) != start_of_month(today) => start_of_month(m),
            _ => today,
        };

        Ok(Self {
            blobs,
            tasks,
            filters,
            calendar: config.calendar.clone(),
            default_label: config.default_label.clone(),
            default_status: config.default_status.clone(),
            today,
            month: start_of_month(cursor),
            cursor,
            view_mode,
            input_mode: InputMode::Normal,
            show_day_list: false,
            day_index: 0,
            agenda_index: 0,
            carrying: None,
            status_message: None,
            should_quit: false,
        })
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view_mode {
            ViewMode::Month => views::month::draw(frame, self),
            ViewMode::Agenda => views::agenda::draw(frame, self),
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match &self.input_mode {
            InputMode::Normal => {
                self.status_message = None;
                if self.show_day_list {
                    self.handle_day_list_key(key)
                } else {
                    match self.view_mode {
                        ViewMode::Month => self.handle_month_key(key),
                        ViewMode::Agenda => self.handle_agenda_key(key),
                    }
                }
            }
            InputMode::Search(_) => self.handle_search_key(key),
            InputMode::NewTask(_) | InputMode::EditTitle(_, _) => self.handle_text_key(key),
            InputMode::Confirm(_) => self.handle_confirm_key(key),
            InputMode::Filter => self.handle_filter_key(key),
        }
    }

    /// Keys available in both views; returns false if `key` is not one of them
    fn handle_common_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('[') => self.shift_month(-1),
            KeyCode::Char(']') => self.shift_month(1),
            KeyCode::Char('t') => self.move_cursor_to(self.today),
            KeyCode::Char('1') => self.view_mode = ViewMode::Month,
            KeyCode::Char('2') => {
                self.view_mode = ViewMode::Agenda;
                self.agenda_index = 0;
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search(self.filters.get().query.clone());
            }
            KeyCode::Char('f') => self.input_mode = InputMode::Filter,
            KeyCode::Char('r') => {
                self.reload()?;
                self.status_message = Some("Reloaded".to_string());
            }
            KeyCode::Esc if self.carrying.is_some() => {
                self.carrying = None;
                self.status_message = Some("Move cancelled".to_string());
            }
            KeyCode::Char('?') => {
                self.status_message = Some(HELP_LINE.to_string());
            }
            _ => return Ok(false),
        }

        Ok(true)
    }

    fn handle_month_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor_by(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor_by(-7),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor_by(7),
            KeyCode::Char('a') => self.input_mode = InputMode::NewTask(String::new()),
            KeyCode::Char('m') => self.drop_carried()?,
            KeyCode::Enter => {
                if self.carrying.is_some() {
                    self.drop_carried()?;
                } else {
                    self.show_day_list = true;
                    self.day_index = 0;
                }
            }
            _ => {
                self.handle_common_key(key)?;
            }
        }

        Ok(())
    }

    fn handle_day_list_key(&mut self, key: KeyEvent) -> Result<()> {
        let len = self.day_tasks().len();

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.show_day_list = false,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.day_index + 1 < len {
                    self.day_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.day_index = self.day_index.saturating_sub(1);
            }
            KeyCode::Char('a') => self.input_mode = InputMode::NewTask(String::new()),
            KeyCode::Char('s') => {
                if let Some(task) = self.selected_task() {
                    let patch = TaskPatch {
                        status: Some(task.status.next()),
                        ..TaskPatch::default()
                    };
                    let id = task.id.clone();
                    self.update_task(&id, patch)?;
                }
            }
            KeyCode::Char('l') => {
                if let Some(task) = self.selected_task() {
                    let patch = TaskPatch {
                        label: Some(next_label(&task.label)),
                        ..TaskPatch::default()
                    };
                    let id = task.id.clone();
                    self.update_task(&id, patch)?;
                }
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    self.input_mode = InputMode::EditTitle(task.id.clone(), task.title.clone());
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    self.input_mode =
                        InputMode::Confirm(ConfirmAction::DeleteTask(task.id.clone()));
                }
            }
            KeyCode::Char('m') => {
                let picked = self
                    .selected_task()
                    .map(|task| (task.id.clone(), task.title.clone()));
                if let Some((id, title)) = picked {
                    self.status_message =
                        Some(format!("Moving '{}': pick a day and press enter", title));
                    self.carrying = Some(id);
                    self.show_day_list = false;
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_agenda_key(&mut self, key: KeyEvent) -> Result<()> {
        let len = self.agenda().len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.agenda_index + 1 < len {
                    self.agenda_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.agenda_index = self.agenda_index.saturating_sub(1);
            }
            KeyCode::Enter => {
                let picked = self
                    .agenda()
                    .get(self.agenda_index)
                    .map(|task| (task.id.clone(), task.date));
                if let Some((id, date)) = picked {
                    self.move_cursor_to(date);
                    let row = self.day_tasks().iter().position(|t| t.id == id);
                    self.day_index = row.unwrap_or(0);
                    self.show_day_list = true;
                    self.view_mode = ViewMode::Month;
                }
            }
            _ => {
                if self.handle_common_key(key)? {
                    self.clamp_selection();
                }
            }
        }

        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                if let InputMode::Search(query) = std::mem::take(&mut self.input_mode) {
                    self.filters.set(FilterPatch {
                        query: Some(query),
                        ..FilterPatch::default()
                    })?;
                    self.clamp_selection();
                }
            }
            code => {
                if let InputMode::Search(ref mut query) = self.input_mode {
                    edit_buffer(query, code);
                }
            }
        }

        Ok(())
    }

    fn handle_text_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => match std::mem::take(&mut self.input_mode) {
                InputMode::NewTask(title) => self.create_task(title)?,
                InputMode::EditTitle(id, title) => {
                    let patch = TaskPatch {
                        title: Some(title),
                        ..TaskPatch::default()
                    };
                    self.update_task(&id, patch)?;
                }
                _ => {}
            },
            code => match self.input_mode {
                InputMode::NewTask(ref mut buf) | InputMode::EditTitle(_, ref mut buf) => {
                    edit_buffer(buf, code);
                }
                _ => {}
            },
        }

        Ok(())
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::Confirm(action) = std::mem::take(&mut self.input_mode) {
                    match action {
                        ConfirmAction::DeleteTask(id) => self.delete_task(&id)?,
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {}
        }

        Ok(())
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let slot = c as usize - '1' as usize;
                self.filters.toggle_label(Label::KNOWN[slot].key())?;
            }
            KeyCode::Char('t') => {
                self.filters.toggle_status(TaskStatus::Todo.key())?;
            }
            KeyCode::Char('i') => {
                self.filters.toggle_status(TaskStatus::InProgress.key())?;
            }
            KeyCode::Char('d') => {
                self.filters.toggle_status(TaskStatus::Done.key())?;
            }
            KeyCode::Char('c') => self.filters.clear()?,
            _ => {}
        }

        self.clamp_selection();
        Ok(())
    }

    fn move_cursor_by(&mut self, days: i64) {
        self.move_cursor_to(shift_days(self.cursor, days));
    }

    fn move_cursor_to(&mut self, date: NaiveDate) {
        let date = clamp_supported(date);
        self.cursor = date;
        self.month = start_of_month(date);
        self.day_index = 0;
    }

    /// Moves `n` months keeping the day of month where it exists
    fn shift_month(&mut self, n: i32) {
        let target = add_months(self.cursor, n);
        let date = target
            .with_day(self.cursor.day())
            .unwrap_or_else(|| end_of_month(target));
        self.move_cursor_to(date);
    }

    fn create_task(&mut self, title: String) -> Result<()> {
        let fields = NewTask::new(title, self.cursor)
            .with_label(self.default_label.clone())
            .with_status(self.default_status.clone());

        self.status_message = Some(match self.tasks.create(fields)? {
            Some(task) => format!("Added '{}'", task.title),
            None => "Task title cannot be empty".to_string(),
        });
        Ok(())
    }

    fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<()> {
        let clears_title = patch.clears_title();
        if self.tasks.update(id, patch)?.is_none() {
            self.status_message = Some(if clears_title {
                "Task title cannot be empty".to_string()
            } else {
                "Task no longer exists".to_string()
            });
        }
        self.clamp_selection();
        Ok(())
    }

    fn delete_task(&mut self, id: &TaskId) -> Result<()> {
        if self.tasks.delete(id)? {
            self.status_message = Some("Deleted task".to_string());
        }
        if self.carrying.as_ref() == Some(id) {
            self.carrying = None;
        }
        self.clamp_selection();
        Ok(())
    }

    /// Reschedules the carried task onto the cursor day
    fn drop_carried(&mut self) -> Result<()> {
        let Some(id) = self.carrying.take() else {
            return Ok(());
        };

        self.status_message = Some(match self.tasks.reschedule(&id, self.cursor)? {
            Some(task) => format!("Moved '{}' to {}", task.title, task.date),
            None => "Task no longer exists".to_string(),
        });
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.tasks = TaskStore::load(Arc::clone(&self.blobs))?;
        self.filters = FilterStore::load(Arc::clone(&self.blobs))?;
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let day_len = self.day_tasks().len();
        let agenda_len = self.agenda().len();
        self.day_index = self.day_index.min(day_len.saturating_sub(1));
        self.agenda_index = self.agenda_index.min(agenda_len.saturating_sub(1));
    }

    /// Persisted filter with the draft search query laid over it
    pub fn effective_filter(&self) -> Cow<'_, FilterState> {
        match &self.input_mode {
            InputMode::Search(query) => {
                let mut filter = self.filters.get().clone();
                filter.query = query.clone();
                Cow::Owned(filter)
            }
            _ => Cow::Borrowed(self.filters.get()),
        }
    }

    pub fn index(&self) -> TaskIndex<'_> {
        TaskIndex::build(self.tasks.list(), &self.effective_filter())
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(self.month, self.calendar.week_start)
    }

    /// Visible tasks on the cursor day, in bucket order
    pub fn day_tasks(&self) -> Vec<&Task> {
        self.index().day(self.cursor).to_vec()
    }

    /// Visible tasks of the displayed month by day
    pub fn agenda(&self) -> Vec<&Task> {
        let index = self.index();
        let tasks: Vec<&Task> = index
            .buckets()
            .flat_map(|(_, bucket)| bucket.iter().copied())
            .filter(|t| start_of_month(t.date) == self.month)
            .collect();
        tasks
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.day_tasks().get(self.day_index).copied()
    }

    pub fn carried_task(&self) -> Option<&Task> {
        self.carrying.as_ref().and_then(|id| self.tasks.get(id))
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn max_tasks_per_cell(&self) -> usize {
        self.calendar.max_tasks_per_cell
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn filter(&self) -> &FilterState {
        self.filters.get()
    }

    pub fn show_day_list(&self) -> bool {
        self.show_day_list
    }

    pub fn day_index(&self) -> usize {
        self.day_index
    }

    pub fn agenda_index(&self) -> usize {
        self.agenda_index
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    #[cfg(test)]
    fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Next label in the fixed cycle; unknown labels restart it
pub fn next_label(label: &Label) -> Label {
    let pos = Label::KNOWN.iter().position(|l| l == label);
    match pos {
        Some(i) => Label::KNOWN[(i + 1) % Label::KNOWN.len()].clone(),
        None => Label::KNOWN[0].clone(),
    }
}

/// Applies a typing key to a text buffer
fn edit_buffer(buf: &mut String, code: KeyCode) {
    match code {
        KeyCode::Backspace => {
            buf.pop();
        }
        KeyCode::Char(c) => buf.push(c),
        _ => {}
    }
}
