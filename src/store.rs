//! Store operations and utility functions for task management.
//!
//! This module provides the reducer-backed `TaskStore` that owns the task
//! collection, the `TaskAction`s it accepts, and the date parsing and
//! formatting helpers shared by the CLI and the TUI.

use chrono::{Duration, Local, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::task::{NewTask, Task, TaskId};

/// Snapshot of the store: the ordered tasks plus the loading/error flags.
///
/// The flags are part of the shape but no mutation path in this program sets
/// them; adding a task resets both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub tasks: Vec<Task>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl TaskState {
    /// Get a task by ID.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Position of a task in insertion order.
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

/// Mutations accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Append a fully stamped task.
    AddTask(Task),
    /// Replace the task with the same id.
    UpdateTask(Task),
    /// Remove the task with this id.
    DeleteTask(TaskId),
    /// Replace the whole collection.
    SetTasks(Vec<Task>),
    SetLoading(bool),
    SetError(Option<String>),
}

/// Whether a dispatched update or delete matched a stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Ignored,
}

/// Pure transition function: consume a state and an action, return the next state.
///
/// Update and delete with an id that is not present leave the tasks untouched.
pub fn reduce(mut state: TaskState, action: TaskAction) -> TaskState {
    match action {
        TaskAction::AddTask(task) => {
            state.tasks.push(task);
            state.is_loading = false;
            state.error = None;
        }
        TaskAction::UpdateTask(task) => {
            if let Some(idx) = state.position(task.id) {
                state.tasks[idx] = task;
            }
        }
        TaskAction::DeleteTask(id) => {
            state.tasks.retain(|t| t.id != id);
        }
        TaskAction::SetTasks(tasks) => {
            state.tasks = tasks;
        }
        TaskAction::SetLoading(loading) => {
            state.is_loading = loading;
        }
        TaskAction::SetError(error) => {
            state.error = error;
        }
    }
    state
}

/// In-memory task store. Every mutation goes through [`TaskStore::dispatch`].
#[derive(Debug, Default)]
pub struct TaskStore {
    state: TaskState,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current snapshot.
    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Convenience accessor for the ordered task slice.
    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    /// Apply an action, replacing the current snapshot with the reduced one.
    pub fn dispatch(&mut self, action: TaskAction) {
        debug!(action = action_name(&action), "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Assign a fresh id and the current time to `data` and append it.
    pub fn add(&mut self, data: NewTask) -> TaskId {
        let id = TaskId::new();
        let task = data.into_task(id, Utc::now());
        self.dispatch(TaskAction::AddTask(task));
        id
    }

    /// Replace the stored record whose id matches `task.id`.
    pub fn update(&mut self, task: Task) -> Dispatch {
        if self.state.get(task.id).is_none() {
            warn!(id = %task.id, "update ignored, no task with this id");
            return Dispatch::Ignored;
        }
        self.dispatch(TaskAction::UpdateTask(task));
        Dispatch::Applied
    }

    /// Remove the record with this id.
    pub fn delete(&mut self, id: TaskId) -> Dispatch {
        if self.state.get(id).is_none() {
            warn!(%id, "delete ignored, no task with this id");
            return Dispatch::Ignored;
        }
        self.dispatch(TaskAction::DeleteTask(id));
        Dispatch::Applied
    }

    /// Replace every task at once.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.dispatch(TaskAction::SetTasks(tasks));
    }
}

fn action_name(action: &TaskAction) -> &'static str {
    match action {
        TaskAction::AddTask(_) => "add_task",
        TaskAction::UpdateTask(_) => "update_task",
        TaskAction::DeleteTask(_) => "delete_task",
        TaskAction::SetTasks(_) => "set_tasks",
        TaskAction::SetLoading(_) => "set_loading",
        TaskAction::SetError(_) => "set_error",
    }
}

/// Parse human-readable due date input.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date the way task rows show it ("Dec 31, 2024").
pub fn format_due_date(d: NaiveDate) -> String {
    d.format("%b %d, %Y").to_string()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
