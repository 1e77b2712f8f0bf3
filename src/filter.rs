//! Derived task views.
//!
//! A `TaskFilter` is view state only: the list owns it, the store never sees it.

use serde::{Deserialize, Serialize};

use crate::fields::StatusFilter;
use crate::task::Task;

/// Status selector plus a case-insensitive title search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub search_query: String,
}

impl TaskFilter {
    pub fn new(status: StatusFilter, search_query: impl Into<String>) -> Self {
        TaskFilter {
            status,
            search_query: search_query.into(),
        }
    }

    /// Whether `task` belongs in the view.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.admits(task.status) && title_contains(&task.title, &self.search_query)
    }

    /// The ordered subsequence of `tasks` that passes this filter.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    /// True when neither the status nor the search narrows the view.
    pub fn is_empty(&self) -> bool {
        self.status == StatusFilter::All && self.search_query.is_empty()
    }
}

fn title_contains(title: &str, query: &str) -> bool {
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}
