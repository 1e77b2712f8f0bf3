//! Enumerations and field types for task management.
//!
//! This module defines the closed set of task statuses and the status
//! selector used by the list filter, along with their display labels.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task progress status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[serde(alias = "Pending")]
    Pending,
    #[serde(alias = "InProgress")]
    InProgress,
    #[serde(alias = "Completed")]
    Completed,
}

impl Status {
    /// All statuses in selector order.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    /// The next status in the Pending -> In Progress -> Completed -> Pending cycle.
    pub fn cycle(self) -> Status {
        match self {
            Status::Pending => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }
}

/// Status selector for the task list: one status or every task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
}

impl StatusFilter {
    /// Whether a task with `status` passes this selector.
    pub fn admits(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == Status::Pending,
            StatusFilter::InProgress => status == Status::InProgress,
            StatusFilter::Completed => status == Status::Completed,
        }
    }

    /// The next selector in dropdown order, wrapping back to All.
    pub fn cycle(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::InProgress,
            StatusFilter::InProgress => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

/// Format a task status for selectors and the help screen.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Pending => "Pending",
        Status::InProgress => "In Progress",
        Status::Completed => "Completed",
    }
}

/// Format a task status for the badge shown on each task row.
pub fn format_status_badge(s: Status) -> &'static str {
    match s {
        Status::Pending => "PENDING",
        Status::InProgress => "IN PROGRESS",
        Status::Completed => "COMPLETED",
    }
}

/// Format a status selector for the list header.
pub fn format_status_filter(f: StatusFilter) -> &'static str {
    match f {
        StatusFilter::All => "All Tasks",
        StatusFilter::Pending => "Pending",
        StatusFilter::InProgress => "In Progress",
        StatusFilter::Completed => "Completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: Status = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(back, Status::Completed);
    }

    #[test]
    fn test_status_filter_admits() {
        assert!(StatusFilter::All.admits(Status::Pending));
        assert!(StatusFilter::All.admits(Status::Completed));
        assert!(StatusFilter::Completed.admits(Status::Completed));
        assert!(!StatusFilter::Completed.admits(Status::InProgress));
        assert!(!StatusFilter::Pending.admits(Status::InProgress));
    }

    #[test]
    fn test_cycles_wrap() {
        assert_eq!(Status::Completed.cycle(), Status::Pending);
        assert_eq!(StatusFilter::Completed.cycle(), StatusFilter::All);
        let mut f = StatusFilter::All;
        for _ in 0..4 {
            f = f.cycle();
        }
        assert_eq!(f, StatusFilter::All);
    }
}
