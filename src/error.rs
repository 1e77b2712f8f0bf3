//! Error types.

use thiserror::Error;

/// Reasons a task form submission is rejected. The form stays open.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Description is required")]
    EmptyDescription,
    #[error("Invalid due date '{0}' (use YYYY-MM-DD, today, tomorrow or in Nd)")]
    InvalidDueDate(String),
}

/// Failures that end a command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot set up logging: {0}")]
    Log(String),
}
