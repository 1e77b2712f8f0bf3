//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used by the add and edit
//! dialogs: field ordering, cursor movement, and turning the entered values
//! into a store mutation.

use chrono::Local;

use crate::{
    error::FormError,
    fields::Status,
    store::parse_due_input,
    task::{NewTask, Task},
    tui::input::InputField,
};

/// Field order in the dialog.
pub const TITLE_ORDER: usize = 0;
pub const DESCRIPTION_ORDER: usize = 1;
pub const STATUS_ORDER: usize = 2;
pub const DUE_ORDER: usize = 3;
const FIELD_COUNT: usize = 4;

/// What a valid form turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Create(NewTask),
    Update(Task),
}

/// Task form for creating or editing a task.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub status: usize,
    pub current_field: usize,
    pub statuses: Vec<Status>,
    editing: Option<Task>,
}

impl TaskForm {
    /// Empty form: pending, due today.
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            due: InputField::with_value(&today.to_string()),
            status: 0,
            current_field: TITLE_ORDER,
            statuses: Status::ALL.to_vec(),
            editing: None,
        };
        form.update_active_field();
        form
    }

    /// Create a task form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(&task.description);
        form.due = InputField::with_value(&task.due_date.to_string());
        form.status = form.statuses.iter().position(|&s| s == task.status).unwrap_or(0);
        form.editing = Some(task.clone());
        form.update_active_field();
        form
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Dialog title.
    pub fn heading(&self) -> &'static str {
        if self.is_edit() {
            "Edit Task"
        } else {
            "Add New Task"
        }
    }

    /// Submit button label.
    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Task"
        } else {
            "Add Task"
        }
    }

    pub fn selected_status(&self) -> Status {
        self.statuses[self.status]
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_ORDER;
        self.description.active = self.current_field == DESCRIPTION_ORDER;
        self.due.active = self.current_field == DUE_ORDER;
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            DESCRIPTION_ORDER => Some(&mut self.description),
            DUE_ORDER => Some(&mut self.due),
            _ => None,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_delete();
        }
    }

    /// Left/right move the cursor in text fields and cycle the status selector.
    pub fn handle_left_right(&mut self, right: bool) {
        if self.current_field == STATUS_ORDER {
            let n = self.statuses.len();
            self.status = if right {
                (self.status + 1) % n
            } else {
                (self.status + n - 1) % n
            };
            return;
        }
        if let Some(field) = self.active_input() {
            if right {
                field.move_cursor_right();
            } else {
                field.move_cursor_left();
            }
        }
    }

    /// Validate the entered values and build the store mutation.
    ///
    /// Editing keeps the original id and creation time.
    pub fn submit(&self) -> Result<FormSubmission, FormError> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let description = self.description.value.trim();
        if description.is_empty() {
            return Err(FormError::EmptyDescription);
        }
        let due_date = parse_due_input(&self.due.value)
            .ok_or_else(|| FormError::InvalidDueDate(self.due.value.trim().to_string()))?;
        let status = self.selected_status();

        Ok(match &self.editing {
            Some(original) => FormSubmission::Update(Task {
                title: title.to_string(),
                description: description.to_string(),
                status,
                due_date,
                ..original.clone()
            }),
            None => FormSubmission::Create(NewTask {
                title: title.to_string(),
                description: description.to_string(),
                status,
                due_date,
            }),
        })
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::task::TaskId;

    fn type_text(form: &mut TaskForm, text: &str) {
        for c in text.chars() {
            form.handle_char(c);
        }
    }

    fn existing() -> Task {
        NewTask {
            title: "Existing Task".into(),
            description: "Existing Description".into(),
            status: Status::Pending,
            due_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
        .into_task(TaskId::new(), Utc::now())
    }

    #[test]
    fn test_new_form_defaults() {
        let form = TaskForm::new();
        assert!(!form.is_edit());
        assert_eq!(form.submit_label(), "Add Task");
        assert_eq!(form.heading(), "Add New Task");
        assert_eq!(form.selected_status(), Status::Pending);
        assert_eq!(form.due.value, Local::now().date_naive().to_string());
        assert!(form.title.active);
    }

    #[test]
    fn test_submits_new_task() {
        let mut form = TaskForm::new();
        type_text(&mut form, "New Task");
        form.next_field();
        type_text(&mut form, "New Description");
        form.next_field();
        form.handle_left_right(true);
        form.next_field();
        form.due.clear();
        type_text(&mut form, "2024-12-31");

        assert_eq!(
            form.submit(),
            Ok(FormSubmission::Create(NewTask {
                title: "New Task".into(),
                description: "New Description".into(),
                status: Status::InProgress,
                due_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            }))
        );
    }

    #[test]
    fn test_edit_prefills_and_preserves_identity() {
        let task = existing();
        let mut form = TaskForm::from_task(&task);
        assert_eq!(form.title.value, "Existing Task");
        assert_eq!(form.description.value, "Existing Description");
        assert_eq!(form.due.value, "2024-12-31");
        assert_eq!(form.selected_status(), Status::Pending);
        assert_eq!(form.submit_label(), "Update Task");

        form.title.clear();
        type_text(&mut form, "Updated Task");

        let expected = Task {
            title: "Updated Task".into(),
            ..task.clone()
        };
        assert_eq!(form.submit(), Ok(FormSubmission::Update(expected)));
    }

    #[test]
    fn test_validation_errors() {
        let mut form = TaskForm::new();
        assert_eq!(form.submit(), Err(FormError::EmptyTitle));

        type_text(&mut form, "   ");
        assert_eq!(form.submit(), Err(FormError::EmptyTitle));

        form.title.clear();
        type_text(&mut form, "Title");
        assert_eq!(form.submit(), Err(FormError::EmptyDescription));

        form.description = InputField::with_value("Body");
        form.due = InputField::with_value("next blue moon");
        assert_eq!(
            form.submit(),
            Err(FormError::InvalidDueDate("next blue moon".into()))
        );
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = TaskForm::new();
        form.prev_field();
        assert_eq!(form.current_field, DUE_ORDER);
        assert!(form.due.active);
        assert!(!form.title.active);
        form.next_field();
        assert_eq!(form.current_field, TITLE_ORDER);
    }

    #[test]
    fn test_status_selector_cycles_both_ways() {
        let mut form = TaskForm::new();
        form.current_field = STATUS_ORDER;
        form.handle_left_right(false);
        assert_eq!(form.selected_status(), Status::Completed);
        form.handle_left_right(true);
        assert_eq!(form.selected_status(), Status::Pending);
        // typing on a selector is ignored
        form.handle_char('x');
        assert!(form.title.value.is_empty());
    }
}
