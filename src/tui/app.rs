//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, handles
//! user input, renders the windowed task list and coordinates between the
//! list, the add/edit dialog, the delete confirmation and the help screen.

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::{
    fields::{format_status, format_status_badge, format_status_filter},
    filter::TaskFilter,
    store::{format_due_date, truncate, Dispatch, TaskStore},
    task::{Task, TaskId},
    tui::{
        colors::{status_badge, status_border, CRIMSON, DARK_RED, SLATE},
        enums::{AppState, InputMode},
        input::InputField,
        task_form::{FormSubmission, TaskForm, DESCRIPTION_ORDER, DUE_ORDER, STATUS_ORDER, TITLE_ORDER},
        utils::centered_rect,
    },
    window::ListWindow,
};

/// Rows scrolled per mouse wheel tick.
const MOUSE_SCROLL_ROWS: isize = 2;

/// Tallest task row a terminal buffer can address.
const MAX_ROW_HEIGHT: usize = u16::MAX as usize;

/// Main application state for the terminal user interface.
///
/// The store is handed in by the caller and every mutation goes through it;
/// the filter and the list window are view state owned here.
pub struct App {
    state: AppState,
    store: TaskStore,
    filter: TaskFilter,
    filtered_tasks: Vec<TaskId>,
    selected: Option<usize>,
    window: ListWindow,
    task_form: TaskForm,
    search_input: InputField,
    input_mode: InputMode,
    status_message: String,
    confirm_target: Option<TaskId>,
}

impl App {
    /// Create a new App around `store`, with task rows `row_height` lines tall.
    ///
    /// The row height is clamped to what a terminal buffer can address.
    pub fn new(store: TaskStore, row_height: usize) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            filter: TaskFilter::default(),
            filtered_tasks: Vec::new(),
            selected: None,
            window: ListWindow::new(row_height.min(MAX_ROW_HEIGHT), 0),
            task_form: TaskForm::new(),
            search_input: InputField::new(),
            input_mode: InputMode::None,
            status_message: String::new(),
            confirm_target: None,
        };
        app.update_filtered_tasks();
        app
    }

    /// The store this app mutates.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Recompute the filtered view after a store or filter change.
    ///
    /// Keeps the selection on the same task when it is still visible,
    /// otherwise keeps the same position clamped to the new length.
    fn update_filtered_tasks(&mut self) {
        let old_selected_id = self.selected_task_id();

        self.filtered_tasks = self
            .filter
            .apply(self.store.tasks())
            .into_iter()
            .map(|t| t.id)
            .collect();

        let len = self.filtered_tasks.len();
        self.selected = match old_selected_id
            .and_then(|id| self.filtered_tasks.iter().position(|&t| t == id))
        {
            Some(idx) => Some(idx),
            None if len == 0 => None,
            None => Some(self.selected.unwrap_or(0).min(len - 1)),
        };

        self.window.clamp(len);
        if let Some(idx) = self.selected {
            self.window.scroll_to_item(idx, len);
        }
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.selected
            .and_then(|idx| self.filtered_tasks.get(idx))
            .copied()
    }

    /// Get a reference to the currently selected task.
    fn get_selected_task(&self) -> Option<&Task> {
        self.selected_task_id()
            .and_then(|id| self.store.state().get(id))
    }

    /// Move the selection to `idx` and scroll it into view.
    fn select(&mut self, idx: usize) {
        let len = self.filtered_tasks.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let idx = idx.min(len - 1);
        self.selected = Some(idx);
        self.window.scroll_to_item(idx, len);
    }

    fn move_selection(&mut self, delta: isize) {
        let current = self.selected.unwrap_or(0);
        let target = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize)
        };
        self.select(target);
    }

    /// Whole rows that fit in the list viewport.
    fn rows_per_page(&self) -> usize {
        (self.window.viewport_height() / self.window.item_height()).max(1)
    }

    /// Positions and ids of the tasks the list materialises this frame.
    fn visible_rows(&self) -> Vec<(usize, TaskId)> {
        let range = self.window.visible_range(self.filtered_tasks.len());
        range
            .clone()
            .zip(self.filtered_tasks[range].iter().copied())
            .collect()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn open_add_form(&mut self) {
        self.task_form = TaskForm::new();
        self.state = AppState::AddTask;
    }

    fn open_edit_form(&mut self) {
        if let Some(task) = self.get_selected_task() {
            self.task_form = TaskForm::from_task(task);
            self.state = AppState::EditTask;
        }
    }

    /// Validate the form and dispatch the add or update it describes.
    fn submit_form(&mut self) {
        match self.task_form.submit() {
            Ok(FormSubmission::Create(data)) => {
                let id = self.store.add(data);
                info!(%id, "task created");
                self.update_filtered_tasks();
                if let Some(idx) = self.filtered_tasks.iter().position(|&t| t == id) {
                    self.select(idx);
                    self.set_status_message("Task created".to_string());
                } else {
                    self.set_status_message("Task created (hidden by current filters)".to_string());
                }
                self.state = AppState::TaskList;
            }
            Ok(FormSubmission::Update(task)) => {
                let id = task.id;
                match self.store.update(task) {
                    Dispatch::Applied => {
                        info!(%id, "task updated");
                        self.set_status_message("Task updated".to_string());
                    }
                    Dispatch::Ignored => {
                        self.set_status_message("Task no longer exists".to_string());
                    }
                }
                self.update_filtered_tasks();
                self.state = AppState::TaskList;
            }
            Err(e) => {
                debug!(error = %e, "form rejected");
                self.set_status_message(format!("Error: {}", e));
            }
        }
    }

    /// Advance the selected task's status, the list's inline status control.
    fn cycle_selected_status(&mut self) {
        if let Some(task) = self.get_selected_task() {
            let mut changed = task.clone();
            changed.status = changed.status.cycle();
            let new_status = changed.status;
            if self.store.update(changed) == Dispatch::Applied {
                self.update_filtered_tasks();
                self.set_status_message(format!("Task status updated to {}", format_status(new_status)));
            }
        }
    }

    fn delete_confirmed(&mut self) {
        if let Some(id) = self.confirm_target.take() {
            if self.store.delete(id) == Dispatch::Applied {
                info!(%id, "task deleted");
                self.set_status_message("Task deleted".to_string());
            }
            self.update_filtered_tasks();
        }
    }

    fn cycle_status_filter(&mut self) {
        self.filter.status = self.filter.status.cycle();
        self.update_filtered_tasks();
        self.set_status_message(format!(
            "Status filter: {} ({} tasks)",
            format_status_filter(self.filter.status),
            self.filtered_tasks.len()
        ));
    }

    fn sync_search(&mut self) {
        self.filter.search_query = self.search_input.value.clone();
        self.update_filtered_tasks();
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.input_mode == InputMode::Search {
            match key {
                KeyCode::Esc => {
                    self.input_mode = InputMode::None;
                    self.search_input.clear();
                    self.sync_search();
                }
                KeyCode::Enter => {
                    self.input_mode = InputMode::None;
                    if self.search_input.value.is_empty() {
                        self.set_status_message("Search cleared".to_string());
                    } else {
                        self.set_status_message(format!(
                            "Search applied: '{}' ({} tasks)",
                            self.search_input.value,
                            self.filtered_tasks.len()
                        ));
                    }
                }
                KeyCode::Backspace => {
                    self.search_input.handle_backspace();
                    self.sync_search();
                }
                KeyCode::Delete => {
                    self.search_input.handle_delete();
                    self.sync_search();
                }
                KeyCode::Left => self.search_input.move_cursor_left(),
                KeyCode::Right => self.search_input.move_cursor_right(),
                KeyCode::Home => self.search_input.move_cursor_home(),
                KeyCode::End => self.search_input.move_cursor_end(),
                KeyCode::Char(c) => {
                    self.search_input.handle_char(c);
                    self.sync_search();
                }
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.filter.is_empty() {
                    return true;
                }
                self.search_input.clear();
                self.filter = TaskFilter::default();
                self.update_filtered_tasks();
                self.set_status_message("Filters cleared".to_string());
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(self.rows_per_page() as isize)),
            KeyCode::PageDown => self.move_selection(self.rows_per_page() as isize),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Char('a') => self.open_add_form(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit_form(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    self.confirm_target = Some(id);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('s') => self.cycle_selected_status(),
            KeyCode::Char('f') => self.cycle_status_filter(),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                self.search_input.move_cursor_end();
                self.set_status_message(
                    "Search mode: type to match titles, Enter to apply, Esc to cancel".to_string(),
                );
            }
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Handle keyboard input in the add/edit dialog.
    fn handle_form_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
        false
    }

    fn handle_confirm_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.delete_confirmed();
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_target = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
        false
    }

    fn handle_help_input(&mut self, _key: KeyCode, _modifiers: KeyModifiers) -> bool {
        self.state = AppState::TaskList;
        false
    }

    /// Route a key press by application state. Returns true to quit.
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match self.state {
            AppState::TaskList => self.handle_task_list_input(key, modifiers),
            AppState::AddTask | AppState::EditTask => self.handle_form_input(key, modifiers),
            AppState::Confirm => self.handle_confirm_input(key, modifiers),
            AppState::Help => self.handle_help_input(key, modifiers),
        }
    }

    fn handle_mouse(&mut self, kind: MouseEventKind) {
        if self.state != AppState::TaskList {
            return;
        }
        let len = self.filtered_tasks.len();
        match kind {
            MouseEventKind::ScrollDown => self.window.scroll_by(MOUSE_SCROLL_ROWS, len),
            MouseEventKind::ScrollUp => self.window.scroll_by(-MOUSE_SCROLL_ROWS, len),
            _ => {}
        }
    }

    /// Poll for and handle terminal events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.clear_status_message();
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse.kind),
                _ => {}
            }
        }
        Ok(false)
    }

    /// Render the title bar with the search box and status selector.
    fn render_header(&mut self, f: &mut Frame, area: Rect) {
        let searching = self.input_mode == InputMode::Search;
        let search_style = if searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let search_text = if self.search_input.value.is_empty() && !searching {
            "Search tasks...".to_string()
        } else {
            self.search_input.value.clone()
        };

        let line = Line::from(vec![
            Span::styled("TASK MANAGER", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   Search: "),
            Span::styled(search_text, search_style),
            Span::raw("   Status: "),
            Span::styled(
                format_status_filter(self.filter.status),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]);

        let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);

        if searching {
            // "TASK MANAGER   Search: " is 23 columns plus the left border
            let x = area.x + 1 + 23 + self.search_input.cursor as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    /// Build the widget for one task row.
    fn task_card<'a>(task: &'a Task, selected: bool, today: NaiveDate, width: u16) -> Paragraph<'a> {
        let overdue = task.is_overdue(today);
        let (badge_bg, badge_fg) = status_badge(task.status);
        let border_style = if selected {
            Style::default()
                .fg(status_border(task.status, overdue))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(status_border(task.status, overdue))
        };
        let due_style = if overdue {
            Style::default().fg(CRIMSON).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let badge = format!(" {} ", format_status_badge(task.status));
        let title_width = (width as usize).saturating_sub(badge.chars().count() + 4);

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    truncate(&task.title, title_width.max(1)),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(badge, Style::default().bg(badge_bg).fg(badge_fg)),
            ]),
            Line::from(Span::styled(
                task.description.as_str(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!("Due: {}", format_due_date(task.due_date)),
                due_style,
            )),
        ];

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(SLATE));
        if selected {
            block = block.title(">> ");
        }
        Paragraph::new(lines).block(block)
    }

    /// Render the windowed task list.
    ///
    /// Only the rows in the window's visible range are drawn; each is
    /// rendered into a scratch buffer and the rows inside the viewport are
    /// copied into the frame, so a partially scrolled row is clipped.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Tasks ({}/{}) - Press 'h' for help",
            self.filtered_tasks.len(),
            self.store.tasks().len()
        ));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let count = self.filtered_tasks.len();
        self.window.set_viewport_height(inner.height as usize, count);

        if self.store.tasks().is_empty() || count == 0 {
            let msg = if self.store.tasks().is_empty() {
                "No tasks yet. Add your first task!"
            } else {
                "No tasks match your filters."
            };
            let empty = Paragraph::new(msg)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            let y = inner.y + inner.height / 2;
            f.render_widget(empty, Rect::new(inner.x, y, inner.width, 1.min(inner.height)));
            return;
        }

        let today = Local::now().date_naive();
        let viewport = inner.height as isize;

        for (idx, id) in self.visible_rows() {
            let Some(task) = self.store.state().get(id) else {
                continue;
            };
            let top = self.window.item_top(idx);

            // Rows past the viewport are never copied, so a tall card is only
            // rendered one row beyond the bottom edge to keep its border hidden.
            let needed = (viewport - top).max(0) as usize + 1;
            let height = self.window.item_height().min(needed).min(MAX_ROW_HEIGHT);
            let card_area = Rect::new(0, 0, inner.width, height as u16);
            let mut scratch = Buffer::empty(card_area);
            Self::task_card(task, self.selected == Some(idx), today, inner.width)
                .render(card_area, &mut scratch);

            let frame_buf = f.buffer_mut();
            for row in 0..card_area.height {
                let y = top + row as isize;
                if y < 0 || y >= viewport {
                    continue;
                }
                for x in 0..card_area.width {
                    let src = scratch.cell((x, row)).cloned();
                    if let (Some(src), Some(dst)) =
                        (src, frame_buf.cell_mut((inner.x + x, inner.y + y as u16)))
                    {
                        *dst = src;
                    }
                }
            }
        }
    }

    /// Render the add/edit dialog over the list.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(self.task_form.heading())
            .style(Style::default().bg(SLATE));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Status
                Constraint::Length(3), // Due Date
                Constraint::Length(1), // Buttons
                Constraint::Min(0),
            ])
            .split(inner);

        let field_block = |label: &'static str, order: usize, current: usize| {
            let style = if order == current {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Block::default().borders(Borders::ALL).title(label).border_style(style)
        };
        let current = self.task_form.current_field;

        let title = Paragraph::new(self.task_form.title.value.as_str())
            .block(field_block("Title", TITLE_ORDER, current));
        f.render_widget(title, chunks[0]);

        let description = Paragraph::new(self.task_form.description.value.as_str())
            .block(field_block("Description", DESCRIPTION_ORDER, current));
        f.render_widget(description, chunks[1]);

        let status = Paragraph::new(format!(
            "< {} >",
            format_status(self.task_form.selected_status())
        ))
        .block(field_block("Status", STATUS_ORDER, current));
        f.render_widget(status, chunks[2]);

        let due = Paragraph::new(self.task_form.due.value.as_str())
            .block(field_block("Due Date", DUE_ORDER, current));
        f.render_widget(due, chunks[3]);

        let buttons = Paragraph::new(Line::from(vec![
            Span::styled("[Esc] Cancel", Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled(
                format!("[Enter] {}", self.task_form.submit_label()),
                Style::default().fg(Color::White).bg(Color::Blue),
            ),
        ]))
        .alignment(Alignment::Right);
        f.render_widget(buttons, chunks[4]);

        let active = match current {
            TITLE_ORDER => Some((&self.task_form.title, chunks[0])),
            DESCRIPTION_ORDER => Some((&self.task_form.description, chunks[1])),
            DUE_ORDER => Some((&self.task_form.due, chunks[3])),
            _ => None,
        };
        if let Some((field, rect)) = active {
            let x = (rect.x + 1 + field.cursor as u16).min(rect.right().saturating_sub(2));
            f.set_cursor_position((x, rect.y + 1));
        }
    }

    /// Render a confirmation dialog for deleting the selected task.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let target = self
            .confirm_target
            .and_then(|id| self.store.state().get(id))
            .map(|t| format!("Delete \"{}\"", t.title))
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(target),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Task Manager Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Task List:", bold)),
            Line::from("  Up/k, Down/j   Move selection"),
            Line::from("  PgUp/PgDn      Move a page"),
            Line::from("  Home/g, End/G  First / last task"),
            Line::from("  Mouse wheel    Scroll the list"),
            Line::from("  a              Add task"),
            Line::from("  e/Enter        Edit selected task"),
            Line::from("  d/Del          Delete selected task"),
            Line::from("  s              Cycle status (Pending > In Progress > Completed)"),
            Line::from("  f              Cycle status filter (All > Pending > In Progress > Completed)"),
            Line::from("  /              Search titles"),
            Line::from("  Esc            Clear filters, or quit when none are set"),
            Line::from("  q/Ctrl+C       Quit"),
            Line::from(""),
            Line::from(Span::styled("Task Dialog:", bold)),
            Line::from("  Tab/Up/Down    Move between fields"),
            Line::from("  Left/Right     Change status"),
            Line::from("  Enter          Save"),
            Line::from("  Esc            Cancel"),
            Line::from(""),
            Line::from(Span::styled("Due Date Formats:", bold)),
            Line::from("  YYYY-MM-DD     Specific date (e.g., 2024-12-31)"),
            Line::from("  today          Today's date"),
            Line::from("  tomorrow       Tomorrow's date"),
            Line::from("  in 3d, in 2w   Days or weeks from today"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.input_mode == InputMode::Search {
            format!(
                "Search: {} (Esc to clear, Enter to confirm)",
                self.search_input.value
            )
        } else {
            match self.state {
                AppState::TaskList if self.filter.is_empty() => {
                    format!("Tasks: {} | Press 'h' for help", self.filtered_tasks.len())
                }
                AppState::TaskList => format!(
                    "Tasks: {} of {} (filtered) | Esc clears filters",
                    self.filtered_tasks.len(),
                    self.store.tasks().len()
                ),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(SLATE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        match self.state {
            AppState::Help => self.render_help(f, chunks[0].union(chunks[1])),
            _ => {
                self.render_header(f, chunks[0]);
                self.render_task_list(f, chunks[1]);
            }
        }

        match self.state {
            AppState::AddTask | AppState::EditTask => self.render_task_form(f, chunks[1]),
            AppState::Confirm => self.render_confirm(f, chunks[1]),
            AppState::TaskList | AppState::Help => {}
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as Days, NaiveDate};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::fields::{Status, StatusFilter};
    use crate::seed::seed_store;
    use crate::task::NewTask;

    fn press(app: &mut App, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn sample_app() -> App {
        let mut store = TaskStore::new();
        for (title, status) in [
            ("Task 1", Status::Pending),
            ("Task 2", Status::InProgress),
            ("Completed Task", Status::Completed),
        ] {
            store.add(NewTask {
                title: title.into(),
                description: format!("{title} notes"),
                status,
                due_date: NaiveDate::from_ymd_opt(2099, 12, 31).unwrap(),
            });
        }
        App::new(store, 5)
    }

    fn visible_titles(app: &App) -> Vec<String> {
        app.filtered_tasks
            .iter()
            .filter_map(|&id| app.store.state().get(id))
            .map(|t| t.title.clone())
            .collect()
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_empty_store_message() {
        let mut app = App::new(TaskStore::new(), 5);
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("No tasks yet. Add your first task!"));
    }

    #[test]
    fn test_no_match_message() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "nonexistent task");
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("No tasks match your filters."));
    }

    #[test]
    fn test_status_filter_key_cycles_view() {
        let mut app = sample_app();
        assert_eq!(visible_titles(&app).len(), 3);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter.status, StatusFilter::Pending);
        assert_eq!(visible_titles(&app), vec!["Task 1"]);

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter.status, StatusFilter::Completed);
        assert_eq!(visible_titles(&app), vec!["Completed Task"]);

        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("Completed Task"));
        assert!(!screen.contains("Task 1"));
    }

    #[test]
    fn test_search_is_case_insensitive_and_esc_clears() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "TASK 1");
        assert_eq!(visible_titles(&app), vec!["Task 1"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::None);
        assert_eq!(visible_titles(&app), vec!["Task 1"]);

        // first Esc clears filters, second quits
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(visible_titles(&app).len(), 3);
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_add_task_through_dialog() {
        let mut app = App::new(TaskStore::new(), 5);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state, AppState::AddTask);

        type_text(&mut app, "New Task");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "New Description");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2024-12-31");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::TaskList);
        let tasks = app.store().tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "New Task");
        assert_eq!(tasks[0].description, "New Description");
        assert_eq!(tasks[0].status, Status::InProgress);
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut app = App::new(TaskStore::new(), 5);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::AddTask);
        assert_eq!(app.status_message, "Error: Title is required");
        assert!(app.store().tasks().is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::TaskList);
        assert!(app.store().tasks().is_empty());
    }

    #[test]
    fn test_edit_updates_in_place() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Down);
        let original = app.get_selected_task().unwrap().clone();

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state, AppState::EditTask);
        type_text(&mut app, " renamed");
        press(&mut app, KeyCode::Enter);

        let tasks = app.store().tasks();
        assert_eq!(tasks[1].id, original.id);
        assert_eq!(tasks[1].created_at, original.created_at);
        assert_eq!(tasks[1].title, "Task 2 renamed");
        assert_eq!(tasks[0].title, "Task 1");
        assert_eq!(tasks[2].title, "Completed Task");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state, AppState::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store().tasks().len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(visible_titles(&app), vec!["Task 2", "Completed Task"]);
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_status_cycle_respects_filter() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(visible_titles(&app), vec!["Task 1"]);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.store().tasks()[0].status, Status::InProgress);
        assert!(visible_titles(&app).is_empty());
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_large_list_materialises_only_a_window() {
        let mut store = TaskStore::new();
        seed_store(&mut store, 1_000);
        let mut app = App::new(store, 5);
        let _ = draw(&mut app, 80, 30);

        // 30 rows minus header, status bar and list borders leaves 24 rows
        assert_eq!(app.window.viewport_height(), 24);
        let visible = app.visible_rows();
        assert!(visible.len() <= 24 / 5 + 1 + 2 * crate::window::DEFAULT_OVERSCAN);
        assert_eq!(visible[0], (0, app.filtered_tasks[0]));

        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, Some(999));
        let screen = draw(&mut app, 80, 30);
        let visible = app.visible_rows();
        assert_eq!(visible.last(), Some(&(999, app.filtered_tasks[999])));
        assert!(visible.len() < 10);

        let last = app.store().state().get(app.filtered_tasks[999]).unwrap();
        let far = app.store().state().get(app.filtered_tasks[900]).unwrap();
        assert!(screen.contains(&last.title));
        assert!(!screen.contains(&far.title));
    }

    #[test]
    fn test_oversized_row_height_still_draws_rows() {
        let mut store = TaskStore::new();
        seed_store(&mut store, 3);
        let mut app = App::new(store, 65_536);
        assert_eq!(app.window.item_height(), MAX_ROW_HEIGHT);

        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("Review pull request #1"));
        assert!(!screen.contains("Write release notes #2"));

        let mut store = TaskStore::new();
        seed_store(&mut store, 3);
        let mut app = App::new(store, 70_000);
        assert_eq!(app.window.item_height(), MAX_ROW_HEIGHT);
        assert!(draw(&mut app, 80, 24).contains("Review pull request #1"));
    }

    #[test]
    fn test_mouse_scroll_moves_window_only() {
        let mut store = TaskStore::new();
        seed_store(&mut store, 50);
        let mut app = App::new(store, 5);
        let _ = draw(&mut app, 80, 30);

        app.handle_mouse(MouseEventKind::ScrollDown);
        assert_eq!(app.window.scroll_offset(), MOUSE_SCROLL_ROWS as usize);
        assert_eq!(app.selected, Some(0));
        let screen = draw(&mut app, 80, 30);
        assert!(screen.contains("Write release notes #2"));
    }

    #[test]
    fn test_overdue_due_line_rendered() {
        let mut store = TaskStore::new();
        let yesterday = Local::now().date_naive() - Days::days(1);
        store.add(NewTask {
            title: "Late".into(),
            description: "behind schedule".into(),
            status: Status::Pending,
            due_date: yesterday,
        });
        let mut app = App::new(store, 5);
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains(&format!("Due: {}", format_due_date(yesterday))));
        assert!(screen.contains("PENDING"));
        assert!(app.get_selected_task().unwrap().is_overdue(Local::now().date_naive()));
    }

    #[test]
    fn test_help_returns_on_any_key() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state, AppState::Help);
        let screen = draw(&mut app, 100, 40);
        assert!(screen.contains("Task Manager Help"));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state, AppState::TaskList);
    }
}
