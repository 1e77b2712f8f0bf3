//! Command implementations for the CLI interface.
//!
//! Every command works on a fresh in-memory store, optionally seeded with
//! sample tasks: `ui` hands it to the terminal interface, `list` renders the
//! filtered view to stdout.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::error::AppError;
use crate::fields::{format_status, StatusFilter};
use crate::filter::TaskFilter;
use crate::seed::seed_store;
use crate::store::{format_due_date, truncate, TaskStore};
use crate::task::Task;
use crate::tui::run::run_tui;
use crate::window::DEFAULT_ROW_HEIGHT;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (default).
    Ui {
        /// Start with this many sample tasks.
        #[arg(long, default_value_t = 0)]
        seed: usize,
        /// Height of one task row in terminal lines (1-65535).
        #[arg(long, default_value_t = DEFAULT_ROW_HEIGHT as u16, value_parser = clap::value_parser!(u16).range(1..))]
        row_height: u16,
    },

    /// Print the filtered task view without opening the UI.
    List {
        /// Start with this many sample tasks.
        #[arg(long, default_value_t = 0)]
        seed: usize,
        /// Status filter: all | pending | in-progress | completed.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Case-insensitive title search.
        #[arg(long, default_value = "")]
        search: String,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Ui {
            seed: 0,
            row_height: DEFAULT_ROW_HEIGHT as u16,
        }
    }
}

fn seeded_store(seed: usize) -> TaskStore {
    let mut store = TaskStore::new();
    if seed > 0 {
        seed_store(&mut store, seed);
        info!(count = seed, "seeded store");
    }
    store
}

/// Launch the terminal interface over a seeded store.
pub fn cmd_ui(seed: usize, row_height: u16) -> Result<(), AppError> {
    run_tui(seeded_store(seed), usize::from(row_height))?;
    Ok(())
}

/// Print the tasks matching `status` and `search`.
pub fn cmd_list(seed: usize, status: StatusFilter, search: String, json: bool) -> Result<(), AppError> {
    let store = seeded_store(seed);
    let filter = TaskFilter::new(status, search);
    let visible = filter.apply(store.tasks());
    info!(total = store.tasks().len(), shown = visible.len(), "listing tasks");

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &visible)?;
        writeln!(out)?;
    } else if store.tasks().is_empty() {
        writeln!(out, "No tasks yet. Add your first task!")?;
    } else if visible.is_empty() {
        writeln!(out, "No tasks match your filters.")?;
    } else {
        write!(out, "{}", format_table(&visible, Local::now().date_naive()))?;
    }
    Ok(())
}

/// Fixed-width table, one task per line. Overdue rows are marked with `!`.
pub fn format_table(tasks: &[&Task], today: NaiveDate) -> String {
    let mut s = format!(
        "{:<8}  {:<12} {:<14} {}\n",
        "ID", "Status", "Due", "Title"
    );
    for t in tasks {
        let due = if t.is_overdue(today) {
            format!("{}!", format_due_date(t.due_date))
        } else {
            format_due_date(t.due_date)
        };
        s.push_str(&format!(
            "{:<8}  {:<12} {:<14} {}\n",
            t.id.short(),
            format_status(t.status),
            due,
            truncate(&t.title, 48)
        ));
    }
    s
}

pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
