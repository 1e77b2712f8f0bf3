//! # td - terminal task manager
//!
//! An in-memory task manager: tasks live in a reducer-driven store, a
//! status/search filter derives the visible view, and the terminal UI draws
//! only the rows that intersect the viewport, so lists of thousands of tasks
//! scroll without rendering every row.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI with 500 sample tasks
//! td ui --seed 500
//!
//! # Headless view of the same data, filtered
//! td list --seed 500 --status pending --search plan
//!
//! # Log to a file while using the UI
//! RUST_LOG=debug td --log-file td.log ui --seed 50
//! ```
//!
//! Nothing is persisted: every run starts with an empty (or seeded) store.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod filter;
pub mod log;
pub mod seed;
pub mod store;
pub mod task;
pub mod window;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use error::AppError;
use log::LogTarget;

fn run(cli: Cli) -> Result<(), AppError> {
    let command = cli.command.unwrap_or_default();

    // The UI owns the terminal; only log from it when a file is given.
    let target = match (&cli.log_file, &command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Commands::Ui { .. }) => LogTarget::Off,
        (None, _) => LogTarget::Stderr,
    };
    log::setup(target)?;

    match command {
        Commands::Ui { seed, row_height } => cmd_ui(seed, row_height),
        Commands::List { seed, status, search, json } => cmd_list(seed, status, search, json),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
