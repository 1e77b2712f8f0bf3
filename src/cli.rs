use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// In-memory task manager with a windowed terminal list.
/// Runs the interactive UI when no subcommand is given.
#[derive(Parser)]
#[command(name = "td", version, about = "Task manager with a filterable, windowed task list")]
pub struct Cli {
    /// Append tracing output to this file. `RUST_LOG` sets the level.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::fields::StatusFilter;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["td"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from([
            "td", "list", "--seed", "20", "--status", "in-progress", "--search", "plan", "--json",
            "--log-file", "td.log",
        ])
        .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("td.log")));
        match cli.command {
            Some(Commands::List { seed, status, search, json }) => {
                assert_eq!(seed, 20);
                assert_eq!(status, StatusFilter::InProgress);
                assert_eq!(search, "plan");
                assert!(json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_ui_row_height() {
        let cli = Cli::try_parse_from(["td", "ui", "--row-height", "7"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Ui { seed: 0, row_height: 7 })));
    }

    #[test]
    fn test_row_height_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["td", "ui", "--row-height", "0"]).is_err());
        assert!(Cli::try_parse_from(["td", "ui", "--row-height", "65536"]).is_err());
        assert!(Cli::try_parse_from(["td", "ui", "--row-height", "65535"]).is_ok());
    }
}
