use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Plan a menu from the kitchen catalogs and log it.
#[derive(Debug, Parser)]
#[command(name = "menu-planner", version, about)]
pub struct Cli {
    /// toml configuration file (default: ./menu-planner.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the dishes offered per category
    Catalog {
        /// category key, all categories when omitted
        category: Option<String>,
    },
    /// Show the menu the selections produce
    Preview(SelectArgs),
    /// Write the menu as a printable html page
    Print {
        #[command(flatten)]
        select: SelectArgs,
        /// output file (default: menu_YYYYMMDD_HHMM.html)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Save the menu to the configured log
    Save(SelectArgs),
    /// Print the id the next saved menu would get
    NextId,
    /// Print every saved menu
    History,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// one per category, e.g. --select soups=מרק עדשים; `-` leaves a category out
    #[arg(short = 's', long = "select", value_name = "CATEGORY=DISH")]
    pub selections: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_select_flags_collect() {
        let cli = Cli::parse_from([
            "menu-planner",
            "save",
            "-s",
            "soups=Soup",
            "--select",
            "fish_dishes=Fish",
        ]);
        match cli.command {
            Commands::Save(args) => {
                assert_eq!(args.selections, vec!["soups=Soup", "fish_dishes=Fish"])
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
