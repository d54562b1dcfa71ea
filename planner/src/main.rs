use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use menu_core::{CatalogLoader, MenuBuilder};
use menu_planner::cli::{Cli, Commands, SelectArgs};
use menu_planner::{listed_categories, output, PlannerConfig, Session, Status};
use menu_storage::MenuLogStore;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("menu-planner error: {error:#}");
            ExitCode::from(1)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = PlannerConfig::load_with_dotenv(cli.config.as_deref())
        .context("failed to load menu-planner configuration")?;
    let timezone = config.timezone()?;

    let catalogs = CatalogLoader::new(&config.data_dir).load_all();
    let store = MenuLogStore::from_config(&config.store_config())
        .context("failed to open the menu log")?;
    let mut session = Session::new(MenuBuilder::new(catalogs), store, timezone);

    for warning in session.catalog_warnings() {
        eprintln!("{warning}");
    }

    match cli.command {
        Commands::Catalog { category } => {
            let categories = match listed_categories(category.as_deref()) {
                Ok(categories) => categories,
                Err(warning) => {
                    eprintln!("{warning}");
                    return Ok(ExitCode::from(2));
                }
            };
            for category in categories {
                let catalog = session
                    .builder()
                    .catalogs()
                    .get(category)
                    .cloned()
                    .unwrap_or_default();
                print!("{}", output::catalog_listing(category, &catalog));
            }
        }
        Commands::Preview(args) => {
            if let Some(code) = apply_selections(&mut session, &args) {
                return Ok(code);
            }
            print!("{}", output::preview_table(&session.preview()));
        }
        Commands::Print { select, out } => {
            if let Some(code) = apply_selections(&mut session, &select) {
                return Ok(code);
            }
            let printable = session.printable();
            let path = out.unwrap_or_else(|| printable.file_name.clone().into());
            fs::write(&path, printable.html.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            let written = format!("printable menu written to {}", path.display());
            println!("{}", Status::Success(written));
        }
        Commands::Save(args) => {
            if let Some(code) = apply_selections(&mut session, &args) {
                return Ok(code);
            }
            let status = session.save();
            println!("{status}");
            if status.is_error() {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::NextId => {
            println!("{}", session.store().next_id());
        }
        Commands::History => {
            let entries = session
                .store()
                .load_log()
                .with_context(|| format!("failed to read {}", session.store().location()))?;
            print!("{}", output::history_table(&entries));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// apply the selections; any rejected one aborts the action before the store is touched
fn apply_selections(session: &mut Session, args: &SelectArgs) -> Option<ExitCode> {
    let warnings = session.select_all(&args.selections);
    if warnings.is_empty() {
        return None;
    }
    for warning in warnings {
        eprintln!("{warning}");
    }
    Some(ExitCode::from(2))
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("MENU_PLANNER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
