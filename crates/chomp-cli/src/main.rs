mod commands;
mod config;
mod logging;
mod ui;

use std::path::PathBuf;

use chomp_core::calendar::parse_date;
use chomp_core::Session;
use chomp_store::FitnotesImport;
use chomp_store::JsonRecordStore;
use chrono::Local;
use chrono::NaiveDate;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use log::error;

use crate::commands::CaloriesCommand;
use crate::commands::SyncCommand;
use crate::commands::WeightCommand;

/// Track daily calories and body weight. Without a command, opens the
/// interactive terminal UI.
#[derive(Debug, Parser)]
#[command(name = "chomp", version, disable_help_subcommand = true)]
struct Cli {
    /// Date for the command (YYYY-MM-DD, default today)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Directory holding calories.json, weight.json and settings.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/chomp/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage calorie intake; without a subcommand shows the summary
    Calories {
        #[command(subcommand)]
        action: Option<CaloriesCommand>,
    },
    /// Manage weight tracking; without a subcommand shows the summary
    Weight {
        #[command(subcommand)]
        action: Option<WeightCommand>,
    },
    /// Synchronize with data exported from other applications
    Sync {
        #[command(subcommand)]
        source: SyncCommand,
    },
    /// Display this help message
    Help,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    if let Err(err) = run(cli) {
        error!("event=command module=cli status=failed error={err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Some(Command::Help)) {
        println!("{}", Cli::command().render_long_help());
        return Ok(());
    }

    let config_path = cli.config.clone().or_else(config::default_config_path);
    let config = config::load_config(config_path.as_deref())?;
    let data_dir = config::resolve_data_dir(cli.data_dir.clone(), &config)?;

    if config.logging.enabled {
        if let Err(err) = logging::init_logging(&config.logging.level, &logging::log_dir(&data_dir))
        {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let today = Local::now().date_naive();
    let date = cli.date.unwrap_or(today);
    let mut store = JsonRecordStore::open(&data_dir)?;

    let output = match cli.command {
        None => {
            let session = Session::at(Box::new(store), Box::new(FitnotesImport), date, today);
            return ui::run(session);
        }
        Some(Command::Help) => return Ok(()),
        Some(Command::Calories { action }) => commands::run_calories(&mut store, date, action)?,
        Some(Command::Weight { action }) => commands::run_weight(&mut store, date, action)?,
        Some(Command::Sync { source }) => commands::run_sync(&mut store, &FitnotesImport, source)?,
    };
    print!("{output}");
    Ok(())
}
