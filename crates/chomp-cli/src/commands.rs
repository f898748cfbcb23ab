//! One-shot subcommands. Each handler returns the text to print.

use std::path::Path;

use anyhow::Context;
use chomp_core::analytics::calorie_stats;
use chomp_core::analytics::weight_stats;
use chomp_core::form::parse_integer;
use chomp_core::form::parse_integer_list;
use chomp_core::form::parse_non_negative_float;
use chomp_core::import::reconcile;
use chomp_core::import::ImportSource;
use chomp_core::store::RecordStore;
use chrono::NaiveDate;
use clap::Subcommand;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CaloriesCommand {
    /// Show the calories for the selected date
    Get,
    /// Add calorie entries for the selected date
    Add {
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Clear all calorie entries for the selected date
    Clear,
    /// Fill remaining calories to reach the target for the selected date
    Fill,
    /// Remove the last calorie entry for the selected date
    Pop,
    /// Set a daily target for calorie intake
    #[command(name = "setTarget")]
    SetTarget {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum WeightCommand {
    /// Show the weight for the selected date
    Get,
    /// Set the weight for the selected date
    Set {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Clear the weight entry for the selected date
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SyncCommand {
    /// Safely add data exported from the FitNotes app; existing days are kept
    Fitnotes { path: String },
}

/// Applies `command` (or nothing) and prints the day's calorie stats.
pub fn run_calories(
    store: &mut dyn RecordStore,
    date: NaiveDate,
    command: Option<CaloriesCommand>,
) -> anyhow::Result<String> {
    match command.unwrap_or(CaloriesCommand::Get) {
        CaloriesCommand::Get => {}
        CaloriesCommand::Add { values } => {
            let values = parse_integer_list(&values.join(" "))
                .context("invalid value for calories add")?;
            store.calories_mut().create_or_append(date, &values)?;
        }
        CaloriesCommand::Clear => store.calories_mut().delete(date)?,
        CaloriesCommand::Fill => {
            let target = store.settings().target_calories()?;
            store.calories_mut().fill(date, target)?;
        }
        CaloriesCommand::Pop => store.calories_mut().pop(date)?,
        CaloriesCommand::SetTarget { value } => {
            let target = parse_integer(value.trim())
                .context("invalid value for calories setTarget")?;
            store.settings_mut().set_target_calories(target)?;
        }
    }
    Ok(format!("{}\n", calorie_stats(store, date)?))
}

/// Applies `command` (or nothing) and prints the day's weight stats.
pub fn run_weight(
    store: &mut dyn RecordStore,
    date: NaiveDate,
    command: Option<WeightCommand>,
) -> anyhow::Result<String> {
    match command.unwrap_or(WeightCommand::Get) {
        WeightCommand::Get => {}
        WeightCommand::Set { value } => {
            let value =
                parse_non_negative_float(&value).context("invalid value for weight set")?;
            store.weights_mut().create_or_update(date, value)?;
        }
        WeightCommand::Clear => store.weights_mut().delete(date)?,
    }
    Ok(format!("{}\n", weight_stats(store.weights(), date)?))
}

pub fn run_sync(
    store: &mut dyn RecordStore,
    importer: &dyn ImportSource,
    command: SyncCommand,
) -> anyhow::Result<String> {
    match command {
        SyncCommand::Fitnotes { path } => {
            let batch = importer.load(Path::new(&path))?;
            let summary = reconcile(store, &batch)?;
            info!("event=sync module=cli status=ok source=fitnotes path={path}");
            Ok(format!("{summary}\n"))
        }
    }
}
