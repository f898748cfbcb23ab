//! Read-only numbers derived from stored records for one date.

use std::fmt;

use chrono::NaiveDate;

use crate::calendar::DateRange;
use crate::error::StoreResult;
use crate::store::CalorieRecords;
use crate::store::RecordStore;
use crate::store::WeightRecords;

const WEEK_DAYS: u64 = 7;

pub fn sum(calories: &dyn CalorieRecords, date: NaiveDate) -> StoreResult<u64> {
    calories.sum(date)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalorieStats {
    pub entries: Vec<u32>,
    pub sum: u64,
    pub target: u32,
}

impl CalorieStats {
    /// Target minus sum; negative once the day is over target.
    pub fn left(&self) -> i64 {
        i64::from(self.target) - i64::try_from(self.sum).unwrap_or(i64::MAX)
    }
}

impl fmt::Display for CalorieStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .entries
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "list: [{entries}]")?;
        writeln!(f, "sum: {}", self.sum)?;
        write!(f, "left: {} (target: {})", self.left(), self.target)
    }
}

pub fn calorie_stats(store: &dyn RecordStore, date: NaiveDate) -> StoreResult<CalorieStats> {
    let target = store.settings().target_calories()?;
    let entries = store.calories().read(date)?.unwrap_or_default();
    let sum = entries.iter().map(|value| u64::from(*value)).sum();
    Ok(CalorieStats {
        entries,
        sum,
        target,
    })
}

/// Mean of the samples present in `range`; missing days are skipped.
///
/// # Errors
/// - `StoreError::NoData` when the range holds no sample.
pub fn weekly_average(weights: &dyn WeightRecords, range: DateRange) -> StoreResult<f64> {
    let samples = weights.read_range(range)?;
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeeklyChange {
    Change(f64),
    InsufficientData,
}

impl fmt::Display for WeeklyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Change(delta) => write!(f, "weekly change: {delta:.1}kg w/w"),
            Self::InsufficientData => write!(f, "weekly change: - (not enough data to calculate)"),
        }
    }
}

/// Mean of the 7 days ending the day before `reference`, minus the mean of
/// the 7 days before those.
pub fn weekly_change(
    weights: &dyn WeightRecords,
    reference: NaiveDate,
) -> StoreResult<WeeklyChange> {
    let (Some(recent), Some(prior)) = (
        DateRange::trailing(reference, 1, WEEK_DAYS),
        DateRange::trailing(reference, WEEK_DAYS + 1, WEEK_DAYS),
    ) else {
        return Ok(WeeklyChange::InsufficientData);
    };
    let recent = match weekly_average(weights, recent) {
        Ok(avg) => avg,
        Err(err) if err.is_no_data() => return Ok(WeeklyChange::InsufficientData),
        Err(err) => return Err(err),
    };
    let prior = match weekly_average(weights, prior) {
        Ok(avg) => avg,
        Err(err) if err.is_no_data() => return Ok(WeeklyChange::InsufficientData),
        Err(err) => return Err(err),
    };
    Ok(WeeklyChange::Change(recent - prior))
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightStats {
    pub amount: Option<f64>,
    pub weekly_change: WeeklyChange,
}

impl fmt::Display for WeightStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(amount) => writeln!(f, "amount: {amount:.1}")?,
            None => writeln!(f, "amount: -")?,
        }
        write!(f, "{}", self.weekly_change)
    }
}

pub fn weight_stats(weights: &dyn WeightRecords, date: NaiveDate) -> StoreResult<WeightStats> {
    Ok(WeightStats {
        amount: weights.read(date)?,
        weekly_change: weekly_change(weights, date)?,
    })
}

/// The stats block shown under the date.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub date: NaiveDate,
    pub calories: CalorieStats,
    pub weight: WeightStats,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calories")?;
        writeln!(f, "{}", self.calories)?;
        writeln!(f, "Weight")?;
        writeln!(f, "{}", self.weight)
    }
}

pub fn stats_report(store: &dyn RecordStore, date: NaiveDate) -> StoreResult<StatsReport> {
    Ok(StatsReport {
        date,
        calories: calorie_stats(store, date)?,
        weight: weight_stats(store.weights(), date)?,
    })
}
