//! Reconciliation of externally exported records into the store.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use log::warn;

use crate::error::ImportError;
use crate::error::StoreResult;
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalorieRecord {
    pub date: NaiveDate,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightRecord {
    pub date: NaiveDate,
    pub value: f64,
}

/// Rows already classified by measurement kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatch {
    pub calories: Vec<CalorieRecord>,
    pub weights: Vec<WeightRecord>,
}

pub trait ImportSource {
    /// Loads and classifies an export file. Any malformed row fails the load.
    fn load(&self, path: &Path) -> Result<ImportBatch, ImportError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub calories_added: usize,
    pub calories_existing: usize,
    pub weights_added: usize,
    pub weights_existing: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "calories records added: {}", self.calories_added)?;
        writeln!(
            f,
            "calories records not added (because of existing records): {}",
            self.calories_existing
        )?;
        writeln!(f, "weight records added: {}", self.weights_added)?;
        write!(
            f,
            "weight records not added (because of existing records): {}",
            self.weights_existing
        )
    }
}

/// Safe-creates every record of the batch, counting duplicates.
///
/// Not transactional: a storage failure aborts immediately, keeping writes
/// made so far and discarding the counts.
pub fn reconcile(store: &mut dyn RecordStore, batch: &ImportBatch) -> StoreResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    for record in &batch.calories {
        match store.calories_mut().safe_create(record.date, &[record.value]) {
            Ok(()) => summary.calories_added += 1,
            Err(err) if err.is_duplicate() => summary.calories_existing += 1,
            Err(err) => {
                warn!(
                    "event=import_reconcile module=import status=aborted kind=calories date={} added_so_far={} error={}",
                    record.date, summary.calories_added, err
                );
                return Err(err);
            }
        }
    }

    for record in &batch.weights {
        match store.weights_mut().safe_create(record.date, record.value) {
            Ok(()) => summary.weights_added += 1,
            Err(err) if err.is_duplicate() => summary.weights_existing += 1,
            Err(err) => {
                warn!(
                    "event=import_reconcile module=import status=aborted kind=weight date={} added_so_far={} error={}",
                    record.date, summary.weights_added, err
                );
                return Err(err);
            }
        }
    }

    info!(
        "event=import_reconcile module=import status=ok calories_added={} calories_existing={} weights_added={} weights_existing={}",
        summary.calories_added,
        summary.calories_existing,
        summary.weights_added,
        summary.weights_existing
    );
    Ok(summary)
}
