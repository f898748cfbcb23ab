use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::ImportError;
use crate::error::StoreError;
use crate::error::StoreResult;
use crate::import::ImportBatch;
use crate::import::ImportSource;
use crate::store::CalorieRecords;
use crate::store::RecordStore;
use crate::store::SettingsRecords;
use crate::store::WeightRecords;

pub(crate) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[derive(Debug, Default)]
pub(crate) struct MemoryCalories {
    data: BTreeMap<NaiveDate, Vec<u32>>,
    /// Every write after this many successful ones fails with an io error.
    pub(crate) fail_after_writes: Option<usize>,
    writes: usize,
}

impl MemoryCalories {
    fn check_write(&mut self) -> StoreResult<()> {
        if let Some(limit) = self.fail_after_writes {
            if self.writes >= limit {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
        }
        self.writes += 1;
        Ok(())
    }
}

impl CalorieRecords for MemoryCalories {
    fn create(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()> {
        if self.data.contains_key(&date) {
            return Err(StoreError::Duplicate(date));
        }
        self.check_write()?;
        self.data.insert(date, values.to_vec());
        Ok(())
    }

    fn read(&self, date: NaiveDate) -> StoreResult<Option<Vec<u32>>> {
        Ok(self.data.get(&date).cloned())
    }

    fn update(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()> {
        self.check_write()?;
        self.data.insert(date, values.to_vec());
        Ok(())
    }

    fn delete(&mut self, date: NaiveDate) -> StoreResult<()> {
        self.check_write()?;
        self.data.remove(&date);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryWeights {
    data: BTreeMap<NaiveDate, f64>,
    pub(crate) fail_reads: bool,
}

impl WeightRecords for MemoryWeights {
    fn create(&mut self, date: NaiveDate, value: f64) -> StoreResult<()> {
        if self.data.contains_key(&date) {
            return Err(StoreError::Duplicate(date));
        }
        self.data.insert(date, value);
        Ok(())
    }

    fn read(&self, date: NaiveDate) -> StoreResult<Option<f64>> {
        if self.fail_reads {
            return Err(StoreError::Corrupt("weight file unreadable".to_string()));
        }
        Ok(self.data.get(&date).copied())
    }

    fn update(&mut self, date: NaiveDate, value: f64) -> StoreResult<()> {
        self.data.insert(date, value);
        Ok(())
    }

    fn delete(&mut self, date: NaiveDate) -> StoreResult<()> {
        self.data.remove(&date);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemorySettings {
    target_calories: u32,
}

impl SettingsRecords for MemorySettings {
    fn target_calories(&self) -> StoreResult<u32> {
        Ok(self.target_calories)
    }

    fn set_target_calories(&mut self, target: u32) -> StoreResult<()> {
        self.target_calories = target;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) calories: MemoryCalories,
    pub(crate) weights: MemoryWeights,
    pub(crate) settings: MemorySettings,
}

impl RecordStore for MemoryStore {
    fn calories(&self) -> &dyn CalorieRecords {
        &self.calories
    }

    fn calories_mut(&mut self) -> &mut dyn CalorieRecords {
        &mut self.calories
    }

    fn weights(&self) -> &dyn WeightRecords {
        &self.weights
    }

    fn weights_mut(&mut self) -> &mut dyn WeightRecords {
        &mut self.weights
    }

    fn settings(&self) -> &dyn SettingsRecords {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut dyn SettingsRecords {
        &mut self.settings
    }
}

/// Import source that hands back a canned batch for one known path.
#[derive(Debug, Default, Clone)]
pub(crate) struct CannedImport {
    pub(crate) path: String,
    pub(crate) batch: ImportBatch,
}

impl ImportSource for CannedImport {
    fn load(&self, path: &Path) -> Result<ImportBatch, ImportError> {
        if path == Path::new(&self.path) {
            Ok(self.batch.clone())
        } else {
            Err(ImportError::Unreadable {
                path: path.display().to_string(),
                message: "No such file or directory".to_string(),
            })
        }
    }
}
