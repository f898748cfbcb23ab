//! File-backed Record Store: one JSON document per domain.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use chomp_core::store::CalorieRecords;
use chomp_core::store::RecordStore;
use chomp_core::store::SettingsRecords;
use chomp_core::store::WeightRecords;
use chomp_core::StoreError;
use chomp_core::StoreResult;
use chrono::NaiveDate;
use log::debug;
use log::info;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

pub const FORMAT_VERSION: u32 = 1;

pub const CALORIES_FILE: &str = "calories.json";
pub const WEIGHT_FILE: &str = "weight.json";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaloriesDocument {
    pub version: u32,
    #[serde(default)]
    pub records: BTreeMap<NaiveDate, Vec<u32>>,
}

impl Default for CaloriesDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            records: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightDocument {
    pub version: u32,
    #[serde(default)]
    pub records: BTreeMap<NaiveDate, f64>,
}

impl Default for WeightDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            records: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDocument {
    pub version: u32,
    #[serde(default)]
    pub target_calories: u32,
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            target_calories: 0,
        }
    }
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// A JSON file mirrored in memory. Mutations are written through before the
/// in-memory copy changes, so a failed write leaves both sides untouched.
#[derive(Debug)]
pub struct JsonDocument<T> {
    path: PathBuf,
    data: T,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Loads `path`, creating it with defaults when missing.
    pub fn open(path: PathBuf) -> StoreResult<Self> {
        if !path.exists() {
            let data = T::default();
            write_atomic(&path, &data)?;
            info!(
                "event=store_open module=json_store status=created path={}",
                path.display()
            );
            return Ok(Self { path, data });
        }
        let bytes = std::fs::read(&path)?;
        let header = serde_json::from_slice::<VersionHeader>(&bytes)
            .map_err(|err| corrupt(&path, &err))?;
        if header.version > FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: header.version,
                supported: FORMAT_VERSION,
            });
        }
        let data = serde_json::from_slice::<T>(&bytes).map_err(|err| corrupt(&path, &err))?;
        debug!(
            "event=store_open module=json_store status=loaded path={}",
            path.display()
        );
        Ok(Self { path, data })
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn mutate<R>(&mut self, apply: impl FnOnce(&mut T) -> R) -> StoreResult<R> {
        let mut next = self.data.clone();
        let out = apply(&mut next);
        write_atomic(&self.path, &next)?;
        self.data = next;
        Ok(out)
    }
}

fn corrupt(path: &Path, err: &serde_json::Error) -> StoreError {
    StoreError::Corrupt(format!("{}: {err}", path.display()))
}

/// Writes `value` to a sibling temp file and renames it over `path`.
fn write_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let encoded = serde_json::to_vec_pretty(value)
        .map_err(|err| std::io::Error::other(format!("serialize: {err}")))?;
    let tmp = path.with_extension("json.tmp");
    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(&tmp)?;
    file.write_all(&encoded)?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[derive(Debug)]
pub struct JsonCalories(JsonDocument<CaloriesDocument>);

impl CalorieRecords for JsonCalories {
    fn create(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()> {
        if self.0.data().records.contains_key(&date) {
            return Err(StoreError::Duplicate(date));
        }
        self.0.mutate(|doc| {
            doc.records.insert(date, values.to_vec());
        })
    }

    fn read(&self, date: NaiveDate) -> StoreResult<Option<Vec<u32>>> {
        Ok(self.0.data().records.get(&date).cloned())
    }

    fn update(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()> {
        self.0.mutate(|doc| {
            doc.records.insert(date, values.to_vec());
        })
    }

    fn delete(&mut self, date: NaiveDate) -> StoreResult<()> {
        if !self.0.data().records.contains_key(&date) {
            return Ok(());
        }
        self.0.mutate(|doc| {
            doc.records.remove(&date);
        })
    }
}

#[derive(Debug)]
pub struct JsonWeights(JsonDocument<WeightDocument>);

impl WeightRecords for JsonWeights {
    fn create(&mut self, date: NaiveDate, value: f64) -> StoreResult<()> {
        if self.0.data().records.contains_key(&date) {
            return Err(StoreError::Duplicate(date));
        }
        self.0.mutate(|doc| {
            doc.records.insert(date, value);
        })
    }

    fn read(&self, date: NaiveDate) -> StoreResult<Option<f64>> {
        Ok(self.0.data().records.get(&date).copied())
    }

    fn update(&mut self, date: NaiveDate, value: f64) -> StoreResult<()> {
        self.0.mutate(|doc| {
            doc.records.insert(date, value);
        })
    }

    fn delete(&mut self, date: NaiveDate) -> StoreResult<()> {
        if !self.0.data().records.contains_key(&date) {
            return Ok(());
        }
        self.0.mutate(|doc| {
            doc.records.remove(&date);
        })
    }
}

#[derive(Debug)]
pub struct JsonSettings(JsonDocument<SettingsDocument>);

impl SettingsRecords for JsonSettings {
    fn target_calories(&self) -> StoreResult<u32> {
        Ok(self.0.data().target_calories)
    }

    fn set_target_calories(&mut self, target: u32) -> StoreResult<()> {
        self.0.mutate(|doc| doc.target_calories = target)
    }
}

/// The three documents under one data directory.
#[derive(Debug)]
pub struct JsonRecordStore {
    calories: JsonCalories,
    weights: JsonWeights,
    settings: JsonSettings,
}

impl JsonRecordStore {
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let store = Self {
            calories: JsonCalories(JsonDocument::open(dir.join(CALORIES_FILE))?),
            weights: JsonWeights(JsonDocument::open(dir.join(WEIGHT_FILE))?),
            settings: JsonSettings(JsonDocument::open(dir.join(SETTINGS_FILE))?),
        };
        info!(
            "event=store_open module=json_store status=ok dir={}",
            dir.display()
        );
        Ok(store)
    }
}

impl RecordStore for JsonRecordStore {
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
