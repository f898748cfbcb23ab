//! Import source for FitNotes "Body Tracker" CSV exports.

use std::fs::File;
use std::path::Path;

use chomp_core::calendar::parse_date;
use chomp_core::import::CalorieRecord;
use chomp_core::import::ImportBatch;
use chomp_core::import::ImportSource;
use chomp_core::import::WeightRecord;
use chomp_core::ImportError;
use log::info;

const DATE_COLUMN: usize = 0;
const MEASUREMENT_COLUMN: usize = 2;
const VALUE_COLUMN: usize = 3;

const CALORIES_LABEL: &str = "Calories";
const BODYWEIGHT_LABEL: &str = "Bodyweight";

#[derive(Debug, Clone, Copy, Default)]
pub struct FitnotesImport;

impl ImportSource for FitnotesImport {
    fn load(&self, path: &Path) -> Result<ImportBatch, ImportError> {
        let file = File::open(path).map_err(|err| ImportError::Unreadable {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let batch = parse_export(file, path)?;
        info!(
            "event=fitnotes_load module=fitnotes status=ok path={} calories={} weights={}",
            path.display(),
            batch.calories.len(),
            batch.weights.len()
        );
        Ok(batch)
    }
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, line: u64) -> Result<&'r str, ImportError> {
    record.get(idx).ok_or_else(|| ImportError::MalformedRow {
        line,
        message: format!("expected at least {} columns, got {}", VALUE_COLUMN + 1, record.len()),
    })
}

/// Parses a whole export. `path` is only used for error messages.
pub fn parse_export(reader: impl std::io::Read, path: &Path) -> Result<ImportBatch, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();

    let header = match records.next() {
        None => return Err(ImportError::EmptyFile),
        Some(Err(err)) => return Err(read_error(path, &err)),
        Some(Ok(header)) => header,
    };
    let expected = [
        (DATE_COLUMN, "Date"),
        (MEASUREMENT_COLUMN, "Measurement"),
        (VALUE_COLUMN, "Value"),
    ];
    if expected
        .iter()
        .any(|(idx, name)| header.get(*idx).map(str::trim) != Some(*name))
    {
        return Err(ImportError::InvalidLayout);
    }

    let mut batch = ImportBatch::default();
    for row in records {
        let row = row.map_err(|err| read_error(path, &err))?;
        let line = row.position().map_or(0, |pos| pos.line());
        let date = parse_date(field(&row, DATE_COLUMN, line)?).map_err(|err| {
            ImportError::MalformedRow {
                line,
                message: format!("invalid date: {err}"),
            }
        })?;
        let raw_value = field(&row, VALUE_COLUMN, line)?.trim();
        let value = raw_value
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ImportError::MalformedRow {
                line,
                message: format!("invalid value: {raw_value}"),
            })?;

        let out_of_range = || ImportError::MalformedRow {
            line,
            message: format!("value out of range: {raw_value}"),
        };
        match field(&row, MEASUREMENT_COLUMN, line)?.trim() {
            CALORIES_LABEL => {
                if !(0.0..=f64::from(u32::MAX)).contains(&value) {
                    return Err(out_of_range());
                }
                batch.calories.push(CalorieRecord {
                    date,
                    // in range, so this only truncates the fraction
                    value: value as u32,
                });
            }
            BODYWEIGHT_LABEL => {
                if value < 0.0 {
                    return Err(out_of_range());
                }
                batch.weights.push(WeightRecord { date, value });
            }
            _ => {}
        }
    }
    Ok(batch)
}

fn read_error(path: &Path, err: &csv::Error) -> ImportError {
    match err.position() {
        Some(pos) => ImportError::MalformedRow {
            line: pos.line(),
            message: err.to_string(),
        },
        None => ImportError::Unreadable {
            path: path.display().to_string(),
            message: err.to_string(),
        },
    }
}
