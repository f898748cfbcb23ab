//! Record Store contract consumed by the core.
//!
//! Backends implement the primitive create/read/update/delete operations;
//! the existence-aware variants are provided on top of them as
//! read-modify-write sequences. A backend must make each primitive mutation
//! visible to the next read before returning.

use chrono::NaiveDate;

use crate::calendar::DateRange;
use crate::error::ChompResult;
use crate::error::StoreError;
use crate::error::StoreResult;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Appended(u32),
    AlreadyAtTarget,
}

pub trait CalorieRecords {
    /// Stores `values` for a date that has no record yet.
    ///
    /// # Errors
    /// - `StoreError::Duplicate` when the date already has a record.
    fn create(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()>;

    /// `None` when nothing is stored for the date.
    fn read(&self, date: NaiveDate) -> StoreResult<Option<Vec<u32>>>;

    /// Replaces the list for the date, inserting it when absent.
    fn update(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()>;

    /// Removes the record. Deleting an absent date is a no-op.
    fn delete(&mut self, date: NaiveDate) -> StoreResult<()>;

    fn create_or_append(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()> {
        match self.read(date)? {
            Some(mut existing) => {
                existing.extend_from_slice(values);
                self.update(date, &existing)
            }
            None => self.create(date, values),
        }
    }

    /// Creates the record unless the date already has entries. A stored empty
    /// list counts as no entries and is overwritten.
    fn safe_create(&mut self, date: NaiveDate, values: &[u32]) -> StoreResult<()> {
        match self.read(date)? {
            Some(existing) if !existing.is_empty() => Err(StoreError::Duplicate(date)),
            Some(_) => self.update(date, values),
            None => self.create(date, values),
        }
    }

    fn sum(&self, date: NaiveDate) -> StoreResult<u64> {
        Ok(self
            .read(date)?
            .unwrap_or_default()
            .iter()
            .map(|value| u64::from(*value))
            .sum())
    }

    /// Drops the last entry; the record is deleted once it becomes empty.
    fn pop(&mut self, date: NaiveDate) -> StoreResult<()> {
        let Some(mut existing) = self.read(date)? else {
            return Ok(());
        };
        if existing.pop().is_none() || existing.is_empty() {
            return self.delete(date);
        }
        self.update(date, &existing)
    }

    /// Appends the entry that brings the day's sum up to `target`.
    ///
    /// # Errors
    /// - `ValidationError::OverTarget` when the sum already exceeds `target`;
    ///   nothing is written in that case.
    fn fill(&mut self, date: NaiveDate, target: u32) -> ChompResult<FillOutcome> {
        let sum = self.sum(date)?;
        let target_wide = u64::from(target);
        if sum > target_wide {
            return Err(ValidationError::OverTarget { sum, target }.into());
        }
        // sum <= target, so the delta fits in u32
        let delta = u32::try_from(target_wide - sum).unwrap_or(target);
        if delta == 0 {
            return Ok(FillOutcome::AlreadyAtTarget);
        }
        self.create_or_append(date, &[delta])?;
        Ok(FillOutcome::Appended(delta))
    }
}

pub trait WeightRecords {
    /// # Errors
    /// - `StoreError::Duplicate` when the date already has a sample.
    fn create(&mut self, date: NaiveDate, value: f64) -> StoreResult<()>;

    fn read(&self, date: NaiveDate) -> StoreResult<Option<f64>>;

    /// Overwrites the sample for the date, inserting it when absent.
    fn update(&mut self, date: NaiveDate, value: f64) -> StoreResult<()>;

    fn delete(&mut self, date: NaiveDate) -> StoreResult<()>;

    fn create_or_update(&mut self, date: NaiveDate, value: f64) -> StoreResult<()> {
        match self.read(date)? {
            Some(_) => self.update(date, value),
            None => self.create(date, value),
        }
    }

    fn safe_create(&mut self, date: NaiveDate, value: f64) -> StoreResult<()> {
        if self.read(date)?.is_some() {
            return Err(StoreError::Duplicate(date));
        }
        self.create(date, value)
    }

    /// Samples present in the range, in date order; missing days are skipped.
    ///
    /// # Errors
    /// - `StoreError::NoData` when no day in the range has a sample.
    fn read_range(&self, range: DateRange) -> StoreResult<Vec<f64>> {
        let mut samples = Vec::new();
        for day in range.days() {
            if let Some(value) = self.read(day)? {
                samples.push(value);
            }
        }
        if samples.is_empty() {
            return Err(StoreError::NoData {
                start: range.start(),
                end: range.end(),
            });
        }
        Ok(samples)
    }
}

pub trait SettingsRecords {
    /// Process-wide daily calorie target; `0` when never set.
    fn target_calories(&self) -> StoreResult<u32>;

    fn set_target_calories(&mut self, target: u32) -> StoreResult<()>;
}

/// The storage collaborator as seen by the session: one handle per domain.
pub trait RecordStore {
    fn calories(&self) -> &dyn CalorieRecords;
    fn calories_mut(&mut self) -> &mut dyn CalorieRecords;
    fn weights(&self) -> &dyn WeightRecords;
    fn weights_mut(&mut self) -> &mut dyn WeightRecords;
    fn settings(&self) -> &dyn SettingsRecords;
    fn settings_mut(&mut self) -> &mut dyn SettingsRecords;
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::ChompError;
    use crate::testing::day;
    use crate::testing::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_or_append_extends_existing_list() {
        let mut store = MemoryStore::default();
        let date = day(2024, 4, 1);
        store.calories_mut().create_or_append(date, &[100]).expect("create");
        store
            .calories_mut()
            .create_or_append(date, &[200, 300])
            .expect("append");
        assert_eq!(
            store.calories().read(date).expect("read"),
            Some(vec![100, 200, 300])
        );
        assert_eq!(store.calories().sum(date).expect("sum"), 600);
    }

    #[test]
    fn safe_create_reports_duplicate_without_overwriting() {
        let mut store = MemoryStore::default();
        let date = day(2024, 4, 1);
        store.calories_mut().safe_create(date, &[10]).expect("first");
        let err = store
            .calories_mut()
            .safe_create(date, &[99])
            .expect_err("duplicate");
        assert!(err.is_duplicate());
        assert_eq!(store.calories().read(date).expect("read"), Some(vec![10]));

        store.weights_mut().safe_create(date, 70.0).expect("first weight");
        let err = store
            .weights_mut()
            .safe_create(date, 80.0)
            .expect_err("duplicate weight");
        assert!(err.is_duplicate());
        assert_eq!(store.weights().read(date).expect("read"), Some(70.0));
    }

    #[test]
    fn safe_create_fills_a_day_stored_as_an_empty_list() {
        let mut store = MemoryStore::default();
        let date = day(2024, 1, 1);
        store.calories_mut().create(date, &[]).expect("seed empty");
        assert_eq!(store.calories().sum(date).expect("sum"), 0);

        store
            .calories_mut()
            .safe_create(date, &[1900])
            .expect("empty list is no entries");
        assert_eq!(store.calories().read(date).expect("read"), Some(vec![1900]));
    }

    #[test]
    fn pop_deletes_record_when_last_entry_goes() {
        let mut store = MemoryStore::default();
        let date = day(2024, 4, 2);
        store.calories_mut().create(date, &[1, 2]).expect("create");

        store.calories_mut().pop(date).expect("pop");
        assert_eq!(store.calories().read(date).expect("read"), Some(vec![1]));

        store.calories_mut().pop(date).expect("pop");
        assert_eq!(store.calories().read(date).expect("read"), None);

        store.calories_mut().pop(date).expect("pop on absent");
        assert_eq!(store.calories().read(date).expect("read"), None);
    }

    #[test]
    fn fill_scenario_reaches_target_then_noops() {
        let mut store = MemoryStore::default();
        let date = day(2024, 4, 3);
        store.calories_mut().create_or_append(date, &[500, 300]).expect("add");

        let outcome = store.calories_mut().fill(date, 2000).expect("fill");
        assert_eq!(outcome, FillOutcome::Appended(1200));
        assert_eq!(store.calories().sum(date).expect("sum"), 2000);

        let outcome = store.calories_mut().fill(date, 2000).expect("fill again");
        assert_eq!(outcome, FillOutcome::AlreadyAtTarget);
        assert_eq!(
            store.calories().read(date).expect("read"),
            Some(vec![500, 300, 1200])
        );
    }

    #[test]
    fn fill_on_absent_day_creates_target_entry() {
        let mut store = MemoryStore::default();
        let date = day(2024, 4, 4);
        let outcome = store.calories_mut().fill(date, 1800).expect("fill");
        assert_eq!(outcome, FillOutcome::Appended(1800));
        assert_eq!(store.calories().read(date).expect("read"), Some(vec![1800]));
    }

    #[test]
    fn fill_over_target_is_validation_error_and_writes_nothing() {
        let mut store = MemoryStore::default();
        let date = day(2024, 4, 5);
        store.calories_mut().create(date, &[2500]).expect("create");
        let err = store.calories_mut().fill(date, 2000).expect_err("over target");
        assert!(matches!(
            err,
            ChompError::Validation(ValidationError::OverTarget {
                sum: 2500,
                target: 2000
            })
        ));
        assert_eq!(store.calories().read(date).expect("read"), Some(vec![2500]));
    }

    #[test]
    fn read_range_skips_missing_days_and_reports_no_data() {
        let mut store = MemoryStore::default();
        let range = DateRange::new(day(2024, 4, 1), day(2024, 4, 7)).expect("range");
        let err = store.weights().read_range(range).expect_err("empty");
        assert!(err.is_no_data());

        store.weights_mut().create(day(2024, 4, 2), 80.0).expect("create");
        store.weights_mut().create(day(2024, 4, 6), 79.0).expect("create");
        store.weights_mut().create(day(2024, 4, 9), 50.0).expect("outside");
        assert_eq!(store.weights().read_range(range).expect("range"), vec![80.0, 79.0]);
    }

    #[test]
    fn create_or_update_overwrites_sample() {
        let mut store = MemoryStore::default();
        let date = day(2024, 4, 8);
        store.weights_mut().create_or_update(date, 81.5).expect("create");
        store.weights_mut().create_or_update(date, 80.9).expect("update");
        assert_eq!(store.weights().read(date).expect("read"), Some(80.9));
    }

    proptest! {
        #[test]
        fn fill_after_add_tops_up_exactly(
            values in proptest::collection::vec(0u32..3000, 0..8),
            target in 0u32..20000,
        ) {
            let mut store = MemoryStore::default();
            let date = day(2024, 6, 1);
            if !values.is_empty() {
                store.calories_mut().create_or_append(date, &values).expect("add");
            }
            let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
            let result = store.calories_mut().fill(date, target);

            if sum > u64::from(target) {
                prop_assert!(result.is_err());
                prop_assert_eq!(store.calories().sum(date).expect("sum"), sum);
            } else if sum == u64::from(target) {
                prop_assert_eq!(result.expect("fill"), FillOutcome::AlreadyAtTarget);
                prop_assert_eq!(store.calories().sum(date).expect("sum"), sum);
            } else {
                let delta = u64::from(target) - sum;
                prop_assert_eq!(result.expect("fill"), FillOutcome::Appended(delta as u32));
                let stored = store.calories().read(date).expect("read").unwrap_or_default();
                prop_assert_eq!(stored.last().copied(), Some(delta as u32));
                prop_assert_eq!(stored.len(), values.len() + 1);
            }
        }

        #[test]
        fn pop_n_times_empties_list_and_extra_pop_is_noop(
            values in proptest::collection::vec(0u32..5000, 1..10),
        ) {
            let mut store = MemoryStore::default();
            let date = day(2024, 6, 2);
            store.calories_mut().create(date, &values).expect("create");
            for remaining in (0..values.len()).rev() {
                store.calories_mut().pop(date).expect("pop");
                let stored = store.calories().read(date).expect("read");
                if remaining == 0 {
                    prop_assert_eq!(stored, None);
                } else {
                    prop_assert_eq!(stored, Some(values[..remaining].to_vec()));
                }
            }
            store.calories_mut().pop(date).expect("extra pop");
            prop_assert_eq!(store.calories().read(date).expect("read"), None);
        }
    }
}
