//! # Dataset Partitioning
//!
//! Splits labelled records into training and testing sets by position.
//! There is no shuffling, so the split is reproducible from input order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TaggerError};

/// Training and testing subsets of a record sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSplit<T> {
    pub training: Vec<T>,
    pub testing: Vec<T>,
}

impl<T> DatasetSplit<T> {
    /// Total number of records across both subsets.
    pub fn len(&self) -> usize {
        self.training.len() + self.testing.len()
    }

    /// Returns `true` if both subsets are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configuration for the dataset partitioner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Fraction of records used for training, in `[0.0, 1.0]`.
    pub training_fraction: f64,
    /// Maximum number of records to keep before splitting; 0 means unlimited.
    pub max_records: i64,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            training_fraction: 0.9,
            max_records: 0,
        }
    }
}

impl PartitionConfig {
    /// Create a new partition configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the training fraction.
    pub fn with_training_fraction(mut self, fraction: f64) -> Self {
        self.training_fraction = fraction;
        self
    }

    /// Set the record cap (0 for unlimited).
    pub fn with_max_records(mut self, max_records: i64) -> Self {
        self.max_records = max_records;
        self
    }

    /// Checks the parameters without splitting anything.
    ///
    /// # Errors
    ///
    /// Returns `TaggerError::InvalidPartition` if the fraction is not within
    /// `[0.0, 1.0]` or the cap is negative.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.training_fraction) {
            return Err(TaggerError::InvalidPartition(format!(
                "training fraction {} is outside [0, 1]",
                self.training_fraction
            )));
        }
        if self.max_records < 0 {
            return Err(TaggerError::InvalidPartition(format!(
                "max records {} is negative",
                self.max_records
            )));
        }
        Ok(())
    }

    /// Number of training records for a (capped) input of `total` records.
    ///
    /// The product is rounded half away from zero.
    pub fn training_count(&self, total: usize) -> usize {
        let count = (total as f64 * self.training_fraction).round() as usize;
        count.min(total)
    }

    /// Splits `records` into training and testing subsets.
    ///
    /// # Errors
    ///
    /// Returns `TaggerError::InvalidPartition` before touching the records
    /// if the configuration is invalid.
    pub fn split<T>(&self, mut records: Vec<T>) -> Result<DatasetSplit<T>> {
        self.validate()?;

        if self.max_records > 0 {
            records.truncate(self.max_records as usize);
        }

        let training_count = self.training_count(records.len());
        let testing = records.split_off(training_count);
        debug!(
            training = records.len(),
            testing = testing.len(),
            "partitioned records"
        );

        Ok(DatasetSplit {
            training: records,
            testing,
        })
    }
}

/// Splits `records` by `training_fraction`, keeping at most `max_records`
/// (0 for unlimited).
///
/// # Examples
/// ```
/// use phrasetag_core::partition::split;
///
/// let split = split(vec![1, 2, 3, 4, 5], 0.8, 0).unwrap();
/// assert_eq!(split.training, [1, 2, 3, 4]);
/// assert_eq!(split.testing, [5]);
/// ```
pub fn split<T>(records: Vec<T>, training_fraction: f64, max_records: i64) -> Result<DatasetSplit<T>> {
    PartitionConfig::new()
        .with_training_fraction(training_fraction)
        .with_max_records(max_records)
        .split(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<&'static str> {
        vec!["foo", "foz", "faa", "bar", "baz"]
    }

    #[test]
    fn test_partition_80_percent_training() {
        let split = split(records(), 0.8, 0).unwrap();
        assert_eq!(split.training, ["foo", "foz", "faa", "bar"]);
        assert_eq!(split.testing, ["baz"]);
    }

    #[test]
    fn test_partition_20_percent_training() {
        let split = split(records(), 0.2, 0).unwrap();
        assert_eq!(split.training, ["foo"]);
        assert_eq!(split.testing, ["foz", "faa", "bar", "baz"]);
    }

    #[test]
    fn test_partition_with_max_records_discards_records() {
        let split = split(records(), 0.67, 3).unwrap();
        assert_eq!(split.training, ["foo", "foz"]);
        assert_eq!(split.testing, ["faa"]);
        assert_eq!(split.len(), 3);
    }

    #[test]
    fn test_partition_edges() {
        let all = split(records(), 1.0, 0).unwrap();
        assert_eq!(all.training.len(), 5);
        assert!(all.testing.is_empty());

        let none = split(records(), 0.0, 0).unwrap();
        assert!(none.training.is_empty());
        assert_eq!(none.testing.len(), 5);

        let empty = split(Vec::<&str>::new(), 0.5, 0).unwrap();
        assert!(empty.is_empty());

        let capped_above_len = split(records(), 0.5, 100).unwrap();
        assert_eq!(capped_above_len.len(), 5);
    }

    #[test]
    fn test_partition_rounds_half_away_from_zero() {
        let config = PartitionConfig::new().with_training_fraction(0.5);
        assert_eq!(config.training_count(5), 3);
        assert_eq!(config.training_count(3), 2);
        assert_eq!(config.training_count(4), 2);
    }

    #[test]
    fn test_partition_disjoint_and_ordered() {
        let input: Vec<u32> = (0..37).collect();
        for fraction in [0.0, 0.13, 0.5, 0.77, 1.0] {
            for cap in [0, 1, 10, 37, 50] {
                let split = split(input.clone(), fraction, cap).unwrap();
                let expected_len = if cap == 0 { 37 } else { (cap as usize).min(37) };
                let mut joined = split.training.clone();
                joined.extend(split.testing.iter().copied());
                assert_eq!(joined, input[..expected_len]);
            }
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            split(records(), 1.5, 0),
            Err(TaggerError::InvalidPartition(_))
        ));
        assert!(matches!(
            split(records(), -0.1, 0),
            Err(TaggerError::InvalidPartition(_))
        ));
        assert!(matches!(
            split(records(), f64::NAN, 0),
            Err(TaggerError::InvalidPartition(_))
        ));
        assert!(matches!(
            split(records(), 0.5, -1),
            Err(TaggerError::InvalidPartition(_))
        ));
    }
}
