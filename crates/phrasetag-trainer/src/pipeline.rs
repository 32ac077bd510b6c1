//! End-to-end corpus preparation.
//!
//! Partitions a labelled CSV file, writes both partitions back out as CSV,
//! and generates a training corpus for each of them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use phrasetag_core::{PartitionConfig, Translator};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::generate_training_file;
use crate::data::{load_records, save_records};

/// Configuration for [`prepare`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Labelled records to partition.
    pub data_path: PathBuf,
    /// Directory receiving every output file; created if missing.
    pub output_dir: PathBuf,
    /// Split parameters.
    pub partition: PartitionConfig,
}

impl PrepareConfig {
    /// Create a configuration with a 90% training split capped at 1000 records.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            output_dir: PathBuf::from("output"),
            partition: PartitionConfig::new()
                .with_training_fraction(0.9)
                .with_max_records(1000),
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the partition parameters.
    pub fn with_partition(mut self, partition: PartitionConfig) -> Self {
        self.partition = partition;
        self
    }

    pub fn training_labels_path(&self) -> PathBuf {
        self.output_dir.join("training_labels.csv")
    }

    pub fn testing_labels_path(&self) -> PathBuf {
        self.output_dir.join("testing_labels.csv")
    }

    pub fn training_corpus_path(&self) -> PathBuf {
        self.output_dir.join("training_data.crf")
    }

    pub fn testing_corpus_path(&self) -> PathBuf {
        self.output_dir.join("testing_data.crf")
    }
}

/// Counts reported by [`prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareSummary {
    pub training_records: usize,
    pub testing_records: usize,
    pub training_lines: usize,
    pub testing_lines: usize,
}

/// Runs partitioning and corpus generation.
///
/// Fails before writing anything if the partition parameters are invalid.
pub fn prepare(config: &PrepareConfig) -> Result<PrepareSummary> {
    config.partition.validate()?;
    let translator = Translator::new()?;

    info!(path = %config.data_path.display(), "loading labelled records");
    let records = load_records(&config.data_path)?;

    let split = config.partition.split(records)?;
    info!(
        training = split.training.len(),
        testing = split.testing.len(),
        "partitioned labels"
    );

    ensure_dir(&config.output_dir)?;
    save_records(config.training_labels_path(), &split.training)?;
    save_records(config.testing_labels_path(), &split.testing)?;

    let training_lines =
        generate_training_file(&translator, &split.training, config.training_corpus_path())?;
    let testing_lines =
        generate_training_file(&translator, &split.testing, config.testing_corpus_path())?;
    info!(
        training_lines,
        testing_lines,
        dir = %config.output_dir.display(),
        "generated corpora"
    );

    Ok(PrepareSummary {
        training_records: split.training.len(),
        testing_records: split.testing.len(),
        training_lines,
        testing_lines,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}
