//! # Phrasetag Trainer
//!
//! File-level workflows around `phrasetag-core`: reading and writing labelled
//! CSV records, generating corpora for the sequence-tagging engine, and the
//! end-to-end preparation pipeline behind the `phrasetag` binary.

pub mod corpus;
pub mod data;
pub mod pipeline;

pub use corpus::{generate_training_file, write_feature_corpus, write_training_corpus};
pub use data::{load_records, read_records, save_records, write_records};
pub use pipeline::{prepare, PrepareConfig, PrepareSummary};
