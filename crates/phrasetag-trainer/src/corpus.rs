//! Corpus files for the sequence-tagging engine.
//!
//! The training corpus holds one tagged block per record and the feature
//! corpus one untagged block per phrase. Blocks are followed by a blank line.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use phrasetag_core::{Record, Singularize, Translator};
use tracing::debug;

/// Writes the training corpus for `records`, leaving out records without
/// tokens. Returns the number of token lines.
pub fn write_training_corpus<S, W>(
    translator: &Translator<S>,
    records: &[Record],
    mut writer: W,
) -> Result<usize>
where
    S: Singularize,
    W: Write,
{
    let mut lines = 0;
    for record in records {
        let block = translator.translate_record(record);
        if block.is_empty() {
            continue;
        }
        lines += block.lines().count();
        writer.write_all(block.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    debug!(records = records.len(), lines, "wrote training corpus");
    Ok(lines)
}

/// Writes the training corpus for `records` to `path`.
pub fn generate_training_file<S, P>(
    translator: &Translator<S>,
    records: &[Record],
    path: P,
) -> Result<usize>
where
    S: Singularize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_training_corpus(translator, records, BufWriter::new(file))
        .with_context(|| format!("failed to write corpus {}", path.display()))
}

/// Writes untagged feature lines for every phrase read from `reader`, one
/// phrase per line. Phrases without tokens are skipped. Returns the number of
/// phrases written.
pub fn write_feature_corpus<S, R, W>(
    translator: &Translator<S>,
    reader: R,
    mut writer: W,
) -> Result<usize>
where
    S: Singularize,
    R: BufRead,
    W: Write,
{
    let mut phrases = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let block = translator.export_text(&line);
        if block.is_empty() {
            continue;
        }
        writer.write_all(block.as_bytes())?;
        writer.write_all(b"\n")?;
        phrases += 1;
    }
    writer.flush()?;
    debug!(phrases, "wrote feature corpus");
    Ok(phrases)
}
