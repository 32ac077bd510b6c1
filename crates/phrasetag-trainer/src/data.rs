//! CSV loading and writing of labelled records.
//!
//! Files carry the header `input,name,qty,range_end,unit,comment`. Columns
//! may appear in any order and unknown columns are ignored.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use phrasetag_core::{RawRecord, Record};
use tracing::warn;

/// Column order used when writing records.
pub const RECORD_HEADER: [&str; 6] = ["input", "name", "qty", "range_end", "unit", "comment"];

/// Reads labelled records from CSV.
///
/// Headers and fields are trimmed. Rows that fail to parse, or that have no
/// `input`, are logged and skipped.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (row, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                warn!(row = row + 1, %err, "skipping malformed row");
                continue;
            }
        };
        match Record::try_from(raw) {
            Ok(record) => records.push(record),
            Err(err) => warn!(row = row + 1, %err, "skipping row"),
        }
    }

    Ok(records)
}

/// Reads labelled records from a CSV file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_records(file).with_context(|| format!("failed to read records from {}", path.display()))
}

/// Writes records as CSV. The header is written even when `records` is empty.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(RECORD_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes records to a CSV file, replacing any existing file.
pub fn save_records<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_records(file, records).with_context(|| format!("failed to write {}", path.display()))
}
