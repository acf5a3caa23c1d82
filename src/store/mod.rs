//! Append-only review table.
//!
//! The store is a comma-delimited text table with a fixed header. Volumes
//! are human-scale, so writes are read-modify-rewrite-whole-file rather than
//! a log; the rewrite goes through a temp file and `rename` so a failed
//! attempt leaves the prior contents intact. Single-writer arbitration is by
//! ownership: `append` takes `&mut self` on the one store value the process
//! owns.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Canonical column order of the persisted table.
pub const COLUMNS: [&str; 6] = [
    "timestamp",
    "user_rating",
    "review_text",
    "ai_response_user",
    "ai_summary",
    "ai_actions",
];

/// One row per submission. Rows are immutable once written and only ever
/// appended, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: String,
    pub user_rating: u8,
    pub review_text: String,
    pub ai_response_user: String,
    pub ai_summary: String,
    pub ai_actions: String,
}

pub struct ReviewStore {
    path: PathBuf,
}

impl ReviewStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All persisted records in insertion order.
    ///
    /// A missing backing file is not an error: it is created with the
    /// canonical header and an empty list is returned.
    pub fn load(&self) -> Result<Vec<FeedbackRecord>, StorageError> {
        if !self.path.exists() {
            self.write_all(&[])?;
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Append one record, rewriting the whole table.
    pub fn append(&mut self, record: FeedbackRecord) -> Result<(), StorageError> {
        let mut records = self.load()?;
        records.push(record);
        self.write_all(&records)
    }

    fn write_all(&self, records: &[FeedbackRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let table = render_csv(records)?;
        let temp_path = self.path.with_extension("tmp");

        fs::write(&temp_path, table)?;
        if let Err(rename_error) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(rename_error.into());
        }

        Ok(())
    }
}

/// Canonical tabular text for a record set: header line plus one quoted row
/// per record.
pub fn render_csv(records: &[FeedbackRecord]) -> Result<String, StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))?;
    // The csv writer only ever emits the UTF-8 we fed it.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
