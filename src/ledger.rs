// src/ledger.rs
use crate::error::AppError;
use crate::models::CallRecord;
use chrono::{DateTime, Datelike, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed ledger columns. The set and order never change between releases.
pub const CSV_HEADERS: [&str; 7] = [
    "CUSTOMER_NAME",
    "CUSTOMER_NUMBER",
    "START_TIME",
    "END_TIME",
    "TOTAL_$",
    "RATE_$",
    "TECH_NOTES",
];

const LOG_FILE_NAME: &str = "call_log.csv";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only monthly call log.
///
/// One CSV file per `<root>/<YYYY>/<MM>`, partitioned by the record's end
/// timestamp. Rows are only ever appended; the ledger never reads back or
/// rewrites what it wrote before.
pub struct CallLedger {
    root: PathBuf,
}

impl CallLedger {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Partition file for the given calendar month.
    pub fn partition_path(&self, when: &DateTime<Local>) -> PathBuf {
        self.root
            .join(format!("{:04}", when.year()))
            .join(format!("{:02}", when.month()))
            .join(LOG_FILE_NAME)
    }

    /// Append one record to its month partition, creating the directory and
    /// the header row as needed. Returns the partition path written to.
    ///
    /// On failure the record is untouched in memory; the caller reports the
    /// error to the operator, who may retry, copy the summary elsewhere, or
    /// discard it.
    pub fn append(&self, record: &CallRecord) -> Result<PathBuf, AppError> {
        let path = self.partition_path(&record.ended_at);
        write_row(&path, record).map_err(|e| AppError::Ledger {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        info!("Call logged to {}", path.display());
        Ok(path)
    }
}

fn write_row(path: &Path, record: &CallRecord) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let needs_header = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        writeln!(file, "{}", CSV_HEADERS.join(","))?;
    }
    writeln!(file, "{}", csv_row(&record_fields(record)))?;
    Ok(())
}

fn record_fields(record: &CallRecord) -> [String; 7] {
    [
        record.customer_name.clone(),
        record.customer_number.clone(),
        record.started_at.format(TIMESTAMP_FORMAT).to_string(),
        record.ended_at.format(TIMESTAMP_FORMAT).to_string(),
        format!("{:.2}", record.total_charged),
        format!("{:.2}", record.rate_applied),
        record.tech_notes.clone(),
    ]
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// RFC 4180 quoting: free-text notes may carry separators, quotes, or
/// newlines and must survive spreadsheet round-trips.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
