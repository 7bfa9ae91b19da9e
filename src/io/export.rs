//! Export filtered rows (CSV) and the count summary (JSON).
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{Category, Record};
use crate::error::AppError;
use crate::query::Summary;

#[derive(Serialize)]
struct ExportRow<'a> {
    text: &'a str,
    sentiment: Category,
    date: Option<String>,
}

/// Write rows as `text,sentiment,date` (date empty for undated records).
pub fn write_rows_csv(path: &Path, rows: &[&Record]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // An empty row set still gets a header.
    if rows.is_empty() {
        writer
            .write_record(["text", "sentiment", "date"])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
    }

    for record in rows {
        writer
            .serialize(ExportRow {
                text: &record.text,
                sentiment: record.category,
                date: record.timestamp.map(|d| d.to_string()),
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the summary as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}
