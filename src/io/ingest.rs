//! CSV ingest and normalization.
//!
//! Turns a tweet/sentiment CSV into `Record`s.
//!
//! Design goals:
//! - **Strict schema** for the two required columns (clear `MalformedInput` errors)
//! - **Row-level validation** (drop bad rows, but count and report what happened)
//! - **Deterministic behavior** (source order preserved, no hidden defaults)

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Category, LabelMatch, Record};
use crate::error::LoadError;

/// Header names accepted for the text column, in priority order.
pub const TEXT_COLUMNS: [&str; 4] = ["text", "tweet", "content", "clean_text"];
/// Header names accepted for the sentiment column, in priority order.
pub const CATEGORY_COLUMNS: [&str; 3] = ["sentiment", "category", "label"];

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: kept records plus everything that was dropped or rewritten.
#[derive(Debug, Clone, Default)]
pub struct IngestedRecords {
    pub records: Vec<Record>,
    pub rows_read: usize,
    /// Rows dropped because text or sentiment was empty.
    pub missing_values: usize,
    /// Rows dropped because the sentiment label is not a known category.
    pub unknown_labels: Vec<RowError>,
    /// Labels accepted only after case/whitespace folding (kept, but flagged).
    pub normalized_labels: Vec<RowError>,
    /// Rows the CSV reader could not parse.
    pub parse_errors: Vec<RowError>,
}

/// Resolved positions of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    text: usize,
    category: usize,
}

/// Read and normalize a CSV file from disk.
pub fn read_records(path: &Path, source_key: &str) -> Result<IngestedRecords, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::SourceUnavailable {
        source_key: source_key.to_string(),
        reason: format!("failed to open '{}': {e}", path.display()),
    })?;
    read_records_from(file, source_key)
}

/// Read and normalize CSV content from any reader.
pub fn read_records_from<R: Read>(input: R, source_key: &str) -> Result<IngestedRecords, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::MalformedInput {
            source_key: source_key.to_string(),
            details: format!("failed to read CSV headers: {e}"),
        })?
        .clone();

    let columns = resolve_columns(&headers).map_err(|details| LoadError::MalformedInput {
        source_key: source_key.to_string(),
        details,
    })?;

    let mut out = IngestedRecords::default();

    for (idx, result) in reader.records().enumerate() {
        // Line numbers are 1-based and the header occupies line 1.
        let line = idx + 2;
        out.rows_read += 1;

        let row = match result {
            Ok(r) => r,
            Err(e) => {
                out.parse_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let text = field(&row, columns.text);
        let label = field(&row, columns.category);
        let (Some(text), Some(label)) = (text, label) else {
            out.missing_values += 1;
            continue;
        };

        let category = match Category::match_label(label) {
            LabelMatch::Exact(category) => category,
            LabelMatch::Normalized(category) => {
                out.normalized_labels.push(RowError {
                    line,
                    message: format!("'{label}' read as '{category}'"),
                });
                category
            }
            LabelMatch::Unknown => {
                out.unknown_labels.push(RowError {
                    line,
                    message: format!("unrecognized sentiment '{label}'"),
                });
                continue;
            }
        };

        out.records.push(Record::new(text, category));
    }

    Ok(out)
}

fn resolve_columns(headers: &StringRecord) -> Result<Columns, String> {
    let header_map = build_header_map(headers);
    let find = |candidates: &[&str]| candidates.iter().find_map(|name| header_map.get(*name).copied());

    let text = find(&TEXT_COLUMNS).ok_or_else(|| {
        format!("missing text column (expected one of: {})", TEXT_COLUMNS.join(", "))
    })?;
    let category = find(&CATEGORY_COLUMNS).ok_or_else(|| {
        format!(
            "missing sentiment column (expected one of: {})",
            CATEGORY_COLUMNS.join(", ")
        )
    })?;

    Ok(Columns { text, category })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// A trimmed, non-empty cell (text is kept verbatim apart from trimming).
fn field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest(csv: &str) -> IngestedRecords {
        read_records_from(csv.as_bytes(), "test").unwrap()
    }

    #[test]
    fn maps_known_headers_and_keeps_order() {
        let data = ingest("\u{feff}Tweet,Sentiment,extra\nI love it,Positive,1\nmeh,Neutral,2\n");
        assert_eq!(data.rows_read, 2);
        assert_eq!(
            data.records,
            vec![Record::new("I love it", Category::Positive), Record::new("meh", Category::Neutral)]
        );
        assert!(data.records.iter().all(|r| r.timestamp.is_none()));
    }

    #[test]
    fn drops_rows_with_missing_values() {
        let data = ingest("text,sentiment\nhello,\n,Negative\n  ,Positive\nok,Negative\n");
        assert_eq!(data.missing_values, 3);
        assert_eq!(data.records, vec![Record::new("ok", Category::Negative)]);
    }

    #[test]
    fn short_rows_count_as_missing() {
        let data = ingest("text,sentiment\nonly text\n");
        assert_eq!(data.missing_values, 1);
        assert!(data.records.is_empty());
    }

    #[test]
    fn flags_case_mismatch_and_drops_unknown_labels() {
        let data = ingest("content,label\na,positive\nb,Happy\nc,Negative\n");
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0].category, Category::Positive);
        assert_eq!(data.normalized_labels.len(), 1);
        assert_eq!(data.normalized_labels[0].line, 2);
        assert_eq!(data.unknown_labels.len(), 1);
        assert_eq!(data.unknown_labels[0].line, 3);
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let err = read_records_from("text,score\nhi,1\n".as_bytes(), "k").unwrap_err();
        match err {
            LoadError::MalformedInput { details, .. } => assert!(details.contains("sentiment")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = read_records(Path::new("/definitely/not/here.csv"), "k").unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }
}
