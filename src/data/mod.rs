//! Dataset loading.
//!
//! ```text
//!  --file / --url / --drive-id / --sample
//!        │
//!        ▼
//!   ┌──────────┐   remote sources are downloaded to a local CSV first
//!   │   load    │  ─────────────────────────────────────────────────
//!   └──────────┘
//!        │
//!        ▼
//!   LoadOutcome { dataset (possibly empty), diagnostics }
//! ```
//!
//! `load` never fails: retrieval and parse problems become an empty dataset
//! plus `Diagnostic`s for the front-end to show.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::config::Settings;
use crate::domain::{Dataset, Source, SourceKey};
use crate::error::LoadError;
use crate::io::ingest::{IngestedRecords, RowError, read_records};

pub mod cache;
pub mod remote;
pub mod sample;

pub use cache::DatasetCache;
pub use remote::RemoteFetcher;
pub use sample::{DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_COUNT, MIN_SAMPLE_COUNT, generate_sample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    SourceUnavailable,
    MalformedInput,
}

/// A human-readable note about something that went wrong during a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    fn malformed(message: String) -> Self {
        Self {
            kind: DiagnosticKind::MalformedInput,
            message,
        }
    }
}

impl From<&LoadError> for Diagnostic {
    fn from(err: &LoadError) -> Self {
        let kind = match err {
            LoadError::SourceUnavailable { .. } => DiagnosticKind::SourceUnavailable,
            LoadError::MalformedInput { .. } => DiagnosticKind::MalformedInput,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Result of loading one source.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub source: SourceKey,
    pub dataset: Arc<Dataset>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadOutcome {
    /// The source could not be reached at all (file missing, network failure).
    pub fn is_unavailable(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::SourceUnavailable)
    }
}

/// Load a dataset from `source`.
pub fn load(source: &Source, settings: &Settings) -> LoadOutcome {
    let key = source.key();
    let mut diagnostics = Vec::new();

    let dataset = match try_load(source, &key, settings, &mut diagnostics) {
        Ok(dataset) => dataset,
        Err(err) => {
            log::info!("{err}");
            diagnostics.push(Diagnostic::from(&err));
            Dataset::empty()
        }
    };

    log::info!(
        "loaded {} record(s) from {} ({} diagnostic(s))",
        dataset.len(),
        source.describe(),
        diagnostics.len()
    );

    LoadOutcome {
        source: key,
        dataset: Arc::new(dataset),
        diagnostics,
    }
}

fn try_load(
    source: &Source,
    key: &SourceKey,
    settings: &Settings,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Dataset, LoadError> {
    match source {
        Source::File(path) => ingest_file(path, key, diagnostics),
        Source::Remote(remote) => {
            let fetcher = RemoteFetcher::new(settings)?;
            let path = fetcher.fetch(remote, key)?;
            ingest_file(&path, key, diagnostics)
        }
        Source::Synthetic(spec) => generate_sample(spec),
    }
}

fn ingest_file(path: &Path, key: &SourceKey, diagnostics: &mut Vec<Diagnostic>) -> Result<Dataset, LoadError> {
    let ingested = read_records(path, key.as_str())?;
    log::debug!(
        "{key}: read {} row(s), kept {}",
        ingested.rows_read,
        ingested.records.len()
    );
    for diagnostic in row_diagnostics(&ingested) {
        log::info!("{key}: {}", diagnostic.message);
        diagnostics.push(diagnostic);
    }
    Ok(Dataset::from_records(ingested.records))
}

/// Summarize dropped/rewritten rows as one diagnostic per problem class.
fn row_diagnostics(ingested: &IngestedRecords) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if !ingested.parse_errors.is_empty() {
        out.push(Diagnostic::malformed(format!(
            "skipped {} unparseable row(s){}",
            ingested.parse_errors.len(),
            first_example(&ingested.parse_errors)
        )));
    }
    if ingested.missing_values > 0 {
        out.push(Diagnostic::malformed(format!(
            "dropped {} row(s) with missing text or sentiment",
            ingested.missing_values
        )));
    }
    if !ingested.unknown_labels.is_empty() {
        out.push(Diagnostic::malformed(format!(
            "dropped {} row(s) with an unrecognized sentiment{}",
            ingested.unknown_labels.len(),
            first_example(&ingested.unknown_labels)
        )));
    }
    if !ingested.normalized_labels.is_empty() {
        out.push(Diagnostic::malformed(format!(
            "normalized {} sentiment label(s) that differ from Positive/Negative/Neutral only by case or spacing{}",
            ingested.normalized_labels.len(),
            first_example(&ingested.normalized_labels)
        )));
    }

    out
}

fn first_example(errors: &[RowError]) -> String {
    errors
        .first()
        .map(|e| format!(" (first at line {}: {})", e.line, e.message))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, SampleSpec};
    use std::io::Write;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn nonexistent_file_yields_empty_dataset_and_diagnostic() {
        let outcome = load(&Source::File("/no/such/tweets.csv".into()), &settings());
        assert!(outcome.dataset.is_empty());
        assert!(outcome.is_unavailable());
        assert!(!outcome.diagnostics[0].message.is_empty());
    }

    #[test]
    fn file_load_reports_dropped_and_normalized_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Tweet,Sentiment\n\"I love it, really\",Positive\nno label,\nshouting,POSITIVE\nwhat,Mixed\n"
        )
        .unwrap();

        let outcome = load(&Source::File(file.path().to_path_buf()), &settings());
        assert!(!outcome.is_unavailable());
        assert_eq!(outcome.dataset.len(), 2);
        assert_eq!(outcome.dataset.records()[0].text, "I love it, really");
        assert_eq!(outcome.dataset.records()[1].category, Category::Positive);

        assert_eq!(outcome.diagnostics.len(), 3);
        assert!(
            outcome
                .diagnostics
                .iter()
                .all(|d| d.kind == DiagnosticKind::MalformedInput)
        );
        assert!(outcome.diagnostics.iter().any(|d| d.message.contains("normalized 1")));
    }

    #[test]
    fn missing_columns_give_empty_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "id,body\n1,hello\n").unwrap();

        let outcome = load(&Source::File(file.path().to_path_buf()), &settings());
        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MalformedInput);
    }

    #[test]
    fn synthetic_load_is_idempotent() {
        let source = Source::Synthetic(SampleSpec { keyword: "sample".into(), count: 100 });
        let a = load(&source, &settings());
        let b = load(&source, &settings());
        assert_eq!(a.dataset.len(), 100);
        assert_eq!(a.dataset, b.dataset);
        assert!(a.diagnostics.is_empty());
    }

    #[test]
    fn oversize_sample_is_reported_not_raised() {
        let source = Source::Synthetic(SampleSpec { keyword: "x".into(), count: MAX_SAMPLE_COUNT + 1 });
        let outcome = load(&source, &settings());
        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MalformedInput);
    }
}
