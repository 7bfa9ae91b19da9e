//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in memory (and in the dataset cache) after a load
//! - exported to CSV/JSON
//! - parsed straight from command-line flags

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sentiment label attached to every record.
///
/// Declaration order is the display order used by tables and charts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

/// Outcome of matching a raw label against the canonical category names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    /// The label is spelled exactly as a canonical name.
    Exact(Category),
    /// The label only matched after trimming and case folding (e.g. `positive`).
    Normalized(Category),
    /// Not a known category.
    Unknown,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Positive, Category::Negative, Category::Neutral];

    /// Canonical label, as it appears in input files and exports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Positive => "Positive",
            Category::Negative => "Negative",
            Category::Neutral => "Neutral",
        }
    }

    /// Single-character marker used by the ASCII charts.
    pub fn marker(self) -> char {
        match self {
            Category::Positive => '+',
            Category::Negative => 'x',
            Category::Neutral => 'o',
        }
    }

    /// Match a raw label from an input file.
    pub fn match_label(raw: &str) -> LabelMatch {
        for category in Category::ALL {
            if raw == category.label() {
                return LabelMatch::Exact(category);
            }
        }
        let folded = raw.trim();
        for category in Category::ALL {
            if folded.eq_ignore_ascii_case(category.label()) {
                return LabelMatch::Normalized(category);
            }
        }
        LabelMatch::Unknown
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labelled text unit (a tweet-like text plus its sentiment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub text: String,
    pub category: Category,
    /// Only synthetic samples carry a date; file-backed records leave this empty.
    pub timestamp: Option<NaiveDate>,
}

impl Record {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, date: NaiveDate) -> Self {
        self.timestamp = Some(date);
        self
    }
}

/// The full ordered collection of records loaded from one source.
///
/// Order is source order (file row order, or generation order for samples).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A remote CSV location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RemoteSource {
    /// Any HTTP(S) URL serving the CSV body.
    Url(String),
    /// A file on a shared drive, addressed by its file id.
    Drive { file_id: String },
}

/// Parameters of the synthetic "fetch tweets" generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleSpec {
    pub keyword: String,
    pub count: usize,
}

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    File(PathBuf),
    Remote(RemoteSource),
    Synthetic(SampleSpec),
}

/// Identity of a source, used as the cache key and for download file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceKey(String);

impl SourceKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A filesystem-safe rendition of the key.
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect()
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Source {
    pub fn key(&self) -> SourceKey {
        let raw = match self {
            Source::File(path) => format!("file:{}", path.display()),
            Source::Remote(RemoteSource::Url(url)) => format!("url:{url}"),
            Source::Remote(RemoteSource::Drive { file_id }) => format!("drive:{file_id}"),
            Source::Synthetic(spec) => format!("sample:{}:{}", spec.keyword, spec.count),
        };
        SourceKey(raw)
    }

    /// Short human-readable description for headers and logs.
    pub fn describe(&self) -> String {
        match self {
            Source::File(path) => format!("file {}", path.display()),
            Source::Remote(RemoteSource::Url(url)) => format!("remote {url}"),
            Source::Remote(RemoteSource::Drive { file_id }) => format!("drive file {file_id}"),
            Source::Synthetic(spec) => {
                format!("{} sample tweets about '{}'", spec.count, spec.keyword)
            }
        }
    }
}
