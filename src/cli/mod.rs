//! Command-line parsing for the tweet sentiment explorer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/query code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::{DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_COUNT, MIN_SAMPLE_COUNT};
use crate::domain::{Category, RemoteSource, SampleSpec, Source};
use crate::query::{DEFAULT_DISPLAY_LIMIT, Query, RowLimits};

pub mod explore;

/// Keyword used for the default sample dataset.
pub const DEFAULT_SAMPLE_KEYWORD: &str = "sample";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "senti",
    version,
    about = "Filter sentiment-labelled tweets and chart the counts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate sample tweets about a keyword and list them.
    Search(SearchArgs),
    /// Load a dataset, filter it, and print rows, counts and charts.
    Dashboard(DashboardArgs),
    /// Print sentiment counts only (useful for scripting).
    Counts(DashboardArgs),
    /// Load a dataset once and query it interactively.
    Explore(ExploreArgs),
}

/// Where to load tweets from. Defaults to 100 sample tweets about "sample".
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// Local CSV file with a text column and a sentiment column.
    #[arg(long, value_name = "CSV", group = "source")]
    pub file: Option<PathBuf>,

    /// Remote CSV URL (downloaded before parsing).
    #[arg(long, value_name = "URL", group = "source")]
    pub url: Option<String>,

    /// Shared-drive file id of a remote CSV.
    #[arg(long = "drive-id", value_name = "ID", group = "source")]
    pub drive_id: Option<String>,

    /// Generate sample tweets about KEYWORD instead of reading a file.
    #[arg(long, value_name = "KEYWORD", group = "source")]
    pub sample: Option<String>,

    /// Number of sample tweets to generate.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT, value_parser = parse_sample_count)]
    pub count: usize,
}

impl SourceArgs {
    pub fn to_source(&self) -> Source {
        if let Some(path) = &self.file {
            return Source::File(path.clone());
        }
        if let Some(url) = &self.url {
            return Source::Remote(RemoteSource::Url(url.clone()));
        }
        if let Some(file_id) = &self.drive_id {
            return Source::Remote(RemoteSource::Drive {
                file_id: file_id.clone(),
            });
        }
        let keyword = self
            .sample
            .clone()
            .unwrap_or_else(|| DEFAULT_SAMPLE_KEYWORD.to_string());
        Source::Synthetic(SampleSpec {
            keyword,
            count: self.count,
        })
    }
}

/// Keyword/sentiment filters and row caps.
#[derive(Debug, Args, Clone)]
pub struct FilterArgs {
    /// Keep tweets containing KEYWORD (case-insensitive).
    #[arg(short = 'k', long)]
    pub keyword: Option<String>,

    /// Comma-separated sentiments to keep (positive, negative, neutral). Default: all.
    #[arg(
        short = 'c',
        long = "sentiment",
        value_enum,
        value_delimiter = ',',
        ignore_case = true
    )]
    pub sentiments: Vec<Category>,

    /// Maximum rows printed in the table.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_LIMIT)]
    pub limit: usize,

    /// Count only the last N matching rows (default: all matching rows).
    #[arg(long)]
    pub analysis_limit: Option<usize>,
}

impl FilterArgs {
    pub fn query(&self) -> Query {
        Query::new(self.keyword.clone(), self.sentiments.iter().copied())
    }

    pub fn limits(&self) -> RowLimits {
        RowLimits {
            display: self.limit,
            analysis: self.analysis_limit,
        }
    }
}

/// Options for `senti search`.
#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Keyword the sample tweets are about.
    pub keyword: String,

    /// Number of tweets to fetch.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_COUNT, value_parser = parse_sample_count)]
    pub count: usize,

    /// Comma-separated sentiments to keep. Default: all.
    #[arg(
        short = 'c',
        long = "sentiment",
        value_enum,
        value_delimiter = ',',
        ignore_case = true
    )]
    pub sentiments: Vec<Category>,

    /// Maximum rows printed in the table.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_LIMIT)]
    pub limit: usize,
}

/// Options for `senti dashboard` and `senti counts`.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Skip the charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Trend chart height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Export the displayed rows to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the counts to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}

/// Options for `senti explore`.
#[derive(Debug, Args, Clone)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum rows printed per query.
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

fn parse_sample_count(raw: &str) -> Result<usize, String> {
    let n: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    if !(MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&n) {
        return Err(format!(
            "must be between {MIN_SAMPLE_COUNT} and {MAX_SAMPLE_COUNT}"
        ));
    }
    Ok(n)
}
