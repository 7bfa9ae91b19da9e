//! Query pipeline: keyword/category filtering and count aggregation.
//!
//! `filter` keeps dataset order; `summarize` produces integer counts only.
//! `run_query` combines both and classifies the empty states the front-end
//! must tell apart.

use crate::domain::{Dataset, Record};

pub mod filter;
pub mod summary;

pub use filter::{DEFAULT_DISPLAY_LIMIT, FilteredView, Query, RowLimits, filter};
pub use summary::{CategoryCount, DateCategoryCount, Summary, summarize};

/// Rows and counts for one query.
#[derive(Debug, Clone)]
pub struct QueryResult<'a> {
    pub view: FilteredView<'a>,
    pub summary: Summary,
    pub limits: RowLimits,
}

impl<'a> QueryResult<'a> {
    /// Rows to render (bounded by the display cap).
    pub fn display_rows(&self) -> &[&'a Record] {
        self.view.display_rows(self.limits.display)
    }

    /// Number of matching rows not rendered because of the display cap.
    pub fn hidden_rows(&self) -> usize {
        self.view.len() - self.display_rows().len()
    }
}

/// What a query produced.
#[derive(Debug, Clone)]
pub enum QueryOutcome<'a> {
    /// The source yielded no records at all.
    NoSourceData,
    /// Records were loaded but none matched the filters.
    NoMatches,
    Matched(QueryResult<'a>),
}

/// Filter `dataset` and summarize the analysis window.
pub fn run_query<'a>(dataset: &'a Dataset, query: &Query, limits: RowLimits) -> QueryOutcome<'a> {
    if dataset.is_empty() {
        return QueryOutcome::NoSourceData;
    }

    let view = filter(dataset.records(), query);
    log::debug!(
        "query keyword={:?} categories={:?} matched {} of {} record(s)",
        query.active_keyword(),
        query.categories,
        view.len(),
        dataset.len()
    );
    if view.is_empty() {
        return QueryOutcome::NoMatches;
    }

    let summary = summarize(view.analysis_rows(limits.analysis));
    QueryOutcome::Matched(QueryResult { view, summary, limits })
}
