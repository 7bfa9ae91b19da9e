//! Shared "load -> query -> render" logic used by the one-shot commands and
//! the explore loop.
//!
//! Keeping this in one place avoids duplicating the core workflow; the
//! front-ends then focus on presentation (one-shot printing vs a prompt).

use crate::config::Settings;
use crate::data::{DatasetCache, LoadOutcome};
use crate::domain::Source;
use crate::query::{QueryOutcome, QueryResult};
use crate::report::{NO_MATCHES, format_counts, format_no_source_data, format_rows};

/// Settings plus the dataset cache for one process.
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    cache: DatasetCache,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let cache = DatasetCache::new(settings.cache_ttl);
        Self { settings, cache }
    }

    /// Load `source`, reusing a cached result for the same source.
    pub fn load(&self, source: &Source) -> LoadOutcome {
        self.cache
            .get_or_load(source, |s| crate::data::load(s, &self.settings))
    }

    /// Drop any cached result for `source` and load it again.
    pub fn reload(&self, source: &Source) -> LoadOutcome {
        if self.cache.invalidate(&source.key()) {
            log::debug!("dropped cached dataset for {}", source.describe());
        }
        self.load(source)
    }
}

/// Chart rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub enabled: bool,
    pub width: usize,
    pub height: usize,
}

/// Text for one query outcome: the empty-state message, or rows, counts and charts.
pub fn render_outcome(loaded: &LoadOutcome, outcome: &QueryOutcome<'_>, charts: ChartOptions) -> String {
    match outcome {
        QueryOutcome::NoSourceData => format_no_source_data(loaded),
        QueryOutcome::NoMatches => format!("{NO_MATCHES}\n"),
        QueryOutcome::Matched(result) => render_result(result, charts),
    }
}

fn render_result(result: &QueryResult<'_>, charts: ChartOptions) -> String {
    let mut out = format_rows(result);
    out.push('\n');
    out.push_str(&format_counts(&result.summary, result.view.len()));
    if charts.enabled {
        out.push('\n');
        out.push_str(&crate::plot::render_bar_chart(&result.summary, charts.width));
        out.push('\n');
        out.push_str(&crate::plot::render_share_strip(&result.summary, charts.width));
        if let Some(trend) = crate::plot::render_trend_plot(&result.summary, charts.width, charts.height) {
            out.push('\n');
            out.push_str(&trend);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleSpec;
    use crate::query::{Query, RowLimits, run_query};

    const CHARTS: ChartOptions = ChartOptions {
        enabled: true,
        width: 20,
        height: 6,
    };

    fn sample(count: usize) -> Source {
        Source::Synthetic(SampleSpec {
            keyword: "sample".into(),
            count,
        })
    }

    #[test]
    fn session_caches_and_reloads() {
        let session = Session::new(Settings::default());
        let a = session.load(&sample(30));
        let b = session.load(&sample(30));
        assert!(std::sync::Arc::ptr_eq(&a.dataset, &b.dataset));

        let c = session.reload(&sample(30));
        assert!(!std::sync::Arc::ptr_eq(&a.dataset, &c.dataset));
        assert_eq!(a.dataset, c.dataset);
    }

    #[test]
    fn empty_states_render_distinct_messages() {
        let session = Session::new(Settings::default());

        let missing = session.load(&Source::File("/no/such/tweets.csv".into()));
        let outcome = run_query(&missing.dataset, &Query::default(), RowLimits::default());
        let txt = render_outcome(&missing, &outcome, CHARTS);
        assert!(txt.starts_with("No source data could be loaded.\nwarning[unavailable]: "));

        let loaded = session.load(&sample(30));
        let query = Query::new(Some("zzz".into()), []);
        let outcome = run_query(&loaded.dataset, &query, RowLimits::default());
        assert_eq!(render_outcome(&loaded, &outcome, CHARTS), format!("{NO_MATCHES}\n"));
    }

    #[test]
    fn matched_output_includes_counts_and_charts() {
        let session = Session::new(Settings::default());
        let loaded = session.load(&sample(30));
        let outcome = run_query(&loaded.dataset, &Query::default(), RowLimits::default());

        let txt = render_outcome(&loaded, &outcome, CHARTS);
        assert!(txt.contains("Counts over 30 matching tweet(s):"));
        assert!(txt.contains("Sentiment breakdown"));
        assert!(txt.contains("Sentiment distribution"));
        assert!(txt.contains("Trend: 2024-02-01 .. 2024-03-01"));

        let plain = render_outcome(&loaded, &outcome, ChartOptions { enabled: false, ..CHARTS });
        assert!(!plain.contains("Sentiment breakdown"));
    }
}
