use std::collections::BTreeSet;

use crate::domain::{Category, Record};

/// Rows shown by default.
pub const DEFAULT_DISPLAY_LIMIT: usize = 1000;

/// Keyword + category selection supplied by the front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub keyword: Option<String>,
    /// Empty means every category.
    pub categories: BTreeSet<Category>,
}

impl Query {
    pub fn new(keyword: Option<String>, categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            keyword,
            categories: categories.into_iter().collect(),
        }
    }

    /// The keyword to match, as given. Blank keywords disable text filtering.
    pub fn active_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Categories selected for display, with "none selected" read as "all".
    pub fn effective_categories(&self) -> Vec<Category> {
        if self.categories.is_empty() {
            Category::ALL.to_vec()
        } else {
            self.categories.iter().copied().collect()
        }
    }

    fn admits(&self, record: &Record, needle: Option<&str>) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }
        match needle {
            None => true,
            Some(needle) => record.text.to_lowercase().contains(needle),
        }
    }
}

/// Independent caps on rendered rows and on the rows fed to `summarize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLimits {
    /// Rows rendered in the table (prefix of the view).
    pub display: usize,
    /// Rows counted by `summarize` (suffix of the view); `None` counts all.
    pub analysis: Option<usize>,
}

impl Default for RowLimits {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY_LIMIT,
            analysis: None,
        }
    }
}

/// The records of a dataset matching a `Query`, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `limit` rows, for rendering.
    pub fn display_rows(&self, limit: usize) -> &[&'a Record] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// The last `limit` rows (or all of them), for aggregation.
    pub fn analysis_rows(&self, limit: Option<usize>) -> &[&'a Record] {
        match limit {
            Some(limit) => &self.rows[self.rows.len().saturating_sub(limit)..],
            None => &self.rows,
        }
    }

    /// Owned copies of the matching records.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows.iter().map(|r| (*r).clone()).collect()
    }
}

/// Select the records matching `query`, preserving order.
pub fn filter<'a>(records: &'a [Record], query: &Query) -> FilteredView<'a> {
    let needle = query.active_keyword().map(str::to_lowercase);
    let rows = records
        .iter()
        .filter(|r| query.admits(r, needle.as_deref()))
        .collect();
    FilteredView { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Record> {
        vec![
            Record::new("I love it", Category::Positive),
            Record::new("I hate it", Category::Negative),
            Record::new("meh", Category::Neutral),
            Record::new("I love bugs", Category::Positive),
        ]
    }

    fn texts(view: &FilteredView<'_>) -> Vec<String> {
        view.rows().iter().map(|r| r.text.clone()).collect()
    }

    #[test]
    fn keyword_selects_matching_rows_in_order() {
        let data = scenario();
        let view = filter(&data, &Query::new(Some("love".into()), []));
        assert_eq!(texts(&view), vec!["I love it", "I love bugs"]);
    }

    #[test]
    fn keyword_match_ignores_case() {
        let data = scenario();
        let view = filter(&data, &Query::new(Some("LOVE".into()), []));
        assert_eq!(view.len(), 2);
        let view = filter(&data, &Query::new(Some("Hate".into()), []));
        assert_eq!(texts(&view), vec!["I hate it"]);
    }

    #[test]
    fn empty_keyword_and_empty_set_keep_everything() {
        let data = scenario();
        let view = filter(&data, &Query::new(Some(String::new()), []));
        assert_eq!(view.to_records(), data);
        let view = filter(&data, &Query::default());
        assert_eq!(view.len(), data.len());
    }

    #[test]
    fn keyword_whitespace_is_part_of_the_match() {
        let data = vec![
            Record::new("I love it", Category::Positive),
            Record::new("loveless", Category::Negative),
        ];
        let view = filter(&data, &Query::new(Some(" love ".into()), []));
        assert_eq!(texts(&view), vec!["I love it"]);

        let view = filter(&data, &Query::new(Some("   ".into()), []));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn category_set_restricts_rows() {
        let data = scenario();
        let query = Query::new(None, [Category::Negative, Category::Neutral]);
        let view = filter(&data, &query);
        assert_eq!(texts(&view), vec!["I hate it", "meh"]);
        assert!(view.rows().iter().all(|r| query.categories.contains(&r.category)));
    }

    #[test]
    fn keyword_and_category_combine() {
        let data = scenario();
        let view = filter(&data, &Query::new(Some("it".into()), [Category::Positive]));
        assert_eq!(texts(&view), vec!["I love it"]);
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let data = scenario();
        for category in Category::ALL {
            let view = filter(&data, &Query::new(None, [category]));
            let positions: Vec<usize> = view
                .rows()
                .iter()
                .map(|row| data.iter().position(|r| std::ptr::eq(r, *row)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let data = scenario();
        let queries = [
            Query::new(Some("i".into()), []),
            Query::new(Some("love".into()), [Category::Positive]),
            Query::new(None, [Category::Neutral]),
            Query::new(Some("zzz".into()), []),
        ];
        for query in &queries {
            let once = filter(&data, query);
            let owned = once.to_records();
            let twice = filter(&owned, query);
            assert_eq!(twice.to_records(), owned);
        }
    }

    #[test]
    fn display_and_analysis_caps_are_independent() {
        let data: Vec<Record> = (0..10)
            .map(|i| Record::new(format!("row {i}"), Category::ALL[i % 3]))
            .collect();
        let view = filter(&data, &Query::default());

        let shown = view.display_rows(3);
        assert_eq!(shown.len(), 3);
        assert_eq!(shown[0].text, "row 0");

        let analysed = view.analysis_rows(Some(4));
        assert_eq!(analysed.len(), 4);
        assert_eq!(analysed[0].text, "row 6");

        assert_eq!(view.analysis_rows(None).len(), 10);
        assert_eq!(view.display_rows(50).len(), 10);
        assert_eq!(view.analysis_rows(Some(50)).len(), 10);
    }

    #[test]
    fn effective_categories_treat_empty_as_all() {
        assert_eq!(Query::default().effective_categories(), Category::ALL.to_vec());
        let q = Query::new(None, [Category::Neutral, Category::Positive]);
        assert_eq!(q.effective_categories(), vec![Category::Positive, Category::Neutral]);
    }
}
