//! Formatted terminal output: headers, row tables, counts, empty states.
//!
//! We keep formatting code in one place so:
//! - the loader/query code stays clean and testable
//! - output changes are localized (golden tests below)

use crate::data::{Diagnostic, DiagnosticKind, LoadOutcome};
use crate::domain::{Category, Record};
use crate::plot::format_share;
use crate::query::{Query, QueryResult, Summary};

const TEXT_WIDTH: usize = 72;

pub const NO_SOURCE_DATA: &str = "No source data could be loaded.";
pub const NO_MATCHES: &str = "No tweets matched the current filters. Try a different keyword.";

/// Banner with the source, load size and active filters.
pub fn format_run_header(title: &str, source: &str, loaded: &LoadOutcome, query: &Query) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== senti - {title} ===\n"));
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!("Loaded: {} tweet(s)\n", loaded.dataset.len()));
    out.push_str(&format!("Filter: {}\n", format_query(query)));
    out
}

/// `keyword="x" | sentiments=Positive, Neutral`
pub fn format_query(query: &Query) -> String {
    let keyword = match query.active_keyword() {
        Some(k) => format!("keyword=\"{k}\""),
        None => "keyword=<any>".to_string(),
    };
    let categories: Vec<&str> = query
        .effective_categories()
        .into_iter()
        .map(Category::label)
        .collect();
    format!("{keyword} | sentiments={}", categories.join(", "))
}

/// Loader diagnostics, one per line (empty when there are none).
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let tag = match d.kind {
            DiagnosticKind::SourceUnavailable => "unavailable",
            DiagnosticKind::MalformedInput => "malformed",
        };
        out.push_str(&format!("warning[{tag}]: {}\n", d.message));
    }
    out
}

/// Message shown when the query produced nothing to display.
pub fn format_no_source_data(loaded: &LoadOutcome) -> String {
    let mut out = format!("{NO_SOURCE_DATA}\n");
    if loaded.diagnostics.is_empty() {
        out.push_str("The source contained no usable rows.\n");
    } else {
        out.push_str(&format_diagnostics(&loaded.diagnostics));
    }
    out
}

/// `Showing 100 tweets for "rust"` (the search banner).
pub fn format_search_banner(shown: usize, keyword: &str) -> String {
    format!("Showing {shown} tweets for \"{keyword}\"\n")
}

/// The row table, with a footer when the display cap hid rows.
pub fn format_rows(result: &QueryResult<'_>) -> String {
    let mut out = format_table(result.display_rows());
    let hidden = result.hidden_rows();
    if hidden > 0 {
        out.push_str(&format!(
            "... {hidden} more matching tweet(s) not shown (display limit {})\n",
            result.limits.display
        ));
    }
    out
}

fn format_table(rows: &[&Record]) -> String {
    let mut out = String::new();
    out.push_str(
        format!("{:>5} {:<10} {:<9} {}", "#", "date", "sentiment", "text")
            .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{:->5} {:-<10} {:-<9} {}", "", "", "", "-".repeat(TEXT_WIDTH)));
    out.push('\n');

    for (idx, r) in rows.iter().enumerate() {
        let date = r.timestamp.map(|d| d.to_string()).unwrap_or_default();
        out.push_str(
            format!(
                "{:>5} {:<10} {:<9} {}",
                idx + 1,
                date,
                r.category.label(),
                truncate(&r.text, TEXT_WIDTH)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Count table. The heading notes when the analysis cap counted fewer rows than matched.
pub fn format_counts(summary: &Summary, matched: usize) -> String {
    let mut out = String::new();
    if summary.total == matched {
        out.push_str(&format!("Counts over {matched} matching tweet(s):\n"));
    } else {
        out.push_str(&format!(
            "Counts over the last {} of {matched} matching tweet(s):\n",
            summary.total
        ));
    }
    out.push_str(&format!("{:<9} {:>7} {:>7}\n", "sentiment", "count", "share"));
    out.push_str(&format!("{:-<9} {:->7} {:->7}\n", "", "", ""));
    for (&category, &count) in &summary.category_counts {
        out.push_str(&format!(
            "{:<9} {:>7} {:>7}\n",
            category.label(),
            count,
            format_share(count, summary.total)
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    // Tweets may contain newlines; keep each row on one line.
    let flat: String = s.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let mut out: String = flat.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
