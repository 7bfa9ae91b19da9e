//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the dataset (through the session cache)
//! - runs the keyword/sentiment query
//! - prints rows, counts and charts
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DashboardArgs, ExploreArgs, SearchArgs};
use crate::config::Settings;
use crate::domain::{SampleSpec, Source};
use crate::error::AppError;
use crate::query::{Query, QueryOutcome, RowLimits, run_query};

pub mod pipeline;

use pipeline::{ChartOptions, Session, render_outcome};

/// Entry point for the `senti` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    let session = Session::new(Settings::from_env());

    match cli.command {
        Command::Search(args) => handle_search(&session, args),
        Command::Dashboard(args) => handle_dashboard(&session, args, OutputMode::Full),
        Command::Counts(args) => handle_dashboard(&session, args, OutputMode::CountsOnly),
        Command::Explore(args) => handle_explore(&session, args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    CountsOnly,
}

fn handle_search(session: &Session, args: SearchArgs) -> Result<(), AppError> {
    let source = Source::Synthetic(SampleSpec {
        keyword: args.keyword.clone(),
        count: args.count,
    });
    let loaded = session.load(&source);
    let query = Query::new(None, args.sentiments.iter().copied());
    let limits = RowLimits {
        display: args.limit,
        analysis: None,
    };

    match run_query(&loaded.dataset, &query, limits) {
        QueryOutcome::NoSourceData => Err(no_source_data(&loaded)),
        QueryOutcome::NoMatches => {
            println!("{}", crate::report::NO_MATCHES);
            Ok(())
        }
        QueryOutcome::Matched(result) => {
            print!("{}", crate::report::format_search_banner(loaded.dataset.len(), &args.keyword));
            print!("{}", crate::report::format_rows(&result));
            Ok(())
        }
    }
}

fn handle_dashboard(session: &Session, args: DashboardArgs, mode: OutputMode) -> Result<(), AppError> {
    let source = args.source.to_source();
    let loaded = session.load(&source);
    let query = args.filter.query();
    let outcome = run_query(&loaded.dataset, &query, args.filter.limits());

    if let QueryOutcome::NoSourceData = outcome {
        return Err(no_source_data(&loaded));
    }

    // Row-level problems do not stop the run; show them on stderr.
    eprint!("{}", crate::report::format_diagnostics(&loaded.diagnostics));

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_header("dashboard", &source.describe(), &loaded, &query)
            );
            let charts = ChartOptions {
                enabled: !args.no_plot,
                width: args.width,
                height: args.height,
            };
            print!("{}", render_outcome(&loaded, &outcome, charts));
        }
        OutputMode::CountsOnly => match &outcome {
            QueryOutcome::Matched(result) => {
                print!("{}", crate::report::format_counts(&result.summary, result.view.len()));
            }
            _ => println!("{}", crate::report::NO_MATCHES),
        },
    }

    // Optional exports.
    if let QueryOutcome::Matched(result) = &outcome {
        if let Some(path) = &args.export {
            crate::io::export::write_rows_csv(path, result.display_rows())?;
        }
        if let Some(path) = &args.export_summary {
            crate::io::export::write_summary_json(path, &result.summary)?;
        }
    } else if args.export.is_some() || args.export_summary.is_some() {
        log::warn!("nothing matched; skipping exports");
    }

    Ok(())
}

fn handle_explore(session: &Session, args: ExploreArgs) -> Result<(), AppError> {
    let limits = RowLimits {
        display: args.limit,
        analysis: None,
    };
    let charts = ChartOptions {
        enabled: true,
        width: args.width,
        height: 8,
    };
    crate::cli::explore::run_explore(session, &args.source.to_source(), limits, charts)
}

fn no_source_data(loaded: &crate::data::LoadOutcome) -> AppError {
    AppError::new(3, crate::report::format_no_source_data(loaded).trim_end())
}
