//! Interactive explore loop.
//!
//! This is kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the explore loop keeps one dataset loaded and re-runs queries on each line
//!
//! Each input line is either a keyword or a `:`-command (`:help` lists them).

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use clap::ValueEnum;

use crate::app::pipeline::{ChartOptions, Session, render_outcome};
use crate::domain::{Category, Source};
use crate::error::AppError;
use crate::query::{Query, RowLimits, run_query};
use crate::report::{format_diagnostics, format_query};

const HELP: &str = "\
Type a keyword to filter tweets (empty line clears it).
  :cats positive,neutral   keep only these sentiments
  :all                     keep every sentiment
  :reload                  drop the cached dataset and load it again
  :help                    show this help
  :q                       quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreCommand {
    Keyword(Option<String>),
    Categories(BTreeSet<Category>),
    AllCategories,
    Reload,
    Help,
    Quit,
    Invalid(String),
}

/// Parse one line typed at the explore prompt.
pub fn parse_command(line: &str) -> ExploreCommand {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return if line.is_empty() {
            ExploreCommand::Keyword(None)
        } else {
            ExploreCommand::Keyword(Some(line.to_string()))
        };
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name.to_ascii_lowercase().as_str() {
        "q" | "quit" => ExploreCommand::Quit,
        "all" => ExploreCommand::AllCategories,
        "reload" => ExploreCommand::Reload,
        "help" | "h" => ExploreCommand::Help,
        "cats" => parse_categories(arg),
        other => ExploreCommand::Invalid(format!("Unknown command ':{other}'. Type :help.")),
    }
}

fn parse_categories(arg: &str) -> ExploreCommand {
    let mut set = BTreeSet::new();
    for part in arg.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match Category::from_str(part, true) {
            Ok(category) => {
                set.insert(category);
            }
            Err(_) => {
                return ExploreCommand::Invalid(format!(
                    "Unknown sentiment '{part}'. Expected positive, negative or neutral."
                ));
            }
        }
    }
    if set.is_empty() {
        return ExploreCommand::Invalid("Usage: :cats positive,negative".to_string());
    }
    ExploreCommand::Categories(set)
}

/// Load `source` once and answer queries read from stdin until `:q` or EOF.
pub fn run_explore(
    session: &Session,
    source: &Source,
    limits: RowLimits,
    charts: ChartOptions,
) -> Result<(), AppError> {
    let mut loaded = session.load(source);
    println!("Source: {}", source.describe());
    println!("Loaded: {} tweet(s)", loaded.dataset.len());
    print!("{}", format_diagnostics(&loaded.diagnostics));
    println!("Type :help for commands.");

    let mut query = Query::default();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("senti> ");
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            println!();
            return Ok(());
        }

        match parse_command(&line) {
            ExploreCommand::Quit => return Ok(()),
            ExploreCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ExploreCommand::Invalid(msg) => {
                println!("{msg}");
                continue;
            }
            ExploreCommand::Reload => {
                loaded = session.reload(source);
                println!("Reloaded: {} tweet(s)", loaded.dataset.len());
                print!("{}", format_diagnostics(&loaded.diagnostics));
                continue;
            }
            ExploreCommand::Keyword(keyword) => query.keyword = keyword,
            ExploreCommand::Categories(set) => query.categories = set,
            ExploreCommand::AllCategories => query.categories.clear(),
        }

        println!("Filter: {}", format_query(&query));
        let outcome = run_query(&loaded.dataset, &query, limits);
        print!("{}", render_outcome(&loaded, &outcome, charts));
    }
}
