//! `senti` library crate.
//!
//! The binary (`senti`) is a thin wrapper around this library so that:
//!
//! - loading and query logic is testable without spawning processes
//! - the explore loop and one-shot commands share one pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod query;
pub mod report;
