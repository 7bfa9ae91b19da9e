//! Reporting utilities: formatted terminal output for loads and queries.

pub mod format;

pub use format::*;
