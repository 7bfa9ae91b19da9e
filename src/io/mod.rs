//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - row/summary exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
