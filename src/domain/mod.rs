//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the sentiment label enum (`Category`) and label normalization
//! - loaded records and datasets (`Record`, `Dataset`)
//! - source descriptions and their cache identity (`Source`, `SourceKey`)

pub mod types;

pub use types::*;
