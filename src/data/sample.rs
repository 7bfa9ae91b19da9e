//! Synthetic tweet generation (the "fetch tweets" placeholder).
//!
//! Record `i` (0-based) gets:
//! - text `Sample tweet {i+1} about {keyword}`
//! - category `Category::ALL[i % 3]` (Positive, Negative, Neutral, ...)
//! - date `SAMPLE_EPOCH + i days`

use chrono::{Days, NaiveDate};

use crate::domain::{Category, Dataset, Record, SampleSpec};
use crate::error::LoadError;

/// Upper bound on generated rows.
pub const MAX_SAMPLE_COUNT: usize = 500;
/// Lower bound offered by the command line.
pub const MIN_SAMPLE_COUNT: usize = 10;
/// Default row count (and the dashboard's default dataset size).
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// First generated date.
pub fn sample_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default()
}

pub fn generate_sample(spec: &SampleSpec) -> Result<Dataset, LoadError> {
    if spec.count > MAX_SAMPLE_COUNT {
        return Err(LoadError::MalformedInput {
            source_key: format!("sample:{}", spec.keyword),
            details: format!(
                "sample count {} exceeds the maximum of {MAX_SAMPLE_COUNT}",
                spec.count
            ),
        });
    }

    let epoch = sample_epoch();
    let mut records = Vec::with_capacity(spec.count);
    for i in 0..spec.count {
        let date = epoch
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| LoadError::MalformedInput {
                source_key: format!("sample:{}", spec.keyword),
                details: format!("date overflow at row {i}"),
            })?;
        let text = format!("Sample tweet {} about {}", i + 1, spec.keyword);
        records.push(Record::new(text, Category::ALL[i % Category::ALL.len()]).with_timestamp(date));
    }

    log::debug!("generated {} sample tweets for '{}'", records.len(), spec.keyword);
    Ok(Dataset::from_records(records))
}
