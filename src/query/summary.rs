use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::domain::{Category, Record};

/// Count of rows per category (only categories that occur).
pub type CategoryCount = BTreeMap<Category, usize>;

/// Count of rows per (day, category) bucket.
pub type DateCategoryCount = BTreeMap<(NaiveDate, Category), usize>;

/// Aggregates over a set of filtered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub category_counts: CategoryCount,
    /// `None` when none of the rows carry a date.
    #[serde(serialize_with = "serialize_date_counts")]
    pub date_counts: Option<DateCategoryCount>,
}

impl Summary {
    pub fn count(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    /// Distinct days present in the date breakdown, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .date_counts
            .iter()
            .flat_map(|m| m.keys().map(|(d, _)| *d))
            .collect();
        dates.dedup();
        dates
    }
}

/// Count rows per category, and per (day, category) when dates are present.
pub fn summarize(rows: &[&Record]) -> Summary {
    let mut category_counts = CategoryCount::new();
    let mut date_counts: Option<DateCategoryCount> = None;

    for record in rows {
        *category_counts.entry(record.category).or_insert(0) += 1;
        if let Some(date) = record.timestamp {
            *date_counts
                .get_or_insert_with(BTreeMap::new)
                .entry((date, record.category))
                .or_insert(0) += 1;
        }
    }

    Summary {
        total: rows.len(),
        category_counts,
        date_counts,
    }
}

#[derive(Serialize)]
struct DateBucket {
    date: NaiveDate,
    category: Category,
    count: usize,
}

fn serialize_date_counts<S: Serializer>(
    counts: &Option<DateCategoryCount>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let Some(counts) = counts else {
        return serializer.serialize_none();
    };
    let mut seq = serializer.serialize_seq(Some(counts.len()))?;
    for (&(date, category), &count) in counts {
        seq.serialize_element(&DateBucket { date, category, count })?;
    }
    seq.end()
}
