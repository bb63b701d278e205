use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};

use crate::models::{CategoryValue, Dimension, NumericColumn};

use super::FilteredView;

/// Placeholder returned by [`mode`] for an empty view.
pub const EMPTY_MODE: &str = "-";

/// Occurrences of one category in a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub key: CategoryValue,
    pub count: usize,
}

fn values(view: &FilteredView<'_>, column: NumericColumn) -> Vec<f64> {
    view.iter().map(|r| r.numeric(column)).collect()
}

/// Arithmetic mean of a numeric column.
///
/// Returns 0 for an empty view, as do [`median`] and [`max`]; the dashboard
/// renders that as a "0" KPI.
pub fn mean(view: &FilteredView<'_>, column: NumericColumn) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    let sum: f64 = view.iter().map(|r| r.numeric(column)).sum();
    sum / view.len() as f64
}

/// Median of a numeric column. Returns 0 for an empty view.
pub fn median(view: &FilteredView<'_>, column: NumericColumn) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    Data::new(values(view, column)).median()
}

/// Maximum of a numeric column. Returns 0 for an empty view.
pub fn max(view: &FilteredView<'_>, column: NumericColumn) -> f64 {
    view.iter()
        .map(|r| r.numeric(column))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Number of records in the view.
pub fn count(view: &FilteredView<'_>) -> usize {
    view.len()
}

/// Most frequent value of a categorical column.
///
/// Ties go to the smallest value in natural order. Returns [`EMPTY_MODE`]
/// for an empty view.
pub fn mode(view: &FilteredView<'_>, dimension: Dimension) -> String {
    let mut counts: BTreeMap<CategoryValue, usize> = BTreeMap::new();
    for record in view.iter() {
        *counts.entry(record.category(dimension)).or_default() += 1;
    }

    let mut best: Option<(CategoryValue, usize)> = None;
    for (key, n) in counts {
        // strictly greater: the first (smallest) key keeps a tie
        if best.as_ref().map_or(true, |(_, b)| n > *b) {
            best = Some((key, n));
        }
    }

    best.map(|(key, _)| key.to_string())
        .unwrap_or_else(|| EMPTY_MODE.to_string())
}

/// Occurrences of each value of a categorical column, most frequent first.
///
/// Ties keep first-seen order.
pub fn value_counts(view: &FilteredView<'_>, dimension: Dimension) -> Vec<CategoryCount> {
    let mut index: HashMap<CategoryValue, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for record in view.iter() {
        let key = record.category(dimension);
        match index.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push(CategoryCount { key, count: 1 });
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
