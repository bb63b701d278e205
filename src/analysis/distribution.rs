use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};

use crate::models::{CategoryValue, Dimension, NumericColumn};

use super::FilteredView;

/// A single equal-width histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Lower bound of the bin (inclusive)
    pub lower: f64,
    /// Upper bound of the bin (exclusive, except for the last bin)
    pub upper: f64,
    /// Number of records in this bin
    pub count: usize,
}

/// Partition [min, max] of a numeric column into `n_bins` equal-width bins.
///
/// Returns no bins for an empty view or `n_bins == 0`. When every value is
/// equal the range is widened to [v - 0.5, v + 0.5].
pub fn histogram_bins(
    view: &FilteredView<'_>,
    column: NumericColumn,
    n_bins: usize,
) -> Vec<HistogramBin> {
    if view.is_empty() || n_bins == 0 {
        return Vec::new();
    }

    let (min, max) = view
        .iter()
        .map(|r| r.numeric(column))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for record in view.iter() {
        let v = record.numeric(column);
        let idx = ((v - lo) / width).floor() as usize;
        counts[idx.min(n_bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == n_bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

/// Five-number summary plus whiskers for one (group, subgroup) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub group: CategoryValue,
    pub subgroup: CategoryValue,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within 1.5 IQR below Q1
    pub lower_whisker: f64,
    /// Largest value within 1.5 IQR above Q3
    pub upper_whisker: f64,
    /// Values beyond the whiskers, ascending
    pub outliers: Vec<f64>,
}

/// Linear interpolation between order statistics of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (pos - lower as f64) * (sorted[upper] - sorted[lower])
}

fn summarize(group: CategoryValue, subgroup: CategoryValue, mut values: Vec<f64>) -> BoxStats {
    values.sort_by(f64::total_cmp);
    let q1 = quantile(&values, 0.25);
    let q3 = quantile(&values, 0.75);
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside = || values.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let lower_whisker = inside().reduce(f64::min).unwrap_or(q1);
    let upper_whisker = inside().reduce(f64::max).unwrap_or(q3);
    let outliers = values
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    BoxStats {
        group,
        subgroup,
        count: values.len(),
        min: values[0],
        q1,
        median: Data::new(values.clone()).median(),
        q3,
        max: values[values.len() - 1],
        lower_whisker,
        upper_whisker,
        outliers,
    }
}

/// Distribution of a numeric column for each (group, subgroup) pair present.
///
/// Ordered ascending by group then subgroup. An empty view yields an empty
/// sequence.
pub fn box_stats(
    view: &FilteredView<'_>,
    group: Dimension,
    subgroup: Dimension,
    value: NumericColumn,
) -> Vec<BoxStats> {
    let mut buckets: BTreeMap<(CategoryValue, CategoryValue), Vec<f64>> = BTreeMap::new();
    for record in view.iter() {
        buckets
            .entry((record.category(group), record.category(subgroup)))
            .or_default()
            .push(record.numeric(value));
    }

    buckets
        .into_iter()
        .map(|((g, s), values)| summarize(g, s, values))
        .collect()
}
