use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CategoryValue, Dimension, NumericColumn};

use super::FilteredView;

/// Mean of a numeric column within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: CategoryValue,
    pub mean: f64,
    /// Number of records in the group
    pub count: usize,
}

/// Mean of `value` for each distinct value of `group` present in the view.
///
/// Ordered ascending by group key (numeric for years, lexical for text).
/// An empty view yields an empty sequence.
pub fn group_mean(
    view: &FilteredView<'_>,
    group: Dimension,
    value: NumericColumn,
) -> Vec<GroupMean> {
    let mut acc: BTreeMap<CategoryValue, (f64, usize)> = BTreeMap::new();
    for record in view.iter() {
        let entry = acc.entry(record.category(group)).or_insert((0.0, 0));
        entry.0 += record.numeric(value);
        entry.1 += 1;
    }

    acc.into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key,
            mean: sum / count as f64,
            count,
        })
        .collect()
}

/// The `n` groups with the highest mean, re-ordered ascending by mean.
///
/// The ascending order is what a horizontal bar chart needs to draw the
/// largest bar at the top. Equal means keep group-key order.
pub fn top_n_by_mean(
    view: &FilteredView<'_>,
    group: Dimension,
    n: usize,
    value: NumericColumn,
) -> Vec<GroupMean> {
    let mut groups = group_mean(view, group, value);
    groups.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    groups.truncate(n);
    groups.sort_by(|a, b| a.mean.total_cmp(&b.mean));
    groups
}
