use std::collections::BTreeSet;

use serde::Serialize;

use super::{CategoryValue, Dimension, FilterOptions, Record};

/// The loaded salary dataset.
///
/// Immutable after construction: records are never mutated in place and the
/// row order is the order of the source.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    /// Display name derived from the source
    pub name: String,
    records: Vec<Record>,
    /// Rows dropped by the lenient row policy
    skipped_rows: usize,
}

impl Dataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
            skipped_rows: 0,
        }
    }

    pub(crate) fn with_skipped_rows(mut self, skipped_rows: usize) -> Self {
        self.skipped_rows = skipped_rows;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Sorted distinct values of every filterable dimension.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }

    /// Sorted distinct values of one dimension.
    pub fn options(&self, dimension: Dimension) -> Vec<CategoryValue> {
        self.records
            .iter()
            .map(|r| r.category(dimension))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
