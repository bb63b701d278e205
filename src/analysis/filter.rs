use crate::models::{Dataset, FilterSelection, Record};

/// The records of a dataset that pass a selection, in dataset order.
///
/// Borrows from the dataset; a new view is derived on every selection change.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// Apply a selection to the dataset.
    pub fn new(dataset: &'a Dataset, selection: &FilterSelection) -> Self {
        Self {
            records: dataset
                .records()
                .iter()
                .filter(|r| selection.matches(r))
                .collect(),
        }
    }

    /// A view over every record of a slice.
    pub fn from_records(records: &'a [Record]) -> Self {
        Self {
            records: records.iter().collect(),
        }
    }

    /// Narrow this view further, keeping order.
    pub fn narrow(&self, predicate: impl Fn(&Record) -> bool) -> FilteredView<'a> {
        FilteredView {
            records: self
                .records
                .iter()
                .copied()
                .filter(|r| predicate(r))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Owned copies of the records, for handing to a renderer.
    pub fn to_records(&self) -> Vec<Record> {
        self.records.iter().map(|r| (*r).clone()).collect()
    }
}

/// Derive the filtered view of `dataset` for `selection`.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let view = FilteredView::new(dataset, selection);
    tracing::debug!(
        total = dataset.len(),
        matched = view.len(),
        "filter applied"
    );
    view
}
