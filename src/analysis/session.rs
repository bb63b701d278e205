use std::sync::Arc;

use crate::analysis::{filter, Analyzer, DashboardSettings, DashboardSnapshot, FilteredView};
use crate::error::DashboardError;
use crate::io;
use crate::models::{Dataset, FilterSelection, Record};

/// One user's view of the shared dataset.
///
/// The dataset is shared read-only; each session owns its selection. Every
/// call derives a fresh view, nothing is cached between selection changes.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    selection: FilterSelection,
    settings: DashboardSettings,
}

impl Session {
    /// Start a session with every filter option selected.
    pub fn new(dataset: Arc<Dataset>, settings: DashboardSettings) -> Self {
        let selection = FilterSelection::all_of(&dataset);
        Self {
            dataset,
            selection,
            settings,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    /// Restore the everything-selected default.
    pub fn reset(&mut self) {
        self.selection = FilterSelection::all_of(&self.dataset);
    }

    pub fn view(&self) -> FilteredView<'_> {
        filter(&self.dataset, &self.selection)
    }

    /// Full recomputation of every dashboard section for the current selection.
    pub fn recompute(&self) -> DashboardSnapshot {
        let view = self.view();
        tracing::debug!(rows = view.len(), "recomputing dashboard");
        Analyzer::new(&view).snapshot(&self.settings)
    }

    /// The filtered table.
    pub fn records(&self) -> Vec<Record> {
        self.view().to_records()
    }

    /// The filtered table as CSV bytes.
    pub fn export_csv(&self) -> Result<Vec<u8>, DashboardError> {
        io::to_csv(&self.view())
    }
}
