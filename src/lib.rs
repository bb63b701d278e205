pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{Analyzer, DashboardSettings, DashboardSnapshot, FilteredView, Session};
pub use config::AppConfig;
pub use error::{DashboardError, LoadError};
pub use io::{load_dataset, DataSource, DatasetReader, LoadOptions, RowPolicy};
pub use models::{CategoryValue, Column, Dataset, Dimension, FilterSelection, Record};
