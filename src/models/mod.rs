mod dataset;
mod record;
mod selection;

pub use dataset::Dataset;
pub use record::{CategoryValue, Column, Dimension, NumericColumn, Record};
pub use selection::{FilterOptions, FilterSelection};
