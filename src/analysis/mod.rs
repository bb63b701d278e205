mod analyzer;
mod distribution;
mod filter;
mod grouping;
mod session;
mod statistics;

pub use analyzer::{Analyzer, DashboardSettings, DashboardSnapshot, Kpis};
pub use distribution::{box_stats, histogram_bins, BoxStats, HistogramBin};
pub use filter::{filter, FilteredView};
pub use grouping::{group_mean, top_n_by_mean, GroupMean};
pub use session::Session;
pub use statistics::{count, max, mean, median, mode, value_counts, CategoryCount, EMPTY_MODE};
