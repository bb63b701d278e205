mod charts;
mod report;
mod tables;

pub use charts::{
    format_bar_chart, format_salary_histogram, print_bar_chart, print_salary_histogram,
};
pub use report::{format_dashboard, print_dashboard};
pub use tables::{
    format_box_table, format_count, format_count_table, format_filter_options,
    format_group_table, format_kpi_table, format_records_table, format_usd, print_kpi_table,
};
