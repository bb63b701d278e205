//! Basic dashboard example: load CSV, filter, display the dashboard, export.
//!
//! Run from the project root:
//!   cargo run --example basic_dashboard

use std::path::Path;

use salary_dashboard::analysis::{filter, Analyzer, DashboardSettings};
use salary_dashboard::io::{self, RowPolicy};
use salary_dashboard::models::FilterSelection;
use salary_dashboard::visualization::{format_records_table, print_dashboard};

fn main() {
    let path = Path::new("data/samples/sample_salaries.csv");
    let dataset = io::read_csv(path, RowPolicy::Strict).expect("Failed to read CSV file");
    println!("Loaded '{}': {} records", dataset.name, dataset.len());

    // Recent senior and executive roles only
    let selection = FilterSelection::unconstrained()
        .with_years([2023, 2024])
        .with_experience_levels(["senior", "executivo"]);
    let view = filter(&dataset, &selection);
    println!("Selected {} of {} records", view.len(), dataset.len());

    let settings = DashboardSettings::default();
    print_dashboard(&Analyzer::new(&view).snapshot(&settings));
    print!("{}", format_records_table(&view.to_records(), 5));

    let output = Path::new("output_example.csv");
    io::write_csv(&view, output).expect("Failed to write CSV");
    let reloaded = io::read_csv(output, RowPolicy::Strict).expect("Failed to read back CSV");
    assert_eq!(reloaded.records(), view.to_records().as_slice());
    println!("Round-trip verified: exported CSV matches the selection");

    let _ = std::fs::remove_file(output);
}
