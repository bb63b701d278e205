#![no_main]

use libfuzzer_sys::fuzz_target;
use salary_dashboard::analysis::{filter, Analyzer, DashboardSettings};
use salary_dashboard::io::{read_csv_from_bytes, RowPolicy};
use salary_dashboard::models::FilterSelection;

fuzz_target!(|data: &[u8]| {
    if let Ok(dataset) = read_csv_from_bytes(data, "fuzz", RowPolicy::Lenient) {
        let view = filter(&dataset, &FilterSelection::all_of(&dataset));
        let _ = Analyzer::new(&view).snapshot(&DashboardSettings::default());
    }
});
