use crate::analysis::DashboardSnapshot;

use super::charts::{format_bar_chart, format_salary_histogram};
use super::tables::{format_box_table, format_count_table, format_group_table, format_kpi_table};

/// Format every dashboard section, in page order, as one text report.
pub fn format_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();
    output.push_str(&format_kpi_table(&snapshot.kpis));
    output.push_str(&format_group_table(
        "Mean Salary by Year",
        "Year",
        &snapshot.salary_by_year,
    ));
    output.push_str(&format_bar_chart(
        &format!("Top {} Job Titles by Mean Salary", snapshot.top_job_titles.len()),
        &snapshot.top_job_titles,
    ));
    output.push_str(&format_salary_histogram(&snapshot.salary_histogram));
    output.push_str(&format_box_table(&snapshot.salary_by_level_and_contract));
    output.push_str(&format_count_table(
        "Work Type Proportion",
        "Work type",
        &snapshot.remote_type_counts,
    ));
    output.push_str(&format_group_table(
        "Mean Salary by Company Size",
        "Company size",
        &snapshot.salary_by_company_size,
    ));
    output.push_str(&format_group_table(
        &format!("Mean {} Salary by Country", snapshot.spotlight_job_title),
        "Country",
        &snapshot.spotlight_salary_by_country,
    ));
    output
}

pub fn print_dashboard(snapshot: &DashboardSnapshot) {
    print!("{}", format_dashboard(snapshot));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Analyzer, DashboardSettings, FilteredView};
    use crate::models::Record;

    fn make_record(year: i32, title: &str, usd: f64) -> Record {
        Record {
            year,
            experience_level: "senior".to_string(),
            contract_type: "integral".to_string(),
            company_size: "grande".to_string(),
            remote_type: "remoto".to_string(),
            job_title: title.to_string(),
            residence_country_code: "BRA".to_string(),
            salary_usd: usd,
        }
    }

    #[test]
    fn test_dashboard_has_every_section() {
        let records = vec![
            make_record(2022, "Data Scientist", 90000.0),
            make_record(2023, "Data Engineer", 110000.0),
        ];
        let view = FilteredView::from_records(&records);
        let snap = Analyzer::new(&view).snapshot(&DashboardSettings::default());
        let output = format_dashboard(&snap);
        for title in [
            "General Metrics (USD)",
            "Mean Salary by Year",
            "Top 2 Job Titles by Mean Salary",
            "Salary Distribution",
            "Salary by Seniority and Contract",
            "Work Type Proportion",
            "Mean Salary by Company Size",
            "Mean Data Scientist Salary by Country",
        ] {
            assert!(output.contains(title), "missing section {title}");
        }
    }

    #[test]
    fn test_empty_dashboard_renders() {
        let records: Vec<Record> = Vec::new();
        let view = FilteredView::from_records(&records);
        let snap = Analyzer::new(&view).snapshot(&DashboardSettings::default());
        let output = format_dashboard(&snap);
        assert!(output.contains("$0"));
        assert!(output.contains("No data available."));
    }
}
