use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement,
    Table,
};

use crate::analysis::{BoxStats, CategoryCount, GroupMean, Kpis};
use crate::models::{Column, FilterOptions, Record};

/// Format a dollar amount with thousands separators and no decimals.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Format an integer count with thousands separators.
pub fn format_count(value: usize) -> String {
    group_thousands(value as u64)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn section_title(title: &str, rule: usize) -> String {
    format!("\n{}\n{}\n", title.bold().green(), "=".repeat(rule))
}

/// Format the headline metrics as a string.
pub fn format_kpi_table(kpis: &Kpis) -> String {
    let mut output = section_title("General Metrics (USD)", 50);

    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Mean salary"),
        Cell::new(format_usd(kpis.mean_salary)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Median salary"),
        Cell::new(format_usd(kpis.median_salary)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Max salary"),
        Cell::new(format_usd(kpis.max_salary)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Total records"),
        Cell::new(format_count(kpis.total_records)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Most frequent job title"),
        Cell::new(&kpis.most_frequent_job_title).set_alignment(CellAlignment::Right),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the headline metrics.
pub fn print_kpi_table(kpis: &Kpis) {
    print!("{}", format_kpi_table(kpis));
}

/// Format a group-to-mean-salary sequence as a table, keeping its order.
pub fn format_group_table(title: &str, key_header: &str, groups: &[GroupMean]) -> String {
    let mut output = section_title(title, 50);
    if groups.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let mut table = new_table(vec![key_header, "Mean salary", "Records"]);
    for g in groups {
        table.add_row(vec![
            Cell::new(g.key.to_string()),
            Cell::new(format_usd(g.mean)).set_alignment(CellAlignment::Right),
            Cell::new(format_count(g.count)).set_alignment(CellAlignment::Right),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Format value counts with their share of the total.
pub fn format_count_table(title: &str, key_header: &str, counts: &[CategoryCount]) -> String {
    let mut output = section_title(title, 50);
    if counts.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let total: usize = counts.iter().map(|c| c.count).sum();
    let mut table = new_table(vec![key_header, "Count", "Share"]);
    for c in counts {
        table.add_row(vec![
            Cell::new(c.key.to_string()),
            Cell::new(format_count(c.count)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", c.count as f64 / total as f64 * 100.0))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Format the per-(seniority, contract) salary distributions.
pub fn format_box_table(boxes: &[BoxStats]) -> String {
    let mut output = section_title("Salary by Seniority and Contract", 70);
    if boxes.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let mut table = new_table(vec![
        "Seniority",
        "Contract",
        "N",
        "Min",
        "Q1",
        "Median",
        "Q3",
        "Max",
        "Outliers",
    ]);
    for b in boxes {
        table.add_row(vec![
            Cell::new(b.group.to_string()),
            Cell::new(b.subgroup.to_string()),
            Cell::new(format_count(b.count)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(b.min)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(b.q1)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(b.median)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(b.q3)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(b.max)).set_alignment(CellAlignment::Right),
            Cell::new(b.outliers.len()).set_alignment(CellAlignment::Right),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Format the first `limit` records of the filtered table.
pub fn format_records_table(records: &[Record], limit: usize) -> String {
    let mut output = section_title("Detailed Data", 70);
    if records.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let header: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
    let mut table = new_table(header);
    for r in records.iter().take(limit) {
        table.add_row(vec![
            Cell::new(r.year),
            Cell::new(&r.experience_level),
            Cell::new(&r.contract_type),
            Cell::new(&r.company_size),
            Cell::new(&r.remote_type),
            Cell::new(&r.job_title),
            Cell::new(&r.residence_country_code),
            Cell::new(format_usd(r.salary_usd)).set_alignment(CellAlignment::Right),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    if records.len() > limit {
        output.push_str(&format!(
            "{}\n",
            format!(
                "Showing {} of {} records",
                format_count(limit),
                format_count(records.len())
            )
            .dimmed()
        ));
    }
    output
}

/// Format the selectable values of each filter.
pub fn format_filter_options(options: &FilterOptions) -> String {
    let mut output = section_title("Filters", 50);

    let years: Vec<String> = options.year.iter().map(|y| y.to_string()).collect();
    let mut table = new_table(vec!["Filter", "Column", "Options"]);
    table.add_row(vec!["Year", Column::Year.header(), years.join(", ").as_str()]);
    table.add_row(vec![
        "Seniority",
        Column::ExperienceLevel.header(),
        options.experience_level.join(", ").as_str(),
    ]);
    table.add_row(vec![
        "Contract type",
        Column::ContractType.header(),
        options.contract_type.join(", ").as_str(),
    ]);
    table.add_row(vec![
        "Company size",
        Column::CompanySize.header(),
        options.company_size.join(", ").as_str(),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryValue;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(115000.0), "$115,000");
        assert_eq!(format_usd(1234567.6), "$1,234,568");
        assert_eq!(format_usd(-2500.0), "-$2,500");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(123456), "123,456");
    }

    #[test]
    fn test_kpi_table() {
        let kpis = Kpis {
            mean_salary: 115000.0,
            median_salary: 115000.0,
            max_salary: 120000.0,
            total_records: 2,
            most_frequent_job_title: "Data Scientist".to_string(),
        };
        let output = format_kpi_table(&kpis);
        assert!(output.contains("Mean salary"));
        assert!(output.contains("$115,000"));
        assert!(output.contains("$120,000"));
        assert!(output.contains("Data Scientist"));
    }

    #[test]
    fn test_group_table_empty() {
        let output = format_group_table("By Year", "Year", &[]);
        assert!(output.contains("By Year"));
        assert!(output.contains("No data available."));
    }

    #[test]
    fn test_group_table_rows() {
        let groups = vec![
            GroupMean {
                key: CategoryValue::Int(2022),
                mean: 70000.0,
                count: 2,
            },
            GroupMean {
                key: CategoryValue::Int(2023),
                mean: 115000.0,
                count: 2,
            },
        ];
        let output = format_group_table("By Year", "Year", &groups);
        assert!(output.contains("2022"));
        assert!(output.contains("$115,000"));
        assert!(output.find("2022").unwrap() < output.find("2023").unwrap());
    }

    #[test]
    fn test_count_table_share() {
        let counts = vec![
            CategoryCount {
                key: "remoto".into(),
                count: 3,
            },
            CategoryCount {
                key: "presencial".into(),
                count: 1,
            },
        ];
        let output = format_count_table("Work Type", "Type", &counts);
        assert!(output.contains("75.0%"));
        assert!(output.contains("25.0%"));
    }

    #[test]
    fn test_records_table_limit() {
        let record = Record {
            year: 2023,
            experience_level: "senior".to_string(),
            contract_type: "integral".to_string(),
            company_size: "grande".to_string(),
            remote_type: "remoto".to_string(),
            job_title: "ML Engineer".to_string(),
            residence_country_code: "CAN".to_string(),
            salary_usd: 150000.0,
        };
        let records = vec![record.clone(), record.clone(), record];
        let output = format_records_table(&records, 2);
        assert!(output.contains("residencia_iso3"));
        assert!(output.contains("ML Engineer"));
        assert!(output.contains("Showing 2 of 3 records"));
    }

    #[test]
    fn test_filter_options_table() {
        let options = FilterOptions {
            year: vec![2022, 2023],
            experience_level: vec!["junior".to_string(), "senior".to_string()],
            contract_type: vec!["integral".to_string()],
            company_size: vec!["grande".to_string(), "media".to_string()],
        };
        let output = format_filter_options(&options);
        assert!(output.contains("2022, 2023"));
        assert!(output.contains("junior, senior"));
        assert!(output.contains("tamanho_empresa"));
    }
}
