use colored::Colorize;

use crate::analysis::{GroupMean, HistogramBin};

use super::tables::{format_count, format_usd};

const BAR_WIDTH: usize = 40;

fn bar(value: f64, max: f64) -> String {
    let len = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "\u{2588}".repeat(len)
}

/// Format a text-based histogram of salaries as a string.
pub fn format_salary_histogram(bins: &[HistogramBin]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Salary Distribution".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if bins.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

    output.push_str(&format!(
        "  {:>23}  {:>6}  Distribution\n",
        "Salary (USD)", "Count"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(75)));

    for b in bins {
        output.push_str(&format!(
            "  {:>11}-{:<11}  {:>6}  {}\n",
            format_usd(b.lower),
            format_usd(b.upper),
            format_count(b.count),
            bar(b.count as f64, max_count).green()
        ));
    }

    output.push('\n');
    output
}

/// Print a text-based histogram of salaries.
pub fn print_salary_histogram(bins: &[HistogramBin]) {
    print!("{}", format_salary_histogram(bins));
}

/// Format a horizontal bar chart of group means as a string.
///
/// Input is ascending by mean; rows are drawn last-to-first so the largest
/// bar is on top.
pub fn format_bar_chart(title: &str, groups: &[GroupMean]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if groups.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_mean = groups.iter().map(|g| g.mean).fold(0.0f64, f64::max);
    let label_width = groups
        .iter()
        .map(|g| g.key.to_string().chars().count())
        .max()
        .unwrap_or(0);

    for g in groups.iter().rev() {
        output.push_str(&format!(
            "  {:<label_width$}  {:>12}  {}\n",
            g.key.to_string(),
            format_usd(g.mean),
            bar(g.mean, max_mean).cyan()
        ));
    }

    output.push('\n');
    output
}

/// Print a horizontal bar chart of group means.
pub fn print_bar_chart(title: &str, groups: &[GroupMean]) {
    print!("{}", format_bar_chart(title, groups));
}
