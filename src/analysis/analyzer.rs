use serde::{Deserialize, Serialize};

use crate::analysis::{
    box_stats, count, group_mean, histogram_bins, max, mean, median, mode, top_n_by_mean,
    value_counts, BoxStats, CategoryCount, FilteredView, GroupMean, HistogramBin,
};
use crate::models::{Dimension, NumericColumn};

/// Knobs of the dashboard sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Number of bins of the salary histogram
    pub histogram_bins: usize,
    /// Number of job titles in the top-paid ranking
    pub top_n: usize,
    /// Job title whose salaries are broken down by country
    pub spotlight_job_title: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            top_n: 10,
            spotlight_job_title: "Data Scientist".to_string(),
        }
    }
}

/// Headline metrics over the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub mean_salary: f64,
    pub median_salary: f64,
    pub max_salary: f64,
    pub total_records: usize,
    pub most_frequent_job_title: String,
}

/// Every aggregate one redraw needs, computed from a single view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub kpis: Kpis,
    /// Year to mean salary, ascending by year
    pub salary_by_year: Vec<GroupMean>,
    /// Best-paid job titles, ascending by mean salary
    pub top_job_titles: Vec<GroupMean>,
    pub salary_histogram: Vec<HistogramBin>,
    /// Salary distribution per (seniority, contract)
    pub salary_by_level_and_contract: Vec<BoxStats>,
    pub remote_type_counts: Vec<CategoryCount>,
    /// Company size to mean salary, ascending by size label
    pub salary_by_company_size: Vec<GroupMean>,
    pub spotlight_job_title: String,
    /// Country to mean salary for the spotlight job title
    pub spotlight_salary_by_country: Vec<GroupMean>,
}

/// Unified analysis API that groups the dashboard aggregations over one view.
pub struct Analyzer<'v, 'd> {
    view: &'v FilteredView<'d>,
}

impl<'v, 'd> Analyzer<'v, 'd> {
    pub fn new(view: &'v FilteredView<'d>) -> Self {
        Self { view }
    }

    /// Mean, median, max, count and most frequent job title.
    pub fn kpis(&self) -> Kpis {
        Kpis {
            mean_salary: mean(self.view, NumericColumn::SalaryUsd),
            median_salary: median(self.view, NumericColumn::SalaryUsd),
            max_salary: max(self.view, NumericColumn::SalaryUsd),
            total_records: count(self.view),
            most_frequent_job_title: mode(self.view, Dimension::JobTitle),
        }
    }

    pub fn salary_by_year(&self) -> Vec<GroupMean> {
        group_mean(self.view, Dimension::Year, NumericColumn::SalaryUsd)
    }

    pub fn top_job_titles(&self, n: usize) -> Vec<GroupMean> {
        top_n_by_mean(self.view, Dimension::JobTitle, n, NumericColumn::SalaryUsd)
    }

    pub fn salary_histogram(&self, n_bins: usize) -> Vec<HistogramBin> {
        histogram_bins(self.view, NumericColumn::SalaryUsd, n_bins)
    }

    pub fn salary_by_level_and_contract(&self) -> Vec<BoxStats> {
        box_stats(
            self.view,
            Dimension::ExperienceLevel,
            Dimension::ContractType,
            NumericColumn::SalaryUsd,
        )
    }

    pub fn remote_type_counts(&self) -> Vec<CategoryCount> {
        value_counts(self.view, Dimension::RemoteType)
    }

    pub fn salary_by_company_size(&self) -> Vec<GroupMean> {
        group_mean(self.view, Dimension::CompanySize, NumericColumn::SalaryUsd)
    }

    /// Mean salary per residence country, restricted to one job title.
    pub fn salary_by_country_for(&self, job_title: &str) -> Vec<GroupMean> {
        let subset = self.view.narrow(|r| r.job_title == job_title);
        group_mean(
            &subset,
            Dimension::ResidenceCountryCode,
            NumericColumn::SalaryUsd,
        )
    }

    /// Compute every section of the dashboard.
    pub fn snapshot(&self, settings: &DashboardSettings) -> DashboardSnapshot {
        DashboardSnapshot {
            kpis: self.kpis(),
            salary_by_year: self.salary_by_year(),
            top_job_titles: self.top_job_titles(settings.top_n),
            salary_histogram: self.salary_histogram(settings.histogram_bins),
            salary_by_level_and_contract: self.salary_by_level_and_contract(),
            remote_type_counts: self.remote_type_counts(),
            salary_by_company_size: self.salary_by_company_size(),
            spotlight_job_title: settings.spotlight_job_title.clone(),
            spotlight_salary_by_country: self
                .salary_by_country_for(&settings.spotlight_job_title),
        }
    }
}
