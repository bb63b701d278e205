use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Dataset, Record};

/// Selectable values of each filterable dimension, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub year: Vec<i32>,
    pub experience_level: Vec<String>,
    pub contract_type: Vec<String>,
    pub company_size: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record]) -> Self {
        let mut years = BTreeSet::new();
        let mut levels = BTreeSet::new();
        let mut contracts = BTreeSet::new();
        let mut sizes = BTreeSet::new();
        for r in records {
            years.insert(r.year);
            levels.insert(r.experience_level.as_str());
            contracts.insert(r.contract_type.as_str());
            sizes.insert(r.company_size.as_str());
        }
        Self {
            year: years.into_iter().collect(),
            experience_level: levels.into_iter().map(str::to_string).collect(),
            contract_type: contracts.into_iter().map(str::to_string).collect(),
            company_size: sizes.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Accepted values per filterable dimension.
///
/// `None` leaves a dimension unconstrained. `Some` of an empty set accepts
/// nothing, so the filtered view is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<BTreeSet<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<BTreeSet<String>>,
}

impl FilterSelection {
    /// A selection with no dimension constrained.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Every option of every filterable dimension selected.
    ///
    /// This is the initial state of a session and what "reset" restores.
    pub fn all_of(dataset: &Dataset) -> Self {
        let opts = dataset.filter_options();
        Self {
            year: Some(opts.year.into_iter().collect()),
            experience_level: Some(opts.experience_level.into_iter().collect()),
            contract_type: Some(opts.contract_type.into_iter().collect()),
            company_size: Some(opts.company_size.into_iter().collect()),
        }
    }

    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.year = Some(years.into_iter().collect());
        self
    }

    pub fn with_experience_levels<S: Into<String>>(
        mut self,
        levels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.experience_level = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_contract_types<S: Into<String>>(
        mut self,
        contracts: impl IntoIterator<Item = S>,
    ) -> Self {
        self.contract_type = Some(contracts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_company_sizes<S: Into<String>>(
        mut self,
        sizes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.company_size = Some(sizes.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.year.is_none()
            && self.experience_level.is_none()
            && self.contract_type.is_none()
            && self.company_size.is_none()
    }

    /// True iff every constrained dimension accepts the record's value.
    pub fn matches(&self, record: &Record) -> bool {
        accepts(self.year.as_ref(), &record.year)
            && accepts(
                self.experience_level.as_ref(),
                record.experience_level.as_str(),
            )
            && accepts(self.contract_type.as_ref(), record.contract_type.as_str())
            && accepts(self.company_size.as_ref(), record.company_size.as_str())
    }
}

fn accepts<T, Q>(set: Option<&BTreeSet<T>>, value: &Q) -> bool
where
    T: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    set.map_or(true, |s| s.contains(value))
}
