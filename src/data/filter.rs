use std::collections::BTreeSet;

use super::aggregate::CategoryField;
use super::model::{SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per filterable column
// ---------------------------------------------------------------------------

/// The four multi-select filters of the side panel.
///
/// A record passes when each of its four fields is in the matching set.
/// An empty set admits nothing, same as an empty multi-select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryFilter {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contract_types: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

/// One of the four filterable columns, used by the UI to address a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterColumn {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::ContractType,
        FilterColumn::CompanySize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Year",
            FilterColumn::Seniority => "Seniority",
            FilterColumn::ContractType => "Contract type",
            FilterColumn::CompanySize => "Company size",
        }
    }

    /// The record column this filter reads.
    pub fn field(self) -> CategoryField {
        match self {
            FilterColumn::Year => CategoryField::Year,
            FilterColumn::Seniority => CategoryField::Seniority,
            FilterColumn::ContractType => CategoryField::ContractType,
            FilterColumn::CompanySize => CategoryField::CompanySize,
        }
    }
}

impl SalaryFilter {
    /// Everything observed in `dataset` selected, i.e. no effective filter.
    pub fn all(dataset: &SalaryDataset) -> Self {
        Self {
            years: dataset.years.clone(),
            seniorities: dataset.seniorities.clone(),
            contract_types: dataset.contract_types.clone(),
            company_sizes: dataset.company_sizes.clone(),
        }
    }

    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.contract_types.contains(&record.contract_type)
            && self.company_sizes.contains(&record.company_size)
    }

    /// Selected values of `column`, rendered as strings.
    pub fn selected(&self, column: FilterColumn) -> BTreeSet<String> {
        match column {
            FilterColumn::Year => self.years.iter().map(|y| y.to_string()).collect(),
            FilterColumn::Seniority => self.seniorities.clone(),
            FilterColumn::ContractType => self.contract_types.clone(),
            FilterColumn::CompanySize => self.company_sizes.clone(),
        }
    }

    /// Add or remove one value (as shown in the UI) from a column's set.
    /// Year labels that do not parse are ignored.
    pub fn set_value(&mut self, column: FilterColumn, value: &str, selected: bool) {
        fn apply<T: Ord>(set: &mut BTreeSet<T>, value: T, selected: bool) {
            if selected {
                set.insert(value);
            } else {
                set.remove(&value);
            }
        }
        match column {
            FilterColumn::Year => {
                if let Ok(year) = value.parse::<i32>() {
                    apply(&mut self.years, year, selected);
                }
            }
            FilterColumn::Seniority => apply(&mut self.seniorities, value.to_string(), selected),
            FilterColumn::ContractType => {
                apply(&mut self.contract_types, value.to_string(), selected)
            }
            FilterColumn::CompanySize => apply(&mut self.company_sizes, value.to_string(), selected),
        }
    }

    /// Select every observed value of one column.
    pub fn select_all(&mut self, column: FilterColumn, dataset: &SalaryDataset) {
        match column {
            FilterColumn::Year => self.years = dataset.years.clone(),
            FilterColumn::Seniority => self.seniorities = dataset.seniorities.clone(),
            FilterColumn::ContractType => self.contract_types = dataset.contract_types.clone(),
            FilterColumn::CompanySize => self.company_sizes = dataset.company_sizes.clone(),
        }
    }

    /// Clear one column's selection, hiding every record.
    pub fn select_none(&mut self, column: FilterColumn) {
        match column {
            FilterColumn::Year => self.years.clear(),
            FilterColumn::Seniority => self.seniorities.clear(),
            FilterColumn::ContractType => self.contract_types.clear(),
            FilterColumn::CompanySize => self.company_sizes.clear(),
        }
    }
}

/// Observed values of `column` in `dataset`, as UI labels in sorted order.
pub fn observed_values(dataset: &SalaryDataset, column: FilterColumn) -> Vec<String> {
    match column {
        FilterColumn::Year => dataset.years.iter().map(|y| y.to_string()).collect(),
        FilterColumn::Seniority => dataset.seniorities.iter().cloned().collect(),
        FilterColumn::ContractType => dataset.contract_types.iter().cloned().collect(),
        FilterColumn::CompanySize => dataset.company_sizes.iter().cloned().collect(),
    }
}

/// Keep the records that pass `filter`, preserving their order.
///
/// Takes any iterator of records so a filtered view can be filtered again.
pub fn apply_filters<'a, I>(records: I, filter: &SalaryFilter) -> Vec<&'a SalaryRecord>
where
    I: IntoIterator<Item = &'a SalaryRecord>,
{
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Indices into `dataset.records` of the records that pass `filter`.
pub fn filtered_indices(dataset: &SalaryDataset, filter: &SalaryFilter) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}
