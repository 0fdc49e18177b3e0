use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use super::model::SalaryRecord;
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Column selectors
// ---------------------------------------------------------------------------

/// A column that can be grouped or counted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Year,
    Seniority,
    ContractType,
    CompanySize,
    Role,
    RemoteMode,
    ResidenceCountry,
}

impl CategoryField {
    pub fn key<'a>(self, record: &'a SalaryRecord) -> Cow<'a, str> {
        match self {
            CategoryField::Year => Cow::Owned(record.year.to_string()),
            CategoryField::Seniority => Cow::Borrowed(&record.seniority),
            CategoryField::ContractType => Cow::Borrowed(&record.contract_type),
            CategoryField::CompanySize => Cow::Borrowed(&record.company_size),
            CategoryField::Role => Cow::Borrowed(&record.role),
            CategoryField::RemoteMode => Cow::Borrowed(&record.remote_mode),
            CategoryField::ResidenceCountry => Cow::Borrowed(&record.residence_country_code),
        }
    }
}

/// A column that can be averaged or binned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    SalaryUsd,
}

impl NumericField {
    pub fn value(self, record: &SalaryRecord) -> f64 {
        match self {
            NumericField::SalaryUsd => record.salary_usd,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Shown in place of the most frequent role when nothing passes the filters.
pub const NO_ROLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalarySummary {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub record_count: usize,
    pub most_frequent_role: String,
}

impl SalarySummary {
    /// The all-zero summary of an empty view.
    pub fn empty() -> Self {
        Self {
            mean_salary: 0.0,
            max_salary: 0.0,
            record_count: 0,
            most_frequent_role: NO_ROLE.to_string(),
        }
    }
}

pub fn compute_summary(view: &[&SalaryRecord]) -> SalarySummary {
    if view.is_empty() {
        return SalarySummary::empty();
    }
    let total: f64 = view.iter().map(|r| r.salary_usd).sum();
    let max = view
        .iter()
        .map(|r| r.salary_usd)
        .fold(f64::NEG_INFINITY, f64::max);

    SalarySummary {
        mean_salary: total / view.len() as f64,
        max_salary: max,
        record_count: view.len(),
        most_frequent_role: mode(view, CategoryField::Role).unwrap_or_else(|| NO_ROLE.to_string()),
    }
}

/// Most frequent value of `field`; ties go to the smallest value.
pub fn mode(view: &[&SalaryRecord], field: CategoryField) -> Option<String> {
    let counts = counts_by_category(view, field);
    let mut best: Option<(&String, usize)> = None;
    for (value, &count) in &counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.clone())
}

// ---------------------------------------------------------------------------
// Group-by aggregates
// ---------------------------------------------------------------------------

/// Mean of `value` per distinct `group`, keyed in ascending group order.
pub fn group_means(
    view: &[&SalaryRecord],
    group: CategoryField,
    value: NumericField,
) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for rec in view {
        let entry = sums.entry(group.key(rec).into_owned()).or_insert((0.0, 0));
        entry.0 += value.value(rec);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

/// The `n` groups with the highest mean, returned in ascending order of mean
/// so a horizontal bar chart draws the largest at the top.
///
/// Among equal means the smaller group key wins a place in the top `n` and
/// comes first in the output.
pub fn top_n_by_mean(
    view: &[&SalaryRecord],
    group: CategoryField,
    value: NumericField,
    n: usize,
) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = group_means(view, group, value).into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

/// Number of records per distinct value of `field`.
pub fn counts_by_category(view: &[&SalaryRecord], field: CategoryField) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for rec in view {
        *counts.entry(field.key(rec).into_owned()).or_insert(0) += 1;
    }
    counts
}

/// Mean salary per residence country, restricted to one role.
pub fn country_means_for_role(view: &[&SalaryRecord], role: &str) -> BTreeMap<String, f64> {
    let matching: Vec<&SalaryRecord> = view.iter().copied().filter(|r| r.role == role).collect();
    group_means(&matching, CategoryField::ResidenceCountry, NumericField::SalaryUsd)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bar: `[lower, upper)`, except the last bin which is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Equal-width bins over `[min, max]` of the values in `view`.
///
/// When every value is the same the range is widened by 0.5 on each side so
/// bins keep a non-zero width.
pub fn histogram_bins(
    view: &[&SalaryRecord],
    value: NumericField,
    bin_count: usize,
) -> Vec<HistogramBin> {
    if view.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let values: Vec<f64> = view.iter().map(|r| value.value(r)).collect();
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard report – everything one filter event needs to render
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: SalarySummary,
    pub top_roles: Vec<(String, f64)>,
    pub histogram: Vec<HistogramBin>,
    pub remote_counts: BTreeMap<String, usize>,
    pub spotlight_role: String,
    pub country_means: BTreeMap<String, f64>,
}

impl DashboardReport {
    pub fn compute(view: &[&SalaryRecord], config: &DashboardConfig) -> Self {
        Self {
            summary: compute_summary(view),
            top_roles: top_n_by_mean(view, CategoryField::Role, NumericField::SalaryUsd, config.top_n),
            histogram: histogram_bins(view, NumericField::SalaryUsd, config.histogram_bins),
            remote_counts: counts_by_category(view, CategoryField::RemoteMode),
            spotlight_role: config.spotlight_role.clone(),
            country_means: country_means_for_role(view, &config.spotlight_role),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.record_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{self, role_salary};

    fn refs(records: &[SalaryRecord]) -> Vec<&SalaryRecord> {
        records.iter().collect()
    }

    #[test]
    fn field_selectors_read_the_right_column() {
        let rec = &fixtures::sample()[2];
        assert_eq!(CategoryField::Year.key(rec), "2024");
        assert_eq!(CategoryField::Seniority.key(rec), "pleno");
        assert_eq!(CategoryField::ContractType.key(rec), "contrato");
        assert_eq!(CategoryField::CompanySize.key(rec), "media");
        assert_eq!(CategoryField::Role.key(rec), "Data Engineer");
        assert_eq!(CategoryField::RemoteMode.key(rec), "hibrido");
        assert_eq!(CategoryField::ResidenceCountry.key(rec), "DEU");
        assert_eq!(NumericField::SalaryUsd.value(rec), 98_000.0);
    }

    #[test]
    fn mean_by_year() {
        let records = fixtures::sample();
        let means = group_means(&refs(&records), CategoryField::Year, NumericField::SalaryUsd);
        assert_eq!(means["2023"], 97_500.0);
        assert_eq!(means["2025"], 50_000.0);
    }

    #[test]
    fn summary_of_sample() {
        let records = fixtures::sample();
        let summary = compute_summary(&refs(&records));
        assert_eq!(summary.record_count, 7);
        assert_eq!(summary.max_salary, 240_000.0);
        let expected_mean = 803_000.0 / 7.0;
        assert!((summary.mean_salary - expected_mean).abs() < 1e-9);
        assert_eq!(summary.most_frequent_role, "Data Scientist");
    }

    #[test]
    fn summary_of_empty_view_is_zeroed() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.mean_salary, 0.0);
        assert_eq!(summary.max_salary, 0.0);
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.most_frequent_role, NO_ROLE);
    }

    #[test]
    fn mode_ties_pick_smallest_value() {
        let records = vec![
            role_salary("Zeta", 1.0),
            role_salary("Alpha", 1.0),
            role_salary("Zeta", 1.0),
            role_salary("Alpha", 1.0),
        ];
        assert_eq!(mode(&refs(&records), CategoryField::Role).as_deref(), Some("Alpha"));
    }

    #[test]
    fn top_one_by_mean() {
        let records = vec![
            role_salary("A", 100.0),
            role_salary("A", 300.0),
            role_salary("B", 200.0),
        ];
        let top = top_n_by_mean(&refs(&records), CategoryField::Role, NumericField::SalaryUsd, 1);
        assert_eq!(top, vec![("A".to_string(), 200.0)]);
    }

    #[test]
    fn top_n_is_bounded_and_ascending() {
        let records: Vec<SalaryRecord> = (0..25)
            .map(|i| role_salary(&format!("role-{i:02}"), f64::from((i * 37) % 11) * 1000.0))
            .collect();
        let view = refs(&records);
        for n in [0, 1, 5, 10, 30] {
            let top = top_n_by_mean(&view, CategoryField::Role, NumericField::SalaryUsd, n);
            assert!(top.len() <= n);
            assert!(top.windows(2).all(|w| w[0].1 <= w[1].1));
        }
    }

    #[test]
    fn top_n_ties_prefer_smaller_key() {
        let records = vec![
            role_salary("C", 50.0),
            role_salary("B", 50.0),
            role_salary("A", 50.0),
            role_salary("D", 10.0),
        ];
        let top = top_n_by_mean(&refs(&records), CategoryField::Role, NumericField::SalaryUsd, 2);
        assert_eq!(top, vec![("A".to_string(), 50.0), ("B".to_string(), 50.0)]);
    }

    #[test]
    fn counts_remote_modes() {
        let mut records = vec![
            role_salary("X", 1.0),
            role_salary("X", 1.0),
            role_salary("X", 1.0),
        ];
        records[0].remote_mode = "remote".into();
        records[1].remote_mode = "onsite".into();
        records[2].remote_mode = "remote".into();

        let counts = counts_by_category(&refs(&records), CategoryField::RemoteMode);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["remote"], 2);
        assert_eq!(counts["onsite"], 1);
    }

    #[test]
    fn single_bin_holds_everything() {
        let records = fixtures::sample();
        let bins = histogram_bins(&refs(&records), NumericField::SalaryUsd, 1);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, records.len());
        assert_eq!(bins[0].lower, 30_000.0);
        assert_eq!(bins[0].upper, 240_000.0);
    }

    #[test]
    fn bins_are_equal_width_and_cover_all_records() {
        let records = fixtures::sample();
        let bins = histogram_bins(&refs(&records), NumericField::SalaryUsd, 3);
        assert_eq!(bins.len(), 3);
        assert!(bins.iter().all(|b| (b.width() - 70_000.0).abs() < 1e-6));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), records.len());
        // 30k, 45k, 70k, 98k | 150k | 170k, 240k
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![4, 1, 2]);
    }

    #[test]
    fn constant_values_still_bin() {
        let records = vec![role_salary("A", 500.0), role_salary("B", 500.0)];
        let bins = histogram_bins(&refs(&records), NumericField::SalaryUsd, 1);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert!(bins[0].lower < 500.0 && bins[0].upper > 500.0);
    }

    #[test]
    fn empty_histogram() {
        assert!(histogram_bins(&[], NumericField::SalaryUsd, 30).is_empty());
        let records = fixtures::sample();
        assert!(histogram_bins(&refs(&records), NumericField::SalaryUsd, 0).is_empty());
    }

    #[test]
    fn country_means_for_one_role() {
        let records = fixtures::sample();
        let means = country_means_for_role(&refs(&records), "Data Scientist");
        assert_eq!(means.len(), 2);
        assert_eq!(means["USA"], 160_000.0);
        assert_eq!(means["BRA"], 30_000.0);

        assert!(country_means_for_role(&refs(&records), "Astronaut").is_empty());
    }

    #[test]
    fn report_on_empty_view() {
        let report = DashboardReport::compute(&[], &DashboardConfig::default());
        assert!(report.is_empty());
        assert_eq!(report.summary, SalarySummary::empty());
        assert!(report.top_roles.is_empty());
        assert!(report.histogram.is_empty());
        assert!(report.remote_counts.is_empty());
        assert!(report.country_means.is_empty());
    }

    #[test]
    fn report_uses_config_sizes() {
        let records = fixtures::sample();
        let config = DashboardConfig {
            top_n: 2,
            histogram_bins: 5,
            ..DashboardConfig::default()
        };
        let report = DashboardReport::compute(&refs(&records), &config);
        assert_eq!(report.top_roles.len(), 2);
        assert_eq!(report.top_roles[1].0, "Head of Data");
        assert_eq!(report.histogram.len(), 5);
        assert_eq!(report.remote_counts["remoto"], 3);
        assert_eq!(report.spotlight_role, "Data Scientist");
    }
}
