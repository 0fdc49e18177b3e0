use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::{DashboardReport, counts_by_category};
use crate::data::filter::{FilterColumn, SalaryFilter, apply_filters, filtered_indices};
use crate::data::loader;
use crate::data::model::{SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<SalaryDataset>>,

    pub filter: SalaryFilter,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over the visible records, rebuilt on every filter change.
    pub report: Option<DashboardReport>,

    /// Per filter column, how many visible records carry each value.
    pub facet_counts: BTreeMap<FilterColumn, BTreeMap<String, usize>>,

    /// Colours for the remote-work pie, stable across filter changes.
    pub remote_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            filter: SalaryFilter::default(),
            visible_indices: Vec::new(),
            report: None,
            facet_counts: BTreeMap::new(),
            remote_colors: None,
            status_message: None,
        }
    }

    /// Load the configured source through the process-wide cache and report
    /// failures in the status line instead of aborting.
    pub fn load_configured(&mut self) {
        match loader::cached_dataset(&self.config.source) {
            Ok(dataset) => {
                log::info!("Loaded {} salary records from {}", dataset.len(), self.config.source);
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.config.source);
                self.status_message = Some(format!("Error loading data: {e}"));
            }
        }
    }

    /// The configured source can only be retried while nothing is loaded;
    /// a successful load is kept for the rest of the process.
    pub fn can_retry(&self) -> bool {
        self.dataset.is_none()
    }

    /// Replace the dataset with a local file picked by the user.
    pub fn load_file(&mut self, path: &Path) {
        match loader::load_path(path) {
            Ok(dataset) => {
                log::info!("Loaded {} salary records from {}", dataset.len(), path.display());
                self.set_dataset(Arc::new(dataset));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset with every filter value selected.
    pub fn set_dataset(&mut self, dataset: Arc<SalaryDataset>) {
        if dataset.is_empty() {
            log::warn!("Loaded dataset has no records");
        }
        self.filter = SalaryFilter::all(&dataset);
        self.remote_colors = Some(ColorMap::new(dataset.records.iter().map(|r| &r.remote_mode)));
        if !dataset.roles.contains(&self.config.spotlight_role) {
            log::warn!(
                "Spotlight role '{}' does not occur in the data",
                self.config.spotlight_role
            );
        }
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view and every aggregate derived from it.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filter);
        let view = apply_filters(&ds.records, &self.filter);
        self.report = Some(DashboardReport::compute(&view, &self.config));
        self.facet_counts = FilterColumn::ALL
            .iter()
            .map(|&column| (column, counts_by_category(&view, column.field())))
            .collect();
        log::debug!("Filter matched {} of {} records", view.len(), ds.len());
    }

    /// Records passing the current filter, in dataset order.
    pub fn visible_records(&self) -> Vec<&SalaryRecord> {
        match &self.dataset {
            Some(ds) => self.visible_indices.iter().map(|&i| &ds.records[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Toggle a single value in a column's filter.
    pub fn set_filter_value(&mut self, column: FilterColumn, value: &str, selected: bool) {
        self.filter.set_value(column, value, selected);
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let Some(ds) = &self.dataset {
            self.filter.select_all(column, ds);
            self.refilter();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.filter.select_none(column);
        self.refilter();
    }

    pub fn set_spotlight_role(&mut self, role: String) {
        self.config.spotlight_role = role;
        self.refilter();
    }

    /// Write the current report as pretty JSON.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        let report = self
            .report
            .as_ref()
            .context("no data loaded, nothing to export")?;
        let json = serde_json::to_string_pretty(report).context("serializing report")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("Exported summary to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::fixtures;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(Arc::new(SalaryDataset::from_records(fixtures::sample())));
        state
    }

    #[test]
    fn new_dataset_shows_everything() {
        let state = loaded_state();
        assert_eq!(state.visible_indices.len(), 7);
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.summary.record_count, 7);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn filter_events_recompute_report() {
        let mut state = loaded_state();
        state.set_filter_value(FilterColumn::Year, "2023", false);
        state.set_filter_value(FilterColumn::Year, "2025", false);
        assert_eq!(state.visible_records().len(), 3);
        assert_eq!(state.report.as_ref().unwrap().summary.max_salary, 240_000.0);

        state.select_none(FilterColumn::CompanySize);
        let report = state.report.as_ref().unwrap();
        assert!(report.is_empty());
        assert_eq!(report.summary.most_frequent_role, "N/A");

        state.select_all(FilterColumn::CompanySize);
        assert_eq!(state.visible_records().len(), 3);
    }

    #[test]
    fn facet_counts_follow_the_filter() {
        let mut state = loaded_state();
        assert_eq!(state.facet_counts[&FilterColumn::Year]["2024"], 3);
        assert_eq!(state.facet_counts[&FilterColumn::CompanySize]["grande"], 3);

        state.set_filter_value(FilterColumn::Year, "2024", false);
        let sizes = &state.facet_counts[&FilterColumn::CompanySize];
        assert_eq!(sizes["grande"], 1);
        assert!(!state.facet_counts[&FilterColumn::Year].contains_key("2024"));

        state.select_none(FilterColumn::Seniority);
        assert!(state.facet_counts.values().all(|counts| counts.is_empty()));
    }

    #[test]
    fn retry_only_offered_without_data() {
        let mut state = AppState::new(DashboardConfig::default());
        assert!(state.can_retry());
        state.set_dataset(Arc::new(SalaryDataset::from_records(fixtures::sample())));
        assert!(!state.can_retry());
    }

    #[test]
    fn spotlight_role_change_rebuilds_country_means() {
        let mut state = loaded_state();
        state.set_spotlight_role("Data Analyst".into());
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.spotlight_role, "Data Analyst");
        assert_eq!(report.country_means.keys().collect::<Vec<_>>(), vec!["BRA", "PRT"]);
    }

    #[test]
    fn failed_file_load_sets_status() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_file(Path::new("/no/such/salaries.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }

    #[test]
    fn export_writes_json() {
        let state = loaded_state();
        let tmp = NamedTempFile::new().unwrap();
        state.export_report(tmp.path()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path()).unwrap()).unwrap();
        assert_eq!(json["summary"]["record_count"], 7);
        assert_eq!(json["top_roles"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn export_without_data_fails() {
        let state = AppState::new(DashboardConfig::default());
        let tmp = NamedTempFile::new().unwrap();
        assert!(state.export_report(tmp.path()).is_err());
    }
}
