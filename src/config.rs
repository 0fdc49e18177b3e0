use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::data::loader::DataSource;
use crate::error::LoadError;

pub const CONFIG_ENV: &str = "SALARY_DASHBOARD_CONFIG";
pub const URL_ENV: &str = "SALARY_DASHBOARD_URL";
pub const FILE_ENV: &str = "SALARY_DASHBOARD_FILE";

const USAGE: &str = "usage: salary-dashboard [PATH_OR_URL]";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Runtime settings: where the data comes from and how the charts are sized.
///
/// Resolution order, later wins:
/// 1. built-in defaults
/// 2. JSON file named by `SALARY_DASHBOARD_CONFIG`
/// 3. `SALARY_DASHBOARD_URL` / `SALARY_DASHBOARD_FILE`
/// 4. first positional command line argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: DataSource,
    /// How many roles the "top roles" chart shows.
    pub top_n: usize,
    pub histogram_bins: usize,
    /// Role whose per-country mean salary is charted.
    pub spotlight_role: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            top_n: 10,
            histogram_bins: 30,
            spotlight_role: "Data Scientist".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Resolve the configuration from the process environment and arguments.
    pub fn load() -> Result<Self> {
        let file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let url = std::env::var(URL_ENV).ok();
        let data_file = std::env::var(FILE_ENV).ok();
        let arg = std::env::args().nth(1);
        Self::resolve(file.as_deref(), url, data_file, arg)
    }

    /// [`load`](Self::load) with every input passed explicitly.
    pub fn resolve(
        config_file: Option<&Path>,
        url: Option<String>,
        data_file: Option<String>,
        arg: Option<String>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(url) = url.filter(|u| !u.is_empty()) {
            config.source = DataSource::Url(url);
        }
        if let Some(file) = data_file.filter(|f| !f.is_empty()) {
            config.source = DataSource::File(PathBuf::from(file));
        }
        if let Some(arg) = arg {
            if arg.starts_with('-') {
                bail!("unrecognised option '{arg}'\n{USAGE}");
            }
            config.source = DataSource::parse(&arg);
        }

        config.validate()?;
        log::debug!("Resolved configuration: {config:?}");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.top_n == 0 {
            return Err(LoadError::Config("top_n must be at least 1".into()));
        }
        if self.histogram_bins == 0 {
            return Err(LoadError::Config("histogram_bins must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::loader::DEFAULT_DATA_URL;

    #[test]
    fn defaults() {
        let config = DashboardConfig::resolve(None, None, None, None).unwrap();
        assert_eq!(config.source, DataSource::Url(DEFAULT_DATA_URL.into()));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.spotlight_role, "Data Scientist");
    }

    #[test]
    fn json_file_fills_missing_fields_with_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"top_n": 5, "source": {{"file": "local.csv"}}}}"#).unwrap();

        let config = DashboardConfig::resolve(Some(tmp.path()), None, None, None).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.source, DataSource::File(PathBuf::from("local.csv")));
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let config = DashboardConfig::resolve(
            None,
            Some("https://example.com/a.csv".into()),
            Some("b.csv".into()),
            None,
        )
        .unwrap();
        assert_eq!(config.source, DataSource::File(PathBuf::from("b.csv")));

        let config = DashboardConfig::resolve(
            None,
            Some("https://example.com/a.csv".into()),
            Some("b.csv".into()),
            Some("https://example.com/c.csv".into()),
        )
        .unwrap();
        assert_eq!(config.source, DataSource::Url("https://example.com/c.csv".into()));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"histogram_bins": 0}}"#).unwrap();
        assert!(DashboardConfig::resolve(Some(tmp.path()), None, None, None).is_err());

        let config = DashboardConfig {
            top_n: 0,
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(LoadError::Config(_))));
    }

    #[test]
    fn dash_arguments_are_rejected_with_usage() {
        for flag in ["--help", "-v"] {
            let err = DashboardConfig::resolve(None, None, None, Some(flag.into())).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains(flag), "{msg}");
            assert!(msg.contains(USAGE), "{msg}");
        }

        let config = DashboardConfig::resolve(None, None, None, Some("./-odd.csv".into())).unwrap();
        assert_eq!(config.source, DataSource::File(PathBuf::from("./-odd.csv")));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "not json").unwrap();
        let err = DashboardConfig::resolve(Some(tmp.path()), None, None, None).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config file"));
    }
}
