use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::model::{SalaryDataset, SalaryRecord};
use crate::error::{LoadError, LoadResult};

/// Published salary survey used when nothing else is configured.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/main/dados-imersao-final.csv";

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where the salary CSV lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Interpret a user-supplied string: `http(s)://` means remote, anything
    /// else is a local path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from wherever `source` points.
pub fn load_source(source: &DataSource) -> LoadResult<SalaryDataset> {
    match source {
        DataSource::Url(url) => fetch_csv(url),
        DataSource::File(path) => load_path(path),
    }
}

/// One blocking GET, no retries. A non-2xx answer is an error.
pub fn fetch_csv(url: &str) -> LoadResult<SalaryDataset> {
    log::info!("Fetching salary data from {url}");
    let response = reqwest::blocking::get(url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.bytes()?;
    log::debug!("Downloaded {} bytes", body.len());
    read_csv(body.as_ref())
}

/// Read a CSV file from disk.
pub fn load_path(path: &Path) -> LoadResult<SalaryDataset> {
    log::info!("Reading salary data from {}", path.display());
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Decode salary records from any CSV byte stream.
///
/// Columns are located by header name, surrounding whitespace is trimmed,
/// and a salary that is negative or not a finite number rejects the whole
/// load.
pub fn read_csv<R: Read>(reader: R) -> LoadResult<SalaryDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in csv_reader.deserialize::<SalaryRecord>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|source| LoadError::Parse { row, source })?;
        if !record.salary_usd.is_finite() || record.salary_usd < 0.0 {
            return Err(LoadError::InvalidRecord {
                row,
                reason: format!("salary '{}' is not a non-negative number", record.salary_usd),
            });
        }
        records.push(record);
    }

    log::info!("Parsed {} salary records", records.len());
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Load-once cache
// ---------------------------------------------------------------------------

/// Holds at most one successfully loaded dataset for the lifetime of the
/// owner. A failed load leaves the cache empty.
pub struct DatasetCache {
    cell: OnceCell<Arc<SalaryDataset>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached dataset, running `load` only if nothing is cached.
    pub fn get_or_load<F>(&self, load: F) -> LoadResult<Arc<SalaryDataset>>
    where
        F: FnOnce() -> LoadResult<SalaryDataset>,
    {
        self.cell
            .get_or_try_init(|| load().map(Arc::new))
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

static DATASET: DatasetCache = DatasetCache::new();

/// Process-wide memoized load. Whichever source first loads successfully is
/// what every later call sees; nothing is refetched afterwards.
pub fn cached_dataset(source: &DataSource) -> LoadResult<Arc<SalaryDataset>> {
    if DATASET.is_loaded() {
        log::debug!("Serving salary data from cache");
    }
    DATASET.get_or_load(|| load_source(source))
}
