use thiserror::Error;

/// Everything that can go wrong between "where is the data" and a usable
/// [`SalaryDataset`](crate::data::model::SalaryDataset).
#[derive(Error, Debug)]
pub enum LoadError {
    /// Transport-level failure talking to the remote host.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `row` is 1-based and counts data rows only (the header is row 0).
    #[error("CSV row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("CSV row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type LoadResult<T> = Result<T, LoadError>;
