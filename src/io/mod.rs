mod csv_io;
mod remote;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::models::Dataset;

pub use csv_io::{read_csv, read_csv_from_bytes, to_csv, write_csv};
pub use remote::fetch;

/// Public location of the salary dataset.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

/// Suggested file name for exported subsets.
pub const EXPORT_FILE_NAME: &str = "salarios_dados_filtrados.csv";

/// MIME type of exported subsets.
pub const EXPORT_MIME: &str = "text/csv";

/// What to do with a row that fails to parse or validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Abort the whole load on the first malformed row.
    #[default]
    Strict,
    /// Skip malformed rows and keep loading.
    Lenient,
}

impl std::str::FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(RowPolicy::Strict),
            "lenient" => Ok(RowPolicy::Lenient),
            _ => Err(format!("Unknown row policy: '{s}'. Use strict or lenient")),
        }
    }
}

/// Options applied to every load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub row_policy: RowPolicy,
    /// Timeout for remote sources
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            row_policy: RowPolicy::Strict,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Where the CSV document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Build the reader for this source.
    pub fn reader(&self, options: &LoadOptions) -> Box<dyn DatasetReader> {
        match self {
            DataSource::Path(path) => Box::new(CsvFile {
                path: path.clone(),
                row_policy: options.row_policy,
            }),
            DataSource::Url(url) => Box::new(RemoteCsv {
                url: url.clone(),
                timeout: options.timeout,
                row_policy: options.row_policy,
            }),
        }
    }
}

impl std::str::FromStr for DataSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(DataSource::Url(s.to_string()))
        } else {
            Ok(DataSource::Path(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => write!(f, "{u}"),
        }
    }
}

/// Trait for reading the salary dataset from a source.
pub trait DatasetReader {
    fn read(&self) -> Result<Dataset, LoadError>;
}

/// CSV file on the local filesystem.
pub struct CsvFile {
    pub path: PathBuf,
    pub row_policy: RowPolicy,
}

impl DatasetReader for CsvFile {
    fn read(&self) -> Result<Dataset, LoadError> {
        read_csv(&self.path, self.row_policy)
    }
}

/// CSV document fetched over HTTP(S).
pub struct RemoteCsv {
    pub url: String,
    pub timeout: Duration,
    pub row_policy: RowPolicy,
}

impl DatasetReader for RemoteCsv {
    fn read(&self) -> Result<Dataset, LoadError> {
        let bytes = fetch(&self.url, self.timeout)?;
        read_csv_from_bytes(&bytes, &url_stem(&self.url), self.row_policy)
    }
}

/// Load the dataset once from the given source.
pub fn load_dataset(source: &DataSource, options: &LoadOptions) -> Result<Dataset, LoadError> {
    tracing::info!(%source, policy = ?options.row_policy, "loading dataset");
    let dataset = source.reader(options).read()?;
    tracing::info!(
        rows = dataset.len(),
        skipped = dataset.skipped_rows(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn url_stem(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
    let stem = last.strip_suffix(".csv").unwrap_or(last);
    if stem.is_empty() {
        "remote".to_string()
    } else {
        stem.to_string()
    }
}
