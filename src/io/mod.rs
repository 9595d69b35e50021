pub mod output;
pub mod writers;

pub use output::{create_writer, OutputFormat, OutputWriter, Report, ReportBody, RoiEntry};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::input(path, e.to_string()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Load a JSON array of records, e.g. `RoiCalculation` or `Process`
pub fn load_json_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = read_file(path)?;
    let records: Vec<T> =
        serde_json::from_str(&content).map_err(|e| Error::input(path, e.to_string()))?;
    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
