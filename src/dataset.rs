//! CSV loader for the daily bike rental dataset.

use crate::analyzers::types::{REQUIRED_COLUMNS, RawRecord};
use crate::error::DataLoadError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Reads every row of the dataset at `path`.
///
/// # Errors
///
/// Returns [`DataLoadError`] if the file cannot be opened, its header lacks
/// any of [`REQUIRED_COLUMNS`], a row does not parse, or the summed `cnt`
/// column does not fit in a `u64`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file, path)?;
    info!(rows = records.len(), "Dataset loaded");
    Ok(records)
}

/// Reads rows from any reader; `path` is only used in error messages.
///
/// The sum of `cnt` over the returned rows always fits in a `u64`, so any
/// grouping of them can be summed without overflow.
pub fn read_records<R: Read>(reader: R, path: &Path) -> Result<Vec<RawRecord>, DataLoadError> {
    let malformed = |source| DataLoadError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(malformed)?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }
    debug!(columns = headers.len(), "Dataset header validated");

    let mut records = Vec::new();
    let mut total: u64 = 0;
    for result in rdr.deserialize() {
        let record: RawRecord = result.map_err(malformed)?;
        total = total
            .checked_add(record.cnt)
            .ok_or_else(|| DataLoadError::CountOverflow {
                path: path.to_path_buf(),
                row: records.len() + 1,
            })?;
        records.push(record);
    }

    Ok(records)
}
