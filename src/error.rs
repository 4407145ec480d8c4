//! Error types for loading the dataset and mapping labels.

use std::path::PathBuf;

/// Failure to turn the input file into [`RawRecord`](crate::analyzers::types::RawRecord)s.
///
/// Always fatal: the input is a static local artifact, so there is nothing to retry.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {} is missing required columns: {}", .path.display(), .missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("malformed row in dataset {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("rental counts in dataset {} overflow a u64 total at data row {row}", .path.display())]
    CountOverflow { path: PathBuf, row: usize },
}

/// A code outside the fixed lookup table.
///
/// Non-fatal during aggregation: the group is kept with no label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelMappingError {
    #[error("unknown weather code {0} (expected 1-4)")]
    UnknownWeatherCode(i64),
}
