//! CSV ingestion
//!
//! - `csv_file`: one file, row by row, creating entities on demand
//! - `batch`: every `.csv` file of a directory in file name order
//!
//! Both are exposed as methods on [`crate::Season`].

pub mod batch;
pub mod csv_file;

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

pub use batch::csv_files;

/// What to do with a row whose position is not an integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Stop the whole run on the first malformed row
    #[default]
    Abort,
    /// Drop the row, report a warning and keep going
    Skip,
}

impl RowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowPolicy::Abort => "abort",
            RowPolicy::Skip => "skip",
        }
    }
}

impl std::fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of ingesting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

impl FileSummary {
    pub fn new(path: PathBuf) -> Self {
        Self { path, rows_loaded: 0, rows_skipped: 0 }
    }
}

/// Outcome of ingesting a directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files: Vec<FileSummary>,
}

impl BatchSummary {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    pub fn rows_loaded(&self) -> usize {
        self.files.iter().map(|f| f.rows_loaded).sum()
    }

    pub fn rows_skipped(&self) -> usize {
        self.files.iter().map(|f| f.rows_skipped).sum()
    }
}
