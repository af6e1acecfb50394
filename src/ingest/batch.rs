//! Directory ingestion
//!
//! Files are processed in file name order, which decides which row wins when
//! several files carry the same race/driver/team triple: the last one.

use std::path::{Path, PathBuf};
use glob::{MatchOptions, Pattern};
use crate::event::{EventSink, IngestEvent};
use crate::ingest::BatchSummary;
use crate::season::Season;
use crate::{Error, Result};

pub const CSV_EXTENSION: &str = "csv";

/// List the `.csv` files directly inside `dir`, sorted by file name
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }

    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        CSV_EXTENSION
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let entries = glob::glob_with(&pattern, options).map_err(|e| {
        Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))
    })?;

    let mut files = readable_paths(entries)?;
    files.retain(|path| path.is_file());
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Collect matched paths, failing on the first entry that could not be read
fn readable_paths<I, E>(entries: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = std::result::Result<PathBuf, E>>,
    E: Into<std::io::Error>,
{
    entries
        .into_iter()
        .map(|entry| entry.map_err(|e| Error::Io(e.into())))
        .collect()
}

impl<'a> Season<'a> {
    /// Ingest every CSV file in `dir`. An empty directory is reported through
    /// the sink and is not an error.
    pub fn ingest_directory(&self, dir: &Path, sink: &mut dyn EventSink) -> Result<BatchSummary> {
        let files = csv_files(dir)?;
        let mut summary = BatchSummary::default();

        if files.is_empty() {
            tracing::debug!("No CSV files found in {}", dir.display());
            sink.emit(IngestEvent::NoFilesFound { dir: dir.to_path_buf() });
            return Ok(summary);
        }

        tracing::info!("Ingesting {} files from {}", files.len(), dir.display());
        for path in files {
            sink.emit(IngestEvent::FileStarted { path: path.clone() });
            summary.files.push(self.ingest_file(&path, sink)?);
        }

        Ok(summary)
    }
}
