//! # Paddock - Formula 1 results loader
//!
//! Loads race-result CSV files into SQLite and computes championship standings.
//!
//! Paddock provides:
//! - A configurable position-to-points table
//! - SQLite-backed entity store for teams, drivers, races and results
//! - CSV ingestion with on-demand entity creation and replace-on-reload results
//! - Driver and constructor standings with a deterministic tie-break

pub mod config;
pub mod entity;
pub mod event;
pub mod ingest;
pub mod points;
pub mod recorder;
pub mod season;
pub mod standings;
pub mod storage;
pub mod ui;

use std::path::PathBuf;

// Re-exports for convenient access
pub use entity::{Driver, EntityKind, Race, RaceResult, Team};
pub use event::{EventSink, IngestEvent, NullSink};
pub use ingest::{BatchSummary, FileSummary, RowPolicy};
pub use points::PointsTable;
pub use recorder::ResultRecorder;
pub use season::Season;
pub use standings::{Standing, StandingsReporter};
pub use storage::SqliteStore;

/// Result type alias for Paddock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Paddock operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid position {value:?} in {} (line {line})", .file.display())]
    Parse {
        file: PathBuf,
        line: u64,
        value: String,
    },

    #[error("Missing {field} in {} (line {line})", .file.display())]
    MissingField {
        file: PathBuf,
        line: u64,
        field: String,
    },

    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    #[error("Input directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to load schema from {}: {source}", .path.display())]
    SchemaLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether a row-level skip policy may swallow this error
    pub fn is_row_error(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::MissingField { .. })
    }
}
