//! Ingestion events
//!
//! The loader never prints. It reports what it did through an [`EventSink`],
//! and the caller decides whether and how to display it.

use std::path::PathBuf;
use crate::ingest::FileSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    FileStarted {
        path: PathBuf,
    },
    FileLoaded(FileSummary),
    TeamCreated {
        name: String,
    },
    DriverCreated {
        name: String,
        nationality: String,
    },
    RaceCreated {
        grand_prix: String,
        date: String,
        circuit: String,
    },
    /// A malformed row was dropped under the skip policy
    RowSkipped {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    /// The input directory held no CSV files
    NoFilesFound {
        dir: PathBuf,
    },
}

impl IngestEvent {
    pub fn is_warning(&self) -> bool {
        matches!(self, IngestEvent::RowSkipped { .. } | IngestEvent::NoFilesFound { .. })
    }
}

/// Receiver for ingestion events
pub trait EventSink {
    fn emit(&mut self, event: IngestEvent);
}

impl EventSink for Vec<IngestEvent> {
    fn emit(&mut self, event: IngestEvent) {
        self.push(event);
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: IngestEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<IngestEvent> = Vec::new();
        sink.emit(IngestEvent::TeamCreated { name: "Haas".into() });
        sink.emit(IngestEvent::NoFilesFound { dir: PathBuf::from("data") });

        assert_eq!(sink.len(), 2);
        assert!(!sink[0].is_warning());
        assert!(sink[1].is_warning());
    }
}
