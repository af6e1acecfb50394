use crate::event::{EventSink, IngestEvent};
use crate::ui::output;

/// Prints ingestion events as they happen
#[derive(Debug, Default)]
pub struct ConsoleSink {
    pub quiet: bool,
    warnings: usize,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, warnings: 0 }
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: IngestEvent) {
        if event.is_warning() {
            self.warnings += 1;
        }

        match event {
            IngestEvent::RowSkipped { reason, .. } => output::warn(&format!("Row skipped: {}", reason)),
            IngestEvent::NoFilesFound { dir } => {
                output::warn(&format!("No CSV files found in {}", dir.display()))
            }
            _ if self.quiet => {}
            IngestEvent::FileStarted { path } => output::file_started(&path.display().to_string()),
            IngestEvent::FileLoaded(summary) => output::file_loaded(
                &summary.path.display().to_string(),
                summary.rows_loaded,
                summary.rows_skipped,
            ),
            IngestEvent::TeamCreated { name } => output::created("Team", &name, None),
            IngestEvent::DriverCreated { name, nationality } => {
                output::created("Driver", &name, Some(nationality.as_str()))
            }
            IngestEvent::RaceCreated { grand_prix, date, circuit } => {
                output::created("Race", &grand_prix, Some(format!("{}, {}", date, circuit).as_str()))
            }
        }
    }
}
